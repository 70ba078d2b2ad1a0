use async_trait::async_trait;

use crate::authentication::errors::AuthError;
use crate::authentication::models::AuthSession;
use crate::authentication::models::Identity;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::Password;
use crate::authentication::models::RegisterCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

/// Port for registration and login.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and sign it in.
    ///
    /// The first account created in an empty store becomes `Admin`; every later
    /// one is `User`.
    ///
    /// # Arguments
    /// * `command` - Validated email, name and password
    ///
    /// # Returns
    /// Access token and public projection of the new user
    ///
    /// # Errors
    /// * `EmailAlreadyRegistered` - Email is already taken
    /// * `HashingFailed` / `TokenGenerationFailed` - Crypto failure
    /// * `User` - Store failure
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError>;

    /// Exchange email and password for an access token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password (indistinguishable)
    /// * `TokenGenerationFailed` - Token could not be signed
    /// * `User` - Store failure
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError>;
}

/// Salted, slow, one-way password hashing.
///
/// Both operations are CPU-bound; implementations must not block the async
/// scheduler while running them.
#[async_trait]
pub trait CredentialHasher: Send + Sync + 'static {
    /// Hash a password for storage. The salt is embedded in the digest.
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    async fn hash(&self, password: &Password) -> Result<String, AuthError>;

    /// Check a password against a stored digest.
    ///
    /// A malformed digest never matches.
    async fn verify(&self, password: &Password, digest: &str) -> bool;
}

/// Issues and verifies signed, expiring bearer tokens.
///
/// Stateless: a token is valid until it expires or the signing secret changes.
pub trait TokenService: Send + Sync + 'static {
    /// Sign a token carrying `subject` and `role`.
    ///
    /// # Errors
    /// * `TokenGenerationFailed` - Token could not be signed
    fn issue(&self, subject: &UserId, role: Role) -> Result<String, AuthError>;

    /// Verify a token and recover the identity it carries.
    ///
    /// # Errors
    /// * `InvalidToken` - Bad signature, malformed payload or expired
    fn verify(&self, token: &str) -> Result<Identity, AuthError>;
}
