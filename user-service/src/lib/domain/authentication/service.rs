use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::authentication::errors::AuthError;
use crate::authentication::models::AuthSession;
use crate::authentication::models::LoginCommand;
use crate::authentication::models::RegisterCommand;
use crate::authentication::ports::AuthServicePort;
use crate::authentication::ports::CredentialHasher;
use crate::authentication::ports::TokenService;
use crate::domain::user::models::Role;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;

/// Domain service implementation for registration and login.
///
/// Concrete implementation of AuthServicePort with dependency injection.
///
/// The duplicate-email check and the first-user count are separate reads
/// before the insert, so two concurrent registrations can both observe an
/// empty store and both become `Admin`. Duplicate emails are still rejected by
/// the repository's uniqueness check on insert.
pub struct AuthService<UR, CH, TS>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TS: TokenService,
{
    repository: Arc<UR>,
    hasher: Arc<CH>,
    tokens: Arc<TS>,
}

impl<UR, CH, TS> AuthService<UR, CH, TS>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TS: TokenService,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `hasher` - Credential hasher
    /// * `tokens` - Access token issuer
    pub fn new(repository: Arc<UR>, hasher: Arc<CH>, tokens: Arc<TS>) -> Self {
        Self {
            repository,
            hasher,
            tokens,
        }
    }

    fn session_for(&self, user: User) -> Result<AuthSession, AuthError> {
        let token = self.tokens.issue(&user.id, user.role)?;
        Ok(AuthSession {
            token,
            user: user.into(),
        })
    }
}

#[async_trait]
impl<UR, CH, TS> AuthServicePort for AuthService<UR, CH, TS>
where
    UR: UserRepository,
    CH: CredentialHasher,
    TS: TokenService,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AuthError> {
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            tracing::info!(email = %command.email, "Registration rejected: email already registered");
            return Err(AuthError::EmailAlreadyRegistered(command.email.to_string()));
        }

        let password_hash = self.hasher.hash(&command.password).await?;

        let existing_users = self.repository.count().await?;
        let role = if existing_users == 0 {
            Role::Admin
        } else {
            Role::User
        };

        let user = User {
            id: UserId::new(),
            email: command.email,
            name: command.name,
            role,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await.map_err(|e| match e {
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyRegistered(email),
            other => AuthError::User(other),
        })?;

        tracing::info!(
            user_id = %created_user.id,
            role = %created_user.role,
            bootstrap_admin = existing_users == 0,
            "User registered"
        );

        self.session_for(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, AuthError> {
        // Only hashed when the user exists, so response timing reveals whether
        // an email is registered.
        let Some(user) = self.repository.find_by_email(&command.email).await? else {
            tracing::info!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        if !self
            .hasher
            .verify(&command.password, &user.password_hash)
            .await
        {
            tracing::info!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        }

        tracing::debug!(user_id = %user.id, "User logged in");

        self.session_for(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authentication::models::Password;
    use crate::config::JwtConfig;
    use crate::config::PasswordConfig;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::UserName;
    use crate::outbound::repositories::memory::InMemoryUserRepository;
    use crate::outbound::security::password::Argon2CredentialHasher;
    use crate::outbound::security::token::JwtTokenService;

    type TestAuthService =
        AuthService<InMemoryUserRepository, Argon2CredentialHasher, JwtTokenService>;

    struct Fixture {
        repository: Arc<InMemoryUserRepository>,
        tokens: Arc<JwtTokenService>,
        service: TestAuthService,
    }

    fn fixture() -> Fixture {
        let repository = Arc::new(InMemoryUserRepository::new());
        let hasher = Arc::new(
            Argon2CredentialHasher::new(&PasswordConfig { hash_cost: 1 })
                .expect("Failed to build hasher"),
        );
        let tokens = Arc::new(
            JwtTokenService::new(&JwtConfig {
                secret: "test-secret-key-for-jwt-signing".to_string(),
                expires_in: "1h".to_string(),
            })
            .expect("Failed to build token service"),
        );
        let service = AuthService::new(Arc::clone(&repository), hasher, Arc::clone(&tokens));

        Fixture {
            repository,
            tokens,
            service,
        }
    }

    fn register_command(email: &str, name: &str, password: &str) -> RegisterCommand {
        RegisterCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            UserName::new(name.to_string()).unwrap(),
            Password::new(password.to_string()).unwrap(),
        )
    }

    fn login_command(email: &str, password: &str) -> LoginCommand {
        LoginCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Password::for_login(password.to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_first_user_is_admin() {
        let fixture = fixture();

        let session = fixture
            .service
            .register(register_command("admin@example.com", "Admin", "password123"))
            .await
            .expect("register failed");

        assert_eq!(session.user.role, Role::Admin);
        assert_eq!(session.user.email.as_str(), "admin@example.com");
        assert_eq!(session.user.name.as_str(), "Admin");
        assert!(!session.token.is_empty());
    }

    #[tokio::test]
    async fn test_register_later_users_are_plain_users() {
        let fixture = fixture();

        fixture
            .service
            .register(register_command("admin@example.com", "Admin", "password123"))
            .await
            .expect("register failed");

        for i in 0..3 {
            let session = fixture
                .service
                .register(register_command(
                    &format!("user{}@example.com", i),
                    "User",
                    "password123",
                ))
                .await
                .expect("register failed");
            assert_eq!(session.user.role, Role::User);
        }
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_plaintext() {
        let fixture = fixture();

        let session = fixture
            .service
            .register(register_command("user@example.com", "User", "password123"))
            .await
            .expect("register failed");

        let stored = fixture
            .repository
            .find_by_id(&session.user.id)
            .await
            .unwrap()
            .expect("user not stored");
        assert!(stored.password_hash.starts_with("$argon2id$"));
        assert!(!stored.password_hash.contains("password123"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let fixture = fixture();

        fixture
            .service
            .register(register_command("user@example.com", "User", "password123"))
            .await
            .expect("register failed");

        let result = fixture
            .service
            .register(register_command("user@example.com", "Other", "different-pass"))
            .await;

        assert!(matches!(result, Err(AuthError::EmailAlreadyRegistered(_))));
        assert_eq!(fixture.repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_email_is_case_sensitive() {
        let fixture = fixture();

        fixture
            .service
            .register(register_command("user@example.com", "User", "password123"))
            .await
            .expect("register failed");

        let session = fixture
            .service
            .register(register_command("User@example.com", "User", "password123"))
            .await
            .expect("register failed");
        assert_eq!(session.user.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_token_carries_identity() {
        let fixture = fixture();

        let session = fixture
            .service
            .register(register_command("admin@example.com", "Admin", "password123"))
            .await
            .expect("register failed");

        let identity = fixture.tokens.verify(&session.token).expect("invalid token");
        assert_eq!(identity.user_id, session.user.id);
        assert_eq!(identity.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_login_success() {
        let fixture = fixture();

        fixture
            .service
            .register(register_command("admin@example.com", "Admin", "password123"))
            .await
            .expect("register failed");
        let registered = fixture
            .service
            .register(register_command("user@example.com", "User", "password123"))
            .await
            .expect("register failed");

        let session = fixture
            .service
            .login(login_command("user@example.com", "password123"))
            .await
            .expect("login failed");

        assert_eq!(session.user, registered.user);
        let identity = fixture.tokens.verify(&session.token).expect("invalid token");
        assert_eq!(identity.user_id, registered.user.id);
        assert_eq!(identity.role, Role::User);
    }

    #[tokio::test]
    async fn test_login_wrong_password_and_unknown_email_look_the_same() {
        let fixture = fixture();

        fixture
            .service
            .register(register_command("user@example.com", "User", "password123"))
            .await
            .expect("register failed");

        let wrong_password = fixture
            .service
            .login(login_command("user@example.com", "wrong-password"))
            .await
            .unwrap_err();
        let unknown_email = fixture
            .service
            .login(login_command("nobody@example.com", "password123"))
            .await
            .unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_email, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_email.to_string());
        assert_eq!(wrong_password.to_string(), "Invalid credentials");
    }
}
