use std::sync::Arc;

use async_trait::async_trait;
use auth::PasswordError;
use auth::PasswordHasher;

use crate::authentication::errors::AuthError;
use crate::authentication::models::Password;
use crate::authentication::ports::CredentialHasher;
use crate::config::PasswordConfig;

/// Argon2id credential hasher.
///
/// Hashing runs on tokio's blocking pool so slow hashes never stall other requests.
pub struct Argon2CredentialHasher {
    hasher: Arc<PasswordHasher>,
}

impl Argon2CredentialHasher {
    /// Build a hasher using the configured cost factor.
    ///
    /// # Errors
    /// * `InvalidCost` - Cost factor out of range
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        Ok(Self {
            hasher: Arc::new(PasswordHasher::new(config.hash_cost)?),
        })
    }
}

#[async_trait]
impl CredentialHasher for Argon2CredentialHasher {
    async fn hash(&self, password: &Password) -> Result<String, AuthError> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();

        tokio::task::spawn_blocking(move || hasher.hash(password.as_str()))
            .await
            .map_err(|e| AuthError::HashingFailed(e.to_string()))?
            .map_err(|e| AuthError::HashingFailed(e.to_string()))
    }

    async fn verify(&self, password: &Password, digest: &str) -> bool {
        let hasher = Arc::clone(&self.hasher);
        let password = password.clone();
        let digest = digest.to_string();

        match tokio::task::spawn_blocking(move || hasher.verify(password.as_str(), &digest)).await
        {
            Ok(matches) => matches,
            Err(e) => {
                tracing::error!(error = %e, "Password verification task failed");
                false
            }
        }
    }
}
