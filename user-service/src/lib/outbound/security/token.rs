use auth::Claims;
use auth::JwtError;
use auth::JwtHandler;
use config::ConfigError;

use crate::authentication::errors::AuthError;
use crate::authentication::models::Identity;
use crate::authentication::ports::TokenService;
use crate::config::JwtConfig;
use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;

const ROLE_CLAIM: &str = "role";

/// HS256 access tokens carrying `sub`, `role`, `iat` and `exp`.
pub struct JwtTokenService {
    handler: JwtHandler,
    lifetime: chrono::Duration,
}

impl JwtTokenService {
    /// Build a token service from the signing secret and token lifetime.
    ///
    /// # Errors
    /// * `ConfigError::Message` - Lifetime unparseable or out of range
    pub fn new(config: &JwtConfig) -> Result<Self, ConfigError> {
        let lifetime = chrono::Duration::from_std(config.lifetime()?)
            .map_err(|e| ConfigError::Message(format!("jwt.expires_in: {}", e)))?;

        Ok(Self {
            handler: JwtHandler::new(config.secret.as_bytes()),
            lifetime,
        })
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, subject: &UserId, role: Role) -> Result<String, AuthError> {
        let claims = Claims::for_subject(subject, self.lifetime)
            .and_then(|claims| claims.try_with_extra(ROLE_CLAIM, role))
            .map_err(|e| AuthError::TokenGenerationFailed(e.to_string()))?;

        self.handler
            .encode(&claims)
            .map_err(|e| AuthError::TokenGenerationFailed(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        let claims: Claims = self.handler.decode(token).map_err(|e| match e {
            JwtError::TokenExpired => AuthError::InvalidToken("token expired".to_string()),
            other => AuthError::InvalidToken(other.to_string()),
        })?;

        let user_id = claims
            .sub
            .as_deref()
            .ok_or_else(|| AuthError::InvalidToken("missing 'sub' claim".to_string()))
            .and_then(|sub| {
                UserId::from_string(sub).map_err(|e| AuthError::InvalidToken(e.to_string()))
            })?;

        let role = claims
            .extra_as::<Role>(ROLE_CLAIM)
            .ok_or_else(|| AuthError::InvalidToken("missing or unknown 'role' claim".to_string()))?;

        Ok(Identity { user_id, role })
    }
}
