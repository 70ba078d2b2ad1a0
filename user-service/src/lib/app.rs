use std::sync::Arc;

use axum::Router;
use config::ConfigError;

use crate::authentication::service::AuthService;
use crate::config::Config;
use crate::domain::user::service::UserService;
use crate::inbound::http::router::create_router;
use crate::inbound::http::router::AppState;
use crate::outbound::security::password::Argon2CredentialHasher;
use crate::outbound::security::token::JwtTokenService;
use crate::user::ports::UserRepository;

/// Wire the domain services around `repository`.
///
/// # Errors
/// * `ConfigError::Message` - Hash cost or token lifetime unusable
pub fn build_state<UR>(repository: Arc<UR>, config: &Config) -> Result<AppState, ConfigError>
where
    UR: UserRepository,
{
    let hasher = Arc::new(
        Argon2CredentialHasher::new(&config.password)
            .map_err(|e| ConfigError::Message(format!("password.hash_cost: {}", e)))?,
    );
    let token_service = Arc::new(JwtTokenService::new(&config.jwt)?);

    let auth_service = Arc::new(AuthService::new(
        Arc::clone(&repository),
        hasher,
        Arc::clone(&token_service),
    ));
    let user_service = Arc::new(UserService::new(repository));

    Ok(AppState {
        auth_service,
        user_service,
        token_service,
    })
}

/// Build the HTTP application on top of `repository`.
pub fn build_router<UR>(repository: Arc<UR>, config: &Config) -> Result<Router, ConfigError>
where
    UR: UserRepository,
{
    Ok(create_router(build_state(repository, config)?))
}
