use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::authentication::models::LoginCommand;
use crate::authentication::models::Password;
use crate::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::AuthSessionData;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

/// HTTP request body for login (raw JSON)
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    fn try_into_command(self) -> Result<LoginCommand, ApiError> {
        let email =
            EmailAddress::new(self.email).map_err(|e| ApiError::validation("email", e))?;
        let password =
            Password::for_login(self.password).map_err(|e| ApiError::validation("password", e))?;

        Ok(LoginCommand::new(email, password))
    }
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .auth_service
        .login(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::OK, session.into()))
}
