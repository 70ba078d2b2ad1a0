use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::authentication::models::Password;
use crate::authentication::models::RegisterCommand;
use crate::authentication::ports::AuthServicePort;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserName;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::AuthSessionData;
use crate::inbound::http::handlers::JsonBody;
use crate::inbound::http::router::AppState;

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: String,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterCommand, ApiError> {
        let email =
            EmailAddress::new(self.email).map_err(|e| ApiError::validation("email", e))?;
        let name = UserName::new(self.name).map_err(|e| ApiError::validation("name", e))?;
        let password =
            Password::new(self.password).map_err(|e| ApiError::validation("password", e))?;

        Ok(RegisterCommand::new(email, name, password))
    }
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<ApiSuccess<AuthSessionData>, ApiError> {
    let command = req.try_into_command()?;

    state
        .auth_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}
