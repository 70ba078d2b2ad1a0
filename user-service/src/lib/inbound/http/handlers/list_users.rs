use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::handlers::UserData;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserServicePort;

#[derive(Debug, Serialize, PartialEq)]
pub struct UserListResponse {
    pub users: Vec<UserData>,
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<UserListResponse>, ApiError> {
    let users = state.user_service.list().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UserListResponse {
            users: users.into_iter().map(UserData::from).collect(),
        },
    ))
}
