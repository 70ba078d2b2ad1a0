use axum::http::StatusCode;
use serde::Serialize;

use crate::inbound::http::handlers::ApiSuccess;

#[derive(Debug, Serialize, PartialEq)]
pub struct HealthResponse {
    pub ok: bool,
}

pub async fn health() -> ApiSuccess<HealthResponse> {
    ApiSuccess::new(StatusCode::OK, HealthResponse { ok: true })
}
