use axum::Json;
use serde::Serialize;

use crate::api::response::Envelope;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub health: String,
    pub version: String,
}

pub async fn health() -> Json<Envelope<HealthResponse>> {
    Envelope::success(HealthResponse {
        health: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
