use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use super::internal_error;
use crate::api::response::{ApiError, AppJson, Envelope};
use crate::services::validation::{validate_profile, ProfileRequest};
use crate::AppState;

/// POST /saveStudentInfo
pub async fn save_student_info(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<ProfileRequest>,
) -> Result<Json<Envelope<serde_json::Map<String, serde_json::Value>>>, ApiError> {
    let input = validate_profile(&req)?;

    state
        .profiles
        .save_profile(input)
        .map_err(|e| internal_error(&state, "save_student_info", e))?;

    Ok(Envelope::success(serde_json::Map::new()))
}
