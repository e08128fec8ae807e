use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use super::internal_error;
use crate::api::response::{ApiError, AppJson, AppQuery, Envelope, ErrorBody, NOT_FOUND};
use crate::services::validation::{validate_enroll, validate_user_id, EnrollRequest, UserQuery};
use crate::AppState;

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct EnrollResponse {
    pub url_frontal: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /enroll
pub async fn enroll(
    State(state): State<Arc<AppState>>,
    AppJson(req): AppJson<EnrollRequest>,
) -> Result<Json<Envelope<EnrollResponse>>, ApiError> {
    let input = validate_enroll(&req)?;

    let enrolled = state
        .enrollments
        .enroll(input)
        .await
        .map_err(|e| internal_error(&state, "enroll", e))?;

    Ok(Envelope::success(EnrollResponse {
        url_frontal: enrolled.url_frontal,
    }))
}

/// GET /getEnrollment?userId=
///
/// A missing row is `{"status": "error", "error": "not_found"}` with 200.
pub async fn get_enrollment(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<UserQuery>,
) -> Result<Response, ApiError> {
    let user_id = validate_user_id(query.user_id.as_ref())?;

    let summary = state
        .enrollments
        .get_enrollment(&user_id)
        .map_err(|e| internal_error(&state, "get_enrollment", e))?;

    Ok(match summary {
        Some(summary) => Envelope::success(summary).into_response(),
        None => ErrorBody::new(NOT_FOUND).into_response(),
    })
}
