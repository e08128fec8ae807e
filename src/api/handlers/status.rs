use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use super::internal_error;
use crate::api::response::{ApiError, AppQuery, Envelope};
use crate::services::validation::{validate_user_id, UserQuery};
use crate::services::EnrollmentStatus;
use crate::AppState;

/// GET /status?userId=
pub async fn status(
    State(state): State<Arc<AppState>>,
    AppQuery(query): AppQuery<UserQuery>,
) -> Result<Json<Envelope<EnrollmentStatus>>, ApiError> {
    let user_id = validate_user_id(query.user_id.as_ref())?;

    let status = state
        .status
        .status(&user_id)
        .map_err(|e| internal_error(&state, "status", e))?;

    Ok(Envelope::success(status))
}
