mod enrollment;
mod health;
mod media;
mod profile;
mod status;

use std::fmt::Display;

use crate::api::response::ApiError;
use crate::AppState;

pub use enrollment::{enroll, get_enrollment};
pub use health::health;
pub use media::serve_media;
pub use profile::save_student_info;
pub use status::status;

/// Log an internal failure and turn it into a 500.
///
/// The raw error text reaches the client unless `EXPOSE_ERROR_DETAILS` is off.
fn internal_error(state: &AppState, operation: &str, e: impl Display) -> ApiError {
    tracing::error!(operation, error = %e, "Request failed");
    if state.config.expose_error_details {
        ApiError::internal(e.to_string())
    } else {
        ApiError::internal("internal_error")
    }
}
