use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::services::ValidationError;

// ============================================================================
// Response status
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Error,
    Success,
}

// ============================================================================
// Success envelope
// ============================================================================

/// `{"status": "success", ...body}` with the body's fields inlined.
#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(flatten)]
    pub body: T,
}

impl<T: Serialize> Envelope<T> {
    pub fn success(body: T) -> Json<Envelope<T>> {
        Json(Envelope {
            status: ResponseStatus::Success,
            body,
        })
    }
}

// ============================================================================
// Error envelope
// ============================================================================

/// `{"status": "error", "error": "<code or message>"}`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: ResponseStatus,
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Json<ErrorBody> {
        Json(ErrorBody {
            status: ResponseStatus::Error,
            error: error.into(),
        })
    }
}

/// Error code for lookups that found nothing. Sent with 200, not 404.
pub const NOT_FOUND: &str = "not_found";

// ============================================================================
// Unified error type for handlers
// ============================================================================

/// Either a client error (4xx, with a machine-readable code) or an internal
/// error (5xx, with whatever message the handler chose to expose).
#[derive(Debug)]
pub enum ApiError {
    Fail(StatusCode, String),
    Error(StatusCode, String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Fail(code, error) | ApiError::Error(code, error) => {
                (code, ErrorBody::new(error)).into_response()
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::bad_request(e.code())
    }
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::BAD_REQUEST, code.into())
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::NOT_FOUND, code.into())
    }

    pub fn payload_too_large(code: impl Into<String>) -> Self {
        ApiError::Fail(StatusCode::PAYLOAD_TOO_LARGE, code.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Error(StatusCode::INTERNAL_SERVER_ERROR, message.into())
    }
}

// ============================================================================
// Custom extractors (reject with ApiError)
// ============================================================================

/// Drop-in replacement for `axum::Json` that rejects with the error envelope.
pub struct AppJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, ApiError> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(AppJson(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    Err(ApiError::payload_too_large("payload_too_large"))
                } else {
                    Err(ApiError::bad_request("invalid_body"))
                }
            }
        }
    }
}

/// Drop-in replacement for `axum::extract::Query` that rejects with the error envelope.
pub struct AppQuery<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequestParts<S> for AppQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, ApiError> {
        let query = parts.uri.query().unwrap_or_default();
        serde_qs::from_str(query).map(AppQuery).map_err(|e| {
            tracing::debug!(error = %e, "Rejected query string");
            ApiError::bad_request("invalid_query")
        })
    }
}
