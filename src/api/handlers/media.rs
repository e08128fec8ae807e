use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::api::response::{ApiError, NOT_FOUND};
use crate::object_store::ObjectStoreError;
use crate::AppState;

/// Serve an image written by the local object store.
/// Route: GET /media/*path (only mounted for the local backend)
pub async fn serve_media(
    State(state): State<Arc<AppState>>,
    Path(path): Path<String>,
) -> Result<Response, ApiError> {
    let store = state
        .media
        .as_ref()
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;

    let data = store.get(&path).await.map_err(|e| match e {
        ObjectStoreError::NotFound(_) | ObjectStoreError::InvalidKey(_) => {
            ApiError::not_found(NOT_FOUND)
        }
        _ => super::internal_error(&state, "serve_media", e),
    })?;

    let mime = mime_guess::from_path(&path).first_or_octet_stream();

    let mut response = (StatusCode::OK, data).into_response();
    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_TYPE,
        mime.as_ref()
            .parse()
            .unwrap_or(HeaderValue::from_static("application/octet-stream")),
    );

    // Re-enrollment overwrites the object in place
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    Ok(response)
}
