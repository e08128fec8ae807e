//! Inline image payloads (`data:image/...;base64,...`) as sent by the capture UI.

use base64::Engine;
use bytes::Bytes;
use thiserror::Error;

/// Prefix every accepted inline image must start with.
pub const INLINE_IMAGE_PREFIX: &str = "data:image";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("not an inline image data URI")]
    NotInlineImage,
    #[error("inline image is not base64 encoded")]
    NotBase64,
    #[error("inline image payload is empty")]
    Empty,
    #[error("invalid base64 payload: {0}")]
    Decode(String),
}

/// A decoded inline image.
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data: Bytes,
}

impl InlineImage {
    /// Parse a `data:image/<subtype>;base64,<payload>` URI.
    pub fn parse(uri: &str) -> Result<Self, ImageError> {
        if !uri.starts_with(INLINE_IMAGE_PREFIX) {
            return Err(ImageError::NotInlineImage);
        }

        let (header, payload) = uri
            .split_once(',')
            .ok_or(ImageError::NotInlineImage)?;

        // header: data:image/png;base64 (parameters may precede ;base64)
        let media = &header["data:".len()..];
        let mut params = media.split(';');
        let mime_type = params.next().unwrap_or_default().trim().to_lowercase();
        if !params.any(|p| p.trim().eq_ignore_ascii_case("base64")) {
            return Err(ImageError::NotBase64);
        }

        let mime_type = if mime_type.starts_with("image/") && mime_type.len() > "image/".len() {
            mime_type
        } else {
            // bare "data:image;base64," carries no subtype
            "image/jpeg".to_string()
        };

        let payload: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        if payload.is_empty() {
            return Err(ImageError::Empty);
        }

        let data = base64::engine::general_purpose::STANDARD
            .decode(payload.as_bytes())
            .map_err(|e| ImageError::Decode(e.to_string()))?;

        if data.is_empty() {
            return Err(ImageError::Empty);
        }

        Ok(Self {
            mime_type,
            data: Bytes::from(data),
        })
    }

    /// Preferred file extension for the image's MIME type.
    pub fn extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpg",
            "image/png" => "png",
            "image/webp" => "webp",
            "image/gif" => "gif",
            "image/bmp" => "bmp",
            other => mime_guess::get_mime_extensions_str(other)
                .and_then(|exts| exts.first().copied())
                .unwrap_or("img"),
        }
    }

    /// Re-encode as a data URI.
    pub fn to_data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.data)
        )
    }
}
