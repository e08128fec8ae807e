//! Request validation. Pure functions: raw request in, validated input or a
//! machine-readable [`ValidationError`] out.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::image::InlineImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing_userId")]
    MissingUserId,
    #[error("missing_usn")]
    MissingUsn,
    #[error("invalid_image")]
    InvalidImage,
    #[error("missing_fields")]
    MissingFields,
}

impl ValidationError {
    /// Error code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingUserId => "missing_userId",
            ValidationError::MissingUsn => "missing_usn",
            ValidationError::InvalidImage => "invalid_image",
            ValidationError::MissingFields => "missing_fields",
        }
    }
}

// ============================================================================
// Raw requests
// ============================================================================

/// Body of `POST /enroll`. Every field is optional and untyped at the wire
/// level, so a missing or oddly typed field is reported as a validation
/// error (or coerced, see [`text`]), never as a parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub usn: Option<Value>,
    #[serde(default)]
    pub student_name: Option<Value>,
    #[serde(default)]
    pub student_branch: Option<Value>,
    #[serde(default)]
    pub student_section: Option<Value>,
    /// A non-string image is `invalid_image`.
    #[serde(default)]
    pub image: Option<Value>,
}

/// Body of `POST /saveStudentInfo`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub usn: Option<Value>,
    #[serde(default)]
    pub student_name: Option<Value>,
    #[serde(default)]
    pub student_branch: Option<Value>,
    #[serde(default)]
    pub student_section: Option<Value>,
}

/// Query of `GET /status` and `GET /getEnrollment`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default)]
    pub user_id: Option<String>,
}

// ============================================================================
// Validated inputs
// ============================================================================

#[derive(Debug, Clone)]
pub struct EnrollInput {
    pub user_id: String,
    /// As received; normalization happens in the enrollment service.
    pub usn: String,
    pub student_name: Option<String>,
    pub student_branch: Option<String>,
    pub student_section: Option<String>,
    pub image: InlineImage,
}

#[derive(Debug, Clone)]
pub struct ProfileInput {
    pub user_id: String,
    pub usn: String,
    pub student_name: String,
    pub student_branch: String,
    pub student_section: String,
}

// ============================================================================
// Validators
// ============================================================================

/// A field is present when it has at least one non-whitespace character.
fn present(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty()).cloned()
}

/// Text value of a JSON body field. Numbers and booleans are taken in their
/// JSON spelling (`7` becomes `"7"`); null, arrays and objects count as absent.
fn text(value: Option<&Value>) -> Option<String> {
    let raw = match value? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    present(Some(&raw))
}

pub fn validate_user_id(user_id: Option<&String>) -> Result<String, ValidationError> {
    present(user_id).ok_or(ValidationError::MissingUserId)
}

pub fn validate_enroll(req: &EnrollRequest) -> Result<EnrollInput, ValidationError> {
    let user_id = text(req.user_id.as_ref()).ok_or(ValidationError::MissingUserId)?;
    let usn = text(req.usn.as_ref()).ok_or(ValidationError::MissingUsn)?;

    let image = match req.image.as_ref() {
        Some(serde_json::Value::String(uri)) => {
            InlineImage::parse(uri).map_err(|_| ValidationError::InvalidImage)?
        }
        _ => return Err(ValidationError::InvalidImage),
    };

    Ok(EnrollInput {
        user_id,
        usn,
        student_name: text(req.student_name.as_ref()),
        student_branch: text(req.student_branch.as_ref()),
        student_section: text(req.student_section.as_ref()),
        image,
    })
}

pub fn validate_profile(req: &ProfileRequest) -> Result<ProfileInput, ValidationError> {
    let field = |v: &Option<Value>| text(v.as_ref()).ok_or(ValidationError::MissingFields);

    Ok(ProfileInput {
        user_id: field(&req.user_id)?,
        usn: field(&req.usn)?,
        student_name: field(&req.student_name)?,
        student_branch: field(&req.student_branch)?,
        student_section: field(&req.student_section)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const IMAGE: &str = "data:image/png;base64,aGVsbG8=";

    fn enroll_request() -> EnrollRequest {
        EnrollRequest {
            user_id: Some("u1".into()),
            usn: Some(" ab23cs045 ".into()),
            image: Some(IMAGE.into()),
            ..Default::default()
        }
    }

    fn profile_request() -> ProfileRequest {
        ProfileRequest {
            user_id: Some("u1".into()),
            usn: Some("AB23CS045".into()),
            student_name: Some("AB23CS045 John".into()),
            student_branch: Some("CSE".into()),
            student_section: Some("A".into()),
        }
    }

    #[test]
    fn enroll_accepts_minimal_request() {
        let input = validate_enroll(&enroll_request()).unwrap();
        assert_eq!(input.user_id, "u1");
        assert_eq!(input.usn, " ab23cs045 ");
        assert_eq!(input.student_name, None);
        assert_eq!(input.image.mime_type, "image/png");
    }

    #[test]
    fn enroll_checks_fields_in_order() {
        let mut req = enroll_request();
        req.user_id = None;
        req.usn = None;
        assert_eq!(
            validate_enroll(&req).unwrap_err(),
            ValidationError::MissingUserId
        );

        let mut req = enroll_request();
        req.usn = Some("   ".into());
        req.image = None;
        assert_eq!(validate_enroll(&req).unwrap_err(), ValidationError::MissingUsn);
    }

    #[test]
    fn enroll_rejects_bad_images() {
        for image in [
            None,
            Some(serde_json::json!(42)),
            Some(serde_json::json!("https://example.com/face.png")),
            Some(serde_json::json!("data:image/png;base64,")),
        ] {
            let mut req = enroll_request();
            req.image = image;
            assert_eq!(
                validate_enroll(&req).unwrap_err(),
                ValidationError::InvalidImage
            );
        }
    }

    #[test]
    fn enroll_blank_optionals_become_none() {
        let mut req = enroll_request();
        req.student_name = Some("".into());
        req.student_branch = Some("CSE".into());
        let input = validate_enroll(&req).unwrap();
        assert_eq!(input.student_name, None);
        assert_eq!(input.student_branch.as_deref(), Some("CSE"));
    }

    #[test]
    fn scalar_fields_are_taken_as_text() {
        let mut req = enroll_request();
        req.user_id = Some(serde_json::json!(42));
        req.student_name = Some(serde_json::json!(7));
        req.student_branch = Some(serde_json::json!(["CSE"]));
        let input = validate_enroll(&req).unwrap();
        assert_eq!(input.user_id, "42");
        assert_eq!(input.student_name.as_deref(), Some("7"));
        assert_eq!(input.student_branch, None);

        let mut req = profile_request();
        req.student_section = Some(serde_json::json!(3));
        assert_eq!(validate_profile(&req).unwrap().student_section, "3");

        let mut req = profile_request();
        req.student_section = Some(Value::Null);
        assert_eq!(
            validate_profile(&req).unwrap_err(),
            ValidationError::MissingFields
        );
    }

    #[test]
    fn profile_requires_every_field() {
        assert!(validate_profile(&profile_request()).is_ok());

        let mut req = profile_request();
        req.student_section = Some("".into());
        assert_eq!(
            validate_profile(&req).unwrap_err(),
            ValidationError::MissingFields
        );

        let mut req = profile_request();
        req.user_id = None;
        assert_eq!(
            validate_profile(&req).unwrap_err(),
            ValidationError::MissingFields
        );
    }

    #[test]
    fn user_id_must_be_non_blank() {
        assert_eq!(validate_user_id(None), Err(ValidationError::MissingUserId));
        assert_eq!(
            validate_user_id(Some(&" ".to_string())),
            Err(ValidationError::MissingUserId)
        );
        assert_eq!(validate_user_id(Some(&"u1".to_string())), Ok("u1".to_string()));
    }

    #[test]
    fn codes_match_display() {
        for err in [
            ValidationError::MissingUserId,
            ValidationError::MissingUsn,
            ValidationError::InvalidImage,
            ValidationError::MissingFields,
        ] {
            assert_eq!(err.code(), err.to_string());
        }
    }
}
