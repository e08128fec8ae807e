use std::sync::Arc;

use super::validation::EnrollInput;
use super::ServiceError;
use crate::object_store::{ObjectKey, ObjectStore};
use crate::storage::models::{EnrollmentSummary, EnrollmentUpsert};
use crate::storage::Database;

/// Namespace root for enrollment photos; each student gets `<root>/<USN>`.
pub const ENROLLMENT_NAMESPACE: &str = "face_enrollments";

/// Fixed object name for the frontal capture.
pub const FRONTAL_KEY: &str = "frontal";

/// Outcome of a successful enrollment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enrolled {
    pub usn: String,
    pub url_frontal: String,
}

/// Uploads the frontal photo and records it in the `enrollments` table.
pub struct EnrollmentService {
    db: Database,
    object_store: Arc<dyn ObjectStore>,
}

/// Canonical USN form: surrounding whitespace removed, uppercased.
pub fn normalize_usn(usn: &str) -> String {
    usn.trim().to_uppercase()
}

impl EnrollmentService {
    pub fn new(db: Database, object_store: Arc<dyn ObjectStore>) -> Self {
        Self { db, object_store }
    }

    /// Upload the image, then upsert the enrollment row.
    ///
    /// If the upload fails nothing is written. If the upsert fails the new
    /// object stays in storage (it only ever replaces the student's previous
    /// frontal photo).
    pub async fn enroll(&self, input: EnrollInput) -> Result<Enrolled, ServiceError> {
        let usn = normalize_usn(&input.usn);
        let key = ObjectKey::nested(ENROLLMENT_NAMESPACE, &usn, FRONTAL_KEY);

        let stored = self.object_store.upload(&key, &input.image).await?;

        let record = self.db.upsert_enrollment(EnrollmentUpsert {
            user_id: input.user_id,
            usn: usn.clone(),
            student_name: input.student_name,
            student_branch: input.student_branch,
            student_section: input.student_section,
            url_frontal: stored.url.clone(),
        })?;

        tracing::debug!(
            user_id = %record.user_id,
            usn = %usn,
            url = %stored.url,
            "Enrolled frontal photo"
        );

        Ok(Enrolled {
            usn,
            url_frontal: stored.url,
        })
    }

    /// Look up the public projection of a user's enrollment.
    pub fn get_enrollment(&self, user_id: &str) -> Result<Option<EnrollmentSummary>, ServiceError> {
        Ok(self.db.get_enrollment(user_id)?.map(|r| r.summary()))
    }
}
