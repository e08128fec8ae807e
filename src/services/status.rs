use serde::Serialize;

use super::ServiceError;
use crate::storage::models::{EnrollmentRecord, ProfileRecord};
use crate::storage::Database;

/// Where a student is in the enrollment flow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrollmentStatus {
    #[serde(rename = "profileSaved")]
    pub profile_saved: bool,
    #[serde(rename = "photoEnrolled")]
    pub photo_enrolled: bool,
    pub student_info: Option<ProfileRecord>,
    pub enrollment: Option<EnrollmentRecord>,
}

impl EnrollmentStatus {
    pub fn from_records(
        student_info: Option<ProfileRecord>,
        enrollment: Option<EnrollmentRecord>,
    ) -> Self {
        let photo_enrolled = enrollment
            .as_ref()
            .is_some_and(|e| e.url_frontal.is_some());

        Self {
            profile_saved: student_info.is_some(),
            photo_enrolled,
            student_info,
            enrollment,
        }
    }
}

/// Reads both tables for a user and derives the flow flags.
pub struct StatusService {
    db: Database,
}

impl StatusService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Two independent point lookups; a missing row is `None`, never an error.
    pub fn status(&self, user_id: &str) -> Result<EnrollmentStatus, ServiceError> {
        let student_info = self.db.get_profile(user_id)?;
        let enrollment = self.db.get_enrollment(user_id)?;
        Ok(EnrollmentStatus::from_records(student_info, enrollment))
    }
}
