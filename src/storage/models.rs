use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `enrollments` table.
///
/// Only `url_frontal` is written by the capture flow. The other directional
/// URLs are part of the row but every enrollment write resets them to `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentRecord {
    pub user_id: String,
    pub usn: String,
    #[serde(default)]
    pub student_name: Option<String>,
    #[serde(default)]
    pub student_branch: Option<String>,
    #[serde(default)]
    pub student_section: Option<String>,
    #[serde(default)]
    pub url_frontal: Option<String>,
    #[serde(default)]
    pub url_left: Option<String>,
    #[serde(default)]
    pub url_right: Option<String>,
    #[serde(default)]
    pub url_up: Option<String>,
    #[serde(default)]
    pub url_down: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `student_info` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub user_id: String,
    pub usn: String,
    pub student_name: String,
    pub student_branch: String,
    pub student_section: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values written by an enrollment upsert.
///
/// Upserts use a replace policy: on conflict every column takes the value
/// given here, and the directional URLs other than `url_frontal` are cleared.
/// Nothing from the previous row survives except `created_at`.
#[derive(Debug, Clone)]
pub struct EnrollmentUpsert {
    pub user_id: String,
    pub usn: String,
    pub student_name: Option<String>,
    pub student_branch: Option<String>,
    pub student_section: Option<String>,
    pub url_frontal: String,
}

/// Values written by a profile upsert. Same replace policy as enrollments.
#[derive(Debug, Clone)]
pub struct ProfileUpsert {
    pub user_id: String,
    pub usn: String,
    pub student_name: String,
    pub student_branch: String,
    pub student_section: String,
}

/// Public projection of an enrollment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentSummary {
    pub user_id: String,
    pub usn: String,
    pub student_name: Option<String>,
    pub student_branch: Option<String>,
    pub student_section: Option<String>,
    pub url_frontal: Option<String>,
}

impl EnrollmentRecord {
    /// Build the row an upsert produces, given the previous row (if any).
    pub fn replace(
        upsert: EnrollmentUpsert,
        previous: Option<&EnrollmentRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: upsert.user_id,
            usn: upsert.usn,
            student_name: upsert.student_name,
            student_branch: upsert.student_branch,
            student_section: upsert.student_section,
            url_frontal: Some(upsert.url_frontal),
            url_left: None,
            url_right: None,
            url_up: None,
            url_down: None,
            created_at: previous.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }

    pub fn summary(&self) -> EnrollmentSummary {
        EnrollmentSummary {
            user_id: self.user_id.clone(),
            usn: self.usn.clone(),
            student_name: self.student_name.clone(),
            student_branch: self.student_branch.clone(),
            student_section: self.student_section.clone(),
            url_frontal: self.url_frontal.clone(),
        }
    }
}

impl ProfileRecord {
    pub fn replace(
        upsert: ProfileUpsert,
        previous: Option<&ProfileRecord>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: upsert.user_id,
            usn: upsert.usn,
            student_name: upsert.student_name,
            student_branch: upsert.student_branch,
            student_section: upsert.student_section,
            created_at: previous.map(|p| p.created_at).unwrap_or(now),
            updated_at: now,
        }
    }
}
