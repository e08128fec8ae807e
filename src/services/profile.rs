use super::validation::ProfileInput;
use super::ServiceError;
use crate::storage::models::{ProfileRecord, ProfileUpsert};
use crate::storage::Database;

/// Saves student profile details into the `student_info` table.
pub struct ProfileService {
    db: Database,
}

/// Remove every literal occurrence of `usn` from `name`, then trim.
///
/// This is a plain substring delete, not an anchored prefix/suffix strip: the
/// USN is removed wherever it appears. Deletion repeats until the USN no
/// longer occurs, since removing one occurrence can splice a new one together
/// (`"AABB"` minus `"AB"` is `"AB"`).
pub fn clean_student_name(name: &str, usn: &str) -> String {
    if usn.is_empty() {
        return name.trim().to_string();
    }

    let mut cleaned = name.to_string();
    while cleaned.contains(usn) {
        cleaned = cleaned.replace(usn, "");
    }
    cleaned.trim().to_string()
}

impl ProfileService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Upsert the profile with the cleaned name. The USN is stored as given.
    pub fn save_profile(&self, input: ProfileInput) -> Result<ProfileRecord, ServiceError> {
        let student_name = clean_student_name(&input.student_name, &input.usn);

        let record = self.db.upsert_profile(ProfileUpsert {
            user_id: input.user_id,
            usn: input.usn,
            student_name,
            student_branch: input.student_branch,
            student_section: input.student_section,
        })?;

        tracing::debug!(user_id = %record.user_id, usn = %record.usn, "Saved student profile");
        Ok(record)
    }
}
