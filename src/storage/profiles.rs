use chrono::Utc;
use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::{ProfileRecord, ProfileUpsert};
use super::tables::*;

impl Database {
    // ========================================================================
    // Student profile operations
    // ========================================================================

    /// Insert or replace the `student_info` row for `upsert.user_id`.
    pub fn upsert_profile(&self, upsert: ProfileUpsert) -> Result<ProfileRecord, DatabaseError> {
        debug_assert!(!upsert.user_id.is_empty(), "user_id must not be empty");

        let write_txn = self.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(STUDENT_INFO)?;

            let previous: Option<ProfileRecord> = match table.get(upsert.user_id.as_str())? {
                Some(data) => Some(rmp_serde::from_slice(data.value())?),
                None => None,
            };

            let record = ProfileRecord::replace(upsert, previous.as_ref(), Utc::now());
            let data = rmp_serde::to_vec_named(&record)?;
            table.insert(record.user_id.as_str(), data.as_slice())?;
            record
        };
        write_txn.commit()?;
        Ok(record)
    }

    /// Get the profile row for a user
    pub fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(STUDENT_INFO)?;

        match table.get(user_id)? {
            Some(data) => {
                let record: ProfileRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }
}
