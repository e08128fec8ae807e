use chrono::Utc;
use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::{EnrollmentRecord, EnrollmentUpsert};
use super::tables::*;

impl Database {
    // ========================================================================
    // Enrollment operations
    // ========================================================================

    /// Insert or replace the enrollment row for `upsert.user_id`.
    ///
    /// Runs in a single write transaction. On conflict the whole row is
    /// replaced (see [`EnrollmentUpsert`]); only `created_at` is carried over.
    pub fn upsert_enrollment(
        &self,
        upsert: EnrollmentUpsert,
    ) -> Result<EnrollmentRecord, DatabaseError> {
        debug_assert!(!upsert.user_id.is_empty(), "user_id must not be empty");

        let write_txn = self.begin_write()?;
        let record = {
            let mut table = write_txn.open_table(ENROLLMENTS)?;

            let previous: Option<EnrollmentRecord> = match table.get(upsert.user_id.as_str())? {
                Some(data) => Some(rmp_serde::from_slice(data.value())?),
                None => None,
            };

            let record = EnrollmentRecord::replace(upsert, previous.as_ref(), Utc::now());
            let data = rmp_serde::to_vec_named(&record)?;
            table.insert(record.user_id.as_str(), data.as_slice())?;
            record
        };
        write_txn.commit()?;
        Ok(record)
    }

    /// Get the enrollment row for a user
    pub fn get_enrollment(&self, user_id: &str) -> Result<Option<EnrollmentRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(ENROLLMENTS)?;

        match table.get(user_id)? {
            Some(data) => {
                let record: EnrollmentRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// Store an enrollment row exactly as given, bypassing the replace policy.
    pub fn put_enrollment(&self, record: &EnrollmentRecord) -> Result<(), DatabaseError> {
        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(ENROLLMENTS)?;
            let data = rmp_serde::to_vec_named(record)?;
            table.insert(record.user_id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}
