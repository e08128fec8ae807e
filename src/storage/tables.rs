use redb::TableDefinition;

/// Enrollment rows: user_id -> EnrollmentRecord (msgpack)
pub const ENROLLMENTS: TableDefinition<&str, &[u8]> = TableDefinition::new("enrollments");

/// Student profile rows: user_id -> ProfileRecord (msgpack)
pub const STUDENT_INFO: TableDefinition<&str, &[u8]> = TableDefinition::new("student_info");
