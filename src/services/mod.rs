//! Business logic behind the HTTP handlers. Each service owns handles to the
//! process-wide resources it needs, injected at construction.

mod enrollment;
mod profile;
mod status;
pub mod validation;

pub use enrollment::{normalize_usn, Enrolled, EnrollmentService, ENROLLMENT_NAMESPACE, FRONTAL_KEY};
pub use profile::{clean_student_name, ProfileService};
pub use status::{EnrollmentStatus, StatusService};
pub use validation::ValidationError;

use thiserror::Error;

use crate::object_store::ObjectStoreError;
use crate::storage::DatabaseError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    ObjectStore(#[from] ObjectStoreError),
    #[error(transparent)]
    Database(#[from] DatabaseError),
}
