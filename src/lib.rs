//! face-enroll - REST backend for student enrollment
//!
//! This crate records student profiles and a frontal face photo per student:
//! - Swappable image hosting backends (local filesystem, GCS, Cloudinary)
//! - redb embedded database with `enrollments` and `student_info` tables
//! - JSON REST API for the capture UI (enroll, save profile, status lookups)

pub mod api;
pub mod config;
pub mod image;
pub mod object_store;
pub mod services;
pub mod storage;
#[cfg(test)]
pub mod testutil;

use std::sync::Arc;

use config::Config;
use object_store::{LocalStore, ObjectStore};
use services::{EnrollmentService, ProfileService, StatusService};
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub enrollments: EnrollmentService,
    pub profiles: ProfileService,
    pub status: StatusService,
    /// Local media store, when the local backend is active (backs `/media`)
    pub media: Option<Arc<LocalStore>>,
}

impl AppState {
    pub fn new(
        config: Config,
        db: Database,
        object_store: Arc<dyn ObjectStore>,
        media: Option<Arc<LocalStore>>,
    ) -> Self {
        Self {
            config,
            enrollments: EnrollmentService::new(db.clone(), object_store),
            profiles: ProfileService::new(db.clone()),
            status: StatusService::new(db),
            media,
        }
    }
}
