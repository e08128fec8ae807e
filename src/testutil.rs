//! Shared test helpers for face-enroll unit tests.

use std::sync::Arc;

use crate::config::{Config, ServerConfig, StorageConfig};
use crate::object_store::{LocalStore, ObjectStore};
use crate::storage::Database;
use crate::AppState;

/// Public base URL local media is published under in tests.
pub const TEST_MEDIA_URL: &str = "http://media.test";

pub fn test_config(temp_dir: &tempfile::TempDir) -> Config {
    Config {
        server: ServerConfig {
            bind_address: "127.0.0.1:0".to_string(),
            max_body_size: 10 * 1024 * 1024, // 10MB for tests
            ..Default::default()
        },
        storage: StorageConfig {
            local_storage_path: temp_dir.path().join("files").to_string_lossy().to_string(),
            public_base_url: TEST_MEDIA_URL.to_string(),
            ..Default::default()
        },
        data_dir: temp_dir.path().join("data").to_string_lossy().to_string(),
        expose_error_details: true,
    }
}

/// Create a test AppState with a temporary database and local object store.
pub fn test_state(temp_dir: &tempfile::TempDir) -> Arc<AppState> {
    test_state_with_db(temp_dir).0
}

/// Like [`test_state`], also returning a handle to the same database.
pub fn test_state_with_db(temp_dir: &tempfile::TempDir) -> (Arc<AppState>, Database) {
    test_state_with_config(temp_dir, |_| {})
}

/// Like [`test_state_with_db`], with the test config adjusted first.
pub fn test_state_with_config(
    temp_dir: &tempfile::TempDir,
    configure: impl FnOnce(&mut Config),
) -> (Arc<AppState>, Database) {
    let mut config = test_config(temp_dir);
    configure(&mut config);

    let db = Database::open(&config.data_dir).expect("Failed to open test database");
    let media = Arc::new(
        LocalStore::new(
            &config.storage.local_storage_path,
            &config.storage.public_base_url,
        )
        .expect("Failed to create test object store"),
    );

    let state = AppState::new(config, db.clone(), media.clone(), Some(media));
    (Arc::new(state), db)
}

/// AppState over an arbitrary object store and no `/media` route.
pub fn test_state_with_store(
    temp_dir: &tempfile::TempDir,
    object_store: Arc<dyn ObjectStore>,
    expose_error_details: bool,
) -> (Arc<AppState>, Database) {
    let mut config = test_config(temp_dir);
    config.expose_error_details = expose_error_details;

    let db = Database::open(&config.data_dir).expect("Failed to open test database");
    let state = AppState::new(config, db.clone(), object_store, None);
    (Arc::new(state), db)
}
