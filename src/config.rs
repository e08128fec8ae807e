use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required settings: {0}")]
    Missing(String),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    /// Directory holding the enrollment database file
    pub data_dir: String,
    /// Return raw internal error messages to clients on 500s
    pub expose_error_details: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_address: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<String>,
    /// Maximum JSON request body size in bytes
    pub max_body_size: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    Cloudinary,
    Gcs,
    Local,
}

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory for local storage backend
    pub local_storage_path: String,
    /// Base URL that local media URLs are published under
    pub public_base_url: String,
    /// GCS bucket name (required when backend is gcs)
    pub gcs_bucket: Option<String>,
    /// Path to GCS service account JSON (optional, defaults to ADC)
    pub gcs_credentials_file: Option<String>,
    pub cloudinary: Option<CloudinaryConfig>,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:5000".to_string(),
            cors_origins: Vec::new(),
            max_body_size: 50 * 1024 * 1024, // 50MB
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_storage_path: "./files".to_string(),
            public_base_url: "http://localhost:5000".to_string(),
            gcs_bucket: None,
            gcs_credentials_file: None,
            cloudinary: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Build a configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset so that `FOO=` in an env file behaves
    /// like a missing variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match var("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| ConfigError::ValidationError(format!("PORT is not a valid port: {p}")))?,
            None => 5000,
        };

        let bind_address = var("BIND_ADDRESS").unwrap_or_else(|| format!("0.0.0.0:{port}"));
        let data_dir = var("DATA_DIR").unwrap_or_else(|| "./data".to_string());

        let cors_origins: Vec<String> = var("CORS_ORIGINS")
            .map(|o| {
                o.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let max_body_size = var("MAX_BODY_SIZE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(50 * 1024 * 1024);

        let expose_error_details = var("EXPOSE_ERROR_DETAILS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(true);

        let backend = match var("STORAGE_BACKEND")
            .unwrap_or_else(|| "local".to_string())
            .to_lowercase()
            .as_str()
        {
            "cloudinary" => StorageBackend::Cloudinary,
            "gcs" => StorageBackend::Gcs,
            "local" => StorageBackend::Local,
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "unknown STORAGE_BACKEND '{other}' (expected local, gcs or cloudinary)"
                )))
            }
        };

        let cloudinary = if backend == StorageBackend::Cloudinary {
            let required = [
                "CLOUDINARY_CLOUD_NAME",
                "CLOUDINARY_API_KEY",
                "CLOUDINARY_API_SECRET",
            ];
            let missing: Vec<&str> = required
                .iter()
                .copied()
                .filter(|k| var(*k).is_none())
                .collect();
            if !missing.is_empty() {
                return Err(ConfigError::Missing(missing.join(", ")));
            }
            Some(CloudinaryConfig {
                cloud_name: var("CLOUDINARY_CLOUD_NAME").unwrap_or_default(),
                api_key: var("CLOUDINARY_API_KEY").unwrap_or_default(),
                api_secret: var("CLOUDINARY_API_SECRET").unwrap_or_default(),
            })
        } else {
            None
        };

        Ok(Config {
            server: ServerConfig {
                bind_address,
                cors_origins,
                max_body_size,
            },
            storage: StorageConfig {
                backend,
                local_storage_path: var("LOCAL_STORAGE_PATH")
                    .unwrap_or_else(|| "./files".to_string()),
                public_base_url: var("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| format!("http://localhost:{port}")),
                gcs_bucket: var("GCS_BUCKET"),
                gcs_credentials_file: var("GCS_CREDENTIALS_FILE"),
                cloudinary,
            },
            data_dir,
            expose_error_details,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.data_dir.is_empty() {
            return Err(ConfigError::ValidationError(
                "DATA_DIR cannot be empty".to_string(),
            ));
        }

        if self.storage.backend == StorageBackend::Gcs && self.storage.gcs_bucket.is_none() {
            return Err(ConfigError::Missing("GCS_BUCKET".to_string()));
        }

        if self.storage.backend == StorageBackend::Cloudinary && self.storage.cloudinary.is_none()
        {
            return Err(ConfigError::Missing(
                "CLOUDINARY_CLOUD_NAME, CLOUDINARY_API_KEY, CLOUDINARY_API_SECRET".to_string(),
            ));
        }

        if let Some(origin) = self
            .server
            .cors_origins
            .iter()
            .find(|o| axum::http::HeaderValue::from_str(o).is_err())
        {
            return Err(ConfigError::ValidationError(format!(
                "CORS_ORIGINS contains an invalid origin: {origin:?}"
            )));
        }

        if self.server.max_body_size == 0 {
            return Err(ConfigError::ValidationError(
                "MAX_BODY_SIZE must be greater than 0".to_string(),
            ));
        }

        if !self.expose_error_details {
            tracing::info!("Internal error details are hidden from API responses");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let config = Config::from_lookup(|k| map.get(k).cloned())?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn defaults_to_local_backend() {
        let config = load(&[]).unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Local);
        assert_eq!(config.server.bind_address, "0.0.0.0:5000");
        assert_eq!(config.storage.public_base_url, "http://localhost:5000");
        assert!(config.expose_error_details);
        assert!(config.server.cors_origins.is_empty());
    }

    #[test]
    fn port_feeds_bind_address() {
        let config = load(&[("PORT", "8081")]).unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8081");
    }

    #[test]
    fn cloudinary_requires_all_credentials() {
        let err = load(&[
            ("STORAGE_BACKEND", "cloudinary"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
        ])
        .unwrap_err();
        match err {
            ConfigError::Missing(keys) => {
                assert!(keys.contains("CLOUDINARY_API_KEY"));
                assert!(keys.contains("CLOUDINARY_API_SECRET"));
                assert!(!keys.contains("CLOUDINARY_CLOUD_NAME"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn gcs_requires_bucket() {
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "gcs")]),
            Err(ConfigError::Missing(_))
        ));
    }

    #[test]
    fn blank_values_count_as_missing() {
        assert!(load(&[
            ("STORAGE_BACKEND", "cloudinary"),
            ("CLOUDINARY_CLOUD_NAME", "demo"),
            ("CLOUDINARY_API_KEY", "  "),
            ("CLOUDINARY_API_SECRET", "secret"),
        ])
        .is_err());
    }

    #[test]
    fn unknown_backend_is_rejected() {
        assert!(matches!(
            load(&[("STORAGE_BACKEND", "s3")]),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn cors_origins_are_split_and_trimmed() {
        let config = load(&[("CORS_ORIGINS", "https://a.test, https://b.test ,")]).unwrap();
        assert_eq!(
            config.server.cors_origins,
            vec!["https://a.test".to_string(), "https://b.test".to_string()]
        );
    }

    #[test]
    fn invalid_cors_origin_is_rejected() {
        assert!(matches!(
            load(&[("CORS_ORIGINS", "https://a.test\u{1}")]),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn error_details_can_be_hidden() {
        let config = load(&[("EXPOSE_ERROR_DETAILS", "false")]).unwrap();
        assert!(!config.expose_error_details);
    }
}
