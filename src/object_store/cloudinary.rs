use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{ObjectKey, ObjectStore, ObjectStoreError, StoredObject};
use crate::config::CloudinaryConfig;
use crate::image::InlineImage;

/// Cloudinary image hosting backend using signed uploads.
pub struct CloudinaryStore {
    api_key: String,
    api_secret: String,
    client: Client,
    cloud_name: String,
}

#[derive(Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl CloudinaryStore {
    pub fn new(config: &CloudinaryConfig) -> Result<Self, anyhow::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            api_key: config.api_key.clone(),
            api_secret: config.api_secret.clone(),
            client,
            cloud_name: config.cloud_name.clone(),
        })
    }

    fn upload_url(&self) -> String {
        format!(
            "https://api.cloudinary.com/v1_1/{}/image/upload",
            self.cloud_name
        )
    }
}

#[async_trait]
impl ObjectStore for CloudinaryStore {
    async fn upload(
        &self,
        key: &ObjectKey,
        image: &InlineImage,
    ) -> Result<StoredObject, ObjectStoreError> {
        let timestamp = chrono::Utc::now().timestamp().to_string();

        // Only these parameters take part in the signature; file and api_key do not.
        let signed = vec![
            ("folder", key.namespace().to_string()),
            ("overwrite", "true".to_string()),
            ("public_id", key.name().to_string()),
            ("timestamp", timestamp),
        ];
        let signature = sign_params(&signed, &self.api_secret);

        let mut form = signed;
        form.push(("api_key", self.api_key.clone()));
        form.push(("signature", signature));
        form.push(("file", image.to_data_uri()));

        let resp = self
            .client
            .post(self.upload_url())
            .form(&form)
            .send()
            .await
            .map_err(|e| ObjectStoreError::Backend(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(ObjectStoreError::Backend(format!(
                "Cloudinary upload failed ({status}): {message}"
            )));
        }

        let uploaded: UploadResponse = resp
            .json()
            .await
            .map_err(|e| ObjectStoreError::Backend(format!("Invalid Cloudinary response: {e}")))?;

        Ok(StoredObject {
            url: uploaded.secure_url,
        })
    }
}

/// Cloudinary request signature: SHA-1 hex of the alphabetically sorted
/// `key=value` pairs joined by `&`, with the API secret appended.
fn sign_params(params: &[(&str, String)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().collect();
    sorted.sort_by(|a, b| a.0.cmp(&b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = ring::digest::digest(
        &ring::digest::SHA1_FOR_LEGACY_USE_ONLY,
        format!("{to_sign}{api_secret}").as_bytes(),
    );
    hex::encode(digest.as_ref())
}
