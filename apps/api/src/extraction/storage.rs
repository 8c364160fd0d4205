//! Blob storage — uploads the staged résumé so the OCR service can fetch it
//! by URL. Production backend: Cloudinary raw upload.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use sha1::{Digest, Sha1};
use tracing::debug;

use crate::config::Config;
use crate::extraction::ExtractionError;

const UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Durable document storage. Held in `AppState` as `Arc<dyn BlobStore>` so
/// the extraction pipeline can be exercised without a live backend.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Uploads the file at `path` under `public_id` and returns a URL the
    /// OCR service can retrieve it from.
    async fn upload(&self, path: &Path, public_id: &str) -> Result<String, ExtractionError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

/// Cloudinary client for `raw` resource uploads (PDFs are not images, so the
/// image pipeline does not apply).
pub struct CloudinaryStore {
    http: Client,
    upload_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
}

impl CloudinaryStore {
    pub fn new(config: &Config) -> Self {
        Self {
            http: Client::builder()
                .timeout(UPLOAD_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            upload_base: config.cloudinary_upload_base.clone(),
            cloud_name: config.cloudinary_cloud_name.clone(),
            api_key: config.cloudinary_api_key.clone(),
            api_secret: config.cloudinary_api_secret.clone(),
        }
    }
}

#[async_trait]
impl BlobStore for CloudinaryStore {
    async fn upload(&self, path: &Path, public_id: &str) -> Result<String, ExtractionError> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());

        let timestamp = chrono::Utc::now().timestamp().to_string();
        let signature = sign_params(
            &[("public_id", public_id), ("timestamp", &timestamp)],
            &self.api_secret,
        );

        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name))
            .text("api_key", self.api_key.clone())
            .text("timestamp", timestamp)
            .text("public_id", public_id.to_string())
            .text("signature", signature);

        let url = format!("{}/{}/raw/upload", self.upload_base, self.cloud_name);
        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractionError::Storage(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractionError::Storage(format!(
                "upload rejected with status {status}"
            )));
        }

        let uploaded: UploadResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Storage(format!("unreadable upload response: {e}")))?;

        debug!(public_id, "document uploaded");

        Ok(uploaded.secure_url)
    }
}

/// Cloudinary request signature: hex SHA-1 over the sorted `key=value` pairs
/// joined by `&`, with the API secret appended. `file` and `api_key` are
/// excluded from signing per the upload API contract.
fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut pairs: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
    pairs.sort();
    let payload = format!("{}{}", pairs.join("&"), api_secret);

    let mut hasher = Sha1::new();
    hasher.update(payload.as_bytes());
    hex::encode(hasher.finalize())
}
