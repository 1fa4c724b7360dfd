//! # Media Upload
//!
//! Posts and events reference images by URL. The image itself goes to
//! Cloudinary as an unsigned upload (multipart form with `file` and
//! `upload_preset`); the `secure_url` from the reply is what the LiFit
//! backend stores.

use std::path::Path;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::config::UploadConfig;
use crate::core::error::{AppError, Result};
use crate::core::service::MediaUploader;

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    error: Option<UploadErrorBody>,
}

#[derive(Debug, Deserialize)]
struct UploadErrorBody {
    message: String,
}

/// Unsigned Cloudinary uploader.
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: Client,
    endpoint: String,
    upload_preset: String,
}

impl CloudinaryUploader {
    /// Fails when no cloud name is configured.
    pub fn new(config: &UploadConfig) -> Result<Self> {
        let cloud_name = config
            .cloud_name
            .as_deref()
            .ok_or_else(|| AppError::Upload("LIFIT_CLOUDINARY_CLOUD is not set".to_string()))?;

        Ok(Self {
            client: Client::new(),
            endpoint: format!("{}/{}/image/upload", config.base_url.trim_end_matches('/'), cloud_name),
            upload_preset: config.upload_preset.clone(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("heic") => "image/heic",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn upload_image(&self, path: &Path) -> Result<String> {
        let start = std::time::Instant::now();

        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| AppError::Upload(format!("Cannot read {}: {}", path.display(), e)))?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload.jpg")
            .to_string();
        let size = bytes.len();

        let file = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))
            .map_err(|e| AppError::Upload(e.to_string()))?;
        let form = Form::new()
            .part("file", file)
            .text("upload_preset", self.upload_preset.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Upload network error");
                AppError::Upload(format!("Network error: {}", e))
            })?;

        let status = response.status();
        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upload(format!("Failed to parse response: {}", e)))?;

        match body.secure_url {
            Some(url) if status.is_success() => {
                info!(
                    size,
                    duration_ms = start.elapsed().as_millis(),
                    "Image uploaded"
                );
                Ok(url)
            }
            _ => {
                let message = body
                    .error
                    .map(|e| e.message)
                    .unwrap_or_else(|| format!("no secure_url in response (status {})", status.as_u16()));
                error!(status = status.as_u16(), error = %message, "Upload rejected");
                Err(AppError::Upload(message))
            }
        }
    }
}
