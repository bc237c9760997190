//! Google Drive v3: photo upload and public sharing.

use std::path::Path;

use async_trait::async_trait;
use bytes::{BufMut, Bytes, BytesMut};
use serde::Deserialize;
use serde_json::json;

use super::client::{GoogleClient, DRIVE_API_BASE};
use crate::core::error::PipelineError;
use crate::ingest::FileStore;

/// Direct-view link for a publicly shared Drive file.
pub fn public_view_url(file_id: &str) -> String {
    format!("https://drive.google.com/uc?export=view&id={}", file_id)
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

/// Drive client used as the pipeline's file store.
#[derive(Clone)]
pub struct DriveClient {
    client: GoogleClient,
    base_url: String,
}

impl DriveClient {
    pub fn new(client: GoogleClient) -> Self {
        Self::with_base_url(client, DRIVE_API_BASE)
    }

    /// Points the client at another API root (a mock server in tests).
    pub fn with_base_url(client: GoogleClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FileStore for DriveClient {
    async fn upload(&self, path: &Path, name: &str, mime_type: &str) -> Result<String, PipelineError> {
        let content = fs_err::tokio::read(path).await?;

        let metadata = json!({ "name": name }).to_string();
        let boundary = format!("photosheet-{}", uuid::Uuid::new_v4().simple());
        let body = related_body(&boundary, &metadata, mime_type, &content);

        let request = self
            .client
            .http()
            .post(format!("{}/upload/drive/v3/files", self.base_url))
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body);

        let response = self.client.send(request).await.map_err(PipelineError::Upload)?;
        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| PipelineError::Upload(format!("unexpected upload response: {}", e)))?;

        log::debug!("Uploaded {} to Drive as {}", name, created.id);
        Ok(created.id)
    }

    async fn share_publicly(&self, object_id: &str) -> Result<(), PipelineError> {
        let request = self
            .client
            .http()
            .post(format!("{}/drive/v3/files/{}/permissions", self.base_url, object_id))
            .json(&json!({ "role": "reader", "type": "anyone" }));

        self.client.send(request).await.map_err(PipelineError::Permission)?;
        Ok(())
    }

    fn public_url(&self, object_id: &str) -> String {
        public_view_url(object_id)
    }
}

/// Builds a `multipart/related` body: JSON metadata part, then the media part.
fn related_body(boundary: &str, metadata: &str, mime_type: &str, content: &[u8]) -> Bytes {
    let mut body = BytesMut::with_capacity(content.len() + metadata.len() + 256);
    body.put(format!("--{}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n", boundary).as_bytes());
    body.put(metadata.as_bytes());
    body.put(format!("\r\n--{}\r\nContent-Type: {}\r\n\r\n", boundary, mime_type).as_bytes());
    body.put(content);
    body.put(format!("\r\n--{}--\r\n", boundary).as_bytes());
    body.freeze()
}
