//! Blob storage client for customer-uploaded customization images.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GatewayError;

const BLOB_API_BASE: &str = "https://blob.vercel-storage.com";

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` publicly under `pathname` and return the public URL.
    async fn upload(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError>;
}

pub struct VercelBlob {
    token: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct PutResponse {
    url: String,
}

impl VercelBlob {
    pub fn new(token: String, http: reqwest::Client) -> Self {
        Self { token, http }
    }
}

#[async_trait]
impl BlobStore for VercelBlob {
    async fn upload(
        &self,
        pathname: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, GatewayError> {
        let response = self
            .http
            .put(format!("{BLOB_API_BASE}/{pathname}"))
            .bearer_auth(&self.token)
            .header("x-content-type", content_type)
            .header("x-api-version", "7")
            .header("access", "public")
            .body(bytes)
            .send()
            .await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api { status, body });
        }
        let parsed: PutResponse = response.json().await?;
        tracing::info!(url = %parsed.url, "Uploaded blob");
        Ok(parsed.url)
    }
}
