//! Shared authenticated HTTP plumbing for the Drive and Sheets clients.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};

use super::auth::TokenSource;
use crate::core::config;

/// Production API roots
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com";
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

/// HTTP client plus token source, cloned into each API client.
#[derive(Clone)]
pub struct GoogleClient {
    http: Client,
    tokens: Arc<dyn TokenSource>,
}

impl GoogleClient {
    pub fn new(tokens: Arc<dyn TokenSource>) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .user_agent(concat!("photosheet/", env!("CARGO_PKG_VERSION")))
            .timeout(config::network::timeout())
            .build()?;
        Ok(Self { http, tokens })
    }

    pub fn http(&self) -> &Client {
        &self.http
    }

    /// Adds the bearer token and sends the request.
    ///
    /// Any failure (token, transport or non-2xx status) comes back as a
    /// message that includes the response body, ready to be wrapped into the
    /// caller's pipeline stage.
    pub async fn send(&self, request: RequestBuilder) -> Result<Response, String> {
        let token = self
            .tokens
            .access_token()
            .await
            .map_err(|e| format!("access token: {}", e))?;

        let response = request.bearer_auth(token).send().await.map_err(|e| e.to_string())?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(format!("HTTP {}: {}", status, body.trim()))
    }
}
