//! OAuth2 access tokens for Google APIs.

use std::sync::Arc;

use async_trait::async_trait;
use gcp_auth::{CustomServiceAccount, TokenProvider};

use crate::core::error::AppError;

/// Scopes the bot needs: write to Sheets, upload and share on Drive.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

/// Supplies bearer tokens for Google API requests.
#[async_trait]
pub trait TokenSource: Send + Sync {
    async fn access_token(&self) -> Result<String, String>;
}

/// Service-account credentials exchanged for tokens by `gcp_auth`.
///
/// Tokens are cached and refreshed by `gcp_auth` itself.
pub struct ServiceAccountTokens {
    account: Arc<CustomServiceAccount>,
}

impl ServiceAccountTokens {
    /// Parses service-account JSON (the content of GOOGLE_CREDS_JSON).
    pub fn from_json(credentials_json: &str) -> Result<Self, AppError> {
        let account = CustomServiceAccount::from_json(credentials_json)
            .map_err(|e| AppError::Authorization(format!("Failed to parse service account credentials: {}", e)))?;

        Ok(Self {
            account: Arc::new(account),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokens {
    async fn access_token(&self) -> Result<String, String> {
        let token = self.account.token(SCOPES).await.map_err(|e| e.to_string())?;
        Ok(token.as_str().to_string())
    }
}

/// Fixed token, for local tooling and tests against mock servers.
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, String> {
        Ok(self.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_credentials_are_an_authorization_error() {
        let result = ServiceAccountTokens::from_json("{\"type\": \"service_account\"}");
        assert!(matches!(result, Err(AppError::Authorization(_))));
    }

    #[test]
    fn test_garbage_credentials_are_rejected() {
        assert!(ServiceAccountTokens::from_json("not json").is_err());
    }

    #[tokio::test]
    async fn test_static_token() {
        let source = StaticToken("ya29.test".to_string());
        assert_eq!(source.access_token().await.unwrap(), "ya29.test");
    }
}
