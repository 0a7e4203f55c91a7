use async_trait::async_trait;

use crate::domain::{NotificationError, StoreAuthenticationPort};

/// API-key "authentication" for the store. There is no login round-trip;
/// the configured key is the credential.
pub struct StoreAuthAdapter {
    api_key: String,
}

impl StoreAuthAdapter {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl StoreAuthenticationPort for StoreAuthAdapter {
    async fn authenticate(&self, api_key: &str) -> Result<String, NotificationError> {
        if api_key.is_empty() {
            tracing::error!("Store API key is not configured");
            return Err(NotificationError::MissingApiKey);
        }
        Ok(api_key.to_string())
    }

    fn validate_token(&self, api_key: &str) -> bool {
        !api_key.is_empty() && api_key == self.api_key
    }
}
