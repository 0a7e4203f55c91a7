use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::{NotificationError, Order, StoreAuthenticationPort, StorePort};

const ORDER_PROCESSED: &str = "order.processed";

// ============================================================================
// Store Notification Adapter
// ============================================================================

#[derive(Serialize, Debug)]
struct WebhookPayload<'a> {
    #[serde(rename = "type")]
    event_type: &'static str,
    timestamp: DateTime<Utc>,
    data: WebhookData<'a>,
}

#[derive(Serialize, Debug)]
struct WebhookData<'a> {
    id: &'a str,
}

pub struct StoreNotifierAdapter {
    client: Client,
    webhook_url: String,
    api_key: String,
    timeout: Duration,
    auth: Arc<dyn StoreAuthenticationPort>,
    cached_api_key: Mutex<String>,
}

impl StoreNotifierAdapter {
    pub fn new(
        client: Client,
        webhook_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
        auth: Arc<dyn StoreAuthenticationPort>,
    ) -> Self {
        Self {
            client,
            webhook_url: webhook_url.into(),
            api_key: api_key.into(),
            timeout,
            auth,
            cached_api_key: Mutex::new(String::new()),
        }
    }

    async fn ensure_api_key(&self) -> Result<String, NotificationError> {
        let mut cached = self.cached_api_key.lock().await;

        if !self.auth.validate_token(&cached) {
            *cached = self.auth.authenticate(&self.api_key).await?;
        }

        Ok(cached.clone())
    }
}

#[async_trait]
impl StorePort for StoreNotifierAdapter {
    async fn notify_order_success(&self, order: &Order) -> Result<(), NotificationError> {
        let api_key = self.ensure_api_key().await?;

        let payload = WebhookPayload {
            event_type: ORDER_PROCESSED,
            timestamp: Utc::now(),
            data: WebhookData {
                id: &order.external_id,
            },
        };

        let response = self
            .client
            .post(&self.webhook_url)
            .timeout(self.timeout)
            .header("x-api-key", api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotificationError::Failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::Failed(format!(
                "store webhook returned HTTP {}",
                status.as_u16()
            )));
        }

        tracing::info!(external_id = %order.external_id, "📣 Store notified of processed order");
        Ok(())
    }
}
