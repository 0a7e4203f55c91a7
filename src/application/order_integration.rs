use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{
    Order, OrderIntegrationError, OrderIntegrationPort, OrderIntegrationResult, StorePort,
};

// ============================================================================
// Order Integration Service
// ============================================================================
//
// Orchestrates: Vendor order creation → (on success) Store notification
//
// The vendor result is returned unchanged. Notification faults are logged
// and dropped here; they never reach the queue consumer.
//
// ============================================================================

pub struct OrderIntegrationService {
    vendor: Arc<dyn OrderIntegrationPort>,
    store: Arc<dyn StorePort>,
}

impl OrderIntegrationService {
    pub fn new(vendor: Arc<dyn OrderIntegrationPort>, store: Arc<dyn StorePort>) -> Self {
        Self { vendor, store }
    }
}

#[async_trait]
impl OrderIntegrationPort for OrderIntegrationService {
    async fn create_order(
        &self,
        order: &Order,
    ) -> Result<OrderIntegrationResult, OrderIntegrationError> {
        let result = self.vendor.create_order(order).await?;

        if result.is_success() {
            if let Err(e) = self.store.notify_order_success(order).await {
                tracing::warn!(
                    external_id = %order.external_id,
                    error = %e,
                    "Store notification failed, order result unaffected"
                );
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::entity::fixtures;
    use crate::domain::NotificationError;
    use std::sync::Mutex;

    struct StubVendor {
        outcome: Result<OrderIntegrationResult, OrderIntegrationError>,
    }

    #[async_trait]
    impl OrderIntegrationPort for StubVendor {
        async fn create_order(
            &self,
            _order: &Order,
        ) -> Result<OrderIntegrationResult, OrderIntegrationError> {
            self.outcome.clone()
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        notified: Mutex<Vec<String>>,
        fail: bool,
    }

    #[async_trait]
    impl StorePort for RecordingStore {
        async fn notify_order_success(&self, order: &Order) -> Result<(), NotificationError> {
            self.notified.lock().unwrap().push(order.external_id.clone());
            if self.fail {
                Err(NotificationError::Failed("HTTP 500".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn service(
        outcome: Result<OrderIntegrationResult, OrderIntegrationError>,
        store: Arc<RecordingStore>,
    ) -> OrderIntegrationService {
        OrderIntegrationService::new(Arc::new(StubVendor { outcome }), store)
    }

    #[tokio::test]
    async fn test_success_notifies_store_once() {
        let store = Arc::new(RecordingStore::default());
        let expected = OrderIntegrationResult::success("Pedido criado com sucesso");

        let result = service(Ok(expected.clone()), store.clone())
            .create_order(&fixtures::order())
            .await
            .unwrap();

        assert_eq!(result, expected);
        assert_eq!(*store.notified.lock().unwrap(), vec!["ext-1".to_string()]);
    }

    #[tokio::test]
    async fn test_error_result_skips_notification() {
        let store = Arc::new(RecordingStore::default());
        let expected = OrderIntegrationResult::error("sku not found");

        let result = service(Ok(expected.clone()), store.clone())
            .create_order(&fixtures::order())
            .await
            .unwrap();

        assert_eq!(result, expected);
        assert!(store.notified.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_notification_failure_does_not_change_result() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        let expected = OrderIntegrationResult::success("Pedido criado com sucesso");

        let result = service(Ok(expected.clone()), store.clone())
            .create_order(&fixtures::order())
            .await
            .unwrap();

        assert_eq!(result, expected);
        assert_eq!(store.notified.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_vendor_fault_propagates_without_notification() {
        let store = Arc::new(RecordingStore::default());

        let err = service(Err(OrderIntegrationError::Unavailable), store.clone())
            .create_order(&fixtures::order())
            .await
            .unwrap_err();

        assert_eq!(err, OrderIntegrationError::Unavailable);
        assert!(store.notified.lock().unwrap().is_empty());
    }

    mod wired {
        use super::*;
        use crate::adapters::store::{StoreAuthAdapter, StoreNotifierAdapter};
        use crate::adapters::vendor::auth::test_tokens;
        use crate::adapters::vendor::{VendorAuthAdapter, VendorOrderAdapter};
        use crate::domain::UsernamePasswordCredentials;
        use reqwest::Client;
        use std::time::Duration;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        async fn wired_service(vendor: &MockServer, store: &MockServer) -> OrderIntegrationService {
            let client = Client::new();
            let auth = Arc::new(VendorAuthAdapter::new(
                client.clone(),
                vendor.uri(),
                Duration::from_secs(2),
            ));
            let vendor = Arc::new(VendorOrderAdapter::new(
                client.clone(),
                vendor.uri(),
                Duration::from_secs(2),
                UsernamePasswordCredentials {
                    username: "integration".to_string(),
                    password: "secret".to_string(),
                },
                auth,
            ));
            let store = Arc::new(StoreNotifierAdapter::new(
                client,
                format!("{}/webhooks/orders", store.uri()),
                "store-key",
                Duration::from_secs(2),
                Arc::new(StoreAuthAdapter::new("store-key")),
            ));
            OrderIntegrationService::new(vendor, store)
        }

        async fn mount_login(vendor: &MockServer) {
            Mock::given(method("POST"))
                .and(path("/login"))
                .respond_with(ResponseTemplate::new(200).set_body_json(
                    serde_json::json!({"name": "Integration", "token": test_tokens::fresh()}),
                ))
                .mount(vendor)
                .await;
        }

        #[tokio::test]
        async fn test_accepted_order_notifies_store_with_external_id() {
            let (vendor, store) = (MockServer::start().await, MockServer::start().await);
            mount_login(&vendor).await;
            Mock::given(method("POST"))
                .and(path("/order"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{"success": true}])))
                .mount(&vendor)
                .await;
            Mock::given(method("POST"))
                .and(path("/webhooks/orders"))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&store)
                .await;

            let result = wired_service(&vendor, &store)
                .await
                .create_order(&fixtures::order())
                .await
                .unwrap();

            assert_eq!(result, OrderIntegrationResult::success("Pedido criado com sucesso"));
            let requests = store.received_requests().await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
            assert_eq!(body["data"]["id"], "ext-1");
        }

        #[tokio::test]
        async fn test_rejected_order_is_reported_without_notification() {
            let (vendor, store) = (MockServer::start().await, MockServer::start().await);
            mount_login(&vendor).await;
            Mock::given(method("POST"))
                .and(path("/order"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                    "success": false,
                    "errors": [{"orderIndex": 0, "orderNumber": "PED-1", "error": "sku not found"}]
                }])))
                .mount(&vendor)
                .await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200))
                .expect(0)
                .mount(&store)
                .await;

            let result = wired_service(&vendor, &store)
                .await
                .create_order(&fixtures::order())
                .await
                .unwrap();

            assert_eq!(result, OrderIntegrationResult::error("sku not found"));
        }
    }
}
