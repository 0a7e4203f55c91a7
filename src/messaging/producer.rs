use chrono::Utc;
use std::sync::Arc;

use crate::domain::Order;
use crate::metrics::Metrics;

use super::broker::{MessagePublisher, QueueError};
use super::envelope::QueueEnvelope;

/// Wraps orders in a [`QueueEnvelope`] and publishes them for processing.
pub struct OrderProducer {
    publisher: Arc<dyn MessagePublisher>,
    routing_key: String,
    metrics: Arc<Metrics>,
}

impl OrderProducer {
    pub fn new(publisher: Arc<dyn MessagePublisher>, routing_key: impl Into<String>, metrics: Arc<Metrics>) -> Self {
        Self {
            publisher,
            routing_key: routing_key.into(),
            metrics,
        }
    }

    /// Returns the correlation id assigned to the message.
    pub async fn publish_order(&self, order: Order) -> Result<String, QueueError> {
        let envelope = QueueEnvelope::new(order, Utc::now());
        let payload = envelope
            .to_json()
            .map_err(|e| QueueError::PublishFailed(e.to_string()))?;

        match self
            .publisher
            .publish(&self.routing_key, &envelope.correlation_id, &payload)
            .await
        {
            Ok(()) => {
                self.metrics.record_published();
                tracing::info!(
                    correlation_id = %envelope.correlation_id,
                    order_number = %envelope.order.order_number,
                    "📤 Order queued for processing"
                );
                Ok(envelope.correlation_id)
            }
            Err(e) => {
                self.metrics.record_publish_failed();
                tracing::error!(
                    correlation_id = %envelope.correlation_id,
                    order_number = %envelope.order.order_number,
                    error = %e,
                    "Failed to queue order"
                );
                Err(e.into())
            }
        }
    }
}
