use futures_util::StreamExt;
use std::sync::Arc;

use crate::metrics::Metrics;

use super::broker::{BrokerError, IncomingMessage, MessageStream};
use super::envelope::QueueEnvelope;

// ============================================================================
// Dead-Letter Consumer
// ============================================================================
//
// Terminal sink for rejected orders. Every message is logged with as much
// context as can be recovered and then acked, whether or not it decodes.
// Nothing is retried or persisted from here; logs are the audit trail.
//
// ============================================================================

pub struct DeadLetterConsumer {
    metrics: Arc<Metrics>,
}

impl DeadLetterConsumer {
    pub fn new(metrics: Arc<Metrics>) -> Self {
        Self { metrics }
    }

    pub async fn run(&self, mut stream: MessageStream) -> Result<(), BrokerError> {
        tracing::info!("☠️  Dead-letter consumer started");

        while let Some(next) = stream.next().await {
            match next {
                Ok(message) => self.handle_delivery(message).await,
                Err(e) => {
                    tracing::error!(error = %e, "Dead-letter stream failed");
                    return Err(e);
                }
            }
        }

        tracing::warn!("Dead-letter stream ended");
        Ok(())
    }

    pub async fn handle_delivery(&self, message: IncomingMessage) {
        match QueueEnvelope::from_json(&message.payload) {
            Ok(envelope) => {
                let order = &envelope.order;
                tracing::error!(
                    correlation_id = %envelope.correlation_id,
                    order = %order.identity(),
                    channel = %order.channel,
                    project = %order.project,
                    customer_email = %order.customer.email,
                    items = order.items.len(),
                    total = order.payment.total,
                    enqueued_at = %envelope.enqueued_at,
                    "💀 Order dead-lettered"
                );
            }
            Err(e) => {
                tracing::error!(
                    routing_key = %message.routing_key,
                    error = %e,
                    payload = %String::from_utf8_lossy(&message.payload),
                    "💀 Undecodable message dead-lettered"
                );
            }
        }

        self.metrics.record_dead_letter();

        if let Err(e) = message.acker.ack().await {
            tracing::error!(error = %e, "Failed to ack dead-lettered message");
        }
    }
}
