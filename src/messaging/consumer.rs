use futures_util::StreamExt;
use std::sync::Arc;
use std::time::Instant;

use crate::domain::OrderIntegrationPort;
use crate::metrics::{Metrics, ProcessingOutcome};

use super::broker::{BrokerError, IncomingMessage, MessageStream};
use super::envelope::QueueEnvelope;

// ============================================================================
// Order Queue Consumer
// ============================================================================
//
// Received → decode → integrate → ack | reject(requeue=false)
//
// Anything short of a `success` result is rejected without requeue so the
// broker routes it to the dead-letter queue. Deliveries are handled one at a
// time; the next one is not pulled until the current one is settled.
//
// ============================================================================

pub struct OrderConsumer {
    service: Arc<dyn OrderIntegrationPort>,
    metrics: Arc<Metrics>,
}

impl OrderConsumer {
    pub fn new(service: Arc<dyn OrderIntegrationPort>, metrics: Arc<Metrics>) -> Self {
        Self { service, metrics }
    }

    /// Drain `stream` until it ends or the broker reports a consume error.
    pub async fn run(&self, mut stream: MessageStream) -> Result<(), BrokerError> {
        tracing::info!("📥 Order consumer started");

        while let Some(next) = stream.next().await {
            match next {
                Ok(message) => {
                    self.handle_delivery(message).await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Order consumer stream failed");
                    return Err(e);
                }
            }
        }

        tracing::warn!("Order consumer stream ended");
        Ok(())
    }

    pub async fn handle_delivery(&self, message: IncomingMessage) -> ProcessingOutcome {
        let started = Instant::now();
        let outcome = self.process(&message.payload).await;

        let settled = match outcome {
            ProcessingOutcome::Acked => message.acker.ack().await,
            ProcessingOutcome::Rejected => message.acker.reject(false).await,
        };
        if let Err(e) = settled {
            tracing::error!(
                routing_key = %message.routing_key,
                error = %e,
                "Failed to settle delivery, broker will redeliver"
            );
        }

        self.metrics
            .record_processed(outcome, started.elapsed().as_secs_f64());
        outcome
    }

    async fn process(&self, payload: &[u8]) -> ProcessingOutcome {
        let envelope = match QueueEnvelope::from_json(payload) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    payload = %String::from_utf8_lossy(payload),
                    "Undecodable order message, dead-lettering"
                );
                self.metrics.record_failure("malformed");
                return ProcessingOutcome::Rejected;
            }
        };

        let correlation_id = envelope.correlation_id.as_str();
        let order = &envelope.order;

        tracing::info!(
            correlation_id = %correlation_id,
            order_number = %order.order_number,
            external_id = %order.external_id,
            "Processing order"
        );

        match self.service.create_order(order).await {
            Ok(result) if result.is_success() => {
                tracing::info!(
                    correlation_id = %correlation_id,
                    order_number = %order.order_number,
                    "✅ Order integrated"
                );
                ProcessingOutcome::Acked
            }
            Ok(result) => {
                tracing::warn!(
                    correlation_id = %correlation_id,
                    order_number = %order.order_number,
                    message = result.message.as_deref().unwrap_or_default(),
                    "Vendor reported order error, dead-lettering"
                );
                self.metrics.record_failure("rejected");
                ProcessingOutcome::Rejected
            }
            Err(e) => {
                tracing::error!(
                    correlation_id = %correlation_id,
                    order_number = %order.order_number,
                    kind = e.kind(),
                    error = %e,
                    "Order integration failed, dead-lettering"
                );
                self.metrics.record_failure(e.kind());
                ProcessingOutcome::Rejected
            }
        }
    }
}
