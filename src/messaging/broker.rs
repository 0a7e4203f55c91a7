use async_trait::async_trait;
use futures_util::stream::BoxStream;

use crate::utils::IsTransient;

// ============================================================================
// Broker Abstractions
// ============================================================================
//
// The producer and consumers talk to these traits instead of lapin directly,
// so the ack/reject decisions can be exercised without a running broker.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrokerError {
    #[error("broker connection failed: {0}")]
    Connection(String),

    #[error("topology declaration failed: {0}")]
    Topology(String),

    #[error("publish failed: {0}")]
    Publish(String),

    #[error("broker nacked the publish")]
    Nacked,

    #[error("publish circuit breaker is open")]
    CircuitOpen,

    #[error("acknowledgement failed: {0}")]
    Acknowledge(String),

    #[error("consume failed: {0}")]
    Consume(String),
}

impl IsTransient for BrokerError {
    fn is_transient(&self) -> bool {
        matches!(self, BrokerError::Connection(_))
    }
}

/// Producer-facing fault. Every broker-side cause collapses into one variant.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QueueError {
    #[error("failed to publish order: {0}")]
    PublishFailed(String),
}

impl From<BrokerError> for QueueError {
    fn from(err: BrokerError) -> Self {
        QueueError::PublishFailed(err.to_string())
    }
}

/// Settles one delivery.
#[async_trait]
pub trait DeliveryAcker: Send + Sync {
    async fn ack(&self) -> Result<(), BrokerError>;

    async fn reject(&self, requeue: bool) -> Result<(), BrokerError>;
}

pub struct IncomingMessage {
    pub routing_key: String,
    pub payload: Vec<u8>,
    pub acker: Box<dyn DeliveryAcker>,
}

pub type MessageStream = BoxStream<'static, Result<IncomingMessage, BrokerError>>;

#[async_trait]
pub trait MessagePublisher: Send + Sync {
    /// Resolves once the broker has confirmed the message.
    async fn publish(
        &self,
        routing_key: &str,
        correlation_id: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError>;
}
