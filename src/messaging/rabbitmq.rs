use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::{
    acker::Acker,
    options::{
        BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicPublishOptions,
        BasicQosOptions, ConfirmSelectOptions, ExchangeDeclareOptions, QueueBindOptions,
        QueueDeclareOptions,
    },
    types::{AMQPValue, FieldTable},
    BasicProperties, Channel, Connection, ConnectionProperties, ExchangeKind,
};
use std::sync::Arc;

use crate::app_config::RabbitMqConfig;
use crate::metrics::Metrics;
use crate::utils::{CircuitBreaker, CircuitBreakerConfig, CircuitBreakerError, CircuitState};

use super::broker::{BrokerError, DeliveryAcker, IncomingMessage, MessagePublisher, MessageStream};

const PERSISTENT: u8 = 2;

// ============================================================================
// RabbitMQ Client
// ============================================================================
//
// One connection, one confirm-mode channel for publishing, and one channel
// per subscription (prefetch 1). Publishes go through a circuit breaker.
//
// ============================================================================

pub struct RabbitMqClient {
    connection: Connection,
    publisher: Channel,
    exchange: String,
    circuit_breaker: CircuitBreaker,
    metrics: Arc<Metrics>,
}

impl RabbitMqClient {
    pub async fn connect(url: &str, exchange: &str, metrics: Arc<Metrics>) -> Result<Self, BrokerError> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| BrokerError::Connection(e.to_string()))?;

        let publisher = connection
            .create_channel()
            .await
            .map_err(|e| BrokerError::Connection(e.to_string()))?;
        publisher
            .confirm_select(ConfirmSelectOptions::default())
            .await
            .map_err(|e| BrokerError::Connection(e.to_string()))?;

        let cb_config = CircuitBreakerConfig {
            failure_threshold: 5,
            open_timeout: std::time::Duration::from_secs(30),
            success_threshold: 3,
        };

        tracing::info!(exchange = %exchange, "🐇 Connected to RabbitMQ");

        Ok(Self {
            connection,
            publisher,
            exchange: exchange.to_string(),
            circuit_breaker: CircuitBreaker::new("rabbitmq_publish", cb_config),
            metrics,
        })
    }

    /// Declare the exchange, processing queue and dead-letter queue. Idempotent.
    pub async fn declare_topology(&self, config: &RabbitMqConfig) -> Result<(), BrokerError> {
        let topology = |e: lapin::Error| BrokerError::Topology(e.to_string());
        self.publisher
            .exchange_declare(
                &config.exchange,
                ExchangeKind::Topic,
                ExchangeDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(topology)?;

        let mut dead_letter_args = FieldTable::default();
        dead_letter_args.insert(
            "x-dead-letter-exchange".into(),
            AMQPValue::LongString(config.exchange.as_str().into()),
        );
        dead_letter_args.insert(
            "x-dead-letter-routing-key".into(),
            AMQPValue::LongString(config.dead_letter_routing_key.as_str().into()),
        );

        self.publisher
            .queue_declare(&config.order_queue, durable_queue(), dead_letter_args)
            .await
            .map_err(topology)?;
        self.publisher
            .queue_bind(
                &config.order_queue,
                &config.exchange,
                &config.process_routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(topology)?;

        self.publisher
            .queue_declare(&config.dead_letter_queue, durable_queue(), FieldTable::default())
            .await
            .map_err(topology)?;
        self.publisher
            .queue_bind(
                &config.dead_letter_queue,
                &config.exchange,
                &config.dead_letter_routing_key,
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(topology)?;

        tracing::info!(
            exchange = %config.exchange,
            queue = %config.order_queue,
            dead_letter_queue = %config.dead_letter_queue,
            "Queue topology declared"
        );

        Ok(())
    }

    /// Start consuming `queue` on a dedicated channel with prefetch 1.
    pub async fn subscribe(&self, queue: &str) -> Result<MessageStream, BrokerError> {
        let consume = |e: lapin::Error| BrokerError::Consume(e.to_string());

        let channel = self.connection.create_channel().await.map_err(consume)?;
        channel
            .basic_qos(1, BasicQosOptions::default())
            .await
            .map_err(consume)?;

        let consumer_tag = format!("{}-{}", queue, uuid::Uuid::new_v4());
        let consumer = channel
            .basic_consume(
                queue,
                &consumer_tag,
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(consume)?;

        tracing::info!(queue = %queue, consumer_tag = %consumer_tag, "Subscribed");

        Ok(consumer
            .map(|delivery| {
                delivery
                    .map(|d| IncomingMessage {
                        routing_key: d.routing_key.to_string(),
                        payload: d.data,
                        acker: Box::new(RabbitAcker(d.acker)),
                    })
                    .map_err(|e| BrokerError::Consume(e.to_string()))
            })
            .boxed())
    }

    pub async fn circuit_state(&self) -> CircuitState {
        self.circuit_breaker.state().await
    }
}

#[async_trait]
impl MessagePublisher for RabbitMqClient {
    async fn publish(
        &self,
        routing_key: &str,
        correlation_id: &str,
        payload: &[u8],
    ) -> Result<(), BrokerError> {
        let properties = BasicProperties::default()
            .with_delivery_mode(PERSISTENT)
            .with_content_type("application/json".into())
            .with_correlation_id(correlation_id.into());

        let result = self
            .circuit_breaker
            .call(async {
                let confirm = self
                    .publisher
                    .basic_publish(
                        &self.exchange,
                        routing_key,
                        BasicPublishOptions::default(),
                        payload,
                        properties,
                    )
                    .await
                    .map_err(|e| BrokerError::Publish(e.to_string()))?
                    .await
                    .map_err(|e| BrokerError::Publish(e.to_string()))?;

                if confirm.is_nack() {
                    return Err(BrokerError::Nacked);
                }
                Ok(())
            })
            .await;

        self.metrics.set_circuit_state(self.circuit_breaker.state().await);

        match result {
            Ok(()) => {
                tracing::debug!(
                    exchange = %self.exchange,
                    routing_key = %routing_key,
                    correlation_id = %correlation_id,
                    "Published to RabbitMQ"
                );
                Ok(())
            }
            Err(CircuitBreakerError::CircuitOpen) => {
                tracing::error!(
                    exchange = %self.exchange,
                    "Circuit breaker open - RabbitMQ unavailable"
                );
                Err(BrokerError::CircuitOpen)
            }
            Err(CircuitBreakerError::OperationFailed(e)) => {
                tracing::error!(
                    error = %e,
                    exchange = %self.exchange,
                    correlation_id = %correlation_id,
                    "Failed to publish to RabbitMQ"
                );
                Err(e)
            }
        }
    }
}

fn durable_queue() -> QueueDeclareOptions {
    QueueDeclareOptions {
        durable: true,
        ..Default::default()
    }
}

struct RabbitAcker(Acker);

#[async_trait]
impl DeliveryAcker for RabbitAcker {
    async fn ack(&self) -> Result<(), BrokerError> {
        self.0
            .ack(BasicAckOptions::default())
            .await
            .map(|_| ())
            .map_err(|e| BrokerError::Acknowledge(e.to_string()))
    }

    async fn reject(&self, requeue: bool) -> Result<(), BrokerError> {
        self.0
            .nack(BasicNackOptions {
                multiple: false,
                requeue,
            })
            .await
            .map(|_| ())
            .map_err(|e| BrokerError::Acknowledge(e.to_string()))
    }
}
