// ============================================================================
// Messaging
// ============================================================================
//
// order.exchange (topic)
//   ├─ order.process     → order.queue             → OrderConsumer
//   └─ order.dead-letter → order.dead-letter.queue → DeadLetterConsumer
//
// order.queue dead-letters into order.exchange with order.dead-letter, so a
// reject(requeue=false) is all it takes to move an order to the DLQ.
//
// ============================================================================

pub mod broker;
pub mod consumer;
pub mod dead_letter;
pub mod envelope;
pub mod producer;
pub mod rabbitmq;

pub use broker::BrokerError;
pub use consumer::OrderConsumer;
pub use dead_letter::DeadLetterConsumer;
pub use producer::OrderProducer;
pub use rabbitmq::RabbitMqClient;
