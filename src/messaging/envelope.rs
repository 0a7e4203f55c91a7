use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::Order;

/// What actually travels on the queue: the order's own fields plus the
/// enqueue time and a correlation id that follows it into the dead-letter
/// queue.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QueueEnvelope {
    #[serde(flatten)]
    pub order: Order,
    pub enqueued_at: DateTime<Utc>,
    pub correlation_id: String,
}

impl QueueEnvelope {
    pub fn new(order: Order, enqueued_at: DateTime<Utc>) -> Self {
        let correlation_id = format!("{}-{}", order.external_id, enqueued_at.timestamp_millis());
        Self {
            order,
            enqueued_at,
            correlation_id,
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json(payload: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(payload)
    }
}
