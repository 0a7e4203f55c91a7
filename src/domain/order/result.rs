use serde::{Deserialize, Serialize};

// ============================================================================
// Order Integration Result
// ============================================================================
//
// The single outcome value threaded from the vendor adapter back to the
// queue consumer. `Error` is a reported business outcome, not a fault.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntegrationStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderIntegrationResult {
    pub status: IntegrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl OrderIntegrationResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: IntegrationStatus::Success,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: IntegrationStatus::Error,
            message: Some(message.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == IntegrationStatus::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_value(OrderIntegrationResult::error("x")).unwrap();
        assert_eq!(json, serde_json::json!({"status": "error", "message": "x"}));
    }

    #[test]
    fn test_is_success() {
        assert!(OrderIntegrationResult::success("ok").is_success());
        assert!(!OrderIntegrationResult::error("nope").is_success());
    }
}
