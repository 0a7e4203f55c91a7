// ============================================================================
// Integration Faults
// ============================================================================
//
// One tagged enum per port boundary. Variants are built once, where the HTTP
// response or transport error is first seen, and consumed uniformly by the
// queue consumer's ack/reject decision.
//
// ============================================================================

/// Authentication against the vendor failed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid vendor credentials")]
    InvalidCredentials,

    #[error("Too many login attempts, try again later")]
    RateLimited,

    #[error("Vendor service unavailable")]
    Unavailable,

    #[error("Unexpected vendor login error: {0}")]
    Unexpected(String),
}

impl AuthenticationError {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthenticationError::InvalidCredentials => "credential",
            AuthenticationError::RateLimited => "rate_limit",
            AuthenticationError::Unavailable => "connectivity",
            AuthenticationError::Unexpected(_) => "unexpected",
        }
    }
}

/// Submitting an order to the vendor failed at the transport level.
///
/// A vendor response with `success=false` is not one of these; it is reported
/// through `OrderIntegrationResult::error`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderIntegrationError {
    #[error(transparent)]
    Authentication(#[from] AuthenticationError),

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Invalid order data: {0}")]
    InvalidOrderData(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Vendor service unavailable")]
    Unavailable,

    #[error("Unexpected vendor order error: {0}")]
    Unexpected(String),
}

impl OrderIntegrationError {
    pub fn kind(&self) -> &'static str {
        match self {
            OrderIntegrationError::Authentication(e) => e.kind(),
            OrderIntegrationError::InvalidToken => "invalid_token",
            OrderIntegrationError::InvalidOrderData(_) | OrderIntegrationError::Validation(_) => {
                "validation"
            }
            OrderIntegrationError::Unavailable => "connectivity",
            OrderIntegrationError::Unexpected(_) => "unexpected",
        }
    }
}

/// Best-effort store notification failed. Callers log and discard it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    #[error("Store API key is required")]
    MissingApiKey,

    #[error("Store notification failed: {0}")]
    Failed(String),
}
