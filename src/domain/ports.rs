use async_trait::async_trait;

use super::errors::{AuthenticationError, NotificationError, OrderIntegrationError};
use super::order::{Order, OrderIntegrationResult};

// ============================================================================
// Ports
// ============================================================================
//
// Seams between the application service and the HTTP adapters. The queue
// consumer only sees `OrderIntegrationPort`, so it can be driven by the real
// service or by a stub.
//
// ============================================================================

#[derive(Clone)]
pub struct UsernamePasswordCredentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for UsernamePasswordCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsernamePasswordCredentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticationResult {
    pub access_token: String,
}

/// Vendor login plus local token freshness check.
#[async_trait]
pub trait AuthenticationPort: Send + Sync {
    async fn authenticate(
        &self,
        credentials: &UsernamePasswordCredentials,
    ) -> Result<AuthenticationResult, AuthenticationError>;

    /// Local expiry inspection only; never a network call.
    fn validate_token(&self, token: &str) -> bool;
}

/// API-key authentication for the store.
#[async_trait]
pub trait StoreAuthenticationPort: Send + Sync {
    async fn authenticate(&self, api_key: &str) -> Result<String, NotificationError>;

    fn validate_token(&self, api_key: &str) -> bool;
}

#[async_trait]
pub trait OrderIntegrationPort: Send + Sync {
    async fn create_order(&self, order: &Order)
        -> Result<OrderIntegrationResult, OrderIntegrationError>;
}

#[async_trait]
pub trait StorePort: Send + Sync {
    async fn notify_order_success(&self, order: &Order) -> Result<(), NotificationError>;
}
