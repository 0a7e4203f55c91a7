pub mod order_integration;

pub use order_integration::OrderIntegrationService;
