use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod adapters;
mod app_config;
mod application;
mod domain;
mod http;
mod messaging;
mod metrics;
mod utils;

use adapters::store::{StoreAuthAdapter, StoreNotifierAdapter};
use adapters::vendor::{VendorAuthAdapter, VendorOrderAdapter};
use app_config::{redact_credentials, AppConfig, RabbitMqConfig};
use application::OrderIntegrationService;
use messaging::{BrokerError, DeadLetterConsumer, OrderConsumer, OrderProducer, RabbitMqClient};
use metrics::Metrics;
use utils::retry_on_transient;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO, debug for this crate; override with RUST_LOG
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_integrator=debug")),
        )
        .init();

    tracing::info!("🚀 Starting order integrator");

    let config = AppConfig::load()?;
    tracing::debug!(?config, "Configuration loaded");

    // === 1. Metrics ===
    let metrics = Arc::new(Metrics::new()?);

    // === 2. Broker connection + topology ===
    let rabbit = Arc::new(connect_broker(&config.rabbitmq, metrics.clone()).await?);
    rabbit.declare_topology(&config.rabbitmq).await?;
    metrics.set_circuit_state(rabbit.circuit_state().await);

    // === 3. Outbound adapters ===
    let http_client = reqwest::Client::builder().build()?;

    let vendor_auth = Arc::new(VendorAuthAdapter::new(
        http_client.clone(),
        &config.vendor.base_url,
        config.vendor.auth_timeout(),
    ));
    let vendor = Arc::new(VendorOrderAdapter::new(
        http_client.clone(),
        &config.vendor.base_url,
        config.vendor.order_timeout(),
        config.vendor.credentials(),
        vendor_auth,
    ));

    let store_auth = Arc::new(StoreAuthAdapter::new(&config.store.api_key));
    let store = Arc::new(StoreNotifierAdapter::new(
        http_client,
        &config.store.webhook_url,
        &config.store.api_key,
        config.store.timeout(),
        store_auth,
    ));

    // === 4. Service, consumers and producer ===
    let service = Arc::new(OrderIntegrationService::new(vendor, store));
    let consumer = OrderConsumer::new(service, metrics.clone());
    let dead_letters = DeadLetterConsumer::new(metrics.clone());
    let producer = Arc::new(OrderProducer::new(
        rabbit.clone(),
        &config.rabbitmq.process_routing_key,
        metrics.clone(),
    ));

    let order_stream = rabbit.subscribe(&config.rabbitmq.order_queue).await?;
    let dead_letter_stream = rabbit.subscribe(&config.rabbitmq.dead_letter_queue).await?;

    // === 5. Run until any task stops or Ctrl-C ===
    let server = http::start_http_server(
        http::AppState { producer, metrics },
        config.server.port,
    );

    tokio::select! {
        result = server => {
            result?;
            tracing::warn!("HTTP server stopped");
        }
        result = consumer.run(order_stream) => {
            result?;
        }
        result = dead_letters.run(dead_letter_stream) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("🛑 Shutdown signal received");
        }
    }

    tracing::info!("Order integrator stopped");
    Ok(())
}

/// Connect with exponential backoff, bounded by `rabbitmq.max_retries`.
async fn connect_broker(
    config: &RabbitMqConfig,
    metrics: Arc<Metrics>,
) -> Result<RabbitMqClient, BrokerError> {
    retry_on_transient(&config.connect_retry(), |attempt| {
        let metrics = metrics.clone();
        async move {
            tracing::info!(attempt, url = %redact_credentials(&config.url), "Connecting to RabbitMQ...");
            RabbitMqClient::connect(&config.url, &config.exchange, metrics).await
        }
    })
    .await
    .into_result()
}
