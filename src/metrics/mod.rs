use prometheus::{
    Encoder, Histogram, HistogramOpts, IntCounter, IntCounterVec, IntGauge, Opts, Registry,
    TextEncoder,
};

use crate::utils::CircuitState;

// ============================================================================
// Metrics Module - Prometheus metrics for the order pipeline
// ============================================================================
//
// - Producer: published / publish failures
// - Consumer: processed by outcome, failures by fault kind, latency
// - Dead letters
// - Publish circuit breaker state
//
// Scraped through GET /metrics.
// ============================================================================

/// Final disposition of one delivery on the processing queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingOutcome {
    Acked,
    Rejected,
}

impl ProcessingOutcome {
    pub fn label(self) -> &'static str {
        match self {
            ProcessingOutcome::Acked => "acked",
            ProcessingOutcome::Rejected => "rejected",
        }
    }
}

pub struct Metrics {
    registry: Registry,

    pub orders_published: IntCounter,
    pub orders_publish_failed: IntCounter,

    pub orders_processed: IntCounterVec,
    pub order_failures: IntCounterVec,
    pub processing_duration: Histogram,

    pub dead_letters: IntCounter,

    pub circuit_breaker_state: IntGauge,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_published = IntCounter::new(
            "orders_published_total",
            "Orders published to the processing exchange",
        )?;
        registry.register(Box::new(orders_published.clone()))?;

        let orders_publish_failed = IntCounter::new(
            "orders_publish_failed_total",
            "Orders that could not be published",
        )?;
        registry.register(Box::new(orders_publish_failed.clone()))?;

        let orders_processed = IntCounterVec::new(
            Opts::new("orders_processed_total", "Deliveries handled by the order consumer"),
            &["outcome"],
        )?;
        registry.register(Box::new(orders_processed.clone()))?;

        let order_failures = IntCounterVec::new(
            Opts::new("order_failures_total", "Order processing failures by fault kind"),
            &["kind"],
        )?;
        registry.register(Box::new(order_failures.clone()))?;

        let processing_duration = Histogram::with_opts(
            HistogramOpts::new(
                "order_processing_duration_seconds",
                "Time from delivery to ack/reject",
            )
            .buckets(vec![0.01, 0.05, 0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        )?;
        registry.register(Box::new(processing_duration.clone()))?;

        let dead_letters = IntCounter::new(
            "dead_letters_total",
            "Messages drained from the dead-letter queue",
        )?;
        registry.register(Box::new(dead_letters.clone()))?;

        let circuit_breaker_state = IntGauge::new(
            "circuit_breaker_state",
            "Publish circuit breaker state (0=Closed, 1=Open, 2=HalfOpen)",
        )?;
        registry.register(Box::new(circuit_breaker_state.clone()))?;

        Ok(Self {
            registry,
            orders_published,
            orders_publish_failed,
            orders_processed,
            order_failures,
            processing_duration,
            dead_letters,
            circuit_breaker_state,
        })
    }

    pub fn record_published(&self) {
        self.orders_published.inc();
    }

    pub fn record_publish_failed(&self) {
        self.orders_publish_failed.inc();
    }

    pub fn record_processed(&self, outcome: ProcessingOutcome, duration_secs: f64) {
        self.orders_processed.with_label_values(&[outcome.label()]).inc();
        self.processing_duration.observe(duration_secs);
    }

    /// `kind` is a fault's `kind()` label, or "rejected"/"malformed" for
    /// non-fault rejections.
    pub fn record_failure(&self, kind: &str) {
        self.order_failures.with_label_values(&[kind]).inc();
    }

    pub fn record_dead_letter(&self) {
        self.dead_letters.inc();
    }

    pub fn set_circuit_state(&self, state: CircuitState) {
        self.circuit_breaker_state.set(state.gauge_value());
    }

    /// Render every registered metric in the Prometheus text format.
    pub fn encode(&self) -> Result<Vec<u8>, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        Ok(buffer)
    }
}
