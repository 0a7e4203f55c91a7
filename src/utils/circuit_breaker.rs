use std::time::{Duration, Instant};
use tokio::sync::Mutex;

// ============================================================================
// Circuit Breaker
// ============================================================================
//
// Guards broker publishes. After `failure_threshold` consecutive failures the
// breaker opens and fails fast. Once `open_timeout` has elapsed it goes
// half-open and admits calls again: `success_threshold` successes in a row
// close it, any failure reopens it. Half-open does not limit concurrency.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    Closed,
    Open,
    HalfOpen,
}

impl CircuitState {
    /// Value exported on the `circuit_breaker_state` gauge.
    pub fn gauge_value(self) -> i64 {
        match self {
            CircuitState::Closed => 0,
            CircuitState::Open => 1,
            CircuitState::HalfOpen => 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    pub failure_threshold: u32,
    pub open_timeout: Duration,
    pub success_threshold: u32,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            open_timeout: Duration::from_secs(30),
            success_threshold: 3,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CircuitBreakerError<E> {
    #[error("circuit breaker is open")]
    CircuitOpen,

    #[error("{0}")]
    OperationFailed(E),
}

struct Counters {
    state: CircuitState,
    failures: u32,
    successes: u32,
    opened_at: Option<Instant>,
}

pub struct CircuitBreaker {
    name: &'static str,
    config: CircuitBreakerConfig,
    counters: Mutex<Counters>,
}

impl CircuitBreaker {
    pub fn new(name: &'static str, config: CircuitBreakerConfig) -> Self {
        Self {
            name,
            config,
            counters: Mutex::new(Counters {
                state: CircuitState::Closed,
                failures: 0,
                successes: 0,
                opened_at: None,
            }),
        }
    }

    pub async fn call<F, T, E>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: std::future::Future<Output = Result<T, E>>,
    {
        self.admit().await?;

        match operation.await {
            Ok(value) => {
                self.on_success().await;
                Ok(value)
            }
            Err(err) => {
                self.on_failure().await;
                Err(CircuitBreakerError::OperationFailed(err))
            }
        }
    }

    pub async fn state(&self) -> CircuitState {
        self.counters.lock().await.state
    }

    async fn admit<E>(&self) -> Result<(), CircuitBreakerError<E>> {
        let mut c = self.counters.lock().await;

        if c.state == CircuitState::Open {
            let cooled = c
                .opened_at
                .is_some_and(|at| at.elapsed() >= self.config.open_timeout);
            if !cooled {
                return Err(CircuitBreakerError::CircuitOpen);
            }
            tracing::info!(breaker = self.name, "Circuit breaker half-open");
            c.state = CircuitState::HalfOpen;
            c.successes = 0;
        }

        Ok(())
    }

    async fn on_success(&self) {
        let mut c = self.counters.lock().await;

        match c.state {
            CircuitState::HalfOpen => {
                c.successes += 1;
                if c.successes >= self.config.success_threshold {
                    tracing::info!(breaker = self.name, "🟢 Circuit breaker closed");
                    c.state = CircuitState::Closed;
                    c.failures = 0;
                    c.successes = 0;
                    c.opened_at = None;
                }
            }
            CircuitState::Closed => c.failures = 0,
            CircuitState::Open => {}
        }
    }

    async fn on_failure(&self) {
        let mut c = self.counters.lock().await;
        c.failures += 1;

        let trip = match c.state {
            CircuitState::Closed => c.failures >= self.config.failure_threshold,
            CircuitState::HalfOpen => true,
            CircuitState::Open => false,
        };

        if trip {
            tracing::warn!(
                breaker = self.name,
                failures = c.failures,
                "🔴 Circuit breaker opened"
            );
            c.state = CircuitState::Open;
            c.successes = 0;
            c.opened_at = Some(Instant::now());
        }
    }
}
