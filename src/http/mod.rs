// ============================================================================
// HTTP Surface
// ============================================================================
//
// POST /orders   enqueue an order (ingress)
// GET  /health   liveness
// GET  /metrics  Prometheus scrape
//
// ============================================================================

mod handlers;
mod server;

pub use server::{start_http_server, AppState};
