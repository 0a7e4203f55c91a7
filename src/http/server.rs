use actix_web::{web, App, HttpServer};
use std::sync::Arc;

use crate::messaging::OrderProducer;
use crate::metrics::Metrics;

use super::handlers;

#[derive(Clone)]
pub struct AppState {
    pub producer: Arc<OrderProducer>,
    pub metrics: Arc<Metrics>,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/orders", web::post().to(handlers::create_order))
        .route("/health", web::get().to(handlers::health))
        .route("/metrics", web::get().to(handlers::metrics));
}

pub async fn start_http_server(state: AppState, port: u16) -> std::io::Result<()> {
    tracing::info!("🌐 Starting HTTP server on http://0.0.0.0:{}", port);

    let data = web::Data::new(state);
    HttpServer::new(move || App::new().app_data(data.clone()).configure(routes))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}
