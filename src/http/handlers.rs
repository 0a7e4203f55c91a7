use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;

use crate::domain::Order;

use super::server::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QueuedResponse {
    status: &'static str,
    correlation_id: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    status: &'static str,
    message: String,
}

pub async fn create_order(state: web::Data<AppState>, order: web::Json<Order>) -> impl Responder {
    match state.producer.publish_order(order.into_inner()).await {
        Ok(correlation_id) => HttpResponse::Accepted().json(QueuedResponse {
            status: "queued",
            correlation_id,
        }),
        Err(e) => HttpResponse::ServiceUnavailable().json(ErrorResponse {
            status: "error",
            message: e.to_string(),
        }),
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "order-integrator"
    }))
}

pub async fn metrics(state: web::Data<AppState>) -> impl Responder {
    match state.metrics.encode() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            tracing::error!(error = %e, "Failed to encode metrics");
            HttpResponse::InternalServerError().finish()
        }
    }
}
