//! HTTP routes for health checks and Prometheus metrics
//!
//! In webhook mode these routes are merged into the router that receives
//! Telegram updates; in polling mode they are served on their own.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use prometheus::{Encoder, TextEncoder};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::time::Instant;

/// Application state for the health routes
#[derive(Clone)]
struct AppState {
    start_time: Instant,
}

/// Builds the router with `/health` and `/metrics`
pub fn router() -> Router {
    let state = AppState {
        start_time: Instant::now(),
    };

    Router::new()
        .route("/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(Arc::new(state))
}

/// Adds `/health` and `/metrics` to another router when metrics are enabled.
pub fn merge_into(router: Router, enabled: bool) -> Router {
    if enabled {
        router.merge(self::router())
    } else {
        router
    }
}

/// Start a standalone metrics HTTP server
///
/// # Arguments
/// * `addr` - Address to listen on
pub async fn start_metrics_server(addr: SocketAddr) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    log::info!("Starting metrics server on http://{}", addr);
    log::info!("  /metrics - Prometheus metrics");
    log::info!("  /health  - Health check (liveness)");

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, router()).await?;

    Ok(())
}

/// Handler for /metrics endpoint
///
/// Returns Prometheus metrics in text exposition format
async fn metrics_handler() -> Response {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(_) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, encoder.format_type().to_string())],
            buffer,
        )
            .into_response(),
        Err(e) => {
            log::error!("Failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Failed to encode metrics: {}", e)).into_response()
        }
    }
}

/// Handler for /health endpoint
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let uptime = state.start_time.elapsed();

    let health_status = serde_json::json!({
        "status": "healthy",
        "uptime_seconds": uptime.as_secs(),
        "uptime_human": format_duration(uptime),
        "service": "photosheet",
        "version": env!("CARGO_PKG_VERSION"),
    });

    (StatusCode::OK, axum::Json(health_status))
}

/// Uptime as `1d 2h 3m 4s`, leading zero units omitted
fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    let units = [(secs / 86_400, "d"), (secs / 3_600 % 24, "h"), (secs / 60 % 60, "m")];
    let first = units.iter().position(|(n, _)| *n > 0).unwrap_or(units.len());

    let mut parts: Vec<String> = units[first..].iter().map(|(n, unit)| format!("{}{}", n, unit)).collect();
    parts.push(format!("{}s", secs % 60));
    parts.join(" ")
}
