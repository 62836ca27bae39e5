//! `dfguard serve` -- HTTP JSON API server for the mock verdict engine.
//!
//! Exposes the engine as an async HTTP service using `axum` + `tokio`.
//! Supports concurrent request handling; each submission is independent.
//!
//! Security features:
//! - CORS headers on all responses (permissive for local dev)
//! - Per-IP rate limiting (default: 60 req/min, configurable)
//! - Request body size cap (uploads are counted, never inspected)
//!
//! Endpoints:
//! - GET  /health               - Server status
//! - POST /api/predict/{type}   - Analyze an upload (type: image|audio|video)
//!
//! All responses use Content-Type: application/json.

mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{middleware as axum_middleware, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::EnvFilter;

use dfguard_engine::LatencyPolicy;

use self::handlers::{handle_health, handle_not_found, handle_predict};
use self::middleware::rate_limit_middleware;
use self::state::{AppState, RateLimiter};

/// Maximum request body size: 64 MB.
const MAX_BODY_SIZE: usize = 64 * 1024 * 1024;

/// Default rate limit: 60 requests per minute per IP.
const DEFAULT_RATE_LIMIT: u64 = 60;

/// Rate limit window duration in seconds (1 minute).
const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Construct a JSON error response with the given status code and message.
fn json_error(status: StatusCode, message: &str) -> impl IntoResponse {
    (status, Json(serde_json::json!({"error": message})))
}

/// Install the tracing subscriber for the server process.
///
/// Filter resolution: `RUST_LOG`, then `LOG_LEVEL`, then an info default.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_from_env("LOG_LEVEL"))
        .unwrap_or_else(|_| EnvFilter::new("dfguard_cli=info,dfguard_engine=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// Start the HTTP server on the given port.
///
/// `delay_ms` overrides the artificial analysis delay (None keeps the
/// engine default, 0 disables it).
///
/// Security:
/// - CORS: Permissive (`Any` origin) for local dev; tighten for production.
/// - Rate limit: Per-IP, `DFGUARD_RATE_LIMIT` env override (0 disables).
pub async fn start_server(
    port: u16,
    delay_ms: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Rate limit: from DFGUARD_RATE_LIMIT env var, or default
    let rate_limit = std::env::var("DFGUARD_RATE_LIMIT")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(DEFAULT_RATE_LIMIT);

    let latency = match delay_ms {
        Some(ms) => LatencyPolicy::fixed(ms),
        None => LatencyPolicy::default(),
    };

    if rate_limit == 0 {
        tracing::info!("rate limiting disabled");
    } else {
        tracing::info!(limit = rate_limit, "rate limit per minute per IP");
    }
    match latency.delay() {
        Some(delay) => {
            tracing::info!(delay_ms = delay.as_millis() as u64, "artificial analysis delay")
        }
        None => tracing::info!("artificial analysis delay disabled"),
    }

    let state = Arc::new(AppState {
        latency,
        rate_limiter: RateLimiter::new(rate_limit),
    });

    // CORS: permissive for local dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(handle_health))
        .route("/api/predict/{type}", post(handle_predict))
        .fallback(handle_not_found)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .with_state(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("dfguard listening on http://{}", addr);
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server shut down");
    Ok(())
}

/// Wait for a shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    tracing::info!("received shutdown signal");
}
