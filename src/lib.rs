//! REST backend for a restaurant ordering application.
//!
//! Two in-memory collections, dishes and orders, exposed over CRUD-style
//! JSON endpoints. Requests and responses use a `{ "data": ... }` envelope;
//! errors come back as `{ "error": ... }` with a 400 or 404 status.
//!
//! # Endpoints
//!
//! | Method | Path | |
//! |---|---|---|
//! | GET | /dishes | all dishes |
//! | POST | /dishes | create a dish |
//! | GET | /dishes/{dishId} | one dish |
//! | PUT | /dishes/{dishId} | update a dish |
//! | GET | /orders | all orders |
//! | POST | /orders | create an order |
//! | GET | /orders/{orderId} | one order |
//! | PUT | /orders/{orderId} | update an order |
//! | DELETE | /orders/{orderId} | remove a pending order |
//!
//! Dishes are never deleted. An order can only be removed while it is still
//! `pending`, and a `delivered` order rejects every further change.
//!
//! Records live in a process-wide store behind a single lock, so each
//! request's validator chain and mutation run atomically. Nothing survives a
//! restart.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method, StatusCode, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use signal::{
    ctrl_c,
    unix::{signal, SignalKind},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod config;
pub mod dishes;
pub mod envelope;
pub mod error;
pub mod orders;
pub mod state;
pub mod store;
pub mod validate;

use state::{AppState, SharedState};

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = router().layer(cors).with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/dishes", get(dishes::list).post(dishes::create))
        .route("/dishes/{dishId}", get(dishes::read).put(dishes::update))
        .route("/orders", get(orders::list).post(orders::create))
        .route(
            "/orders/{orderId}",
            get(orders::read)
                .put(orders::update)
                .delete(orders::delete),
        )
        .fallback(not_found)
}

async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Path not found: {uri}") })),
    )
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
