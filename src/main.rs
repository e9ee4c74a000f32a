// src/main.rs
mod routes;
mod handlers;
mod models;
mod middleware;
mod state;
mod dtos;
mod error;
mod auth;
mod config;
mod cookies;
mod backend;
mod cart;
mod catalog;
mod checkout;
mod admin;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use axum::{http::{header, HeaderValue, Method}, routing::get, Router};
use tower_http::cors::CorsLayer;
use tracing_subscriber::fmt::init as tracing_init;
use tokio::net::TcpListener;
use dotenvy::dotenv;
use std::net::SocketAddr;

use crate::backend::BackendClient;
use crate::config::Config;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Configuration error");
            return;
        }
    };

    // Client for the store backend
    let backend = match BackendClient::new(config.api_base_url.clone()) {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build backend client");
            return;
        }
    };
    tracing::info!(api = %config.api_base_url, "Using store backend");

    // Create application state
    let app_state = state::AppState::new(Arc::new(backend), &config);

    let cors = match config.allowed_origin.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE])
            .allow_credentials(true),
        Err(e) => {
            tracing::error!(origin = %config.allowed_origin, error = %e, "Invalid ALLOWED_ORIGIN");
            return;
        }
    };

    let app = routes::create_router(&app_state)
        .route("/", get(|| async { "Mini Market F.J storefront" }))
        .route("/health", get(health_check))
        .layer(cors)
        .with_state(app_state);
    let app: Router = app;

    // Start server with HOST/PORT env and graceful port selection
    let host = config.host;
    let base_port = config.port;

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

async fn health_check() -> &'static str {
    "OK"
}
