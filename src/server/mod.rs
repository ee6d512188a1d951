//! HTTP service
//!
//! Exposes the valuation engine behind the offer-modeling routes:
//! - `POST /api/offer-modeling/simulate`
//! - `POST /api/offer-modeling/monte-carlo`
//! - `GET /health`

mod handlers;
mod types;

pub use types::{
    ApiError, MonteCarloRequest, MonteCarloResponse, PlatformMetric, SimulateRequest,
    SimulateResponse,
};

use crate::config::{Config, MonteCarloConfig, ValuationConfig};
use crate::valuation::ValuationEngine;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared handler state
#[derive(Debug, Clone)]
pub struct AppState {
    pub engine: ValuationEngine,
    pub valuation: ValuationConfig,
    pub monte_carlo: MonteCarloConfig,
}

impl AppState {
    /// Build state from configuration
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            engine: ValuationEngine::from_config(&config.valuation)?,
            valuation: config.valuation.clone(),
            monte_carlo: config.monte_carlo.clone(),
        })
    }
}

/// Build the router
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/offer-modeling/simulate", post(handlers::simulate))
        .route("/api/offer-modeling/monte-carlo", post(handlers::monte_carlo))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Serve until the process is stopped
pub async fn serve(config: &Config, bind_address: &str) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(config)?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_address).await?;
    tracing::info!(address = bind_address, "Offer modeling API listening");
    axum::serve(listener, app).await?;

    Ok(())
}
