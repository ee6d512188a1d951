//! Request handlers

use super::types::{
    ApiError, MonteCarloRequest, MonteCarloResponse, SimulateRequest, SimulateResponse,
};
use super::AppState;
use crate::simulation::{run_monte_carlo, seeded_rng};
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use std::sync::Arc;
use std::time::Instant;

fn reject(err: ApiError) -> ApiError {
    increment(CounterMetric::RejectedInputs);
    tracing::warn!(error = ?err, "Rejected request");
    err
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| reject(ApiError::BadRequest(rejection.body_text())))
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// `POST /api/offer-modeling/simulate`
pub async fn simulate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SimulateRequest>, JsonRejection>,
) -> Result<Json<SimulateResponse>, ApiError> {
    increment(CounterMetric::ValuationRequests);
    let request = parse_body(payload)?;

    let started = Instant::now();
    let input = request
        .into_input(&state.valuation)
        .map_err(|e| reject(e.into()))?;
    let result = state
        .engine
        .evaluate(&input)
        .map_err(|e| reject(e.into()))?;
    record_latency(LatencyMetric::Valuation, started.elapsed());

    tracing::info!(
        npv = result.npv,
        offer = result.recommended_offer,
        years = input.time_horizon_years,
        "Offer simulated"
    );
    Ok(Json(result.into()))
}

/// `POST /api/offer-modeling/monte-carlo`
pub async fn monte_carlo(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<MonteCarloRequest>, JsonRejection>,
) -> Result<Json<MonteCarloResponse>, ApiError> {
    increment(CounterMetric::MonteCarloRequests);
    let request = parse_body(payload)?;
    let config = &state.monte_carlo;

    let iterations = request.iterations.unwrap_or(config.iterations);
    if iterations > config.max_iterations {
        return Err(reject(ApiError::BadRequest(format!(
            "iterations must not exceed {}",
            config.max_iterations
        ))));
    }
    let seed = request.seed.unwrap_or(config.seed);
    let perturbation = config.perturbation(
        request.discount_rate_std_dev_percent,
        request.revenue_std_dev_percent,
    );
    let input = request
        .simulation
        .into_input(&state.valuation)
        .map_err(|e| reject(e.into()))?;

    let started = Instant::now();
    let summary = tokio::task::spawn_blocking(move || {
        run_monte_carlo(&input, iterations, perturbation, &mut seeded_rng(seed))
    })
    .await
    .map_err(|e| ApiError::Internal(format!("Monte Carlo worker failed: {}", e)))?
    .map_err(|e| reject(e.into()))?;
    record_latency(LatencyMetric::MonteCarlo, started.elapsed());

    tracing::info!(iterations, seed, mean = summary.mean, "Monte Carlo completed");
    Ok(Json(MonteCarloResponse::from_summary(
        &summary,
        seed,
        config.histogram_bins,
    )))
}
