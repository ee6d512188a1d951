//! Wire types for the offer-modeling API
//!
//! Field names follow the existing `/api/offer-modeling/simulate` contract.

use crate::config::ValuationConfig;
use crate::simulation::MonteCarloSummary;
use crate::valuation::{
    AudienceMetric, DiscountInput, ManualRevenue, Scenarios, TokenSizing, TokenSizingRequest,
    ValuationError, ValuationInput, ValuationResult,
};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Audience figures for one platform
#[derive(Debug, Clone, Deserialize)]
pub struct PlatformMetric {
    pub followers: f64,
    /// Percent
    pub engagement_rate: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

/// Body of `POST /api/offer-modeling/simulate`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimulateRequest {
    #[serde(default)]
    pub manual_revenue: Option<ManualRevenue>,
    #[serde(default)]
    pub use_public_data: bool,
    #[serde(default)]
    pub platforms: Option<Vec<PlatformMetric>>,
    #[serde(default)]
    pub conversion_factor: Option<f64>,
    #[serde(default)]
    pub discount_rate: Option<f64>,
    /// Named discount strategy; overrides `discount_rate`
    #[serde(default)]
    pub discount: Option<DiscountInput>,
    #[serde(default)]
    /// Whole years; integral floats such as `5.0` are accepted
    pub time_horizon: Option<f64>,
    #[serde(default)]
    pub offer_factor: Option<f64>,
    #[serde(default)]
    pub revenue_share_percent: Option<f64>,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub target_unit_value: Option<f64>,
    #[serde(default)]
    pub offering_premium_percent: Option<f64>,
}

fn whole_years(years: f64) -> Result<u32, ValuationError> {
    if years.is_finite() && years.fract() == 0.0 && years >= 1.0 && years <= f64::from(u32::MAX) {
        Ok(years as u32)
    } else {
        Err(ValuationError::invalid("time_horizon", "must be a positive integer"))
    }
}

impl SimulateRequest {
    /// Build a typed input, filling omitted fields from config
    pub fn into_input(self, defaults: &ValuationConfig) -> Result<ValuationInput, ValuationError> {
        let time_horizon_years = match self.time_horizon {
            Some(years) => whole_years(years)?,
            None => defaults.time_horizon_years,
        };

        let discount = match (self.discount, self.discount_rate) {
            (Some(discount), _) => discount,
            (None, Some(rate)) => DiscountInput::flat(rate),
            (None, None) => DiscountInput::flat(defaults.discount_rate_percent),
        };

        let audience_metrics = self
            .platforms
            .unwrap_or_default()
            .into_iter()
            .map(|p| AudienceMetric {
                followers: p.followers,
                engagement_rate_percent: p.engagement_rate,
                weight: p.weight,
            })
            .collect();

        Ok(ValuationInput {
            manual_revenue: self.manual_revenue,
            use_public_data: self.use_public_data,
            audience_metrics,
            conversion_factor: self.conversion_factor.unwrap_or(defaults.conversion_factor),
            revenue_share_percent: self
                .revenue_share_percent
                .unwrap_or(defaults.revenue_share_percent),
            discount,
            time_horizon_years,
            offer_factor_percent: self.offer_factor.unwrap_or(defaults.offer_factor_percent),
            total_supply: self.total_supply,
            token_sizing: self.target_unit_value.map(|target_unit_value| TokenSizingRequest {
                target_unit_value,
                offering_premium_percent: self.offering_premium_percent.unwrap_or(0.0),
            }),
        })
    }
}

/// Response of `POST /api/offer-modeling/simulate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulateResponse {
    pub estimated_revenue: f64,
    pub annual_cash_flow: f64,
    pub npv: f64,
    pub recommended_offer: f64,
    pub scenarios: Scenarios,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_sizing: Option<TokenSizing>,
}

impl From<ValuationResult> for SimulateResponse {
    fn from(result: ValuationResult) -> Self {
        Self {
            estimated_revenue: result.estimated_annual_revenue,
            annual_cash_flow: result.annual_cash_flow,
            npv: result.npv,
            recommended_offer: result.recommended_offer,
            scenarios: result.scenarios,
            token_sizing: result.token_sizing,
        }
    }
}

/// Body of `POST /api/offer-modeling/monte-carlo`
#[derive(Debug, Clone, Deserialize)]
pub struct MonteCarloRequest {
    #[serde(flatten)]
    pub simulation: SimulateRequest,
    #[serde(default)]
    pub iterations: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub discount_rate_std_dev_percent: Option<f64>,
    #[serde(default)]
    pub revenue_std_dev_percent: Option<f64>,
}

/// Response of `POST /api/offer-modeling/monte-carlo`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloResponse {
    pub iterations: usize,
    pub seed: u64,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
    pub histogram: Vec<usize>,
}

impl MonteCarloResponse {
    pub fn from_summary(summary: &MonteCarloSummary, seed: u64, bins: usize) -> Self {
        let stats = summary.stats();
        Self {
            iterations: stats.iterations,
            seed,
            mean: stats.mean,
            median: stats.median,
            variance: stats.variance,
            std_dev: stats.std_dev,
            histogram: summary.histogram(bins),
        }
    }
}

/// API errors
#[derive(Debug)]
pub enum ApiError {
    /// Input failed validation
    InvalidInput(ValuationError),
    /// Body could not be parsed
    BadRequest(String),
    /// Worker failure
    Internal(String),
}

impl From<ValuationError> for ApiError {
    fn from(err: ValuationError) -> Self {
        Self::InvalidInput(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        let body = Json(serde_json::json!({
            "status": "error",
            "message": message,
        }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(json: &str) -> SimulateRequest {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_simulate_body_shape() {
        let req = request(
            r#"{
                "manual_revenue": "100000",
                "use_public_data": false,
                "platforms": [],
                "conversion_factor": 0.005,
                "discount_rate": 10,
                "time_horizon": 5,
                "offer_factor": 50,
                "revenue_share_percent": 10
            }"#,
        );
        let input = req.into_input(&ValuationConfig::default()).unwrap();
        assert_eq!(input.discount, DiscountInput::flat(10.0));
        assert_eq!(input.time_horizon_years, 5);
        assert_eq!(
            input.manual_revenue,
            Some(ManualRevenue::Text("100000".to_string()))
        );
    }

    #[test]
    fn test_platforms_map_to_audience_metrics() {
        let req = request(
            r#"{
                "use_public_data": true,
                "platforms": [{"followers": 1000000, "engagement_rate": 5, "weight": 1}],
                "conversion_factor": 0.005
            }"#,
        );
        let input = req.into_input(&ValuationConfig::default()).unwrap();
        assert_eq!(input.audience_metrics.len(), 1);
        assert_eq!(input.audience_metrics[0].engagement_rate_percent, 5.0);
        assert_eq!(input.audience_metrics[0].weight, Some(1.0));
    }

    #[test]
    fn test_defaults_fill_missing_fields() {
        let defaults = ValuationConfig::default();
        let input = request("{}").into_input(&defaults).unwrap();
        assert_eq!(input.time_horizon_years, defaults.time_horizon_years);
        assert_eq!(input.offer_factor_percent, defaults.offer_factor_percent);
        assert_eq!(
            input.discount,
            DiscountInput::flat(defaults.discount_rate_percent)
        );
        assert!(input.token_sizing.is_none());
    }

    #[test]
    fn test_integral_float_horizon_accepted() {
        let input = request(r#"{"manual_revenue": 1000, "time_horizon": 5.0}"#)
            .into_input(&ValuationConfig::default())
            .unwrap();
        assert_eq!(input.time_horizon_years, 5);
    }

    #[test]
    fn test_non_positive_horizon_rejected() {
        for years in ["0", "-3", "0.0", "2.5", "1e12"] {
            let req = request(&format!(r#"{{"time_horizon": {}}}"#, years));
            let err = req.into_input(&ValuationConfig::default()).unwrap_err();
            assert_eq!(err.field(), "time_horizon");
        }
    }

    #[test]
    fn test_named_discount_overrides_flat_rate() {
        let req = request(
            r#"{
                "discount_rate": 25,
                "discount": {"mode": "capm_sum", "risk_free_rate": 3, "equity_risk_premium": 5, "industry_risk_premium": 2.5}
            }"#,
        );
        let input = req.into_input(&ValuationConfig::default()).unwrap();
        assert_eq!(input.discount.mode_name(), "capm_sum");
    }

    #[test]
    fn test_target_unit_value_requests_sizing() {
        let req = request(r#"{"target_unit_value": 2.5, "offering_premium_percent": 10}"#);
        let sizing = req
            .into_input(&ValuationConfig::default())
            .unwrap()
            .token_sizing
            .unwrap();
        assert_eq!(sizing.target_unit_value, 2.5);
        assert_eq!(sizing.offering_premium_percent, 10.0);
    }

    #[test]
    fn test_response_omits_absent_token_sizing() {
        let input = ValuationInput::manual(100_000.0, 10.0, 10.0, 5, 50.0);
        let result = crate::valuation::ValuationEngine::default()
            .evaluate(&input)
            .unwrap();
        let json = serde_json::to_value(SimulateResponse::from(result)).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(|k| k.as_str()).collect();
        assert_eq!(keys.len(), 5);
        for key in [
            "estimated_revenue",
            "annual_cash_flow",
            "npv",
            "recommended_offer",
            "scenarios",
        ] {
            assert!(keys.contains(&key), "missing {}", key);
        }
        assert!(json["scenarios"]["high"]["offer"].is_number());
    }

    #[test]
    fn test_monte_carlo_request_flattens_simulation() {
        let req: MonteCarloRequest = serde_json::from_str(
            r#"{"manual_revenue": 50000, "time_horizon": 3, "iterations": 250, "seed": 9}"#,
        )
        .unwrap();
        assert_eq!(req.iterations, Some(250));
        assert_eq!(req.simulation.time_horizon, Some(3.0));
        assert_eq!(
            req.simulation.manual_revenue,
            Some(ManualRevenue::Amount(50_000.0))
        );
    }
}
