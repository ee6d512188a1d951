//! Valuation types

use super::DiscountInput;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Valuation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// Malformed or out-of-domain input
    #[error("Invalid input for `{field}`: {reason}")]
    InvalidInput { field: String, reason: String },
}

impl ValuationError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the offending field
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

/// Reject NaN and infinities
pub(crate) fn ensure_finite(field: &str, value: f64) -> Result<f64, ValuationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValuationError::invalid(field, "must be a finite number"))
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> Result<f64, ValuationError> {
    let value = ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ValuationError::invalid(field, "must not be negative"));
    }
    Ok(value)
}

pub(crate) fn ensure_percent(field: &str, value: f64) -> Result<f64, ValuationError> {
    let value = ensure_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ValuationError::invalid(field, "must be between 0 and 100"));
    }
    Ok(value)
}

/// Audience figures for one social platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudienceMetric {
    /// Follower count
    pub followers: f64,
    /// Engagement rate as a percentage (5.0 means 5%)
    pub engagement_rate_percent: f64,
    /// Relative platform weight, 1.0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl AudienceMetric {
    /// Create a metric with the default weight
    pub fn new(followers: f64, engagement_rate_percent: f64) -> Self {
        Self {
            followers,
            engagement_rate_percent,
            weight: None,
        }
    }

    /// Set the platform weight
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }
}

/// Manually supplied annual revenue
///
/// Form layers hand revenue over as text, so both shapes are accepted and
/// parsed strictly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ManualRevenue {
    Amount(f64),
    Text(String),
}

impl ManualRevenue {
    /// Resolve to a finite amount, `None` for blank text
    pub fn resolve(&self) -> Result<Option<f64>, ValuationError> {
        match self {
            Self::Amount(value) => ensure_finite("manual_revenue", *value).map(Some),
            Self::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                let value: f64 = trimmed.parse().map_err(|_| {
                    ValuationError::invalid(
                        "manual_revenue",
                        format!("'{}' is not a number", trimmed),
                    )
                })?;
                ensure_finite("manual_revenue", value).map(Some)
            }
        }
    }
}

impl From<f64> for ManualRevenue {
    fn from(value: f64) -> Self {
        Self::Amount(value)
    }
}

/// Token sizing against a target value per token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenSizingRequest {
    /// Value each token should represent
    pub target_unit_value: f64,
    /// Premium charged over unit value at sale
    #[serde(default)]
    pub offering_premium_percent: f64,
}

/// Complete valuation input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationInput {
    #[serde(default)]
    pub manual_revenue: Option<ManualRevenue>,
    #[serde(default)]
    pub use_public_data: bool,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub audience_metrics: Vec<AudienceMetric>,
    /// Currency per effective follower per year
    #[serde(default)]
    pub conversion_factor: f64,
    /// Share of revenue paid to the token holder pool (0-100)
    pub revenue_share_percent: f64,
    pub discount: DiscountInput,
    pub time_horizon_years: u32,
    /// Share of NPV offered upfront (0-100)
    pub offer_factor_percent: f64,
    #[serde(default)]
    pub total_supply: Option<f64>,
    #[serde(default)]
    pub token_sizing: Option<TokenSizingRequest>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AudienceMetric>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<AudienceMetric>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ValuationInput {
    /// Input with manual revenue and a flat discount rate
    pub fn manual(
        revenue: f64,
        revenue_share_percent: f64,
        discount_rate_percent: f64,
        time_horizon_years: u32,
        offer_factor_percent: f64,
    ) -> Self {
        Self {
            manual_revenue: Some(ManualRevenue::Amount(revenue)),
            use_public_data: false,
            audience_metrics: Vec::new(),
            conversion_factor: 0.0,
            revenue_share_percent,
            discount: DiscountInput::Flat {
                rate_percent: discount_rate_percent,
            },
            time_horizon_years,
            offer_factor_percent,
            total_supply: None,
            token_sizing: None,
        }
    }

    /// Check every field against its domain
    pub fn validate(&self) -> Result<(), ValuationError> {
        if let Some(manual) = &self.manual_revenue {
            manual.resolve()?;
        }
        ensure_non_negative("conversion_factor", self.conversion_factor)?;
        ensure_percent("revenue_share_percent", self.revenue_share_percent)?;
        ensure_percent("offer_factor_percent", self.offer_factor_percent)?;
        if self.time_horizon_years < 1 {
            return Err(ValuationError::invalid(
                "time_horizon_years",
                "must be a positive integer",
            ));
        }
        super::resolve_discount_rate(&self.discount)?;
        if let Some(supply) = self.total_supply {
            ensure_finite("total_supply", supply)?;
            if supply <= 0.0 {
                return Err(ValuationError::invalid(
                    "total_supply",
                    "must be greater than zero",
                ));
            }
        }
        if let Some(sizing) = &self.token_sizing {
            ensure_finite("target_unit_value", sizing.target_unit_value)?;
            ensure_finite("offering_premium_percent", sizing.offering_premium_percent)?;
        }
        Ok(())
    }
}

/// NPV and offer for one scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioValue {
    pub npv: f64,
    pub offer: f64,
}

/// Optimistic, base and pessimistic scenarios
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scenarios {
    pub high: ScenarioValue,
    pub medium: ScenarioValue,
    pub low: ScenarioValue,
}

/// Token issuance figures attached to a valuation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenSizing {
    pub recommended_token_price: f64,
    pub recommended_supply: f64,
    /// Percent of revenue each token carries
    pub percent_revenue_share_per_token: f64,
    pub token_sale_revenue: f64,
}

/// Output of a valuation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    pub estimated_annual_revenue: f64,
    pub annual_cash_flow: f64,
    /// Resolved discount rate in percent
    pub discount_rate_percent: f64,
    pub npv: f64,
    pub recommended_offer: f64,
    pub scenarios: Scenarios,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_sizing: Option<TokenSizing>,
}
