//! Valuation engine
//!
//! Pure functions that turn creator revenue inputs into an NPV, an upfront
//! offer, scenarios and token sizing. Nothing here performs I/O or reads
//! the clock.

mod breakeven;
mod dcf;
mod diligence;
mod discount;
mod offer;
mod revenue;
mod token;
mod types;

pub use breakeven::{break_even_tokens, compute_break_even_year};
pub use dcf::{
    cash_yield_percent, compute_npv, cumulative_discounted_cash_flows, discounted_cash_flows,
};
pub use diligence::{
    summarize_due_diligence, DueDiligenceInput, DueDiligenceSummary,
    DEFAULT_DILIGENCE_REVENUE_SHARE_PERCENT, DEFAULT_REFERENCE_SUPPLY,
};
pub use discount::{resolve_discount_rate, DiscountInput};
pub use offer::{recommend_offer, ScenarioBand, DEFAULT_SCENARIO_BAND_PERCENT};
pub use revenue::{effective_followers, estimate_revenue, RevenueInput};
pub use token::{
    percent_revenue_share_per_token, price_fixed_supply, project_funds_raised,
    size_token_issuance, FundsRaisedProjection, TokenIssuance,
};
pub use types::{
    AudienceMetric, ManualRevenue, ScenarioValue, Scenarios, TokenSizing, TokenSizingRequest,
    ValuationError, ValuationInput, ValuationResult,
};

use crate::config::ValuationConfig;

/// Annual cash flow paid to token holders
pub fn annual_cash_flow(revenue: f64, revenue_share_percent: f64) -> f64 {
    revenue * (revenue_share_percent / 100.0)
}

/// Runs the full valuation pipeline
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    band: ScenarioBand,
}

impl ValuationEngine {
    /// Create an engine with the given scenario band
    pub fn new(band: ScenarioBand) -> Self {
        Self { band }
    }

    /// Create from ValuationConfig
    pub fn from_config(config: &ValuationConfig) -> Result<Self, ValuationError> {
        Ok(Self::new(ScenarioBand::new(config.scenario_band_percent)?))
    }

    /// Value an offer
    pub fn evaluate(&self, input: &ValuationInput) -> Result<ValuationResult, ValuationError> {
        input.validate()?;

        let revenue = estimate_revenue(&RevenueInput::from(input))?;
        let cash_flow = annual_cash_flow(revenue, input.revenue_share_percent);
        let rate = resolve_discount_rate(&input.discount)?;
        let npv = compute_npv(cash_flow, rate, input.time_horizon_years)?;

        Ok(ValuationResult {
            estimated_annual_revenue: revenue,
            annual_cash_flow: cash_flow,
            discount_rate_percent: rate,
            npv,
            recommended_offer: recommend_offer(npv, input.offer_factor_percent),
            scenarios: self.band.fan_out(npv, input.offer_factor_percent),
            token_sizing: size_tokens(input, npv)?,
        })
    }
}

/// Token figures for the input, if any were requested
///
/// A target unit value takes precedence over a fixed total supply.
fn size_tokens(input: &ValuationInput, npv: f64) -> Result<Option<TokenSizing>, ValuationError> {
    if let Some(request) = &input.token_sizing {
        let issuance = size_token_issuance(
            npv,
            request.target_unit_value,
            request.offering_premium_percent,
        )?;
        return Ok(Some(TokenSizing {
            recommended_token_price: issuance.recommended_token_price,
            recommended_supply: issuance.recommended_supply,
            percent_revenue_share_per_token: percent_revenue_share_per_token(
                input.revenue_share_percent,
                issuance.recommended_supply,
            )?,
            token_sale_revenue: issuance.token_sale_revenue,
        }));
    }

    if let Some(supply) = input.total_supply {
        let price = price_fixed_supply(npv, supply)?;
        return Ok(Some(TokenSizing {
            recommended_token_price: price,
            recommended_supply: supply,
            percent_revenue_share_per_token: percent_revenue_share_per_token(
                input.revenue_share_percent,
                supply,
            )?,
            token_sale_revenue: price * supply,
        }));
    }

    Ok(None)
}
