//! Due-diligence summary
//!
//! Values a known net revenue stream under a resolved discount strategy and
//! prices tokens against a reference supply.

use super::dcf::{cash_yield_percent, compute_npv, cumulative_discounted_cash_flows};
use super::discount::{resolve_discount_rate, DiscountInput};
use super::offer::recommend_offer;
use super::token::price_fixed_supply;
use super::types::{ensure_finite, ensure_percent, ManualRevenue, ValuationError, ValuationInput};
use serde::{Deserialize, Serialize};

/// Revenue share used when none is given
pub const DEFAULT_DILIGENCE_REVENUE_SHARE_PERCENT: f64 = 10.0;

/// Supply the token price is quoted against
pub const DEFAULT_REFERENCE_SUPPLY: f64 = 1_000_000.0;

/// Due-diligence inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDiligenceInput {
    pub annual_net_revenue: f64,
    #[serde(default = "default_revenue_share")]
    pub revenue_share_percent: f64,
    pub discount: DiscountInput,
    pub time_horizon_years: u32,
    pub offer_factor_percent: f64,
    #[serde(default = "default_reference_supply")]
    pub reference_supply: f64,
}

fn default_revenue_share() -> f64 {
    DEFAULT_DILIGENCE_REVENUE_SHARE_PERCENT
}
fn default_reference_supply() -> f64 {
    DEFAULT_REFERENCE_SUPPLY
}

impl From<&DueDiligenceInput> for ValuationInput {
    /// Same stream as a manual-revenue valuation priced over the reference supply
    fn from(input: &DueDiligenceInput) -> Self {
        Self {
            manual_revenue: Some(ManualRevenue::Amount(input.annual_net_revenue)),
            use_public_data: false,
            audience_metrics: Vec::new(),
            conversion_factor: 0.0,
            revenue_share_percent: input.revenue_share_percent,
            discount: input.discount.clone(),
            time_horizon_years: input.time_horizon_years,
            offer_factor_percent: input.offer_factor_percent,
            total_supply: Some(input.reference_supply),
            token_sizing: None,
        }
    }
}

/// Due-diligence output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DueDiligenceSummary {
    pub discount_rate_percent: f64,
    pub annual_cash_flow: f64,
    pub npv: f64,
    /// Annual cash flow relative to NPV, in percent
    pub cash_yield_percent: Option<f64>,
    pub recommended_token_price: f64,
    /// Upfront offer level the cumulative curve is compared against
    pub offer_threshold: f64,
    /// Cumulative discounted cash flow per year
    pub cumulative_schedule: Vec<f64>,
}

/// Build a due-diligence summary
pub fn summarize_due_diligence(
    input: &DueDiligenceInput,
) -> Result<DueDiligenceSummary, ValuationError> {
    let revenue = ensure_finite("annual_net_revenue", input.annual_net_revenue)?;
    let share = ensure_percent("revenue_share_percent", input.revenue_share_percent)?;
    let offer_factor = ensure_percent("offer_factor_percent", input.offer_factor_percent)?;
    let rate = resolve_discount_rate(&input.discount)?;

    let annual_cash_flow = revenue * (share / 100.0);
    let npv = compute_npv(annual_cash_flow, rate, input.time_horizon_years)?;
    let cumulative_schedule =
        cumulative_discounted_cash_flows(annual_cash_flow, rate, input.time_horizon_years)?;

    Ok(DueDiligenceSummary {
        discount_rate_percent: rate,
        annual_cash_flow,
        npv,
        cash_yield_percent: cash_yield_percent(annual_cash_flow, npv),
        recommended_token_price: price_fixed_supply(npv, input.reference_supply)?,
        offer_threshold: recommend_offer(npv, offer_factor),
        cumulative_schedule,
    })
}
