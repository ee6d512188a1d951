//! Token supply and price sizing
//!
//! Supply is sized so each token represents `target_unit_value` of the
//! revenue-share NPV; the sale price adds an offering premium on top.

use super::types::{ensure_finite, ensure_non_negative, ValuationError};
use serde::{Deserialize, Serialize};

/// Spread applied to funds-raised projections
const FUNDS_RAISED_BAND: f64 = 0.10;

/// Sized token issuance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenIssuance {
    pub recommended_supply: f64,
    pub recommended_token_price: f64,
    pub token_sale_revenue: f64,
}

fn ensure_positive(field: &str, value: f64) -> Result<f64, ValuationError> {
    let value = ensure_finite(field, value)?;
    if value <= 0.0 {
        return Err(ValuationError::invalid(field, "must be greater than zero"));
    }
    Ok(value)
}

/// Size supply and price from the revenue-share NPV
pub fn size_token_issuance(
    npv_rev_share: f64,
    target_unit_value: f64,
    offering_premium_percent: f64,
) -> Result<TokenIssuance, ValuationError> {
    let npv = ensure_finite("npv_rev_share", npv_rev_share)?;
    let unit_value = ensure_positive("target_unit_value", target_unit_value)?;
    let premium = ensure_finite("offering_premium_percent", offering_premium_percent)?;

    let recommended_supply = npv / unit_value;
    let recommended_token_price = unit_value * (1.0 + premium / 100.0);

    Ok(TokenIssuance {
        recommended_supply,
        recommended_token_price,
        token_sale_revenue: recommended_supply * recommended_token_price,
    })
}

/// Price per token when the supply is fixed up front
pub fn price_fixed_supply(npv: f64, total_supply: f64) -> Result<f64, ValuationError> {
    let npv = ensure_finite("npv", npv)?;
    let supply = ensure_positive("total_supply", total_supply)?;
    Ok(npv / supply)
}

/// Percent of revenue carried by a single token
pub fn percent_revenue_share_per_token(
    revenue_share_percent: f64,
    supply: f64,
) -> Result<f64, ValuationError> {
    let share = ensure_finite("revenue_share_percent", revenue_share_percent)?;
    let supply = ensure_positive("supply", supply)?;
    Ok(share / supply)
}

/// Funds raised at a market-adjusted price
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FundsRaisedProjection {
    /// Base price scaled by the market factor
    pub optimized_price: f64,
    pub total_funds_raised: f64,
    pub optimistic: f64,
    pub pessimistic: f64,
}

/// Project funds raised for a supply sold at `base_price * market_factor`
pub fn project_funds_raised(
    supply: f64,
    base_price: f64,
    market_factor: f64,
) -> Result<FundsRaisedProjection, ValuationError> {
    let supply = ensure_non_negative("supply", supply)?;
    let base_price = ensure_non_negative("base_price", base_price)?;
    let market_factor = ensure_non_negative("market_factor", market_factor)?;

    let optimized_price = base_price * market_factor;
    let total = supply * optimized_price;
    Ok(FundsRaisedProjection {
        optimized_price,
        total_funds_raised: total,
        optimistic: total * (1.0 + FUNDS_RAISED_BAND),
        pessimistic: total * (1.0 - FUNDS_RAISED_BAND),
    })
}
