//! Discounted cash flow
//!
//! NPV of a level annual cash flow over `years` discrete periods:
//! NPV = sum_{t=1..years} cf / (1 + r)^t
//!
//! A zero rate takes the undiscounted path, cf * years.

use super::discount::ensure_discount_rate;
use super::types::{ensure_finite, ValuationError};

fn check_horizon(years: u32) -> Result<(), ValuationError> {
    if years < 1 {
        return Err(ValuationError::invalid(
            "years",
            "must be a positive integer",
        ));
    }
    Ok(())
}

/// Present value of one period's cash flow
///
/// Callers validate `rate_percent`; period `t` starts at 1.
pub(crate) fn discounted_term(cash_flow: f64, rate_percent: f64, t: u32) -> f64 {
    if rate_percent == 0.0 {
        return cash_flow;
    }
    cash_flow / (1.0 + rate_percent / 100.0).powf(f64::from(t))
}

/// Net present value of a level annual cash flow
pub fn compute_npv(cash_flow: f64, rate_percent: f64, years: u32) -> Result<f64, ValuationError> {
    check_horizon(years)?;
    let cash_flow = ensure_finite("annual_cash_flow", cash_flow)?;
    let rate = ensure_discount_rate("discount_rate_percent", rate_percent)?;

    if rate == 0.0 {
        return Ok(cash_flow * f64::from(years));
    }

    Ok((1..=years).map(|t| discounted_term(cash_flow, rate, t)).sum())
}

/// Present value of each period, year 1 first
pub fn discounted_cash_flows(
    cash_flow: f64,
    rate_percent: f64,
    years: u32,
) -> Result<Vec<f64>, ValuationError> {
    check_horizon(years)?;
    let cash_flow = ensure_finite("annual_cash_flow", cash_flow)?;
    let rate = ensure_discount_rate("discount_rate_percent", rate_percent)?;
    Ok((1..=years).map(|t| discounted_term(cash_flow, rate, t)).collect())
}

/// Running total of discounted cash flow per year
pub fn cumulative_discounted_cash_flows(
    cash_flow: f64,
    rate_percent: f64,
    years: u32,
) -> Result<Vec<f64>, ValuationError> {
    let mut total = 0.0;
    Ok(discounted_cash_flows(cash_flow, rate_percent, years)?
        .into_iter()
        .map(|pv| {
            total += pv;
            total
        })
        .collect())
}

/// First-year cash flow as a percentage of NPV
///
/// `None` when NPV is zero.
pub fn cash_yield_percent(cash_flow: f64, npv: f64) -> Option<f64> {
    if npv == 0.0 || !npv.is_finite() || !cash_flow.is_finite() {
        return None;
    }
    Some(cash_flow / npv * 100.0)
}
