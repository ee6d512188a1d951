//! Discount rate resolution
//!
//! Three named strategies, selected explicitly by `mode`:
//! - `flat`: rate supplied as-is
//! - `capm_sum`: risk-free + equity premium + industry premium
//! - `capm_debt_weighted`: WACC-style blend of a base equity rate and debt
//!   cost, plus the industry premium
//!
//! All rates are percentages (10.0 means 10%).

use super::types::{ensure_finite, ensure_percent, ValuationError};
use serde::{Deserialize, Serialize};

/// Discount rate inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DiscountInput {
    /// Flat annual rate
    Flat { rate_percent: f64 },
    /// Plain CAPM-style build-up
    CapmSum {
        risk_free_rate: f64,
        equity_risk_premium: f64,
        industry_risk_premium: f64,
    },
    /// Capital-structure weighted rate
    CapmDebtWeighted {
        base_rate: f64,
        /// Debt share of capital (0-100)
        debt_ratio: f64,
        debt_cost: f64,
        industry_risk_premium: f64,
    },
}

impl DiscountInput {
    /// Flat rate shorthand
    pub fn flat(rate_percent: f64) -> Self {
        Self::Flat { rate_percent }
    }

    /// Strategy name as it appears on the wire
    pub fn mode_name(&self) -> &'static str {
        match self {
            Self::Flat { .. } => "flat",
            Self::CapmSum { .. } => "capm_sum",
            Self::CapmDebtWeighted { .. } => "capm_debt_weighted",
        }
    }
}

/// Reject rates at or below -100%, where the discount factor stops being positive
///
/// This is the arithmetic bound for discounting. Caller-supplied rates are
/// held to 0..=100 by [`resolve_discount_rate`].
pub(crate) fn ensure_discount_rate(field: &str, rate: f64) -> Result<f64, ValuationError> {
    let rate = ensure_finite(field, rate)?;
    if rate <= -100.0 {
        return Err(ValuationError::invalid(field, "must be greater than -100"));
    }
    Ok(rate)
}

/// Resolve the annual discount rate in percent
pub fn resolve_discount_rate(input: &DiscountInput) -> Result<f64, ValuationError> {
    let rate = match *input {
        DiscountInput::Flat { rate_percent } => rate_percent,
        DiscountInput::CapmSum {
            risk_free_rate,
            equity_risk_premium,
            industry_risk_premium,
        } => {
            ensure_finite("risk_free_rate", risk_free_rate)?
                + ensure_finite("equity_risk_premium", equity_risk_premium)?
                + ensure_finite("industry_risk_premium", industry_risk_premium)?
        }
        DiscountInput::CapmDebtWeighted {
            base_rate,
            debt_ratio,
            debt_cost,
            industry_risk_premium,
        } => {
            let base_rate = ensure_finite("base_rate", base_rate)?;
            let debt_ratio = ensure_percent("debt_ratio", debt_ratio)?;
            let debt_cost = ensure_finite("debt_cost", debt_cost)?;
            let industry = ensure_finite("industry_risk_premium", industry_risk_premium)?;
            ((100.0 - debt_ratio) / 100.0) * base_rate
                + (debt_ratio / 100.0) * debt_cost
                + industry
        }
    };
    ensure_percent("discount_rate_percent", rate)
}
