//! One-at-a-time NPV sensitivity (tornado)

use crate::valuation::{
    annual_cash_flow, compute_npv, estimate_revenue, resolve_discount_rate, RevenueInput,
    ValuationError, ValuationInput,
};
use serde::{Deserialize, Serialize};

/// Input driver varied in isolation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityDriver {
    DiscountRate,
    Revenue,
    RevenueShare,
    /// Shocked by one year either way
    TimeHorizon,
}

impl SensitivityDriver {
    pub fn label(&self) -> &'static str {
        match self {
            Self::DiscountRate => "Discount Rate",
            Self::Revenue => "Revenue",
            Self::RevenueShare => "Revenue Share",
            Self::TimeHorizon => "Time Horizon",
        }
    }
}

/// NPV at the downside and upside of one driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityBar {
    pub driver: SensitivityDriver,
    pub base_npv: f64,
    /// NPV with the driver shocked down
    pub low_npv: f64,
    /// NPV with the driver shocked up
    pub high_npv: f64,
}

impl SensitivityBar {
    /// Width of the bar
    pub fn swing(&self) -> f64 {
        (self.high_npv - self.low_npv).abs()
    }
}

/// Shock each driver by `shock_percent` and rank by NPV swing, widest first
pub fn analyze_sensitivity(
    input: &ValuationInput,
    shock_percent: f64,
) -> Result<Vec<SensitivityBar>, ValuationError> {
    if !shock_percent.is_finite() || !(0.0..100.0).contains(&shock_percent) {
        return Err(ValuationError::invalid("shock_percent", "must be at least 0 and below 100"));
    }
    input.validate()?;

    let revenue = estimate_revenue(&RevenueInput::from(input))?;
    let share = input.revenue_share_percent;
    let rate = resolve_discount_rate(&input.discount)?;
    let years = input.time_horizon_years;
    let down = 1.0 - shock_percent / 100.0;
    let up = 1.0 + shock_percent / 100.0;

    let npv = |revenue: f64, share: f64, rate: f64, years: u32| {
        compute_npv(annual_cash_flow(revenue, share), rate, years)
    };
    let base_npv = npv(revenue, share, rate, years)?;
    let bar = |driver, low_npv, high_npv| SensitivityBar {
        driver,
        base_npv,
        low_npv,
        high_npv,
    };

    let mut bars = vec![
        bar(
            SensitivityDriver::DiscountRate,
            npv(revenue, share, rate * down, years)?,
            npv(revenue, share, rate * up, years)?,
        ),
        bar(
            SensitivityDriver::Revenue,
            npv(revenue * down, share, rate, years)?,
            npv(revenue * up, share, rate, years)?,
        ),
        bar(
            SensitivityDriver::RevenueShare,
            npv(revenue, share * down, rate, years)?,
            npv(revenue, (share * up).min(100.0), rate, years)?,
        ),
        bar(
            SensitivityDriver::TimeHorizon,
            npv(revenue, share, rate, years.saturating_sub(1).max(1))?,
            npv(revenue, share, rate, years.saturating_add(1))?,
        ),
    ];

    bars.sort_by(|a, b| b.swing().total_cmp(&a.swing()));
    Ok(bars)
}
