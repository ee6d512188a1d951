//! Annual revenue estimation
//!
//! Manual revenue always wins. Otherwise revenue is derived from audience
//! reach: effective followers = followers * engagement% * weight, priced
//! at the conversion factor.

use super::types::{ensure_non_negative, AudienceMetric, ManualRevenue, ValuationError};
use super::ValuationInput;

/// Revenue-related slice of a valuation input
#[derive(Debug, Clone, Copy)]
pub struct RevenueInput<'a> {
    pub manual_revenue: Option<&'a ManualRevenue>,
    pub use_public_data: bool,
    pub audience_metrics: &'a [AudienceMetric],
    pub conversion_factor: f64,
}

impl<'a> From<&'a ValuationInput> for RevenueInput<'a> {
    fn from(input: &'a ValuationInput) -> Self {
        Self {
            manual_revenue: input.manual_revenue.as_ref(),
            use_public_data: input.use_public_data,
            audience_metrics: &input.audience_metrics,
            conversion_factor: input.conversion_factor,
        }
    }
}

/// Effective followers for one platform
pub fn effective_followers(metric: &AudienceMetric) -> Result<f64, ValuationError> {
    let followers = ensure_non_negative("followers", metric.followers)?;
    let engagement =
        ensure_non_negative("engagement_rate_percent", metric.engagement_rate_percent)?;
    let weight = match metric.weight {
        Some(w) => ensure_non_negative("weight", w)?,
        None => 1.0,
    };
    Ok(followers * (engagement / 100.0) * weight)
}

/// Estimate annual revenue in currency units
pub fn estimate_revenue(input: &RevenueInput<'_>) -> Result<f64, ValuationError> {
    if let Some(manual) = input.manual_revenue {
        if let Some(revenue) = manual.resolve()? {
            return Ok(revenue);
        }
    }

    if input.use_public_data && !input.audience_metrics.is_empty() {
        let conversion = ensure_non_negative("conversion_factor", input.conversion_factor)?;
        let mut total_effective = 0.0;
        for metric in input.audience_metrics {
            total_effective += effective_followers(metric)?;
        }
        return Ok(total_effective * conversion);
    }

    Ok(0.0)
}
