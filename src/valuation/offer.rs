//! Offer recommendation and scenario fan-out

use super::types::{ensure_finite, ScenarioValue, Scenarios, ValuationError};
use serde::{Deserialize, Serialize};

/// Default optimistic/pessimistic spread around the base NPV
pub const DEFAULT_SCENARIO_BAND_PERCENT: f64 = 10.0;

/// Upfront offer as a share of NPV
pub fn recommend_offer(npv: f64, offer_factor_percent: f64) -> f64 {
    npv * (offer_factor_percent / 100.0)
}

/// Symmetric band applied to the base NPV
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBand {
    /// Band width in percent (10.0 gives 1.1x / 0.9x)
    pub band_percent: f64,
}

impl ScenarioBand {
    /// Create a band, rejecting negative or non-finite widths
    pub fn new(band_percent: f64) -> Result<Self, ValuationError> {
        let band_percent = ensure_finite("scenario_band_percent", band_percent)?;
        if !(0.0..=100.0).contains(&band_percent) {
            return Err(ValuationError::invalid(
                "scenario_band_percent",
                "must be between 0 and 100",
            ));
        }
        Ok(Self { band_percent })
    }

    /// High, medium and low scenarios for a base NPV
    pub fn fan_out(&self, npv: f64, offer_factor_percent: f64) -> Scenarios {
        let band = self.band_percent / 100.0;
        let scenario = |npv: f64| ScenarioValue {
            npv,
            offer: recommend_offer(npv, offer_factor_percent),
        };
        Scenarios {
            high: scenario(npv * (1.0 + band)),
            medium: scenario(npv),
            low: scenario(npv * (1.0 - band)),
        }
    }
}

impl Default for ScenarioBand {
    fn default() -> Self {
        Self {
            band_percent: DEFAULT_SCENARIO_BAND_PERCENT,
        }
    }
}
