//! Valuation input shared by `simulate` and `monte-carlo`

use crate::config::ValuationConfig;
use crate::session::ValuationSession;
use crate::valuation::{DiscountInput, ManualRevenue, TokenSizingRequest, ValuationInput};
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub struct InputArgs {
    /// JSON file holding a full valuation input
    #[arg(long = "input", conflicts_with = "session")]
    pub input_file: Option<PathBuf>,

    /// Resume from a saved session
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Annual revenue, overrides audience data
    #[arg(long)]
    pub manual_revenue: Option<String>,

    /// Revenue share for token holders (percent)
    #[arg(long)]
    pub revenue_share: Option<f64>,

    /// Flat discount rate (percent)
    #[arg(long)]
    pub discount_rate: Option<f64>,

    /// Time horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Share of NPV offered upfront (percent)
    #[arg(long)]
    pub offer_factor: Option<f64>,

    /// Fixed token supply
    #[arg(long)]
    pub total_supply: Option<f64>,

    /// Value each token should represent
    #[arg(long)]
    pub target_unit_value: Option<f64>,

    /// Offering premium over unit value (percent)
    #[arg(long, default_value = "0")]
    pub premium: f64,
}

impl InputArgs {
    /// Build the valuation input from a file, a session or flags
    pub fn resolve(&self, defaults: &ValuationConfig) -> anyhow::Result<ValuationInput> {
        if let Some(path) = &self.input_file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input {}", path.display()))?;
            return serde_json::from_str(&content)
                .with_context(|| format!("Invalid valuation input in {}", path.display()));
        }

        if let Some(path) = &self.session {
            let session = ValuationSession::load(path)
                .with_context(|| format!("Failed to load session {}", path.display()))?;
            return Ok(session.input);
        }

        Ok(ValuationInput {
            manual_revenue: self.manual_revenue.clone().map(ManualRevenue::Text),
            use_public_data: false,
            audience_metrics: Vec::new(),
            conversion_factor: defaults.conversion_factor,
            revenue_share_percent: self.revenue_share.unwrap_or(defaults.revenue_share_percent),
            discount: DiscountInput::flat(
                self.discount_rate.unwrap_or(defaults.discount_rate_percent),
            ),
            time_horizon_years: self.years.unwrap_or(defaults.time_horizon_years),
            offer_factor_percent: self.offer_factor.unwrap_or(defaults.offer_factor_percent),
            total_supply: self.total_supply,
            token_sizing: self.target_unit_value.map(|target_unit_value| TokenSizingRequest {
                target_unit_value,
                offering_premium_percent: self.premium,
            }),
        })
    }
}
