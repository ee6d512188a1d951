//! Due-diligence command implementation

use super::{print_json, OutputFormat};
use crate::config::Config;
use crate::report::TableReport;
use crate::session::ValuationSession;
use crate::valuation::{
    summarize_due_diligence, DiscountInput, DueDiligenceInput, ValuationInput,
    DEFAULT_REFERENCE_SUPPLY,
};
use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Discount strategy selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DiscountMode {
    Flat,
    CapmSum,
    CapmDebtWeighted,
}

#[derive(Args, Debug)]
pub struct DiligenceArgs {
    /// Annual net revenue
    #[arg(long)]
    pub revenue: f64,

    /// Revenue share for token holders (percent)
    #[arg(long, default_value = "10")]
    pub revenue_share: f64,

    /// Discount strategy
    #[arg(long, value_enum, default_value = "capm-debt-weighted")]
    pub mode: DiscountMode,

    /// Flat rate (percent), defaults to the configured rate
    #[arg(long)]
    pub rate: Option<f64>,

    /// Risk-free rate (percent)
    #[arg(long, default_value = "3")]
    pub risk_free_rate: f64,

    /// Equity risk premium (percent)
    #[arg(long, default_value = "5")]
    pub equity_risk_premium: f64,

    /// Base equity rate (percent)
    #[arg(long, default_value = "10")]
    pub base_rate: f64,

    /// Debt share of capital (percent)
    #[arg(long, default_value = "30")]
    pub debt_ratio: f64,

    /// Cost of debt (percent)
    #[arg(long, default_value = "4")]
    pub debt_cost: f64,

    /// Industry risk premium (percent)
    #[arg(long, default_value = "2.5")]
    pub industry_risk_premium: f64,

    /// Time horizon in years, defaults to the configured horizon
    #[arg(long)]
    pub years: Option<u32>,

    /// Share of NPV offered upfront (percent), defaults to the configured factor
    #[arg(long)]
    pub offer_factor: Option<f64>,

    /// Supply the token price is quoted against
    #[arg(long, default_value_t = DEFAULT_REFERENCE_SUPPLY)]
    pub reference_supply: f64,

    /// Save input and summary as a session file
    #[arg(long)]
    pub session_out: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl DiligenceArgs {
    fn discount(&self, config: &Config) -> DiscountInput {
        match self.mode {
            DiscountMode::Flat => {
                DiscountInput::flat(self.rate.unwrap_or(config.valuation.discount_rate_percent))
            }
            DiscountMode::CapmSum => DiscountInput::CapmSum {
                risk_free_rate: self.risk_free_rate,
                equity_risk_premium: self.equity_risk_premium,
                industry_risk_premium: self.industry_risk_premium,
            },
            DiscountMode::CapmDebtWeighted => DiscountInput::CapmDebtWeighted {
                base_rate: self.base_rate,
                debt_ratio: self.debt_ratio,
                debt_cost: self.debt_cost,
                industry_risk_premium: self.industry_risk_premium,
            },
        }
    }

    pub fn to_input(&self, config: &Config) -> DueDiligenceInput {
        DueDiligenceInput {
            annual_net_revenue: self.revenue,
            revenue_share_percent: self.revenue_share,
            discount: self.discount(config),
            time_horizon_years: self.years.unwrap_or(config.valuation.time_horizon_years),
            offer_factor_percent: self
                .offer_factor
                .unwrap_or(config.valuation.offer_factor_percent),
            reference_supply: self.reference_supply,
        }
    }

    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let input = self.to_input(config);
        let summary = summarize_due_diligence(&input)?;
        tracing::info!(
            mode = input.discount.mode_name(),
            rate = summary.discount_rate_percent,
            npv = summary.npv,
            "Due diligence computed"
        );

        match self.format {
            OutputFormat::Json => print_json(&summary)?,
            OutputFormat::Table => print!("{}", summary.format_table()),
        }

        if let Some(path) = &self.session_out {
            ValuationSession::new(ValuationInput::from(&input))
                .with_due_diligence(summary)
                .save(path)?;
            tracing::info!(path = %path.display(), "Session saved");
        }
        Ok(())
    }
}
