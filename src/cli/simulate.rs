//! Simulate command implementation

use super::{print_json, InputArgs, OutputFormat};
use crate::config::Config;
use crate::report::TableReport;
use crate::session::ValuationSession;
use crate::simulation::analyze_sensitivity;
use crate::valuation::{project_funds_raised, ValuationEngine};
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Also rank drivers by NPV swing under this relative shock (percent)
    #[arg(long)]
    pub sensitivity: Option<f64>,

    /// Project funds raised with the token price scaled by this factor
    #[arg(long)]
    pub market_factor: Option<f64>,

    /// Save input and result as a session file
    #[arg(long)]
    pub session_out: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl SimulateArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let input = self.input.resolve(&config.valuation)?;
        let engine = ValuationEngine::from_config(&config.valuation)?;
        let result = engine.evaluate(&input)?;
        tracing::info!(npv = result.npv, offer = result.recommended_offer, "Offer simulated");

        let bars = match self.sensitivity {
            Some(shock) => Some(analyze_sensitivity(&input, shock)?),
            None => None,
        };

        let funds = match (self.market_factor, &result.token_sizing) {
            (Some(factor), Some(sizing)) => Some(project_funds_raised(
                sizing.recommended_supply,
                sizing.recommended_token_price,
                factor,
            )?),
            (Some(_), None) => {
                tracing::warn!("Market factor ignored without token sizing");
                None
            }
            _ => None,
        };

        match self.format {
            OutputFormat::Json if bars.is_none() && funds.is_none() => print_json(&result)?,
            OutputFormat::Json => print_json(&serde_json::json!({
                "result": &result,
                "sensitivity": &bars,
                "funds_raised": &funds,
            }))?,
            OutputFormat::Table => {
                print!("{}", result.format_table());
                if let Some(funds) = &funds {
                    print!("{}", funds.format_table());
                }
                if let Some(bars) = &bars {
                    print!("{}", bars.as_slice().format_table());
                }
            }
        }

        if let Some(path) = &self.session_out {
            ValuationSession::new(input).with_result(result).save(path)?;
            tracing::info!(path = %path.display(), "Session saved");
        }

        Ok(())
    }
}
