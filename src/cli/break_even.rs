//! Break-even command implementation

use super::{print_json, OutputFormat};
use crate::config::Config;
use crate::valuation::{break_even_tokens, compute_break_even_year};
use clap::Args;

#[derive(Args, Debug)]
pub struct BreakEvenArgs {
    /// Upfront offer to recover
    #[arg(long)]
    pub upfront: f64,

    /// Annual cash flow to holders
    #[arg(long)]
    pub cash_flow: f64,

    /// Discount rate (percent), defaults to the configured rate
    #[arg(long)]
    pub discount_rate: Option<f64>,

    /// Years to search
    #[arg(long, default_value = "20")]
    pub max_years: u32,

    /// Token supply, reports the tokens needed to cover the offer
    #[arg(long)]
    pub supply: Option<f64>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl BreakEvenArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let rate = self
            .discount_rate
            .unwrap_or(config.valuation.discount_rate_percent);
        let year = compute_break_even_year(self.upfront, self.cash_flow, rate, self.max_years)?;
        let tokens = match self.supply {
            Some(supply) => Some(break_even_tokens(self.upfront, self.cash_flow, supply)?),
            None => None,
        };

        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "break_even_year": year,
                "break_even_tokens": tokens,
                "discount_rate_percent": rate,
                "max_years": self.max_years,
            }))?,
            OutputFormat::Table => {
                match year {
                    Some(year) => println!("Break-even year:   {}", year),
                    None => println!("Break-even year:   not within {} years", self.max_years),
                }
                if let Some(tokens) = tokens {
                    println!("Break-even tokens: {:.2}", tokens);
                }
            }
        }

        Ok(())
    }
}
