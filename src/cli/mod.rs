//! CLI interface for creator-valuation
//!
//! Provides subcommands for:
//! - `simulate`: Value an offer and print scenarios
//! - `monte-carlo`: Sample the NPV distribution
//! - `break-even`: Years (and tokens) to recover an upfront offer
//! - `diligence`: Due-diligence summary under a discount strategy
//! - `serve`: Run the offer-modeling HTTP API
//! - `config`: Show configuration

mod break_even;
mod diligence;
mod input;
mod monte_carlo;
mod serve;
mod simulate;

pub use break_even::BreakEvenArgs;
pub use diligence::DiligenceArgs;
pub use input::InputArgs;
pub use monte_carlo::MonteCarloArgs;
pub use serve::ServeArgs;
pub use simulate::SimulateArgs;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "creator-valuation")]
#[command(about = "Offer modeling and tokenomics valuation for creator revenue-share tokens")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Value an offer
    Simulate(SimulateArgs),
    /// Run a Monte Carlo NPV simulation
    MonteCarlo(MonteCarloArgs),
    /// Compute the break-even horizon
    BreakEven(BreakEvenArgs),
    /// Due-diligence summary
    Diligence(DiligenceArgs),
    /// Serve the HTTP API
    Serve(ServeArgs),
    /// Show configuration
    Config,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
