//! Monte Carlo command implementation

use super::{print_json, InputArgs, OutputFormat};
use crate::config::Config;
use crate::report::TableReport;
use crate::session::ValuationSession;
use crate::simulation::{run_monte_carlo, seeded_rng};
use anyhow::bail;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MonteCarloArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Number of samples
    #[arg(long)]
    pub iterations: Option<usize>,

    /// RNG seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Discount rate standard deviation (percentage points)
    #[arg(long)]
    pub discount_std_dev: Option<f64>,

    /// Revenue standard deviation (percent of revenue)
    #[arg(long)]
    pub revenue_std_dev: Option<f64>,

    /// Histogram bins for JSON output
    #[arg(long)]
    pub bins: Option<usize>,

    /// Save input and statistics as a session file
    #[arg(long)]
    pub session_out: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

impl MonteCarloArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let mc = &config.monte_carlo;
        let iterations = self.iterations.unwrap_or(mc.iterations);
        if iterations > mc.max_iterations {
            bail!("iterations must not exceed {}", mc.max_iterations);
        }
        let seed = self.seed.unwrap_or(mc.seed);
        let perturbation = mc.perturbation(self.discount_std_dev, self.revenue_std_dev);
        let input = self.input.resolve(&config.valuation)?;

        let worker_input = input.clone();
        let summary = tokio::task::spawn_blocking(move || {
            run_monte_carlo(&worker_input, iterations, perturbation, &mut seeded_rng(seed))
        })
        .await??;
        let stats = summary.stats();
        tracing::info!(iterations, seed, mean = stats.mean, "Monte Carlo completed");

        match self.format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "seed": seed,
                "stats": &stats,
                "histogram": summary.histogram(self.bins.unwrap_or(mc.histogram_bins)),
            }))?,
            OutputFormat::Table => print!("{}", stats.format_table()),
        }

        if let Some(path) = &self.session_out {
            ValuationSession::new(input).with_monte_carlo(stats).save(path)?;
            tracing::info!(path = %path.display(), "Session saved");
        }

        Ok(())
    }
}
