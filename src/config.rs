//! Configuration types for creator-valuation

use crate::simulation::Perturbation;
use crate::valuation::DEFAULT_SCENARIO_BAND_PERCENT;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub valuation: ValuationConfig,
    #[serde(default)]
    pub monte_carlo: MonteCarloConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Valuation defaults used when the caller leaves a field out
#[derive(Debug, Clone, Deserialize)]
pub struct ValuationConfig {
    /// Optimistic/pessimistic spread around the base NPV
    #[serde(default = "default_scenario_band")]
    pub scenario_band_percent: f64,

    /// Currency per effective follower per year
    #[serde(default = "default_conversion_factor")]
    pub conversion_factor: f64,

    #[serde(default = "default_revenue_share")]
    pub revenue_share_percent: f64,

    #[serde(default = "default_discount_rate")]
    pub discount_rate_percent: f64,

    #[serde(default = "default_time_horizon")]
    pub time_horizon_years: u32,

    #[serde(default = "default_offer_factor")]
    pub offer_factor_percent: f64,
}

fn default_scenario_band() -> f64 {
    DEFAULT_SCENARIO_BAND_PERCENT
}
fn default_conversion_factor() -> f64 {
    0.005
}
fn default_revenue_share() -> f64 {
    10.0
}
fn default_discount_rate() -> f64 {
    10.0
}
fn default_time_horizon() -> u32 {
    5
}
fn default_offer_factor() -> f64 {
    50.0
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            scenario_band_percent: DEFAULT_SCENARIO_BAND_PERCENT,
            conversion_factor: 0.005,
            revenue_share_percent: 10.0,
            discount_rate_percent: 10.0,
            time_horizon_years: 5,
            offer_factor_percent: 50.0,
        }
    }
}

/// Monte Carlo configuration
#[derive(Debug, Clone, Deserialize)]
pub struct MonteCarloConfig {
    #[serde(default = "default_iterations")]
    pub iterations: usize,

    /// Upper bound on iterations accepted from a request
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Seed used when the caller does not give one
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Discount rate spread in percentage points
    #[serde(default = "default_discount_rate_std_dev")]
    pub discount_rate_std_dev_percent: f64,

    /// Relative revenue spread in percent
    #[serde(default = "default_revenue_std_dev")]
    pub revenue_std_dev_percent: f64,

    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
}

fn default_iterations() -> usize {
    1_000
}
fn default_max_iterations() -> usize {
    100_000
}
fn default_seed() -> u64 {
    42
}
fn default_discount_rate_std_dev() -> f64 {
    1.5
}
fn default_revenue_std_dev() -> f64 {
    10.0
}
fn default_histogram_bins() -> usize {
    10
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            iterations: 1_000,
            max_iterations: 100_000,
            seed: 42,
            discount_rate_std_dev_percent: 1.5,
            revenue_std_dev_percent: 10.0,
            histogram_bins: 10,
        }
    }
}

impl MonteCarloConfig {
    /// Perturbation from config, with per-request overrides
    pub fn perturbation(
        &self,
        discount_rate_std_dev_percent: Option<f64>,
        revenue_std_dev_percent: Option<f64>,
    ) -> Perturbation {
        Perturbation {
            discount_rate_std_dev_percent: discount_rate_std_dev_percent
                .unwrap_or(self.discount_rate_std_dev_percent),
            revenue_std_dev_percent: revenue_std_dev_percent
                .unwrap_or(self.revenue_std_dev_percent),
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormatConfig,

    /// Prometheus exporter port; metrics are not exported when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormatConfig::default(),
            metrics_port: None,
        }
    }
}

/// Log output format as written in the config file
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormatConfig {
    #[default]
    Pretty,
    Json,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
