//! Configuration tests

use creator_valuation::config::{Config, LogFormatConfig};

#[test]
fn test_config_example_loads() {
    let config = Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example")).unwrap();
    assert_eq!(config.server.bind_address, "0.0.0.0:5000");
    assert_eq!(config.valuation.time_horizon_years, 5);
    assert_eq!(config.monte_carlo.seed, 42);
    assert_eq!(config.telemetry.log_format, LogFormatConfig::Pretty);
    assert!(config.telemetry.metrics_port.is_none());
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: Config = toml::from_str(
        r#"
        [valuation]
        discount_rate_percent = 12.0
    "#,
    )
    .unwrap();
    assert_eq!(config.valuation.discount_rate_percent, 12.0);
    assert_eq!(config.valuation.offer_factor_percent, 50.0);
    assert_eq!(config.monte_carlo.iterations, 1_000);
}

#[test]
fn test_missing_config_is_error() {
    assert!(Config::load("/nonexistent/config.toml").is_err());
}
