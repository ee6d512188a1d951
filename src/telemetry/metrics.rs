//! Prometheus metrics

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Full valuation pipeline
    Valuation,
    /// Monte Carlo run
    MonteCarlo,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Valuation requests received
    ValuationRequests,
    /// Monte Carlo requests received
    MonteCarloRequests,
    /// Requests rejected as invalid input
    RejectedInputs,
}

impl LatencyMetric {
    fn name(&self) -> &'static str {
        match self {
            LatencyMetric::Valuation => "creator_valuation_latency_ms",
            LatencyMetric::MonteCarlo => "creator_valuation_monte_carlo_latency_ms",
        }
    }
}

impl CounterMetric {
    fn name(&self) -> &'static str {
        match self {
            CounterMetric::ValuationRequests => "creator_valuation_requests_total",
            CounterMetric::MonteCarloRequests => "creator_valuation_monte_carlo_requests_total",
            CounterMetric::RejectedInputs => "creator_valuation_rejected_inputs_total",
        }
    }
}

/// Install the Prometheus exporter listening on `port`
pub fn init_metrics(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| anyhow::anyhow!("Failed to install metrics exporter: {}", e))?;
    tracing::info!(%addr, "Prometheus exporter listening");
    Ok(())
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    let value_ms = duration.as_secs_f64() * 1_000.0;
    ::metrics::histogram!(metric.name()).record(value_ms);
    tracing::debug!(metric = metric.name(), value_ms, "Recording latency");
}

/// Increment a counter
pub fn increment(metric: CounterMetric) {
    ::metrics::counter!(metric.name()).increment(1);
}
