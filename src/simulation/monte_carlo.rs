//! Monte Carlo NPV sampling
//!
//! Each iteration draws a standard normal pair via Box-Muller:
//! - z0 shifts the discount rate by `discount_rate_std_dev_percent` points
//! - z1 scales the annual cash flow by `revenue_std_dev_percent`
//!
//! Sampled values are used as drawn. A rate below 0 or a negative cash flow
//! is a valid draw; a rate at or below -100% fails the run.
//!
//! Randomness comes only from the caller's RNG, so a seeded generator gives
//! a reproducible distribution.

use crate::valuation::{
    annual_cash_flow, compute_npv, estimate_revenue, resolve_discount_rate, RevenueInput,
    ValuationError, ValuationInput,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Standard deviations applied to the base inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perturbation {
    /// Absolute spread of the discount rate, in percentage points
    pub discount_rate_std_dev_percent: f64,
    /// Relative spread of the annual cash flow, in percent
    pub revenue_std_dev_percent: f64,
}

impl Default for Perturbation {
    fn default() -> Self {
        Self {
            discount_rate_std_dev_percent: 1.5,
            revenue_std_dev_percent: 10.0,
        }
    }
}

/// Sampled NPV distribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloSummary {
    /// NPV per iteration, in draw order
    pub samples: Vec<f64>,
    pub mean: f64,
    pub median: f64,
    /// Population variance
    pub variance: f64,
}

/// Summary statistics without the raw samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonteCarloStats {
    pub iterations: usize,
    pub mean: f64,
    pub median: f64,
    pub variance: f64,
    pub std_dev: f64,
}

impl MonteCarloSummary {
    /// Standard deviation of the samples
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Statistics only
    pub fn stats(&self) -> MonteCarloStats {
        MonteCarloStats {
            iterations: self.samples.len(),
            mean: self.mean,
            median: self.median,
            variance: self.variance,
            std_dev: self.std_dev(),
        }
    }

    /// Sample counts over equal-width bins spanning [min, max]
    pub fn histogram(&self, bins: usize) -> Vec<usize> {
        let mut counts = vec![0; bins];
        if bins == 0 || self.samples.is_empty() {
            return counts;
        }

        let min = self.samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let width = (max - min) / bins as f64;

        for &sample in &self.samples {
            let index = if width > 0.0 {
                (((sample - min) / width).floor() as usize).min(bins - 1)
            } else {
                0
            };
            counts[index] += 1;
        }
        counts
    }
}

/// Deterministic generator for reproducible runs
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Two independent standard normal draws from two uniforms
fn box_muller<R: Rng + ?Sized>(rng: &mut R) -> (f64, f64) {
    // (0, 1] keeps ln() finite
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let radius = (-2.0 * u1.ln()).sqrt();
    let theta = 2.0 * PI * u2;
    (radius * theta.cos(), radius * theta.sin())
}

/// Sample NPV under perturbed discount rate and revenue
pub fn run_monte_carlo<R: Rng + ?Sized>(
    base: &ValuationInput,
    iterations: usize,
    perturbation: Perturbation,
    rng: &mut R,
) -> Result<MonteCarloSummary, ValuationError> {
    if iterations == 0 {
        return Err(ValuationError::invalid("iterations", "must be greater than zero"));
    }
    for (field, value) in [
        (
            "discount_rate_std_dev_percent",
            perturbation.discount_rate_std_dev_percent,
        ),
        ("revenue_std_dev_percent", perturbation.revenue_std_dev_percent),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValuationError::invalid(field, "must be a finite, non-negative number"));
        }
    }
    base.validate()?;

    let revenue = estimate_revenue(&RevenueInput::from(base))?;
    let base_cash_flow = annual_cash_flow(revenue, base.revenue_share_percent);
    let base_rate = resolve_discount_rate(&base.discount)?;

    let mut samples = Vec::with_capacity(iterations);
    for _ in 0..iterations {
        let (z0, z1) = box_muller(rng);
        let rate = base_rate + z0 * perturbation.discount_rate_std_dev_percent;
        let cash_flow = base_cash_flow * (1.0 + z1 * perturbation.revenue_std_dev_percent / 100.0);
        samples.push(compute_npv(cash_flow, rate, base.time_horizon_years)?);
    }

    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let variance = samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;

    let mut sorted = samples.clone();
    sorted.sort_by(f64::total_cmp);
    let median = sorted[sorted.len() / 2];

    Ok(MonteCarloSummary {
        samples,
        mean,
        median,
        variance,
    })
}
