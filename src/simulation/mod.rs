//! Simulation module
//!
//! Monte Carlo sampling and one-at-a-time sensitivity over the valuation engine

mod monte_carlo;
mod sensitivity;

pub use monte_carlo::{
    run_monte_carlo, seeded_rng, MonteCarloStats, MonteCarloSummary, Perturbation,
};
pub use sensitivity::{analyze_sensitivity, SensitivityBar, SensitivityDriver};
