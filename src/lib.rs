//! creator-valuation: Offer modeling and tokenomics for creator revenue-share tokens
//!
//! This library provides the core components for:
//! - Revenue estimation from manual figures or audience metrics
//! - Discount rate resolution (flat and CAPM-style strategies)
//! - NPV, upfront offer and scenario fan-out
//! - Token sizing and break-even analysis
//! - Due-diligence summaries
//! - Monte Carlo and sensitivity analysis
//! - Session persistence
//! - HTTP API for offer modeling
//! - Logging and metrics

pub mod cli;
pub mod config;
pub mod report;
pub mod server;
pub mod session;
pub mod simulation;
pub mod telemetry;
pub mod valuation;
