//! Valuation session
//!
//! Carries inputs and stage outputs between pipeline steps (offer modeling,
//! due diligence, tokenomics). The caller owns persistence; the engine never
//! reads or writes a session on its own.

use crate::simulation::MonteCarloStats;
use crate::valuation::{DueDiligenceSummary, ValuationInput, ValuationResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

/// Current session format version
pub const SESSION_VERSION: u32 = 1;

/// Session errors
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Session is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported session version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Inputs and results of one valuation workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationSession {
    pub version: u32,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub input: ValuationInput,
    #[serde(default)]
    pub result: Option<ValuationResult>,
    #[serde(default)]
    pub due_diligence: Option<DueDiligenceSummary>,
    #[serde(default)]
    pub monte_carlo: Option<MonteCarloStats>,
}

impl ValuationSession {
    /// Start a session for an input
    pub fn new(input: ValuationInput) -> Self {
        let now = Utc::now();
        Self {
            version: SESSION_VERSION,
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            input,
            result: None,
            due_diligence: None,
            monte_carlo: None,
        }
    }

    /// Attach a valuation result
    pub fn with_result(mut self, result: ValuationResult) -> Self {
        self.result = Some(result);
        self.touch();
        self
    }

    /// Attach a due-diligence summary
    pub fn with_due_diligence(mut self, summary: DueDiligenceSummary) -> Self {
        self.due_diligence = Some(summary);
        self.touch();
        self
    }

    /// Attach Monte Carlo statistics
    pub fn with_monte_carlo(mut self, stats: MonteCarloStats) -> Self {
        self.monte_carlo = Some(stats);
        self.touch();
        self
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SessionError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse and check the version
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        let session: Self = serde_json::from_str(json)?;
        if session.version != SESSION_VERSION {
            return Err(SessionError::UnsupportedVersion {
                found: session.version,
                expected: SESSION_VERSION,
            });
        }
        Ok(session)
    }

    /// Write to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SessionError> {
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Read from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}
