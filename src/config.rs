//! Join pipeline configuration
//!
//! Everything here is optional; `JoinConfig::default()` runs unbounded with
//! per-step summaries logged at info level.

use crate::error::{JoinError, Result};
use serde::{Deserialize, Serialize};

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinConfig {
    /// Upper bound on the rows a single step may produce
    ///
    /// - None = unbounded (default)
    /// - Some(n) = a step whose output exceeds `n` rows aborts the pipeline
    ///
    /// Many-to-many keys multiply rows, so this is the knob for keeping a
    /// badly keyed step from exhausting memory.
    pub max_step_rows: Option<usize>,

    /// Log one info-level summary per step (debug level otherwise)
    pub log_step_summaries: bool,
}

impl Default for JoinConfig {
    fn default() -> Self {
        Self {
            max_step_rows: None,
            log_step_summaries: true,
        }
    }
}

impl JoinConfig {
    /// Bounded preset for hosts that join untrusted sheets
    pub fn bounded(max_step_rows: usize) -> Self {
        Self {
            max_step_rows: Some(max_step_rows),
            ..Self::default()
        }
    }

    pub fn with_max_step_rows(mut self, max_step_rows: usize) -> Self {
        self.max_step_rows = Some(max_step_rows);
        self
    }

    pub fn with_step_summaries(mut self, enabled: bool) -> Self {
        self.log_step_summaries = enabled;
        self
    }

    /// Reject settings that could never let a join run
    pub fn validate(&self) -> Result<()> {
        if self.max_step_rows == Some(0) {
            return Err(JoinError::invalid(
                "The 'max_step_rows' setting must be greater than zero",
            ));
        }
        Ok(())
    }

    /// Check a step's output size against the bound
    pub(crate) fn check_step_rows(&self, alias: &str, rows: usize) -> Result<()> {
        match self.max_step_rows {
            Some(max) if rows > max => Err(JoinError::invalid(format!(
                "Join '{}' produced {} rows, exceeding the 'max_step_rows' limit of {}",
                alias, rows, max
            ))),
            _ => Ok(()),
        }
    }
}
