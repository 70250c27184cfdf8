//! Solver configuration.
//!
//! A single serde-friendly options struct shared by all solvers. Each
//! solver reads the fields it cares about through its `from_config`
//! constructor; unknown fields are ignored so one file can configure
//! every algorithm.

use serde::{Deserialize, Serialize};

use crate::error::{SequencingError, SequencingResult, ValidationErrorKind, ValidationIssue};

/// Default WDSPT discount rate.
pub const DEFAULT_DISCOUNT_RATE: f64 = 0.1;

/// Options shared by the sequencing solvers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencingConfig {
    /// Record a step-by-step construction trace in each result.
    pub record_trace: bool,
    /// Upper bound on Hodgson alternative sequences. `None` = all of them.
    pub max_alternatives: Option<usize>,
    /// Discount rate `r` for WDSPT.
    pub discount_rate: f64,
}

impl Default for SequencingConfig {
    fn default() -> Self {
        Self {
            record_trace: true,
            max_alternatives: None,
            discount_rate: DEFAULT_DISCOUNT_RATE,
        }
    }
}

impl SequencingConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a configuration from JSON. Missing fields take defaults.
    pub fn from_json_str(json: &str) -> SequencingResult<Self> {
        serde_json::from_str(json).map_err(|e| {
            SequencingError::validation(ValidationIssue::new(
                ValidationErrorKind::Malformed,
                format!("invalid sequencing config: {e}"),
            ))
        })
    }

    /// Enables or disables trace recording.
    pub fn with_trace(mut self, record_trace: bool) -> Self {
        self.record_trace = record_trace;
        self
    }

    /// Caps the number of Hodgson alternatives.
    pub fn with_max_alternatives(mut self, max: usize) -> Self {
        self.max_alternatives = Some(max);
        self
    }

    /// Sets the WDSPT discount rate.
    pub fn with_discount_rate(mut self, rate: f64) -> Self {
        self.discount_rate = rate;
        self
    }
}
