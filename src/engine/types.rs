//! Engine types
//!
//! Per-unit outcomes and job statistics.

use crate::error::Error;

/// Result of processing one parameter value
#[derive(Debug)]
pub struct UnitOutcome {
    /// Position of the parameter in the parameter file
    pub index: usize,
    /// The parameter value
    pub param: String,
    /// Records emitted before the unit finished or failed
    pub records: usize,
    /// The error that ended the unit, if any
    pub error: Option<Error>,
}

impl UnitOutcome {
    /// A unit that fetched every page
    pub fn succeeded(index: usize, param: impl Into<String>, records: usize) -> Self {
        Self {
            index,
            param: param.into(),
            records,
            error: None,
        }
    }

    /// A unit that stopped on an error
    pub fn failed(index: usize, param: impl Into<String>, records: usize, error: Error) -> Self {
        Self {
            index,
            param: param.into(),
            records,
            error: Some(error),
        }
    }

    /// Check if the unit completed without error
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// A failed unit, as reported in job statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFailure {
    /// The parameter value
    pub param: String,
    /// Error message
    pub message: String,
}

/// Statistics from a job run
#[derive(Debug, Clone, Default)]
pub struct JobStats {
    /// Units started (one per parameter)
    pub units_total: usize,
    /// Units that fetched every page
    pub units_succeeded: usize,
    /// Units that stopped on an error
    pub units_failed: usize,
    /// Records handed to the sink
    pub records_emitted: usize,
    /// Requests sent, successful or not
    pub requests_sent: usize,
    /// Failed units, in completion order
    pub failures: Vec<UnitFailure>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl JobStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a unit outcome into the totals
    pub fn add_outcome(&mut self, outcome: &UnitOutcome) {
        self.units_total += 1;
        self.records_emitted += outcome.records;
        self.requests_sent += outcome.records;

        match &outcome.error {
            None => self.units_succeeded += 1,
            Some(error) => {
                self.units_failed += 1;
                // the failing request was attempted too
                if matches!(error, Error::Http(_) | Error::HttpStatus { .. }) {
                    self.requests_sent += 1;
                }
                self.failures.push(UnitFailure {
                    param: outcome.param.clone(),
                    message: error.to_string(),
                });
            }
        }
    }

    /// Set duration
    pub fn set_duration(&mut self, ms: u64) {
        self.duration_ms = ms;
    }

    /// Check if every unit succeeded
    pub fn is_success(&self) -> bool {
        self.units_failed == 0
    }
}
