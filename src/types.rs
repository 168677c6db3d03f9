//! Common types used throughout fanout-fetch
//!
//! This module contains the record type handed to downstream consumers and
//! small enums shared between the config, loader and CLI modules.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Output Record
// ============================================================================

/// One fetched response
///
/// The body is carried as opaque text. Any further structure is for
/// downstream consumers to extract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    /// Raw response body
    pub response: String,
}

impl OutputRecord {
    /// Create a record from a response body
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    /// Serialize as a single JSON line (`{"response": "..."}`)
    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

// ============================================================================
// Parameter File Format
// ============================================================================

/// Format of the parameter file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum ParamsFormat {
    /// JSON array of strings
    #[default]
    Json,
    /// One value per row, first column
    Csv,
}

impl ParamsFormat {
    /// Infer the format from a file location
    ///
    /// `.csv` selects CSV; everything else is read as JSON.
    pub fn from_location(location: &str) -> Self {
        let lower = location.to_ascii_lowercase();
        if lower.ends_with(".csv") {
            Self::Csv
        } else {
            Self::Json
        }
    }
}

impl fmt::Display for ParamsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_record_json_line() {
        let record = OutputRecord::new("{\"id\": 1}\n");
        let line = record.to_json_line().unwrap();
        assert_eq!(line, r#"{"response":"{\"id\": 1}\n"}"#);
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_output_record_deserialize() {
        let record: OutputRecord = serde_json::from_str(r#"{"response": "body"}"#).unwrap();
        assert_eq!(record, OutputRecord::new("body"));
    }

    #[test]
    fn test_params_format_from_location() {
        assert_eq!(
            ParamsFormat::from_location("gs://bucket/params.json"),
            ParamsFormat::Json
        );
        assert_eq!(
            ParamsFormat::from_location("gs://bucket/params.CSV"),
            ParamsFormat::Csv
        );
        assert_eq!(
            ParamsFormat::from_location("/tmp/params"),
            ParamsFormat::Json
        );
    }

    #[test]
    fn test_params_format_serde() {
        let format: ParamsFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(format, ParamsFormat::Csv);
        assert_eq!(format.to_string(), "csv");
    }
}
