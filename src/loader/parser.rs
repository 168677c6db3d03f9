//! Parameter file parsing
//!
//! JSON files must hold a top-level array of strings. CSV files contribute
//! the first column of every row where it is non-empty; there is no header row.

use crate::error::{Error, Result};
use crate::types::ParamsFormat;
use serde_json::Value;

/// Parse parameter file content in the given format
pub fn parse_params(content: &str, format: ParamsFormat) -> Result<Vec<String>> {
    let content = content.trim_start_matches('\u{feff}');
    match format {
        ParamsFormat::Json => parse_json_params(content),
        ParamsFormat::Csv => Ok(parse_csv_params(content)),
    }
}

/// Parse a JSON array of strings
///
/// An empty array is valid and yields no parameters. Anything other than an
/// array, or an array holding a non-string element, is rejected.
pub fn parse_json_params(content: &str) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(content)
        .map_err(|e| Error::params_parse(format!("invalid JSON: {e}")))?;

    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(Error::params_parse(format!(
                "expected a JSON array of strings, found {}",
                json_type_name(&other)
            )))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            Value::String(s) => Ok(s),
            other => Err(Error::params_parse(format!(
                "element {i} is {}, expected a string",
                json_type_name(&other)
            ))),
        })
        .collect()
}

/// Parse CSV content, taking the first column of each row
///
/// Rows whose first column is empty are skipped like blank lines.
pub fn parse_csv_params(content: &str) -> Vec<String> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_csv_line(line, ',').into_iter().next())
        .filter(|value| !value.is_empty())
        .collect()
}

/// Parse a single CSV line, handling quoted fields
fn parse_csv_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            if in_quotes {
                // Check for escaped quote
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            } else {
                in_quotes = true;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(current.trim().to_string());
            current = String::new();
        } else {
            current.push(c);
        }
    }

    fields.push(current.trim().to_string());
    fields
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
