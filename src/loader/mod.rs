//! Parameter list loader
//!
//! Reads the parameter file and returns its values in file order.
//!
//! # Overview
//!
//! The loader module provides:
//! - `ParamsLocation` - parameter file location backed by an object store
//! - `parse_params` - JSON array / CSV parsing
//! - `load_params` - one-shot read + parse
//!
//! Loading happens once, before any fetch. Any failure here is fatal for the
//! job: no partial parameter list is ever used.

mod location;
mod parser;

pub use location::ParamsLocation;
pub use parser::{parse_csv_params, parse_json_params, parse_params};

use crate::error::Result;
use crate::types::ParamsFormat;
use tracing::info;

/// Load the parameter list from a location
///
/// Performs a single read of the whole object; no caching, no retry.
pub async fn load_params(location: &str, format: ParamsFormat) -> Result<Vec<String>> {
    let source = ParamsLocation::parse(location)?;
    let params = source.load(format).await?;
    info!(
        "Loaded {} parameters from {location} ({format})",
        params.len()
    );
    Ok(params)
}
