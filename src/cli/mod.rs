//! CLI module
//!
//! Command-line interface for running fetch jobs.
//!
//! # Commands
//!
//! - `run` - Load parameters, fetch every endpoint, write records
//! - `params` - Print the parameter list without fetching
//! - `urls` - Print every URL `run` would request (dry run)
//! - `validate` - Validate the job configuration

mod commands;
mod runner;

pub use commands::{Cli, Commands, JobArgs, OutputFormat};
pub use runner::Runner;
