//! Execution engine module
//!
//! Per-parameter fetching and fan-out across parameters.
//!
//! # Overview
//!
//! The engine module provides:
//! - `Fetcher` - Turns one parameter value into a lazy stream of records
//! - `Job` - Runs one fetch unit per parameter on a bounded task set
//! - `JobStats` / `UnitOutcome` - What happened, per unit and overall
//!
//! Within a unit pages are fetched strictly in order, and a failed page ends
//! the unit. Units are independent: one failing unit does not stop the
//! others unless the job runs in fail-fast mode.

mod fetcher;
mod job;
mod types;

pub use fetcher::Fetcher;
pub use job::Job;
pub use types::{JobStats, UnitFailure, UnitOutcome};

use crate::config::JobConfig;
use crate::error::Result;
use crate::loader::load_params;
use crate::output::RecordSink;

/// Run a complete job: validate, load parameters, fetch, emit
///
/// Configuration and parameter loading failures abort before any request is
/// made. The sink is finished once all units are done.
pub async fn run_job(config: &JobConfig, sink: &mut dyn RecordSink) -> Result<JobStats> {
    config.validate()?;
    let params = load_params(&config.params_path, config.params_format()).await?;
    let job = Job::from_config(config)?;
    job.run(params, sink).await
}
