//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::JobConfig;
use crate::engine::{run_job, Fetcher};
use crate::error::{Error, Result};
use crate::loader::load_params;
use crate::output::open_sink;
use crate::template;
use serde_json::{json, Value};
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Run => self.run_job().await,
            Commands::Params => self.params().await,
            Commands::Urls { limit } => self.urls(*limit).await,
            Commands::Validate => self.validate(),
        }
    }

    /// Load the config file (if any) and apply CLI flags on top
    pub fn load_config(&self) -> Result<JobConfig> {
        let mut config = match &self.cli.config {
            Some(path) => JobConfig::from_file(path)?,
            None => JobConfig::default(),
        };
        self.cli.job.apply(&mut config);
        Ok(config)
    }

    /// Load and validate the config
    fn validated_config(&self) -> Result<JobConfig> {
        let config = self.load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Fetch everything and write records
    async fn run_job(&self) -> Result<()> {
        let config = self.validated_config()?;
        let mut sink = open_sink(config.output.as_deref())?;

        let stats = run_job(&config, sink.as_mut()).await?;

        for failure in &stats.failures {
            warn!("Parameter '{}' failed: {}", failure.param, failure.message);
        }
        info!(
            "{} records from {} parameters ({} failed), {} requests in {}ms",
            stats.records_emitted,
            stats.units_total,
            stats.units_failed,
            stats.requests_sent,
            stats.duration_ms
        );

        if stats.is_success() {
            Ok(())
        } else {
            Err(Error::Other(format!(
                "{} of {} parameters failed",
                stats.units_failed, stats.units_total
            )))
        }
    }

    /// Print the parameter list
    async fn params(&self) -> Result<()> {
        let config = self.load_config()?;
        if config.params_path.trim().is_empty() {
            return Err(Error::missing_field("params_path"));
        }

        let params = load_params(&config.params_path, config.params_format()).await?;
        self.output_message(&json!(params));
        Ok(())
    }

    /// Print every URL that `run` would request
    async fn urls(&self, limit: Option<usize>) -> Result<()> {
        let config = self.validated_config()?;
        let params = load_params(&config.params_path, config.params_format()).await?;
        let fetcher = Fetcher::from_config(&config)?;

        let count = limit.unwrap_or(params.len());
        for param in params.iter().take(count) {
            for url in fetcher.request_urls(param) {
                println!("{url}");
            }
        }
        Ok(())
    }

    /// Validate the config and report what a run would do
    fn validate(&self) -> Result<()> {
        let config = self.validated_config()?;
        self.output_message(&validation_report(&config));
        Ok(())
    }

    /// Output a JSON message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

/// Summary of a validated config
fn validation_report(config: &JobConfig) -> Value {
    let pagination = config.pagination().map_or(Value::Null, |p| {
        json!({
            "param": p.page_param,
            "maxPages": p.max_pages
        })
    });

    json!({
        "type": "VALIDATION",
        "valid": true,
        "urlTemplate": config.url_template,
        "placeholders": template::placeholder_count(&config.url_template),
        "paramsPath": config.params_path,
        "paramsFormat": config.params_format().to_string(),
        "pagination": pagination,
        "concurrency": config.concurrency,
        "failFast": config.fail_fast
    })
}
