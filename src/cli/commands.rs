//! CLI commands and argument parsing

use crate::config::JobConfig;
use crate::types::ParamsFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Fetch a parameterized set of HTTP endpoints as a stream of records
#[derive(Parser, Debug)]
#[command(name = "fanout-fetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Job configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub job: JobArgs,

    /// Format of command messages (records are always JSON lines)
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Job settings; each flag overrides the same field of the config file
#[derive(Args, Debug, Default, Clone)]
pub struct JobArgs {
    /// URL template with a ${param} placeholder
    #[arg(short = 't', long, global = true)]
    pub url_template: Option<String>,

    /// Parameter file location (gs://, s3://, r2://, az://, or a local path)
    #[arg(short = 'p', long, global = true)]
    pub params: Option<String>,

    /// Parameter file format (inferred from the extension by default)
    #[arg(long, global = true)]
    pub params_format: Option<ParamsFormat>,

    /// Pagination query parameter name (e.g., page)
    #[arg(long, global = true)]
    pub pagination_param: Option<String>,

    /// Pages to fetch per parameter when pagination is enabled
    #[arg(long, global = true)]
    pub max_pages: Option<u32>,

    /// Parameters fetched at the same time
    #[arg(long, global = true)]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Abort the job on the first failed parameter
    #[arg(long, global = true)]
    pub fail_fast: bool,

    /// Output destination (local path or cloud URL; stdout by default)
    /// Supports: /path, s3://bucket/path, r2://bucket/path, gs://bucket/path, az://container/path
    #[arg(short, long, global = true)]
    pub output: Option<String>,
}

impl JobArgs {
    /// Apply the flags that were given on top of a config
    pub fn apply(&self, config: &mut JobConfig) {
        if let Some(template) = &self.url_template {
            config.url_template.clone_from(template);
        }
        if let Some(params) = &self.params {
            config.params_path.clone_from(params);
        }
        if let Some(format) = self.params_format {
            config.params_format = Some(format);
        }
        if let Some(name) = &self.pagination_param {
            config.pagination_param = Some(name.clone());
        }
        if let Some(max) = self.max_pages {
            config.max_pages = Some(max);
        }
        if let Some(concurrency) = self.concurrency {
            config.concurrency = concurrency;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = Some(secs);
        }
        if self.fail_fast {
            config.fail_fast = true;
        }
        if let Some(output) = &self.output {
            config.output = Some(output.clone());
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch every parameter and write the response records
    Run,

    /// Load and print the parameter list
    Params,

    /// Print the URLs that would be requested, without fetching
    Urls {
        /// Only show the first N parameters
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Validate the job configuration
    Validate,
}

/// Output format for command messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
