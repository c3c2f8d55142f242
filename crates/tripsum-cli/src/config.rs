use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tripsum_core::{DbSettings, ReportSettings, Result, RetryPolicy, TableName};
use tripsum_summarize::SummaryOptions;

/// Log line encoding on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(
    name = "tripsum",
    version,
    about = "Summarize the trips table into summary.json"
)]
pub struct Cli {
    /// Database host.
    #[arg(long, env = "DB_HOST", default_value = "db")]
    pub host: String,
    /// Database port.
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub port: u16,
    /// Database user.
    #[arg(long, env = "DB_USER", default_value = "appuser")]
    pub user: String,
    /// Database password.
    #[arg(long, env = "DB_PASS", default_value = "secretpw", hide_env_values = true)]
    pub password: String,
    /// Database name.
    #[arg(long, env = "DB_NAME", default_value = "appdb")]
    pub database: String,
    /// Number of rows in the longest-trips list.
    #[arg(long, env = "APP_TOP_N", default_value_t = 5)]
    pub top_n: u32,
    /// Table to summarize, optionally schema-qualified.
    #[arg(long, env = "APP_TABLE", default_value = tripsum_core::DEFAULT_TABLE)]
    pub table: String,
    /// Output path for summary.json.
    #[arg(long, env = "APP_OUT", default_value = tripsum_core::DEFAULT_OUTPUT_PATH)]
    pub out: PathBuf,
    /// Timeout for a single connection attempt, in seconds.
    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value_t = 3.0)]
    pub connect_timeout_secs: f64,
    /// Connection attempts before giving up.
    #[arg(long, env = "DB_CONNECT_ATTEMPTS", default_value_t = 12)]
    pub max_attempts: u32,
    /// Delay after the first failed attempt, in seconds.
    #[arg(long, env = "DB_RETRY_INITIAL_DELAY", default_value_t = 1.5)]
    pub initial_delay_secs: f64,
    /// Multiplier applied to the delay after each failure.
    #[arg(long, env = "DB_RETRY_FACTOR", default_value_t = 1.5)]
    pub backoff_factor: f64,
    /// Upper bound on the delay between attempts, in seconds.
    #[arg(long, env = "DB_RETRY_MAX_DELAY", default_value_t = 10.0)]
    pub max_delay_secs: f64,
    /// Log format for stderr.
    #[arg(long, env = "APP_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

/// Settings resolved once at process start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db: DbSettings,
    pub retry: RetryPolicy,
    pub summary: SummaryOptions,
    pub report: ReportSettings,
}

impl Cli {
    pub fn into_config(self) -> Result<AppConfig> {
        let retry = RetryPolicy::from_secs(
            self.max_attempts,
            self.initial_delay_secs,
            self.backoff_factor,
            self.max_delay_secs,
            self.connect_timeout_secs,
        )?;

        Ok(AppConfig {
            db: DbSettings {
                host: self.host,
                port: self.port,
                user: self.user,
                password: self.password,
                database: self.database,
            },
            retry,
            summary: SummaryOptions {
                table: TableName::parse(&self.table)?,
                top_n: self.top_n,
            },
            report: ReportSettings {
                output_path: self.out,
            },
        })
    }
}
