mod config;
mod logging;
mod report;

use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use config::{AppConfig, Cli};
use thiserror::Error;
use tripsum_core::{Error as CoreError, Summary};
use tripsum_summarize::{PostgresSummarizer, Summarizer, SummaryOptions};

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error("logging error: {0}")]
    Logging(String),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Core(err) => err.exit_code(),
            CliError::Logging(_) => 1,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(event = "run_finished", status = "failed", error = %err);
            eprintln!("ERROR: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    logging::init_logging(cli.log_format).map_err(CliError::Logging)?;
    let config = cli.into_config()?;

    tracing::info!(
        event = "run_started",
        db = %config.db.redacted(),
        table = %config.summary.table,
        top_n = config.summary.top_n,
        out = %config.report.output_path.display()
    );
    let timer = Instant::now();

    let summary = fetch_summary(&config).await?;
    write_report(&summary, &config.report.output_path)?;

    let duration_ms = timer.elapsed().as_millis();
    tracing::info!(event = "run_finished", status = "success", duration_ms = duration_ms);
    Ok(())
}

/// Connect, summarize, and close the connection on every path.
async fn fetch_summary(config: &AppConfig) -> Result<Summary, CoreError> {
    let mut summarizer = PostgresSummarizer::connect(&config.db, &config.retry).await?;

    let outcome = summarize_with(&mut summarizer, &config.summary).await;

    if let Err(err) = summarizer.close().await {
        tracing::warn!(event = "close_failed", error = %err);
    }

    outcome
}

async fn summarize_with<S>(
    summarizer: &mut S,
    opts: &SummaryOptions,
) -> Result<Summary, CoreError>
where
    S: Summarizer + Send,
{
    tracing::info!(event = "summary_started", engine = summarizer.engine());
    let summary = summarizer.summarize(opts).await?;
    tracing::info!(
        event = "summary_finished",
        total_trips = summary.total_trips,
        cities = summary.avg_fare_by_city.len(),
        top = summary.top_by_minutes.len()
    );
    Ok(summary)
}

fn write_report(summary: &Summary, path: &Path) -> Result<(), CoreError> {
    report::report(summary, path, &mut io::stdout().lock())?;
    tracing::info!(event = "report_written", path = %path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tripsum_core::{TableName, Trip};
    use tripsum_summarize::MemorySummarizer;

    fn temp_out_path(label: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("tripsum_{label}_{}", uuid::Uuid::new_v4()))
            .join("summary.json")
    }

    #[tokio::test]
    async fn missing_table_writes_nothing() {
        let mut summarizer = MemorySummarizer::new(vec![Trip::new(1, "LA", 20, 25.0)]);
        let opts = SummaryOptions {
            table: TableName::parse("rides").expect("table name"),
            top_n: 5,
        };
        let out = temp_out_path("missing");

        let err = summarize_with(&mut summarizer, &opts)
            .await
            .map(|summary| write_report(&summary, &out))
            .map_err(CliError::from)
            .expect_err("missing table");

        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("'rides'"));
        assert!(!out.exists());
    }

    #[tokio::test]
    async fn summary_is_written_to_output_path() {
        let mut summarizer = MemorySummarizer::new(vec![
            Trip::new(1, "NYC", 10, 12.5),
            Trip::new(2, "NYC", 30, 40.0),
            Trip::new(3, "LA", 20, 25.0),
        ]);
        let opts = SummaryOptions {
            top_n: 2,
            ..SummaryOptions::default()
        };
        let out = temp_out_path("written");

        let summary = summarize_with(&mut summarizer, &opts)
            .await
            .expect("summary");
        write_report(&summary, &out).expect("write report");

        let written: Summary =
            serde_json::from_str(&std::fs::read_to_string(&out).expect("read summary.json"))
                .expect("parse summary.json");
        assert_eq!(written, summary);
        assert_eq!(written.total_trips, 3);

        if let Some(dir) = out.parent() {
            std::fs::remove_dir_all(dir).expect("cleanup");
        }
    }

    #[test]
    fn connection_failure_exits_with_one() {
        let err = CliError::from(CoreError::Connection {
            attempts: 12,
            last: "connection refused".to_string(),
        });
        assert_eq!(err.exit_code(), 1);
    }
}
