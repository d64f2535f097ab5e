use std::io::Write;
use std::process::ExitCode;

use clap::Parser;
use jobfetch::telemetry::{LogFormat, init_logging};
use jobfetch::{CliArgs, Config, JobFetcher, write_output};

#[tokio::main]
async fn main() -> ExitCode {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    if let Err(e) = init_logging(LogFormat::from_env()) {
        eprintln!("failed to initialise logging: {e}");
    }

    match run(args, std::io::stdout().lock()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "jobfetch failed");
            ExitCode::FAILURE
        }
    }
}

/// Validate `args`, run the configured batch, and write the jobs document to `out`.
///
/// Nothing is written when the configuration is invalid.
async fn run<W: Write>(args: CliArgs, out: W) -> anyhow::Result<()> {
    let config = Config::try_from(args)?;
    let fetcher = JobFetcher::new(config)?;

    let report = fetcher.run_configured_batch().await;

    write_output(&report.job_ids, out)
        .map_err(|e| anyhow::anyhow!("failed to write output: {}", e))?;
    Ok(())
}
