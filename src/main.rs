use std::io::Write;

use anyhow::Context;
use clap::Parser;

use itemkeeper::app::{execute, open_database};
use itemkeeper::cli::Cli;
use itemkeeper::logging::init_tracing;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.load_config().context("could not load configuration")?;
    let database = open_database(&config.storage).context("could not open item database")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = execute(&cli.command(), database, cli.output_format(), &mut out).await?;
    out.flush()?;

    if let Some(failure) = report.last_failure {
        eprintln!(
            "Warning: {} storage operation(s) failed; last error: {}",
            report.failed_effects, failure
        );
    }
    Ok(())
}
