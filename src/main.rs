use anyhow::Result;
use clap::Parser;
use classicreads::error::is_content_unavailable;
use classicreads::{cli, converter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    match converter::run(&cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        // Missing books and books without plain text get their own exit status
        Err(err) if is_content_unavailable(&err) => {
            eprintln!("Content unavailable: {err:#}");
            Ok(ExitCode::from(2))
        }
        Err(err) => Err(err),
    }
}
