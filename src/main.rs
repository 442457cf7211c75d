use std::io::{self, IsTerminal};
use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use ptree::cli::Cli;
use ptree::config::JsonFileStore;
use ptree::fs::RealFileSystem;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    // The sidecar file always lives in the invocation directory, not the printed one.
    let store = JsonFileStore::new(ptree::config::CONFIG_FILE_NAME);
    let mut stdout = io::stdout().lock();

    match ptree::run(&cli, &RealFileSystem, &store, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if ptree::is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
