use std::io;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use parley::cli::{run_interactive, run_single};
use parley::config::{Cli, Mode};
use parley::runtime::build_dispatcher;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Cli::parse();
    init_tracing();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

/// Diagnostics go to stderr so stdout carries only the answer.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(args: Cli) -> Result<()> {
    let settings = args.settings();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    runtime.block_on(async move {
        let dispatcher = build_dispatcher(&settings)?;
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match args.mode() {
            Mode::Single(request) => run_single(&dispatcher, request, &mut out).await,
            Mode::Interactive => {
                let input = tokio::io::BufReader::new(tokio::io::stdin());
                run_interactive(&dispatcher, input, &mut out, &mut io::stderr()).await
            }
        }
    })
}
