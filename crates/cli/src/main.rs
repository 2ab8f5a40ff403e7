//! `delivery` entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use cli::config::Config;
use cli::error::CliError;

fn main() -> ExitCode {
    match try_main() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error[{}]: {err}", err.kind());
            ExitCode::FAILURE
        }
    }
}

fn try_main() -> Result<(), CliError> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .ok_or_else(|| CliError::Usage("usage: delivery <order-file.json>".to_string()))?;

    // 1. Configuration and tracing
    let config = Config::from_env()?;
    cli::init_tracing(&config)?;

    // 2. Price and complete the order
    let file = cli::load_order_file(&path)?;
    let summary = cli::run(&config, &file)?;

    println!("{summary}");
    Ok(())
}
