//! # printhouse
//!
//! Entry point of the `printhouse` binary. Setup and commands live in the
//! library half of this crate.

use std::process::ExitCode;

use clap::Parser;
use printhouse_console::cli::Cli;
use printhouse_console::{init_tracing, load_config, run};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(cli, &config).await {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
