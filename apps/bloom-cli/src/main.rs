//! `bloom` binary entry point.

use std::process::ExitCode;

use bloom_cli::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    bloom_cli::init_tracing();

    let cli = Cli::parse();

    match bloom_cli::run(cli).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.to_json());
            ExitCode::FAILURE
        }
    }
}
