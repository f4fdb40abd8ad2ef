//! treetest CLI
//!
//! Inspects dataset files and probes for packages. Test suites themselves are
//! built and run from Rust through the library.

use clap::Parser;
use treetest::commands::Commands;
use treetest::common::{config::Config, logging};
use treetest::cli;

#[derive(Parser)]
#[command(name = "treetest", about = "Declarative test generation toolkit")]
#[command(version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    let result = match Config::load() {
        Ok(config) => cli::dispatch(cli.command, &config).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
