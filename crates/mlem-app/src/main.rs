//! Command-line entry point.

use clap::Parser;
use mlem_app::Cli;

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Starting mlem-layout");

    if let Err(e) = mlem_app::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
