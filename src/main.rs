use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use rust_ledger::cli::{self, Cli};
use rust_ledger::config::LedgerConfig;

fn main() {
    let cli = Cli::parse();
    let config = LedgerConfig::load_or_default(&cli.config);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.node.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(e) = cli::run(cli.command, config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
