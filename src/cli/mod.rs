pub mod ops;
pub mod query;

use clap::{Parser, Subcommand};

use crate::config::LedgerConfig;
use crate::error::Result;
use crate::ledger::Ledger;
use crate::storage::SledStore;

#[derive(Parser)]
#[command(name = "ledger")]
#[command(about = "Delta-record token ledger", long_about = None)]
pub struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "ledger.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register the native coin and mint the genesis supply
    Genesis {
        #[arg(long)]
        admin: String,
    },
    /// Issue a new token to its admin
    Issue {
        #[arg(long)]
        admin: String,
        #[arg(long)]
        symbol: String,
        #[arg(long)]
        supply: String,
        /// Token metadata as JSON; defaults to an 18-decimal coin
        #[arg(long)]
        metadata: Option<String>,
    },
    /// Mint new supply to an account
    Mint {
        #[arg(long)]
        account: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: String,
    },
    /// Burn from an account and from supply
    Burn {
        #[arg(long)]
        from: String,
        #[arg(long)]
        token: String,
        #[arg(long)]
        amount: String,
        /// Defaults to `fees.transfer_fee`
        #[arg(long)]
        fee: Option<String>,
    },
    Transfer {
        #[arg(long)]
        from: String,
        #[arg(long)]
        to: String,
        /// Defaults to the native coin
        #[arg(long)]
        token: Option<String>,
        #[arg(long)]
        amount: String,
        /// Defaults to `fees.transfer_fee`
        #[arg(long)]
        fee: Option<String>,
    },
    Balance {
        address: String,
        #[arg(long)]
        token: Option<String>,
    },
    /// Coalesced total supply
    Supply {
        token: Option<String>,
    },
    /// Coalesce an account's records for one token
    Prune {
        scope: String,
        #[arg(long)]
        token: String,
    },
    /// Check account balances against total supply
    Reconcile {
        token: String,
    },
    /// Show a token's registry entry
    Token {
        symbol: String,
    },
}

/// Open the configured sled database and run one command against it.
pub fn run(command: Commands, config: LedgerConfig) -> Result<()> {
    let store = SledStore::open(&config.node.db_path)?;
    let mut ledger = Ledger::new(config, store)?;

    match command {
        Commands::Genesis { admin } => ops::handle_genesis(&mut ledger, &admin),
        Commands::Issue { admin, symbol, supply, metadata } => {
            ops::handle_issue(&mut ledger, &admin, &symbol, &supply, metadata.as_deref())
        }
        Commands::Mint { account, token, amount } => ops::handle_mint(&mut ledger, &account, &token, &amount),
        Commands::Burn { from, token, amount, fee } => {
            ops::handle_burn(&mut ledger, &from, &token, &amount, fee.as_deref())
        }
        Commands::Transfer { from, to, token, amount, fee } => {
            ops::handle_transfer(&mut ledger, &from, &to, token.as_deref(), &amount, fee.as_deref())
        }
        Commands::Balance { address, token } => query::handle_balance(&ledger, &address, token.as_deref()),
        Commands::Supply { token } => query::handle_supply(&mut ledger, token.as_deref()),
        Commands::Prune { scope, token } => ops::handle_prune(&mut ledger, &scope, &token),
        Commands::Reconcile { token } => query::handle_reconcile(&mut ledger, &token),
        Commands::Token { symbol } => query::handle_token(&ledger, &symbol),
    }
}
