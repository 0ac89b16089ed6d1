//! Delta-record accounting core.
//!
//! Balances and total supplies are streams of signed delta records:
//! - `record`: append-only puts
//! - `balance`: prefix summation
//! - `prune`: coalescing into one canonical record
//! - `transfer`: debit/credit/fee protocol
//! - `supply`: mint, burn and supply queries on sentinel scopes
//! - `coordinator`: the `Ledger` facade, one atomic invocation per call

pub mod balance;
pub mod context;
pub mod coordinator;
pub mod keys;
pub mod prune;
pub mod record;
pub mod supply;
pub mod transfer;
pub mod types;

pub use context::LedgerContext;
pub use coordinator::Ledger;
pub use record::RecordKey;
pub use types::{PruneOutcome, Reconciliation, Scope, SupplyFamily, TokenSymbol};
