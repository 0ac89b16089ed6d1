//! Shared ledger type definitions

use serde::{Deserialize, Serialize};

use crate::amount::Amount;
use crate::error::{LedgerError, Result};

/// Account identifier or supply sentinel - an opaque address string
pub type Scope = String;

/// Token symbol, always stored upper-case (BUSY, GOLD, ...)
pub type TokenSymbol = String;

/// Which sentinel scope accumulates a token's supply.
///
/// The native coin and ordinary fungible tokens share one sentinel; NFT and
/// game token families use the other, so the two key spaces never overlap.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SupplyFamily {
    Coin,
    Game,
}

/// Result of coalescing one `(scope, token)` prefix.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PruneOutcome {
    pub total: Amount,
    pub records_seen: usize,
}

/// Circulating balances versus recorded supply for one token.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    pub token: TokenSymbol,
    pub circulating: Amount,
    pub supply: Amount,
    pub holders: usize,
}

/// Case-normalize a token symbol. Surrounding whitespace is rejected, not
/// trimmed, so `" BUSY"` can never name a second key space.
pub fn normalize_symbol(symbol: &str) -> Result<TokenSymbol> {
    if symbol.trim().is_empty() {
        return Err(LedgerError::ValidationError(
            "token symbol must not be empty".to_string(),
        ));
    }
    if symbol.trim() != symbol {
        return Err(LedgerError::ValidationError(format!(
            "token symbol {:?} has surrounding whitespace",
            symbol
        )));
    }
    Ok(symbol.to_uppercase())
}
