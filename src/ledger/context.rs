//! Per-invocation context.
//!
//! Every core operation runs as a method on `LedgerContext`, which carries the
//! configuration and the store explicitly instead of reaching for globals.
//! The operations themselves live in the component modules (`record`,
//! `balance`, `prune`, `transfer`, `supply`) as separate `impl` blocks.

use uuid::Uuid;

use crate::config::LedgerConfig;
use crate::error::{LedgerError, Result};
use crate::storage::KvStore;

pub struct LedgerContext<'a, S: KvStore> {
    config: &'a LedgerConfig,
    store: &'a mut S,
    tx_id: String,
    seq: u32,
}

impl<'a, S: KvStore> LedgerContext<'a, S> {
    pub fn new(config: &'a LedgerConfig, store: &'a mut S) -> Self {
        Self::with_tx_id(config, store, Uuid::new_v4().simple().to_string())
    }

    pub fn with_tx_id(config: &'a LedgerConfig, store: &'a mut S, tx_id: impl Into<String>) -> Self {
        Self {
            config,
            store,
            tx_id: tx_id.into(),
            seq: 0,
        }
    }

    pub fn config(&self) -> &'a LedgerConfig {
        self.config
    }

    pub fn store(&self) -> &S {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut *self.store
    }

    pub fn tx_id(&self) -> &str {
        &self.tx_id
    }

    /// Unique suffix for the next record written by this invocation.
    pub(crate) fn next_stamp(&mut self) -> String {
        self.seq += 1;
        format!("{}.{:04}", self.tx_id, self.seq)
    }

    /// Reject the empty scope and the reserved null scope.
    pub fn ensure_scope(&self, scope: &str) -> Result<()> {
        if scope.is_empty() || scope == self.config.core.null_scope {
            return Err(LedgerError::InvalidScope(format!(
                "{:?} is not a valid ledger scope",
                scope
            )));
        }
        Ok(())
    }

    /// Like `ensure_scope`, but also refuse supply sentinels, which can only
    /// be touched through the supply ledger.
    pub fn ensure_account_scope(&self, scope: &str) -> Result<()> {
        self.ensure_scope(scope)?;
        if self.config.is_sentinel(scope) {
            return Err(LedgerError::InvalidScope(format!(
                "{} is a supply sentinel, not an account",
                scope
            )));
        }
        Ok(())
    }
}
