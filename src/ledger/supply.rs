//! Supply ledger.
//!
//! Total supply is the same delta-record stream as any balance, kept under
//! the sentinel scope of the token's family. Mints and burns are records the
//! sentinel authors for itself; reported supply is always coalesced first.

use std::collections::{BTreeMap, BTreeSet};

use tracing::info;

use super::context::LedgerContext;
use super::keys::{composite_key, BALANCE_OBJECT};
use super::record::RecordKey;
use super::types::{normalize_symbol, Reconciliation};
use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::storage::KvStore;

impl<'a, S: KvStore> LedgerContext<'a, S> {
    /// The sentinel scope holding `token`'s supply.
    pub fn supply_scope_for(&self, token: &str) -> Result<&'a str> {
        let family = self.family_of(token)?;
        Ok(self.config().supply_scope(family))
    }

    pub fn mint_supply(&mut self, token: &str, amount: &Amount) -> Result<()> {
        require_positive("mint", amount)?;
        let sentinel = self.supply_scope_for(token)?;
        self.put_delta(sentinel, token, sentinel, amount)
    }

    pub fn burn_supply(&mut self, token: &str, amount: &Amount) -> Result<()> {
        require_positive("burn", amount)?;
        let sentinel = self.supply_scope_for(token)?;
        self.put_delta(sentinel, token, sentinel, &-amount)
    }

    /// Coalesced total supply. A negative total means some caller burned
    /// more than was ever minted and is reported, never clamped.
    pub fn query_supply(&mut self, token: &str) -> Result<Amount> {
        let sentinel = self.supply_scope_for(token)?;
        let outcome = self.prune(sentinel, token)?;
        if outcome.total.is_negative() {
            return Err(LedgerError::InvariantViolation(format!(
                "total supply of {} is negative ({})",
                token, outcome.total
            )));
        }
        Ok(outcome.total)
    }

    /// Mint new supply and credit it to `account`.
    pub fn mint_to(&mut self, account: &str, token: &str, amount: &Amount) -> Result<()> {
        require_positive("mint", amount)?;
        self.ensure_account_scope(account)?;
        let sentinel = self.supply_scope_for(token)?;
        self.mint_supply(token, amount)?;
        self.put_delta(account, token, sentinel, amount)?;
        info!(account, token, amount = %amount, "minted");
        Ok(())
    }

    /// Destroy `amount` from `holder`'s balance and from supply.
    pub fn burn_from(&mut self, holder: &str, token: &str, amount: &Amount) -> Result<()> {
        require_positive("burn", amount)?;
        self.ensure_account_scope(holder)?;
        self.ensure_affordable(holder, &normalize_symbol(token)?, amount)?;
        let sentinel = self.supply_scope_for(token)?;
        self.put_delta(holder, token, sentinel, &-amount)?;
        self.burn_supply(token, amount)?;
        info!(holder, token, amount = %amount, "burned");
        Ok(())
    }

    /// Burn several distinct tokens from one holder. Every leg is checked
    /// before the first write.
    pub fn burn_batch(&mut self, holder: &str, legs: &[(&str, Amount)]) -> Result<()> {
        self.ensure_account_scope(holder)?;
        if legs.is_empty() {
            return Err(LedgerError::ValidationError("empty burn batch".to_string()));
        }
        let mut seen = BTreeSet::new();
        for (token, amount) in legs {
            require_positive("burn", amount)?;
            let symbol = normalize_symbol(token)?;
            self.ensure_affordable(holder, &symbol, amount)?;
            if !seen.insert(symbol) {
                return Err(LedgerError::ValidationError(format!(
                    "{} appears more than once in burn batch",
                    token
                )));
            }
        }
        for (token, amount) in legs {
            self.burn_from(holder, token, amount)?;
        }
        Ok(())
    }

    /// Coalesced supplies for several tokens, in order.
    pub fn query_supply_batch(&mut self, tokens: &[&str]) -> Result<Vec<Amount>> {
        tokens.iter().map(|token| self.query_supply(token)).collect()
    }

    /// Compare the sum of every account balance for `token` with its supply.
    pub fn reconcile(&mut self, token: &str) -> Result<Reconciliation> {
        let token = normalize_symbol(token)?;
        let config = self.config();
        let prefix = composite_key(BALANCE_OBJECT, &[])?;

        let mut per_scope: BTreeMap<String, Amount> = BTreeMap::new();
        for item in self.store().scan_prefix(&prefix)? {
            let (key, value) = item?;
            let record = RecordKey::decode(&key)?;
            if record.token != token || config.is_sentinel(&record.scope) {
                continue;
            }
            *per_scope.entry(record.scope).or_default() += &Amount::from_record_bytes(&key, &value)?;
        }
        let circulating: Amount = per_scope.values().sum();
        let holders = per_scope.values().filter(|b| !b.is_zero()).count();

        let supply = self.query_supply(&token)?;
        if circulating != supply {
            return Err(LedgerError::InvariantViolation(format!(
                "{} in circulation but supply of {} is {}",
                circulating, token, supply
            )));
        }
        Ok(Reconciliation {
            token,
            circulating,
            supply,
            holders,
        })
    }
}

fn require_positive(op: &str, amount: &Amount) -> Result<()> {
    if !amount.is_positive() {
        return Err(LedgerError::ValidationError(format!(
            "{} amount must be positive, got {}",
            op, amount
        )));
    }
    Ok(())
}
