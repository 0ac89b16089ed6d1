//! Transfer engine and fee protocol.
//!
//! A transfer is a debit on the sender, a credit on the recipient and an
//! optional fee debit on the sender's native-coin stream. The engine does not
//! touch supply: the caller burns the fee through the supply ledger, so
//! transfer and burn stay separately composable.

use std::collections::BTreeMap;

use tracing::info;

use super::context::LedgerContext;
use super::types::{normalize_symbol, TokenSymbol};
use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::storage::KvStore;

impl<'a, S: KvStore> LedgerContext<'a, S> {
    /// Move `amount` of `token` from `from` to `to`, and debit `fee` from
    /// `from`'s native coin.
    ///
    /// Only the transferred amount is checked against the sender's balance;
    /// fee sufficiency is the caller's concern (`check_fee_affordable`).
    /// All checks run before the first write.
    pub fn transfer(&mut self, from: &str, to: &str, token: &str, amount: &Amount, fee: &Amount) -> Result<()> {
        validate_transfer_amounts(amount, fee)?;
        self.ensure_account_scope(from)?;
        self.ensure_account_scope(to)?;
        let token = normalize_symbol(token)?;

        self.ensure_affordable(from, &token, amount)?;

        self.put_delta(from, &token, to, &-amount)?;
        self.put_delta(to, &token, from, amount)?;
        self.debit_fee(from, fee)?;

        info!(from, to, token = %token, amount = %amount, fee = %fee, "transfer applied");
        Ok(())
    }

    /// Several tokens from one sender to one recipient. Amounts for the same
    /// token are aggregated, and every debit is checked before any write.
    /// `fee` is charged once for the whole batch.
    pub fn transfer_batch(&mut self, from: &str, to: &str, legs: &[(&str, Amount)], fee: &Amount) -> Result<()> {
        if fee.is_negative() {
            return Err(LedgerError::ValidationError(format!("fee must not be negative, got {}", fee)));
        }
        self.ensure_account_scope(from)?;
        self.ensure_account_scope(to)?;

        let mut totals: BTreeMap<TokenSymbol, Amount> = BTreeMap::new();
        for (token, amount) in legs {
            if !amount.is_positive() {
                return Err(LedgerError::ValidationError(format!(
                    "transfer amount must be positive, got {} {}",
                    amount, token
                )));
            }
            *totals.entry(normalize_symbol(token)?).or_default() += amount;
        }
        if totals.is_empty() {
            return Err(LedgerError::ValidationError("empty transfer batch".to_string()));
        }

        for (token, needed) in &totals {
            self.ensure_affordable(from, token, needed)?;
        }
        for (token, amount) in &totals {
            self.put_delta(from, token, to, &-amount)?;
            self.put_delta(to, token, from, amount)?;
        }
        self.debit_fee(from, fee)?;

        info!(from, to, tokens = totals.len(), fee = %fee, "batch transfer applied");
        Ok(())
    }

    /// Policy-side fee check. For the native coin the sender must cover
    /// `amount + fee` together, for any other token the fee alone is drawn
    /// from the native balance.
    pub fn check_fee_affordable(&self, from: &str, token: &str, amount: &Amount, fee: &Amount) -> Result<()> {
        if !fee.is_positive() {
            return Ok(());
        }
        let native = self.config().native_symbol();
        let needed = if normalize_symbol(token)? == native {
            amount + fee
        } else {
            fee.clone()
        };
        self.ensure_affordable(from, native, &needed)
    }

    /// Charge a standalone fee: debit the payer's native coin to the fee sink
    /// and burn the same amount from native supply.
    pub fn burn_fee(&mut self, payer: &str, fee: &Amount) -> Result<()> {
        if fee.is_negative() {
            return Err(LedgerError::ValidationError(format!("fee must not be negative, got {}", fee)));
        }
        if fee.is_zero() {
            return Ok(());
        }
        self.ensure_account_scope(payer)?;
        let native = self.config().native_symbol();
        self.debit_fee(payer, fee)?;
        self.burn_supply(native, fee)
    }

    fn debit_fee(&mut self, payer: &str, fee: &Amount) -> Result<()> {
        if !fee.is_positive() {
            return Ok(());
        }
        let config = self.config();
        self.put_delta(payer, config.native_symbol(), &config.core.fee_sink, &-fee)
    }

    pub(crate) fn ensure_affordable(&self, scope: &str, token: &str, needed: &Amount) -> Result<()> {
        let available = self.balance(scope, token)?;
        if &available < needed {
            return Err(LedgerError::InsufficientBalance {
                scope: scope.to_string(),
                token: token.to_string(),
                needed: needed.to_string(),
                available: available.to_string(),
            });
        }
        Ok(())
    }
}

fn validate_transfer_amounts(amount: &Amount, fee: &Amount) -> Result<()> {
    if !amount.is_positive() {
        return Err(LedgerError::ValidationError(format!(
            "transfer amount must be positive, got {}",
            amount
        )));
    }
    if fee.is_negative() {
        return Err(LedgerError::ValidationError(format!("fee must not be negative, got {}", fee)));
    }
    Ok(())
}
