//! Record model: signed delta records and their keys.
//!
//! A delta record lives at `balance(scope, TOKEN, contributor, stamp)`. The
//! stamp is unique per write, so two credits to the same scope from the same
//! counterparty never land on one key and overwrite each other. The pruner
//! folds a prefix into the canonical record `balance(scope, TOKEN, scope)`,
//! which has no stamp.

use tracing::debug;

use super::context::LedgerContext;
use super::keys::{composite_key, split_composite_key, BALANCE_OBJECT};
use super::types::normalize_symbol;
use crate::amount::Amount;
use crate::error::{LedgerError, Result};
use crate::storage::KvStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordKey {
    pub scope: String,
    pub token: String,
    pub contributor: String,
    pub stamp: Option<String>,
}

impl RecordKey {
    pub fn delta(scope: &str, token: &str, contributor: &str, stamp: String) -> Result<Self> {
        Ok(Self {
            scope: scope.to_string(),
            token: normalize_symbol(token)?,
            contributor: contributor.to_string(),
            stamp: Some(stamp),
        })
    }

    pub fn canonical(scope: &str, token: &str) -> Result<Self> {
        Ok(Self {
            scope: scope.to_string(),
            token: normalize_symbol(token)?,
            contributor: scope.to_string(),
            stamp: None,
        })
    }

    pub fn is_canonical(&self) -> bool {
        self.stamp.is_none() && self.contributor == self.scope
    }

    pub fn encode(&self) -> Result<String> {
        let mut attrs = vec![self.scope.as_str(), self.token.as_str(), self.contributor.as_str()];
        if let Some(stamp) = &self.stamp {
            attrs.push(stamp.as_str());
        }
        composite_key(BALANCE_OBJECT, &attrs)
    }

    pub fn decode(key: &str) -> Result<Self> {
        let (object, attrs) = split_composite_key(key)?;
        if object != BALANCE_OBJECT {
            return Err(LedgerError::StoreFault(format!("{:?} is not a balance record", key)));
        }
        match attrs.as_slice() {
            [scope, token, contributor] => Ok(Self {
                scope: scope.to_string(),
                token: token.to_string(),
                contributor: contributor.to_string(),
                stamp: None,
            }),
            [scope, token, contributor, stamp] => Ok(Self {
                scope: scope.to_string(),
                token: token.to_string(),
                contributor: contributor.to_string(),
                stamp: Some(stamp.to_string()),
            }),
            _ => Err(LedgerError::StoreFault(format!("malformed balance record key {:?}", key))),
        }
    }
}

/// Key prefix shared by every record of one `(scope, token)` pair.
pub fn record_prefix(scope: &str, token: &str) -> Result<String> {
    let token = normalize_symbol(token)?;
    composite_key(BALANCE_OBJECT, &[scope, token.as_str()])
}

impl<'a, S: KvStore> LedgerContext<'a, S> {
    /// Append one signed delta to `scope`'s stream for `token`, attributed to
    /// `contributor`. Never reads or merges existing records; a zero delta
    /// writes nothing.
    pub fn put_delta(&mut self, scope: &str, token: &str, contributor: &str, amount: &Amount) -> Result<()> {
        self.ensure_scope(scope)?;
        if contributor.is_empty() {
            return Err(LedgerError::ValidationError("record contributor must not be empty".to_string()));
        }
        if amount.is_zero() {
            return Ok(());
        }
        let stamp = self.next_stamp();
        let key = RecordKey::delta(scope, token, contributor, stamp)?.encode()?;
        self.store_mut().put(&key, amount.to_record_bytes())?;
        debug!(scope, token, contributor, amount = %amount, "delta appended");
        Ok(())
    }
}
