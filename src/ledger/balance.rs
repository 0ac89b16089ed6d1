//! Balance aggregation over delta records

use super::context::LedgerContext;
use super::record::record_prefix;
use crate::amount::Amount;
use crate::error::Result;
use crate::storage::KvStore;

impl<'a, S: KvStore> LedgerContext<'a, S> {
    /// Sum every record under `(scope, token)`. An empty prefix is zero.
    ///
    /// Any store fault aborts the sum; a partial total is never returned.
    pub fn balance(&self, scope: &str, token: &str) -> Result<Amount> {
        self.ensure_scope(scope)?;
        let prefix = record_prefix(scope, token)?;

        let mut total = Amount::zero();
        for item in self.store().scan_prefix(&prefix)? {
            let (key, value) = item?;
            total += &Amount::from_record_bytes(&key, &value)?;
        }
        Ok(total)
    }

    /// Balances for several `(scope, token)` pairs, in order.
    pub fn balance_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<Amount>> {
        pairs
            .iter()
            .map(|(scope, token)| self.balance(scope, token))
            .collect()
    }

    /// Physical records currently stored under `(scope, token)`.
    pub fn record_count(&self, scope: &str, token: &str) -> Result<usize> {
        let prefix = record_prefix(scope, token)?;
        let mut count = 0;
        for item in self.store().scan_prefix(&prefix)? {
            item?;
            count += 1;
        }
        Ok(count)
    }
}
