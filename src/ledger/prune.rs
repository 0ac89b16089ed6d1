//! Pruner: coalesce a `(scope, token)` prefix into one canonical record.
//!
//! Scans in key order, sums, deletes everything but the canonical record and
//! upserts the canonical record with the sum. A zero sum leaves no record at
//! all. The scan is finished and dropped before the first delete, and all
//! writes go through the invocation's store, so a fault anywhere aborts the
//! whole prune together with its caller.

use tracing::debug;

use super::context::LedgerContext;
use super::record::{record_prefix, RecordKey};
use super::types::PruneOutcome;
use crate::amount::Amount;
use crate::error::Result;
use crate::storage::KvStore;

impl<'a, S: KvStore> LedgerContext<'a, S> {
    pub fn prune(&mut self, scope: &str, token: &str) -> Result<PruneOutcome> {
        self.ensure_scope(scope)?;
        let prefix = record_prefix(scope, token)?;
        let canonical = RecordKey::canonical(scope, token)?.encode()?;

        let mut total = Amount::zero();
        let mut records_seen = 0;
        let mut had_canonical = false;
        let mut absorbed = Vec::new();
        for item in self.store().scan_prefix(&prefix)? {
            let (key, value) = item?;
            total += &Amount::from_record_bytes(&key, &value)?;
            records_seen += 1;
            if key == canonical {
                had_canonical = true;
            } else {
                absorbed.push(key);
            }
        }

        // already coalesced
        if absorbed.is_empty() && !(had_canonical && total.is_zero()) {
            return Ok(PruneOutcome { total, records_seen });
        }

        for key in &absorbed {
            self.store_mut().delete(key)?;
        }
        if total.is_zero() {
            if had_canonical {
                self.store_mut().delete(&canonical)?;
            }
        } else {
            self.store_mut().put(&canonical, total.to_record_bytes())?;
        }

        debug!(scope, token, records_seen, absorbed = absorbed.len(), total = %total, "prefix coalesced");
        Ok(PruneOutcome { total, records_seen })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::error::LedgerError;
    use crate::storage::MemoryStore;

    #[test]
    fn test_prune_preserves_total() {
        let config = LedgerConfig::default();
        let mut store = MemoryStore::new();
        let mut ctx = LedgerContext::new(&config, &mut store);

        ctx.put_delta("alice", "BUSY", "TOTAL~SUPPLY", &Amount::from(100u64)).unwrap();
        for _ in 0..10 {
            ctx.put_delta("alice", "BUSY", "bob", &Amount::from(-3i64)).unwrap();
        }
        let before = ctx.balance("alice", "BUSY").unwrap();

        let outcome = ctx.prune("alice", "BUSY").unwrap();
        assert_eq!(outcome.total, before);
        assert_eq!(outcome.records_seen, 11);
        assert_eq!(ctx.balance("alice", "BUSY").unwrap(), before);
        assert_eq!(ctx.record_count("alice", "BUSY").unwrap(), 1);

        // second pass is a no-op over the canonical record
        let again = ctx.prune("alice", "BUSY").unwrap();
        assert_eq!(again.total, before);
        assert_eq!(again.records_seen, 1);
        assert_eq!(ctx.record_count("alice", "BUSY").unwrap(), 1);
    }

    #[test]
    fn test_zero_sum_leaves_no_record() {
        let config = LedgerConfig::default();
        let mut store = MemoryStore::new();
        let mut ctx = LedgerContext::new(&config, &mut store);

        ctx.put_delta("alice", "BUSY", "bob", &Amount::from(5u64)).unwrap();
        ctx.put_delta("alice", "BUSY", "carol", &Amount::from(-5i64)).unwrap();
        let outcome = ctx.prune("alice", "BUSY").unwrap();
        assert!(outcome.total.is_zero());
        assert_eq!(ctx.record_count("alice", "BUSY").unwrap(), 0);

        let empty = ctx.prune("nobody", "BUSY").unwrap();
        assert!(empty.total.is_zero());
        assert_eq!(empty.records_seen, 0);
    }

    #[test]
    fn test_self_authored_records_fold_into_canonical() {
        let config = LedgerConfig::default();
        let mut store = MemoryStore::new();
        let mut ctx = LedgerContext::new(&config, &mut store);

        ctx.put_delta("alice", "BUSY", "bob", &Amount::from(20u64)).unwrap();
        ctx.prune("alice", "BUSY").unwrap();
        // change returned to self, twice
        ctx.put_delta("alice", "BUSY", "alice", &Amount::from(-5i64)).unwrap();
        ctx.put_delta("alice", "BUSY", "alice", &Amount::from(2u64)).unwrap();
        assert_eq!(ctx.record_count("alice", "BUSY").unwrap(), 3);
        assert_eq!(ctx.balance("alice", "BUSY").unwrap(), Amount::from(17u64));

        let outcome = ctx.prune("alice", "BUSY").unwrap();
        assert_eq!(outcome.total, Amount::from(17u64));
        assert_eq!(ctx.record_count("alice", "BUSY").unwrap(), 1);

        // canonical record that sums to zero is removed as well
        ctx.put_delta("alice", "BUSY", "carol", &Amount::from(-17i64)).unwrap();
        ctx.prune("alice", "BUSY").unwrap();
        assert_eq!(ctx.record_count("alice", "BUSY").unwrap(), 0);
    }

    #[test]
    fn test_prune_null_scope_rejected() {
        let config = LedgerConfig::default();
        let mut store = MemoryStore::new();
        let mut ctx = LedgerContext::new(&config, &mut store);
        assert!(matches!(ctx.prune("0x", "BUSY"), Err(LedgerError::InvalidScope(_))));
    }
}
