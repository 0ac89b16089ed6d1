//! Write overlay for a single ledger invocation.
//!
//! Writes are buffered in memory and only reach the base store when the
//! owning invocation commits. Reads and scans see the buffered writes first.

use std::collections::BTreeMap;

use super::{KvStore, PrefixScan, StoreResult, WriteOp};

pub struct WorkingSet<'a, S: KvStore> {
    base: &'a S,
    // None marks a pending delete
    pending: BTreeMap<String, Option<Vec<u8>>>,
}

impl<'a, S: KvStore> WorkingSet<'a, S> {
    pub fn new(base: &'a S) -> Self {
        Self {
            base,
            pending: BTreeMap::new(),
        }
    }

    /// Consume the overlay into the batch to apply on commit.
    pub fn into_ops(self) -> Vec<WriteOp> {
        self.pending
            .into_iter()
            .map(|(key, value)| match value {
                Some(v) => WriteOp::Put(key, v),
                None => WriteOp::Delete(key),
            })
            .collect()
    }
}

impl<S: KvStore> KvStore for WorkingSet<'_, S> {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        match self.pending.get(key) {
            Some(value) => Ok(value.clone()),
            None => self.base.get(key),
        }
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.pending.insert(key.to_string(), Some(value));
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.pending.insert(key.to_string(), None);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> StoreResult<PrefixScan<'_>> {
        let mut merged: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        for item in self.base.scan_prefix(prefix)? {
            let (key, value) = item?;
            merged.insert(key, value);
        }
        let overlay = self
            .pending
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix));
        for (key, value) in overlay {
            match value {
                Some(v) => {
                    merged.insert(key.clone(), v.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }
        Ok(PrefixScan::new(merged.into_iter().map(Ok)))
    }

    fn apply_batch(&mut self, ops: Vec<WriteOp>) -> StoreResult<()> {
        for op in ops {
            match op {
                WriteOp::Put(key, value) => {
                    self.pending.insert(key, Some(value));
                }
                WriteOp::Delete(key) => {
                    self.pending.insert(key, None);
                }
            }
        }
        Ok(())
    }
}
