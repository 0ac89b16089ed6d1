//! Fault injection for store-failure tests.

use super::{KvStore, MemoryStore, PrefixScan, StoreError, StoreResult, WriteOp};

#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryStore,
    /// Yield an error instead of the n-th entry of every scan.
    pub fail_scan_at: Option<usize>,
    pub fail_commit: bool,
}

impl FaultyStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            fail_scan_at: None,
            fail_commit: false,
        }
    }
}

impl KvStore for FaultyStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        self.inner.get(key)
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.inner.put(key, value)
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.inner.delete(key)
    }

    fn scan_prefix(&self, prefix: &str) -> StoreResult<PrefixScan<'_>> {
        let fail_at = self.fail_scan_at;
        let iter = self.inner.scan_prefix(prefix)?.enumerate().map(move |(i, item)| {
            if Some(i) == fail_at {
                Err(StoreError::Backend("injected scan failure".to_string()))
            } else {
                item
            }
        });
        Ok(PrefixScan::new(iter))
    }

    fn apply_batch(&mut self, ops: Vec<WriteOp>) -> StoreResult<()> {
        if self.fail_commit {
            return Err(StoreError::Backend("injected commit failure".to_string()));
        }
        self.inner.apply_batch(ops)
    }
}
