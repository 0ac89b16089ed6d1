use std::collections::BTreeMap;

use super::{KvStore, PrefixScan, StoreResult, WriteOp};

/// Ordered in-memory store. Used by tests and as a scratch backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of physical entries under a prefix.
    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.entries
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .count()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> StoreResult<PrefixScan<'_>> {
        let prefix = prefix.to_string();
        let iter = self
            .entries
            .range(prefix.clone()..)
            .take_while(move |(k, _)| k.starts_with(prefix.as_str()))
            .map(|(k, v)| Ok((k.clone(), v.clone())));
        Ok(PrefixScan::new(iter))
    }

    fn apply_batch(&mut self, ops: Vec<WriteOp>) -> StoreResult<()> {
        for op in ops {
            match op {
                WriteOp::Put(key, value) => {
                    self.entries.insert(key, value);
                }
                WriteOp::Delete(key) => {
                    self.entries.remove(&key);
                }
            }
        }
        Ok(())
    }
}
