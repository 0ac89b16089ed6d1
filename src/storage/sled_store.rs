use std::path::Path;

use super::{KvPair, KvStore, PrefixScan, StoreError, StoreResult, WriteOp};

/// Persistent store on top of a sled database.
pub struct SledStore {
    db: sled::Db,
}

impl SledStore {
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let db = sled::open(path)?;
        Ok(SledStore { db })
    }

    /// Throwaway database removed on drop.
    pub fn temporary() -> StoreResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        Ok(SledStore { db })
    }

    pub fn flush(&self) -> StoreResult<()> {
        self.db.flush()?;
        Ok(())
    }
}

fn decode_key(raw: &[u8]) -> StoreResult<String> {
    String::from_utf8(raw.to_vec()).map_err(|e| StoreError::Corrupt(format!("non UTF-8 key: {}", e)))
}

impl KvStore for SledStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.db.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()> {
        self.db.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.db.remove(key.as_bytes())?;
        Ok(())
    }

    fn scan_prefix(&self, prefix: &str) -> StoreResult<PrefixScan<'_>> {
        let iter = self
            .db
            .scan_prefix(prefix.as_bytes())
            .map(|item| -> StoreResult<KvPair> {
                let (k, v) = item?;
                Ok((decode_key(&k)?, v.to_vec()))
            });
        Ok(PrefixScan::new(iter))
    }

    fn apply_batch(&mut self, ops: Vec<WriteOp>) -> StoreResult<()> {
        let mut batch = sled::Batch::default();
        for op in ops {
            match op {
                WriteOp::Put(key, value) => batch.insert(key.as_bytes(), value),
                WriteOp::Delete(key) => batch.remove(key.as_bytes()),
            }
        }
        self.db.apply_batch(batch)?;
        self.flush()
    }
}
