//! Key-value store abstraction for ledger state.
//!
//! The ledger only ever needs point reads, point writes, deletes and ordered
//! prefix scans, plus one atomic batch apply used when an invocation commits.

pub mod memory;
pub mod sled_store;
pub mod working_set;

#[cfg(test)]
pub(crate) mod testing;

pub use memory::MemoryStore;
pub use sled_store::SledStore;
pub use working_set::WorkingSet;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("backend failure: {0}")]
    Backend(String),
    #[error("corrupt entry: {0}")]
    Corrupt(String),
}

impl From<sled::Error> for StoreError {
    fn from(err: sled::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

pub type KvPair = (String, Vec<u8>);

/// A single buffered mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOp {
    Put(String, Vec<u8>),
    Delete(String),
}

/// Ordered iterator over every entry under a prefix.
///
/// The scan borrows its store, so it is released when dropped, including on
/// early `?` returns out of a loop over it.
pub struct PrefixScan<'a> {
    inner: Box<dyn Iterator<Item = StoreResult<KvPair>> + 'a>,
}

impl<'a> PrefixScan<'a> {
    pub fn new<I>(iter: I) -> Self
    where
        I: Iterator<Item = StoreResult<KvPair>> + 'a,
    {
        Self { inner: Box::new(iter) }
    }
}

impl Iterator for PrefixScan<'_> {
    type Item = StoreResult<KvPair>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}

pub trait KvStore {
    fn get(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    fn put(&mut self, key: &str, value: Vec<u8>) -> StoreResult<()>;

    fn delete(&mut self, key: &str) -> StoreResult<()>;

    /// Entries whose key starts with `prefix`, in ascending key order.
    fn scan_prefix(&self, prefix: &str) -> StoreResult<PrefixScan<'_>>;

    /// Apply every op or none of them.
    fn apply_batch(&mut self, ops: Vec<WriteOp>) -> StoreResult<()>;
}
