//! Byte-keyed contract storage with overlay semantics.
//!
//! During execution every contract call runs against a [`StorageOverlay`]:
//! reads fall through to a snapshot of committed state, writes buffer in
//! the overlay. The chain merges the write set on success and discards it
//! otherwise, which is what makes transaction rollback atomic.

use std::collections::BTreeMap;

/// Write set produced by one contract call.
pub type WriteSet = BTreeMap<Vec<u8>, Vec<u8>>;

/// Storage handle a contract sees during execution.
pub trait ContractStorage: Send {
    /// Read a value, preferring uncommitted writes from this call.
    fn get(&self, key: &[u8]) -> Option<Vec<u8>>;

    /// Buffer a write. Visible to subsequent reads within the same call.
    fn put(&mut self, key: Vec<u8>, value: Vec<u8>);

    /// Whether this call has buffered any writes.
    fn is_dirty(&self) -> bool;
}

/// Write-buffering storage over a snapshot of committed contract state.
#[derive(Debug, Default)]
pub struct StorageOverlay {
    base: BTreeMap<Vec<u8>, Vec<u8>>,
    writes: WriteSet,
}

impl StorageOverlay {
    /// Overlay over a snapshot of committed state.
    pub fn new(base: BTreeMap<Vec<u8>, Vec<u8>>) -> Self {
        Self {
            base,
            writes: WriteSet::new(),
        }
    }

    /// Overlay over empty state, for fresh contracts and unit tests.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Consume the overlay and return its buffered writes.
    pub fn into_writes(self) -> WriteSet {
        self.writes
    }
}

impl ContractStorage for StorageOverlay {
    fn get(&self, key: &[u8]) -> Option<Vec<u8>> {
        self.writes
            .get(key)
            .or_else(|| self.base.get(key))
            .cloned()
    }

    fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.writes.insert(key, value);
    }

    fn is_dirty(&self) -> bool {
        !self.writes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_prefer_overlay_writes() {
        let mut base = BTreeMap::new();
        base.insert(b"k".to_vec(), b"old".to_vec());

        let mut overlay = StorageOverlay::new(base);
        assert_eq!(overlay.get(b"k"), Some(b"old".to_vec()));

        overlay.put(b"k".to_vec(), b"new".to_vec());
        assert_eq!(overlay.get(b"k"), Some(b"new".to_vec()));
    }

    #[test]
    fn test_base_is_never_mutated() {
        let mut base = BTreeMap::new();
        base.insert(b"k".to_vec(), b"old".to_vec());

        let mut overlay = StorageOverlay::new(base.clone());
        overlay.put(b"k".to_vec(), b"new".to_vec());
        overlay.put(b"other".to_vec(), b"v".to_vec());

        let writes = overlay.into_writes();
        assert_eq!(writes.len(), 2);
        // Original snapshot untouched
        assert_eq!(base.get(b"k".as_slice()), Some(&b"old".to_vec()));
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut overlay = StorageOverlay::empty();
        assert!(!overlay.is_dirty());
        assert_eq!(overlay.get(b"missing"), None);

        overlay.put(b"k".to_vec(), vec![1]);
        assert!(overlay.is_dirty());
    }
}
