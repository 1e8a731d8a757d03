//! Core capability traits every ordered key-value backend is adapted to.
//!
//! These traits operate purely on already-qualified backend keys; namespace
//! translation happens one layer up, in the view. The read and write halves
//! are split so snapshots and read-only handles can be typed as such, with a
//! blanket combined trait for full backends.

use std::any::Any;

use crate::error::SublevelResult;

/// Lazy stream of raw `(key, value)` pairs from a backend range scan.
///
/// Dropping the iterator releases any backend-side cursor or transaction,
/// including on early termination.
pub type RawEntries = Box<dyn Iterator<Item = SublevelResult<(Vec<u8>, Vec<u8>)>> + Send>;

/// Point and range reads over raw backend keys.
pub trait BackendRead: Send + Sync {
    /// Point lookup. `Ok(None)` means the key is absent; that is not an
    /// error at this layer.
    fn get(&self, key: &[u8]) -> SublevelResult<Option<Vec<u8>>>;

    /// Forward range scan: `lower` inclusive, `upper` exclusive, `None`
    /// unbounded. Keys order lexicographically on raw bytes.
    fn range(&self, lower: Option<&[u8]>, upper: Option<&[u8]>) -> SublevelResult<RawEntries>;

    /// Concrete-type escape hatch used by the normalizer's attach procedures.
    fn as_any(&self) -> &dyn Any;
}

/// Point writes over raw backend keys.
pub trait BackendWrite: Send + Sync {
    fn put(&self, key: &[u8], value: &[u8]) -> SublevelResult<()>;

    fn delete(&self, key: &[u8]) -> SublevelResult<()>;
}

/// Combined read/write surface of a full backend.
pub trait Backend: BackendRead + BackendWrite {}
impl<T: BackendRead + BackendWrite> Backend for T {}

/// Accumulates writes to be applied atomically.
///
/// A dropped, uncommitted writer applies nothing.
pub trait BatchWriter: Send {
    fn put(&mut self, key: &[u8], value: &[u8]);

    fn delete(&mut self, key: &[u8]);

    /// Apply every queued operation atomically.
    fn commit(self: Box<Self>) -> SublevelResult<()>;
}

/// Optional capability: atomic batched writes.
pub trait BatchSupport: Send + Sync {
    fn batch(&self) -> SublevelResult<Box<dyn BatchWriter>>;
}

/// Optional capability: point-in-time read-only handles.
pub trait SnapshotSupport: Send + Sync {
    /// A reader pinned to the backend's state at the time of the call.
    fn snapshot(&self) -> SublevelResult<Box<dyn BackendRead>>;
}
