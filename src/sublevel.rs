//! Writable namespace handles built on the same key transform as [`View`].
//!
//! A [`Sublevel`] scopes writes to one namespace the exact way a view scopes
//! reads: every key goes through the shared [`Keyspace`] unchanged. Reads
//! delegate to an equivalent [`View`], so the two surfaces cannot drift.

use std::sync::Arc;

use crate::backend::NormalizedBackend;
use crate::encoding::{Value, ValueEncoding};
use crate::error::SublevelResult;
use crate::keyspace::Keyspace;
use crate::query::{Entries, KeyList, Slice};
use crate::traits::backend::BatchWriter;
use crate::view::{RangeIter, ScopedIter, View};

/// Read-write handle scoped to one namespace.
#[derive(Clone)]
pub struct Sublevel {
    backend: Arc<NormalizedBackend>,
    keyspace: Keyspace,
    encoding: ValueEncoding,
}

impl Sublevel {
    pub(crate) fn new(
        backend: Arc<NormalizedBackend>,
        keyspace: Keyspace,
        encoding: ValueEncoding,
    ) -> Self {
        Self {
            backend,
            keyspace,
            encoding,
        }
    }

    pub fn keyspace(&self) -> &Keyspace {
        &self.keyspace
    }

    pub fn encoding(&self) -> ValueEncoding {
        self.encoding
    }

    /// The read-only view of this namespace.
    pub fn as_view(&self) -> View {
        View::new(self.backend.reader(), self.keyspace.clone(), self.encoding)
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> SublevelResult<Value> {
        self.as_view().get(key)
    }

    pub fn contains(&self, key: impl AsRef<[u8]>) -> SublevelResult<bool> {
        self.as_view().contains(key)
    }

    pub fn slice(&self, slice: Slice) -> SublevelResult<RangeIter> {
        self.as_view().slice(slice)
    }

    pub fn get_many(&self, keys: impl Into<KeyList>) -> SublevelResult<Entries> {
        self.as_view().get_many(keys)
    }

    pub fn entries(&self) -> SublevelResult<ScopedIter> {
        self.as_view().entries()
    }

    /// Store a value under a logical key.
    pub fn put(&self, key: impl AsRef<[u8]>, value: impl Into<Value>) -> SublevelResult<()> {
        let raw = self.encoding.encode(&value.into())?;
        self.backend
            .writer()
            .put(&self.keyspace.subkey(key.as_ref()), &raw)
    }

    /// Remove a logical key.
    pub fn delete(&self, key: impl AsRef<[u8]>) -> SublevelResult<()> {
        self.backend
            .writer()
            .delete(&self.keyspace.subkey(key.as_ref()))
    }

    /// Derive the writable handle of a child namespace.
    pub fn sublevel(&self, segment: impl AsRef<[u8]>) -> Sublevel {
        Sublevel {
            backend: self.backend.clone(),
            keyspace: self.keyspace.child(segment.as_ref()),
            encoding: self.encoding,
        }
    }

    /// Same handle with a different delimiter.
    pub fn with_delimiter(mut self, delimiter: impl Into<Vec<u8>>) -> Sublevel {
        self.keyspace = self.keyspace.with_delimiter(delimiter);
        self
    }

    /// Same handle with a different value encoding.
    pub fn with_encoding(mut self, encoding: ValueEncoding) -> Sublevel {
        self.encoding = encoding;
        self
    }

    /// Start an atomic batch scoped to this namespace.
    ///
    /// Fails with `CapabilityMissing` when the backend has no batch support.
    pub fn batch(&self) -> SublevelResult<SublevelBatch> {
        Ok(SublevelBatch {
            inner: self.backend.batch()?,
            keyspace: self.keyspace.clone(),
            encoding: self.encoding,
        })
    }
}

/// Namespace-scoped batch: queued keys are translated through the key
/// transform and applied atomically on [`SublevelBatch::commit`].
///
/// Dropping an uncommitted batch writes nothing.
pub struct SublevelBatch {
    inner: Box<dyn BatchWriter>,
    keyspace: Keyspace,
    encoding: ValueEncoding,
}

impl SublevelBatch {
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: impl Into<Value>) -> SublevelResult<()> {
        let raw = self.encoding.encode(&value.into())?;
        self.inner.put(&self.keyspace.subkey(key.as_ref()), &raw);
        Ok(())
    }

    pub fn delete(&mut self, key: impl AsRef<[u8]>) {
        self.inner.delete(&self.keyspace.subkey(key.as_ref()));
    }

    pub fn commit(self) -> SublevelResult<()> {
        self.inner.commit()
    }
}
