//! In-memory adapter.
//!
//! A `BTreeMap` behind a read-write lock, for tests and ephemeral
//! keyspaces. Ordering matches the on-disk backends (lexicographic on raw
//! bytes). Batches apply under a single lock hold and snapshots clone the
//! map; there is nothing on disk, so destroy and repair are not attached.

use std::any::Any;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::backend::{BackendKind, NormalizedBackend, QueuedWrite};
use crate::error::{SublevelError, SublevelResult};
use crate::traits::backend::{
    BackendRead, BackendWrite, BatchSupport, BatchWriter, RawEntries, SnapshotSupport,
};

type Map = BTreeMap<Vec<u8>, Vec<u8>>;
type Shared = Arc<RwLock<Map>>;

/// Byte-level in-memory store.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    map: Shared,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_lock(&self) -> SublevelResult<RwLockReadGuard<'_, Map>> {
        self.map
            .read()
            .map_err(|_| SublevelError::Other("memory backend lock poisoned".into()))
    }

    fn write_lock(&self) -> SublevelResult<RwLockWriteGuard<'_, Map>> {
        self.map
            .write()
            .map_err(|_| SublevelError::Other("memory backend lock poisoned".into()))
    }
}

fn collect_range(map: &Map, lower: Option<&[u8]>, upper: Option<&[u8]>) -> RawEntries {
    let lower = match lower {
        Some(key) => Bound::Included(key.to_vec()),
        None => Bound::Unbounded,
    };
    let upper = match upper {
        Some(key) => Bound::Excluded(key.to_vec()),
        None => Bound::Unbounded,
    };
    // Entries are copied out so the iterator does not hold the lock.
    let entries: Vec<(Vec<u8>, Vec<u8>)> = map
        .range::<Vec<u8>, _>((lower, upper))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Box::new(entries.into_iter().map(Ok))
}

impl BackendRead for MemoryBackend {
    fn get(&self, key: &[u8]) -> SublevelResult<Option<Vec<u8>>> {
        Ok(self.read_lock()?.get(key).cloned())
    }

    fn range(&self, lower: Option<&[u8]>, upper: Option<&[u8]>) -> SublevelResult<RawEntries> {
        let guard = self.read_lock()?;
        Ok(collect_range(&guard, lower, upper))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BackendWrite for MemoryBackend {
    fn put(&self, key: &[u8], value: &[u8]) -> SublevelResult<()> {
        self.write_lock()?.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> SublevelResult<()> {
        self.write_lock()?.remove(key);
        Ok(())
    }
}

/// Batch writer applying every queued operation under one lock hold.
struct MemoryBatch {
    backend: MemoryBackend,
    ops: Vec<QueuedWrite>,
}

impl BatchWriter for MemoryBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(QueuedWrite::Put(key.to_vec(), value.to_vec()));
    }

    fn delete(&mut self, key: &[u8]) {
        self.ops.push(QueuedWrite::Delete(key.to_vec()));
    }

    fn commit(self: Box<Self>) -> SublevelResult<()> {
        let mut map = self.backend.write_lock()?;
        for op in self.ops {
            match op {
                QueuedWrite::Put(key, value) => {
                    map.insert(key, value);
                }
                QueuedWrite::Delete(key) => {
                    map.remove(&key);
                }
            }
        }
        Ok(())
    }
}

impl BatchSupport for MemoryBackend {
    fn batch(&self) -> SublevelResult<Box<dyn BatchWriter>> {
        Ok(Box::new(MemoryBatch {
            backend: self.clone(),
            ops: Vec::new(),
        }))
    }
}

/// Reader over a cloned, frozen copy of the map.
struct MemorySnapshot {
    map: Map,
}

impl BackendRead for MemorySnapshot {
    fn get(&self, key: &[u8]) -> SublevelResult<Option<Vec<u8>>> {
        Ok(self.map.get(key).cloned())
    }

    fn range(&self, lower: Option<&[u8]>, upper: Option<&[u8]>) -> SublevelResult<RawEntries> {
        Ok(collect_range(&self.map, lower, upper))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl SnapshotSupport for MemoryBackend {
    fn snapshot(&self) -> SublevelResult<Box<dyn BackendRead>> {
        Ok(Box::new(MemorySnapshot {
            map: self.read_lock()?.clone(),
        }))
    }
}

pub(crate) fn attach(wrapper: &mut NormalizedBackend) -> SublevelResult<()> {
    let backend = wrapper
        .reader_any()
        .downcast_ref::<MemoryBackend>()
        .ok_or_else(|| SublevelError::Normalization {
            kind: BackendKind::Memory,
            reason: "wrapped instance is not a memory store".into(),
        })?
        .clone();
    wrapper.attach_batches(Arc::new(backend.clone()));
    wrapper.attach_snapshots(Arc::new(backend));
    log::debug!("normalize: attached memory batch and snapshot support");
    Ok(())
}
