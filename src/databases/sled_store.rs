//! Sled adapter.
//!
//! Wraps `sled::Db` behind the backend capability traits. Sled ranges are
//! natively lazy and `sled::Batch` gives atomic batches; there is no
//! snapshot or repair API, so those capabilities are not attached.

use std::any::Any;
use std::ops::Bound;
use std::path::Path;
use std::sync::Arc;

use crate::backend::{BackendKind, NormalizedBackend};
use crate::config::OpenConfig;
use crate::error::{SublevelError, SublevelResult};
use crate::traits::backend::{BackendRead, BackendWrite, BatchSupport, BatchWriter, RawEntries};

/// Byte-level wrapper around `sled::Db`.
pub struct SledBackend {
    db: sled::Db,
}

impl SledBackend {
    /// Open (creating if missing) a sled database at the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> SublevelResult<Self> {
        Ok(Self {
            db: sled::open(path)?,
        })
    }

    /// Create a temporary, deleted-on-drop database (useful for testing).
    pub fn temp() -> SublevelResult<Self> {
        let config = sled::Config::new().temporary(true);
        Ok(Self {
            db: config.open()?,
        })
    }

    /// Open with explicit options. Sled always creates missing databases;
    /// `create_if_missing` has no effect here.
    pub fn with_config(config: &OpenConfig) -> SublevelResult<Self> {
        let cache_bytes = (config.cache_size_mb as u64) * 1024 * 1024;
        let db = sled::Config::new()
            .path(&config.path)
            .cache_capacity(cache_bytes)
            .temporary(config.temporary)
            .open()?;
        Ok(Self { db })
    }

    /// Direct access to the underlying sled database.
    pub fn db(&self) -> &sled::Db {
        &self.db
    }
}

impl BackendRead for SledBackend {
    fn get(&self, key: &[u8]) -> SublevelResult<Option<Vec<u8>>> {
        Ok(self.db.get(key)?.map(|ivec| ivec.to_vec()))
    }

    fn range(&self, lower: Option<&[u8]>, upper: Option<&[u8]>) -> SublevelResult<RawEntries> {
        let lower = match lower {
            Some(key) => Bound::Included(key.to_vec()),
            None => Bound::Unbounded,
        };
        let upper = match upper {
            Some(key) => Bound::Excluded(key.to_vec()),
            None => Bound::Unbounded,
        };
        let iter = self
            .db
            .range::<Vec<u8>, _>((lower, upper))
            .map(|entry| -> SublevelResult<(Vec<u8>, Vec<u8>)> {
                let (key, value) = entry?;
                Ok((key.to_vec(), value.to_vec()))
            });
        Ok(Box::new(iter))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BackendWrite for SledBackend {
    fn put(&self, key: &[u8], value: &[u8]) -> SublevelResult<()> {
        self.db.insert(key, value)?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> SublevelResult<()> {
        self.db.remove(key)?;
        Ok(())
    }
}

/// Atomic batch writer backed by `sled::Batch`.
struct SledBatch {
    db: sled::Db,
    batch: sled::Batch,
}

impl BatchWriter for SledBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.batch.insert(key, value);
    }

    fn delete(&mut self, key: &[u8]) {
        self.batch.remove(key);
    }

    fn commit(self: Box<Self>) -> SublevelResult<()> {
        self.db.apply_batch(self.batch)?;
        Ok(())
    }
}

struct SledBatchSupport {
    db: sled::Db,
}

impl BatchSupport for SledBatchSupport {
    fn batch(&self) -> SublevelResult<Box<dyn BatchWriter>> {
        Ok(Box::new(SledBatch {
            db: self.db.clone(),
            batch: sled::Batch::default(),
        }))
    }
}

/// Remove a sled database directory.
pub fn destroy(path: &Path) -> SublevelResult<()> {
    std::fs::remove_dir_all(path)?;
    Ok(())
}

pub(crate) fn attach(wrapper: &mut NormalizedBackend) -> SublevelResult<()> {
    let db = wrapper
        .reader_any()
        .downcast_ref::<SledBackend>()
        .ok_or_else(|| SublevelError::Normalization {
            kind: BackendKind::Sled,
            reason: "wrapped instance is not a sled database".into(),
        })?
        .db()
        .clone();
    wrapper.attach_batches(Arc::new(SledBatchSupport { db }));
    wrapper.attach_destroy(destroy);
    log::debug!("normalize: attached sled batch and destroy support");
    Ok(())
}
