//! Redb adapter.
//!
//! Wraps `redb::Database` with a single byte-keyed table behind the backend
//! capability traits. Read transactions are true point-in-time snapshots, so
//! the snapshot capability comes for free; batches map to one write
//! transaction; repair runs redb's integrity check.

use std::any::Any;
use std::ops::Bound;
use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadOnlyTable, ReadTransaction, ReadableDatabase, TableDefinition};

use crate::backend::{BackendKind, NormalizedBackend, QueuedWrite};
use crate::config::OpenConfig;
use crate::error::{SublevelError, SublevelResult};
use crate::traits::backend::{
    BackendRead, BackendWrite, BatchSupport, BatchWriter, RawEntries, SnapshotSupport,
};

const TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("sublevel");

/// Byte-level wrapper around `redb::Database`.
pub struct RedbBackend {
    db: Arc<Database>,
}

impl RedbBackend {
    /// Create a new database at the given path.
    pub fn create<P: AsRef<Path>>(path: P) -> SublevelResult<Self> {
        let db = Database::create(path)?;
        Self::with_db(db)
    }

    /// Open an existing database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> SublevelResult<Self> {
        let db = Database::open(path)?;
        Self::with_db(db)
    }

    /// Open with explicit options. `temporary` is not supported by redb and
    /// is ignored.
    pub fn with_config(config: &OpenConfig) -> SublevelResult<Self> {
        let mut builder = Database::builder();
        builder.set_cache_size(config.cache_size_mb * 1024 * 1024);
        let db = if config.create_if_missing {
            builder.create(&config.path)?
        } else {
            builder.open(&config.path)?
        };
        Self::with_db(db)
    }

    fn with_db(db: Database) -> SublevelResult<Self> {
        // The table must exist before the first read transaction opens it.
        let txn = db.begin_write()?;
        txn.open_table(TABLE)?;
        txn.commit()?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Direct access to the underlying redb database.
    pub fn db(&self) -> &Database {
        &self.db
    }
}

fn to_bounds<'a>(
    lower: Option<&'a [u8]>,
    upper: Option<&'a [u8]>,
) -> (Bound<&'a [u8]>, Bound<&'a [u8]>) {
    let lower = match lower {
        Some(key) => Bound::Included(key),
        None => Bound::Unbounded,
    };
    let upper = match upper {
        Some(key) => Bound::Excluded(key),
        None => Bound::Unbounded,
    };
    (lower, upper)
}

fn table_range(
    table: &ReadOnlyTable<&'static [u8], &'static [u8]>,
    lower: Option<&[u8]>,
    upper: Option<&[u8]>,
) -> SublevelResult<RawEntries> {
    let range = table.range::<&[u8]>(to_bounds(lower, upper))?;
    let iter = range.map(|entry| -> SublevelResult<(Vec<u8>, Vec<u8>)> {
        let (key, value) = entry?;
        Ok((key.value().to_vec(), value.value().to_vec()))
    });
    Ok(Box::new(iter))
}

impl BackendRead for RedbBackend {
    fn get(&self, key: &[u8]) -> SublevelResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE)?;
        Ok(table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn range(&self, lower: Option<&[u8]>, upper: Option<&[u8]>) -> SublevelResult<RawEntries> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE)?;
        table_range(&table, lower, upper)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl BackendWrite for RedbBackend {
    fn put(&self, key: &[u8], value: &[u8]) -> SublevelResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TABLE)?;
            table.insert(key, value)?;
        }
        txn.commit()?;
        Ok(())
    }

    fn delete(&self, key: &[u8]) -> SublevelResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TABLE)?;
            table.remove(key)?;
        }
        txn.commit()?;
        Ok(())
    }
}

/// Batch writer applying every queued operation in one write transaction.
struct RedbBatch {
    db: Arc<Database>,
    ops: Vec<QueuedWrite>,
}

impl BatchWriter for RedbBatch {
    fn put(&mut self, key: &[u8], value: &[u8]) {
        self.ops.push(QueuedWrite::Put(key.to_vec(), value.to_vec()));
    }

    fn delete(&mut self, key: &[u8]) {
        self.ops.push(QueuedWrite::Delete(key.to_vec()));
    }

    fn commit(self: Box<Self>) -> SublevelResult<()> {
        let txn = self.db.begin_write()?;
        {
            let mut table = txn.open_table(TABLE)?;
            for op in &self.ops {
                match op {
                    QueuedWrite::Put(key, value) => {
                        table.insert(key.as_slice(), value.as_slice())?;
                    }
                    QueuedWrite::Delete(key) => {
                        table.remove(key.as_slice())?;
                    }
                }
            }
        }
        txn.commit()?;
        Ok(())
    }
}

struct RedbBatchSupport {
    db: Arc<Database>,
}

impl BatchSupport for RedbBatchSupport {
    fn batch(&self) -> SublevelResult<Box<dyn BatchWriter>> {
        Ok(Box::new(RedbBatch {
            db: self.db.clone(),
            ops: Vec::new(),
        }))
    }
}

/// Reader pinned to one read transaction's point-in-time state.
struct RedbSnapshot {
    _txn: ReadTransaction,
    table: ReadOnlyTable<&'static [u8], &'static [u8]>,
}

impl BackendRead for RedbSnapshot {
    fn get(&self, key: &[u8]) -> SublevelResult<Option<Vec<u8>>> {
        Ok(self.table.get(key)?.map(|guard| guard.value().to_vec()))
    }

    fn range(&self, lower: Option<&[u8]>, upper: Option<&[u8]>) -> SublevelResult<RawEntries> {
        table_range(&self.table, lower, upper)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

struct RedbSnapshotSupport {
    db: Arc<Database>,
}

impl SnapshotSupport for RedbSnapshotSupport {
    fn snapshot(&self) -> SublevelResult<Box<dyn BackendRead>> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(TABLE)?;
        Ok(Box::new(RedbSnapshot { _txn: txn, table }))
    }
}

/// Remove a redb database file.
pub fn destroy(path: &Path) -> SublevelResult<()> {
    std::fs::remove_file(path)?;
    Ok(())
}

/// Open the database and run its integrity check, repairing if needed.
pub fn repair(path: &Path) -> SublevelResult<()> {
    let mut db = Database::open(path)?;
    db.check_integrity()?;
    Ok(())
}

pub(crate) fn attach(wrapper: &mut NormalizedBackend) -> SublevelResult<()> {
    let db = wrapper
        .reader_any()
        .downcast_ref::<RedbBackend>()
        .ok_or_else(|| SublevelError::Normalization {
            kind: BackendKind::Redb,
            reason: "wrapped instance is not a redb database".into(),
        })?
        .db
        .clone();
    wrapper.attach_batches(Arc::new(RedbBatchSupport { db: db.clone() }));
    wrapper.attach_snapshots(Arc::new(RedbSnapshotSupport { db }));
    wrapper.attach_destroy(destroy);
    wrapper.attach_repair(repair);
    log::debug!("normalize: attached redb batch, snapshot, destroy, and repair support");
    Ok(())
}
