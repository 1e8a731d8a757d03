//! Unified store interface providing a single entry point for all storage
//! backends.
//!
//! `SublevelStore` constructs a concrete backend, runs it through the
//! normalizer, and hands out [`View`]s and [`Sublevel`]s over the shared
//! handle. Backend-specific functionality stays reachable through the
//! normalized capability surface (`batch`, `snapshot`, `destroy`, `repair`).
//!
//! # Examples
//!
//! ```ignore
//! use sublevel_store::SublevelStore;
//!
//! // Sled-backed store
//! let store = SublevelStore::sled("./data")?;
//! let users = store.sublevel("users");
//! users.put("42", "alice")?;
//!
//! // Read through a derived view: backend key is `users!42`
//! assert_eq!(store.view().subview("users").get("42")?.as_text(), Some("alice"));
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::backend::{normalize, BackendKind, NormalizedBackend};
use crate::encoding::ValueEncoding;
use crate::error::SublevelResult;
use crate::keyspace::Keyspace;
use crate::sublevel::{Sublevel, SublevelBatch};
use crate::traits::backend::{BackendRead, BackendWrite};
use crate::view::View;

#[cfg(any(feature = "sled", feature = "redb"))]
use crate::config::OpenConfig;

/// Unified, normalized store over one concrete backend.
pub struct SublevelStore {
    inner: Arc<NormalizedBackend>,
}

impl SublevelStore {
    /// Wrap and normalize an existing backend instance.
    ///
    /// This is the construction path for caller-provided backends: pass
    /// `BackendKind::Custom` for a type no normalizer knows, and the wrapper
    /// passes through with no optional capabilities attached.
    pub fn from_backend<B>(backend: B, kind: BackendKind) -> SublevelResult<Self>
    where
        B: BackendRead + BackendWrite + 'static,
    {
        let mut wrapper = NormalizedBackend::new(backend, kind);
        normalize(&mut wrapper)?;
        Ok(Self {
            inner: Arc::new(wrapper),
        })
    }

    /// Create a new Sled-backed store at the given path.
    #[cfg(feature = "sled")]
    pub fn sled<P: AsRef<Path>>(path: P) -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::sled_store::SledBackend::new(path)?,
            BackendKind::Sled,
        )
    }

    /// Create a temporary Sled-backed store, deleted when dropped.
    #[cfg(feature = "sled")]
    pub fn sled_temp() -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::sled_store::SledBackend::temp()?,
            BackendKind::Sled,
        )
    }

    /// Create a Sled-backed store with explicit open options.
    #[cfg(feature = "sled")]
    pub fn sled_with(config: &OpenConfig) -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::sled_store::SledBackend::with_config(config)?,
            BackendKind::Sled,
        )
    }

    /// Create a new Redb-backed store at the given path.
    #[cfg(feature = "redb")]
    pub fn redb<P: AsRef<Path>>(path: P) -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::redb_store::RedbBackend::create(path)?,
            BackendKind::Redb,
        )
    }

    /// Open an existing Redb-backed store at the given path.
    #[cfg(feature = "redb")]
    pub fn redb_open<P: AsRef<Path>>(path: P) -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::redb_store::RedbBackend::open(path)?,
            BackendKind::Redb,
        )
    }

    /// Create a Redb-backed store with explicit open options.
    #[cfg(feature = "redb")]
    pub fn redb_with(config: &OpenConfig) -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::redb_store::RedbBackend::with_config(config)?,
            BackendKind::Redb,
        )
    }

    /// Create an in-memory store (useful for testing).
    #[cfg(feature = "memory")]
    pub fn memory() -> SublevelResult<Self> {
        Self::from_backend(
            crate::databases::memory_store::MemoryBackend::new(),
            BackendKind::Memory,
        )
    }

    pub fn kind(&self) -> BackendKind {
        self.inner.kind()
    }

    /// The normalized capability surface.
    pub fn backend(&self) -> &NormalizedBackend {
        &self.inner
    }

    /// Read-only view of the root namespace (delimiter `!`, UTF-8 values).
    pub fn view(&self) -> View {
        View::new(
            self.inner.reader(),
            Keyspace::root(),
            ValueEncoding::default(),
        )
    }

    /// Root view with an explicit delimiter and encoding.
    pub fn view_with(&self, delimiter: impl Into<Vec<u8>>, encoding: ValueEncoding) -> View {
        View::new(
            self.inner.reader(),
            Keyspace::root().with_delimiter(delimiter),
            encoding,
        )
    }

    /// Writable handle on the root namespace.
    pub fn root(&self) -> Sublevel {
        Sublevel::new(
            self.inner.clone(),
            Keyspace::root(),
            ValueEncoding::default(),
        )
    }

    /// Writable handle on a child namespace of the root.
    pub fn sublevel(&self, segment: impl AsRef<[u8]>) -> Sublevel {
        self.root().sublevel(segment)
    }

    /// Atomic batch on the root namespace.
    pub fn batch(&self) -> SublevelResult<SublevelBatch> {
        self.root().batch()
    }

    /// Read-only root view pinned to a point-in-time snapshot.
    ///
    /// Fails with `CapabilityMissing` when the backend has no snapshot
    /// support.
    pub fn snapshot(&self) -> SublevelResult<View> {
        let reader: Arc<dyn BackendRead> = Arc::from(self.inner.snapshot()?);
        Ok(View::new(reader, Keyspace::root(), ValueEncoding::default()))
    }

    /// Remove the on-disk artifacts of a database at `path` using this
    /// backend's destroy procedure. Intended for databases that are not
    /// currently open.
    pub fn destroy<P: AsRef<Path>>(&self, path: P) -> SublevelResult<()> {
        self.inner.destroy(path.as_ref())
    }

    /// Run this backend's repair procedure on the database at `path`.
    pub fn repair<P: AsRef<Path>>(&self, path: P) -> SublevelResult<()> {
        self.inner.repair(path.as_ref())
    }
}
