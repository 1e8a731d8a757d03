//! Backend normalization: one capability surface over heterogeneous stores.
//!
//! Every backend is wrapped in a [`NormalizedBackend`] carrying the core
//! read/write handle plus optional capability slots (batched writes,
//! snapshots, destroy, repair). [`normalize`] fills those slots from a fixed
//! mapping keyed by [`BackendKind`], so callers see a uniform surface
//! regardless of which store is underneath.
//!
//! The kind tag is an explicit construction-time choice, not runtime
//! introspection. An unmatched kind (`Custom`) passes through with no
//! capabilities attached; that is deliberate, not an error. A kind whose
//! adapter is not compiled in, or whose wrapped instance turns out not to be
//! that backend, is a fatal configuration error.

use std::any::Any;
use std::path::Path;
use std::sync::Arc;

use crate::error::{SublevelError, SublevelResult};
use crate::traits::backend::{
    Backend, BackendRead, BackendWrite, BatchSupport, BatchWriter, SnapshotSupport,
};

/// Path-level maintenance procedure attached per backend kind.
pub type MaintenanceFn = fn(&Path) -> SublevelResult<()>;

/// Construction-time tag naming the concrete backend implementation.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    Sled,
    Redb,
    Memory,
    /// A caller-provided backend no normalizer matches.
    Custom,
}

impl BackendKind {
    /// Kinds whose adapters are compiled into this build.
    pub fn available() -> Vec<BackendKind> {
        use strum::IntoEnumIterator;
        Self::iter().filter(BackendKind::is_available).collect()
    }

    pub fn is_available(&self) -> bool {
        match self {
            BackendKind::Sled => cfg!(feature = "sled"),
            BackendKind::Redb => cfg!(feature = "redb"),
            BackendKind::Memory => cfg!(feature = "memory"),
            BackendKind::Custom => true,
        }
    }
}

/// Write queued by a batch writer that applies operations at commit time.
#[cfg_attr(not(any(feature = "redb", feature = "memory")), allow(dead_code))]
pub(crate) enum QueuedWrite {
    Put(Vec<u8>, Vec<u8>),
    Delete(Vec<u8>),
}

/// A backend instance behind the uniform capability surface.
///
/// The core handle is always present; the optional slots start empty and are
/// populated in place by [`normalize`]. Invoking an unattached capability
/// yields [`SublevelError::CapabilityMissing`], never a panic.
pub struct NormalizedBackend {
    kind: BackendKind,
    reader: Arc<dyn BackendRead>,
    writer: Arc<dyn Backend>,
    batches: Option<Arc<dyn BatchSupport>>,
    snapshots: Option<Arc<dyn SnapshotSupport>>,
    destroy: Option<MaintenanceFn>,
    repair: Option<MaintenanceFn>,
}

impl NormalizedBackend {
    /// Wrap a backend instance with no optional capabilities attached.
    pub fn new<B>(backend: B, kind: BackendKind) -> Self
    where
        B: BackendRead + BackendWrite + 'static,
    {
        let backend = Arc::new(backend);
        Self {
            kind,
            reader: backend.clone(),
            writer: backend,
            batches: None,
            snapshots: None,
            destroy: None,
            repair: None,
        }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Shared read handle, for building views.
    pub fn reader(&self) -> Arc<dyn BackendRead> {
        self.reader.clone()
    }

    /// Core write surface.
    pub fn writer(&self) -> &dyn Backend {
        self.writer.as_ref()
    }

    pub(crate) fn reader_any(&self) -> &dyn Any {
        self.reader.as_any()
    }

    /// Start an atomic batch, if the backend supports one.
    pub fn batch(&self) -> SublevelResult<Box<dyn BatchWriter>> {
        match &self.batches {
            Some(support) => support.batch(),
            None => Err(SublevelError::CapabilityMissing { capability: "batch" }),
        }
    }

    /// Take a point-in-time snapshot, if the backend supports one.
    pub fn snapshot(&self) -> SublevelResult<Box<dyn BackendRead>> {
        match &self.snapshots {
            Some(support) => support.snapshot(),
            None => Err(SublevelError::CapabilityMissing {
                capability: "snapshot",
            }),
        }
    }

    /// Remove the on-disk artifacts of a database at `path`.
    ///
    /// Intended for databases that are not currently open.
    pub fn destroy(&self, path: &Path) -> SublevelResult<()> {
        match self.destroy {
            Some(destroy) => destroy(path),
            None => Err(SublevelError::CapabilityMissing {
                capability: "destroy",
            }),
        }
    }

    /// Run the backend's recovery procedure on the database at `path`.
    pub fn repair(&self, path: &Path) -> SublevelResult<()> {
        match self.repair {
            Some(repair) => repair(path),
            None => Err(SublevelError::CapabilityMissing {
                capability: "repair",
            }),
        }
    }

    pub fn has_batches(&self) -> bool {
        self.batches.is_some()
    }

    pub fn has_snapshots(&self) -> bool {
        self.snapshots.is_some()
    }

    pub(crate) fn attach_batches(&mut self, support: Arc<dyn BatchSupport>) {
        self.batches = Some(support);
    }

    pub(crate) fn attach_snapshots(&mut self, support: Arc<dyn SnapshotSupport>) {
        self.snapshots = Some(support);
    }

    pub(crate) fn attach_destroy(&mut self, destroy: MaintenanceFn) {
        self.destroy = Some(destroy);
    }

    pub(crate) fn attach_repair(&mut self, repair: MaintenanceFn) {
        self.repair = Some(repair);
    }
}

/// Attach the optional capabilities the wrapped backend's library provides.
///
/// Looks the wrapper's kind up in a fixed mapping and runs that backend's
/// attach procedure, mutating the wrapper in place. `Custom` matches no
/// procedure and is left as-is.
pub fn normalize(wrapper: &mut NormalizedBackend) -> SublevelResult<()> {
    log::debug!("normalize: backend kind `{}`", wrapper.kind);
    match wrapper.kind {
        #[cfg(feature = "sled")]
        BackendKind::Sled => crate::databases::sled_store::attach(wrapper),
        #[cfg(not(feature = "sled"))]
        BackendKind::Sled => Err(SublevelError::BackendUnavailable {
            kind: BackendKind::Sled,
        }),

        #[cfg(feature = "redb")]
        BackendKind::Redb => crate::databases::redb_store::attach(wrapper),
        #[cfg(not(feature = "redb"))]
        BackendKind::Redb => Err(SublevelError::BackendUnavailable {
            kind: BackendKind::Redb,
        }),

        #[cfg(feature = "memory")]
        BackendKind::Memory => crate::databases::memory_store::attach(wrapper),
        #[cfg(not(feature = "memory"))]
        BackendKind::Memory => Err(SublevelError::BackendUnavailable {
            kind: BackendKind::Memory,
        }),

        BackendKind::Custom => {
            log::debug!("normalize: no procedure for custom backend, leaving capabilities unset");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn kind_names_round_trip() {
        assert_eq!(BackendKind::Sled.to_string(), "sled");
        assert_eq!(BackendKind::from_str("redb").unwrap(), BackendKind::Redb);
        assert!(BackendKind::from_str("leveldb").is_err());
    }

    #[test]
    fn custom_kind_is_always_available() {
        assert!(BackendKind::Custom.is_available());
        assert!(BackendKind::available().contains(&BackendKind::Custom));
    }
}
