//! Prelude module for convenient imports.
//!
//! Re-exports the most commonly used types, allowing users to get started
//! with a single import.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sublevel_store::prelude::*;
//! ```
//!
//! # What's Included
//!
//! ## Store and handles
//!
//! - [`SublevelStore`]: unified entry point over all backends
//! - [`View`]: read-only namespace handle
//! - [`Sublevel`] / [`SublevelBatch`]: writable counterpart and its batch
//!
//! ## Key space and values
//!
//! - [`Keyspace`]: prefix/delimiter key transform
//! - [`Value`] / [`ValueEncoding`]: decoded values and their codecs
//! - [`Slice`], [`KeyList`], [`ReadRequest`], [`Entries`]: request and
//!   result shapes
//!
//! ## Backend surface
//!
//! - [`BackendKind`], [`NormalizedBackend`], [`normalize`]
//! - [`BackendRead`], [`BackendWrite`], [`Backend`], [`BatchWriter`],
//!   [`BatchSupport`], [`SnapshotSupport`]
//!
//! ## Error Handling
//!
//! - [`SublevelError`]: error type for all operations
//! - [`SublevelResult`]: result alias (`Result<T, SublevelError>`)

pub use crate::backend::{normalize, BackendKind, MaintenanceFn, NormalizedBackend};
pub use crate::config::OpenConfig;
pub use crate::encoding::{Value, ValueEncoding};
pub use crate::error::{SublevelError, SublevelResult};
pub use crate::keyspace::{Keyspace, DEFAULT_DELIMITER};
pub use crate::query::{Entries, KeyList, ReadRequest, Slice};
pub use crate::store::SublevelStore;
pub use crate::sublevel::{Sublevel, SublevelBatch};
pub use crate::traits::backend::{
    Backend, BackendRead, BackendWrite, BatchSupport, BatchWriter, RawEntries, SnapshotSupport,
};
pub use crate::view::{KeysIter, RangeIter, ReadOutcome, ScopedIter, ValuesIter, View};

#[cfg(feature = "sled")]
pub use crate::databases::sled_store::SledBackend;

#[cfg(feature = "redb")]
pub use crate::databases::redb_store::RedbBackend;

#[cfg(feature = "memory")]
pub use crate::databases::memory_store::MemoryBackend;
