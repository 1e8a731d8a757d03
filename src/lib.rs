//! # Sublevel Store
//!
//! A hierarchical, prefix-delimited view layer over ordered key-value
//! backends, with an adapter layer that normalizes heterogeneous backend
//! implementations behind one capability surface.
//!
//! ## Features
//!
//! - **Sublevels**: derive logical sub-namespaces by prefixing keys with a
//!   delimited path segment; nesting composes without knowing the backend
//! - **Multi-Backend**: Sled, Redb, in-memory, or any caller-provided
//!   ordered store behind the same traits
//! - **Normalized Capabilities**: batched writes, snapshots, destroy and
//!   repair attached per backend, missing ones fail with an attributable
//!   error instead of a crash
//! - **Lazy Ranges**: consumer-paced range iteration, cursors released on
//!   drop
//! - **Value Codecs**: raw, UTF-8, or JSON decoding per view, inherited by
//!   derived views
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sublevel_store::prelude::*;
//!
//! // Open a store
//! let store = SublevelStore::sled("./my_database")?;
//!
//! // Write under a namespace: backend key is `users!42`
//! let users = store.sublevel("users");
//! users.put("42", "alice")?;
//!
//! // Read through a derived view
//! let view = store.view().subview("users");
//! assert_eq!(view.get("42")?.as_text(), Some("alice"));
//!
//! // Nested namespaces accumulate: `users!active!7`
//! let active = users.sublevel("active");
//! active.put("7", "bob")?;
//! ```

pub mod backend;
pub mod config;
pub mod databases;
pub mod encoding;
pub mod error;
pub mod keyspace;
pub mod prelude;
pub mod query;
pub mod store;
pub mod sublevel;
pub mod traits;
pub mod view;

pub use backend::{BackendKind, NormalizedBackend};
pub use encoding::{Value, ValueEncoding};
pub use error::{SublevelError, SublevelResult};
pub use keyspace::Keyspace;
pub use store::SublevelStore;
pub use sublevel::Sublevel;
pub use view::View;
