//! Open-time configuration for the file-backed stores.
//!
//! One builder-constructed struct shared by the sled and redb constructors,
//! interpreted per backend.

use std::path::PathBuf;

use typed_builder::TypedBuilder;

/// Configuration for file-based database backends (sled, redb).
///
/// # Examples
///
/// ```
/// use sublevel_store::config::OpenConfig;
///
/// // Defaults
/// let config = OpenConfig::builder().path("store.db").build();
/// assert_eq!(config.cache_size_mb, 256);
/// assert!(config.create_if_missing);
///
/// // Customized
/// let config = OpenConfig::builder()
///     .path("/data/store.db")
///     .cache_size_mb(512)
///     .temporary(true)
///     .build();
/// assert!(config.temporary);
/// ```
#[derive(Debug, Clone, TypedBuilder)]
#[builder(doc)]
pub struct OpenConfig {
    /// Path to the database file (redb) or directory (sled).
    #[builder(setter(into))]
    pub path: PathBuf,

    /// Cache size in megabytes (backend-specific interpretation).
    #[builder(default = 256)]
    pub cache_size_mb: usize,

    /// Whether to create the database if it doesn't exist. Sled always
    /// creates; only redb honors `false`.
    #[builder(default = true)]
    pub create_if_missing: bool,

    /// Delete-on-drop database. Honored by sled; ignored by redb.
    #[builder(default = false)]
    pub temporary: bool,
}

impl OpenConfig {
    /// Basic configuration with just a path.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            cache_size_mb: 256,
            create_if_missing: true,
            temporary: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_applies_defaults() {
        let config = OpenConfig::builder().path("x.db").build();
        assert_eq!(config.path, PathBuf::from("x.db"));
        assert_eq!(config.cache_size_mb, 256);
        assert!(config.create_if_missing);
        assert!(!config.temporary);
    }

    #[test]
    fn new_matches_builder_defaults() {
        let a = OpenConfig::new("y.db");
        let b = OpenConfig::builder().path("y.db").build();
        assert_eq!(a.cache_size_mb, b.cache_size_mb);
        assert_eq!(a.create_if_missing, b.create_if_missing);
        assert_eq!(a.temporary, b.temporary);
    }
}
