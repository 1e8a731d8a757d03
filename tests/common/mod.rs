// Common test utilities and helpers
#![allow(dead_code)]

use sublevel_store::prelude::*;

/// Initialize test logging once per binary.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Seed a small user/post fixture through writable sublevels.
pub fn seed_fixture(store: &SublevelStore) {
    let users = store.sublevel("users");
    users.put("1", "alice").unwrap();
    users.put("2", "bob").unwrap();
    users.put("3", "carol").unwrap();

    let active = users.sublevel("active");
    active.put("1", "yes").unwrap();

    let posts = store.sublevel("posts");
    posts.put("10", "hello world").unwrap();
}

/// Every compiled backend, paired with the temp-dir guard keeping its
/// on-disk artifacts alive.
pub fn all_backends() -> Vec<(&'static str, SublevelStore, Option<tempfile::TempDir>)> {
    let mut backends = Vec::new();

    #[cfg(feature = "memory")]
    backends.push(("memory", SublevelStore::memory().unwrap(), None));

    #[cfg(feature = "sled")]
    backends.push(("sled", SublevelStore::sled_temp().unwrap(), None));

    #[cfg(feature = "redb")]
    {
        let dir = tempfile::tempdir().unwrap();
        let store = SublevelStore::redb(dir.path().join("test.redb")).unwrap();
        backends.push(("redb", store, Some(dir)));
    }

    backends
}
