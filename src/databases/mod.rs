#[cfg(feature = "sled")]
pub mod sled_store;

#[cfg(feature = "redb")]
pub mod redb_store;

#[cfg(feature = "memory")]
pub mod memory_store;
