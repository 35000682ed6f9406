//! Part store backends and the catalog loader.
//!
//! The loader reads every row once at startup and builds the immutable
//! [`CatalogIndex`](pcparts_core::CatalogIndex) that the query tools share.

pub mod in_memory;
pub mod loader;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use in_memory::InMemoryStore;
pub use loader::{decode_row, load_catalog};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
