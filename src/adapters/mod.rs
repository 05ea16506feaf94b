// Adapters layer: concrete implementations of the domain ports.

pub mod migrations;
pub mod sqlite;

pub use sqlite::SqliteStore;
