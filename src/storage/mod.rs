//! Storage Layer - SQLite-backed persistence
//!
//! System of record is SQLite with one table:
//! - verses(id, bible_version, book, chapter, verse, text)
//!
//! Opening a store never creates tables; that is the provisioner's job.

pub mod schema;
pub mod sqlite;

pub use sqlite::{VerseStore, VerseWriter, StoreStats};
