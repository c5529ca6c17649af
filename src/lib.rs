//! # Versedb - Scripture Verse Store
//!
//! Flat-text ingestion and a read-only HTTP query API over a relational
//! store of scripture verses.
//!
//! Versedb provides:
//! - A line parser turning `Book Chapter:Verse Text` into structured records
//! - Idempotent schema provisioning for the `verses` table
//! - A sequential bulk loader writing through a single prepared statement
//! - An HTTP service answering verse lookups and book listings

pub mod verse;
pub mod parser;
pub mod storage;
pub mod provision;
pub mod loader;
pub mod server;
pub mod config;
pub mod output;
pub mod ui;


// Re-exports for convenient access
pub use verse::{ParsedVerse, VerseRecord};
pub use parser::VerseParser;
pub use storage::VerseStore;
pub use provision::{ProvisionOutcome, SchemaProvisioner};
pub use loader::{BulkLoader, LoadStats, LoaderOptions};

/// Result type alias for Versedb operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Versedb operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Schema error: {context}: {source}")]
    Schema {
        context: &'static str,
        #[source]
        source: rusqlite::Error,
    },
}
