//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, Statement, params, OptionalExtension};
use serde::Serialize;
use crate::Result;
use crate::verse::{ParsedVerse, VerseRecord};
use super::schema;

/// SQLite-backed store for verse rows.
///
/// One value owns one connection; components borrow it rather than reaching
/// for a global handle.
pub struct VerseStore {
    conn: Connection,
}

impl VerseStore {
    /// Open a database file (creates the file, not the tables, if it doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }

    // ========== Query / Execute ==========

    /// Whether a table with this name exists
    pub fn table_exists(&self, name: &str) -> Result<bool> {
        let exists: bool = self.conn.query_row(schema::TABLE_EXISTS, [name], |row| row.get(0))?;
        Ok(exists)
    }

    /// Run one or more statements that return no rows
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql)?;
        Ok(())
    }

    // ========== Write Operations ==========

    /// Prepare the verse insert once, with the version label fixed for the whole run
    pub fn insert_statement(&self, version: &str) -> Result<VerseWriter<'_>> {
        let stmt = self.conn.prepare(schema::INSERT_VERSE)?;
        Ok(VerseWriter {
            stmt,
            version: version.to_string(),
        })
    }

    // ========== Read Operations ==========

    /// Exact-match lookup of one verse
    pub fn find_verse(&self, version: &str, book: &str, chapter: u32, verse: u32) -> Result<Option<VerseRecord>> {
        self.conn
            .query_row(
                "SELECT bible_version, book, chapter, verse, text FROM verses
                 WHERE bible_version = ?1 AND book = ?2 AND chapter = ?3 AND verse = ?4
                 ORDER BY id LIMIT 1",
                params![version, book, chapter, verse],
                |row| self.row_to_record(row),
            )
            .optional()
            .map_err(Into::into)
    }

    /// Distinct book names, ascending
    pub fn list_books(&self) -> Result<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT DISTINCT book FROM verses ORDER BY book")?;

        let books = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .filter_map(|r| match r {
                Ok(book) => Some(book),
                Err(e) => {
                    tracing::warn!("Skipping unreadable book row: {}", e);
                    None
                }
            })
            .collect();

        Ok(books)
    }

    /// Count all verse rows
    pub fn count_verses(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM verses", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Get database statistics
    pub fn stats(&self) -> Result<StoreStats> {
        let books: i64 = self.conn.query_row("SELECT COUNT(DISTINCT book) FROM verses", [], |row| row.get(0))?;
        let versions: i64 =
            self.conn.query_row("SELECT COUNT(DISTINCT bible_version) FROM verses", [], |row| row.get(0))?;

        Ok(StoreStats {
            verses: self.count_verses()?,
            books: books as usize,
            versions: versions as usize,
        })
    }

    fn row_to_record(&self, row: &rusqlite::Row) -> rusqlite::Result<VerseRecord> {
        Ok(VerseRecord {
            version: row.get(0)?,
            book: row.get(1)?,
            chapter: row.get(2)?,
            verse: row.get(3)?,
            text: row.get(4)?,
        })
    }
}

/// The precompiled verse insert, bound to one version label
pub struct VerseWriter<'conn> {
    stmt: Statement<'conn>,
    version: String,
}

impl VerseWriter<'_> {
    /// Write one verse immediately
    pub fn insert(&mut self, verse: &ParsedVerse) -> Result<()> {
        self.stmt.execute(params![
            self.version,
            verse.book,
            verse.chapter,
            verse.verse,
            verse.text,
        ])?;
        Ok(())
    }
}

/// Database statistics
#[derive(Debug, Clone, Serialize)]
pub struct StoreStats {
    pub verses: usize,
    pub books: usize,
    pub versions: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        writeln!(f, "  Verses: {}", self.verses)?;
        writeln!(f, "  Books: {}", self.books)?;
        writeln!(f, "  Versions: {}", self.versions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provisioned_store() -> VerseStore {
        let store = VerseStore::open_in_memory().unwrap();
        for stmt in schema::create_statements() {
            store.execute_batch(stmt).unwrap();
        }
        store
    }

    #[test]
    fn test_open_does_not_create_tables() {
        let store = VerseStore::open_in_memory().unwrap();
        assert!(!store.table_exists(schema::VERSES_TABLE).unwrap());
    }

    #[test]
    fn test_insert_and_find() {
        let store = provisioned_store();
        let mut writer = store.insert_statement("KJV").unwrap();
        writer.insert(&ParsedVerse::new("Genesis", 1, 1, "In the beginning")).unwrap();
        writer.insert(&ParsedVerse::new("Genesis", 1, 2, "And the earth was without form")).unwrap();
        drop(writer);

        let found = store.find_verse("KJV", "Genesis", 1, 2).unwrap().unwrap();
        assert_eq!(found.text, "And the earth was without form");
        assert_eq!(found.version, "KJV");

        assert!(store.find_verse("ASV", "Genesis", 1, 2).unwrap().is_none());
        assert!(store.find_verse("KJV", "Genesis", 2, 1).unwrap().is_none());
    }

    #[test]
    fn test_list_books_sorted_distinct() {
        let store = provisioned_store();
        let mut writer = store.insert_statement("KJV").unwrap();
        writer.insert(&ParsedVerse::new("John", 3, 16, "For God so loved the world.")).unwrap();
        writer.insert(&ParsedVerse::new("Genesis", 1, 1, "In the beginning")).unwrap();
        writer.insert(&ParsedVerse::new("John", 1, 1, "In the beginning was the Word")).unwrap();
        drop(writer);

        assert_eq!(store.list_books().unwrap(), vec!["Genesis", "John"]);
    }

    #[test]
    fn test_book_length_is_bounded() {
        let store = provisioned_store();
        let mut writer = store.insert_statement("KJV").unwrap();
        let long_book = "B".repeat(51);
        assert!(writer.insert(&ParsedVerse::new(long_book, 1, 1, "text")).is_err());
        assert_eq!(store.count_verses().unwrap(), 0);
    }

    #[test]
    fn test_stats() {
        let store = provisioned_store();
        let mut kjv = store.insert_statement("KJV").unwrap();
        kjv.insert(&ParsedVerse::new("Genesis", 1, 1, "In the beginning")).unwrap();
        kjv.insert(&ParsedVerse::new("John", 3, 16, "For God so loved the world.")).unwrap();
        drop(kjv);
        let mut asv = store.insert_statement("ASV").unwrap();
        asv.insert(&ParsedVerse::new("John", 3, 16, "For God so loved the world,")).unwrap();
        drop(asv);

        let stats = store.stats().unwrap();
        assert_eq!(stats.verses, 3);
        assert_eq!(stats.books, 2);
        assert_eq!(stats.versions, 2);
    }
}
