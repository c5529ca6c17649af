//! Database schema definitions

/// Canonical name of the verse table
pub const VERSES_TABLE: &str = "verses";

/// SQL to create the verses table.
///
/// SQLite ignores `VARCHAR(n)` lengths, so the bounds are enforced by CHECK.
pub const CREATE_VERSES_TABLE: &str = r#"
CREATE TABLE verses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    bible_version VARCHAR(50) NOT NULL CHECK (length(bible_version) <= 50),
    book VARCHAR(50) NOT NULL CHECK (length(book) <= 50),
    chapter INTEGER NOT NULL,
    verse INTEGER NOT NULL,
    text TEXT NOT NULL
)
"#;

/// SQL to create indexes
pub const CREATE_INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS idx_verses_lookup ON verses(bible_version, book, chapter, verse)",
];

/// Existence check by table name
pub const TABLE_EXISTS: &str =
    "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1)";

/// Throwaway temporary table used to probe DDL rights
pub const CREATE_PERMISSION_PROBE: &str = r#"
CREATE TEMPORARY TABLE IF NOT EXISTS temp_test (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT
)
"#;

/// Throwaway insert used to probe DML rights
pub const INSERT_PERMISSION_PROBE: &str = "INSERT INTO temp_test (name) VALUES ('test')";

/// The single write statement used by the loader
pub const INSERT_VERSE: &str = r#"
INSERT INTO verses (bible_version, book, chapter, verse, text)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

/// Statements run when the verses table does not exist yet
pub fn create_statements() -> Vec<&'static str> {
    let mut stmts = vec![CREATE_VERSES_TABLE];
    stmts.extend(CREATE_INDEXES.iter().copied());
    stmts
}
