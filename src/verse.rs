//! Verse types
//!
//! - `ParsedVerse`: what the line parser extracts from one raw line
//! - `VerseRecord`: a stored row, a parsed verse tagged with its version

/// Version label applied when none is configured
pub const DEFAULT_VERSION: &str = "KJV";

/// A verse extracted from one line of input, before the version label is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedVerse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl ParsedVerse {
    pub fn new(book: impl Into<String>, chapter: u32, verse: u32, text: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            chapter,
            verse,
            text: text.into(),
        }
    }

    /// `Book C:V` reference, used in log lines
    pub fn reference(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

/// One row of the `verses` table.
///
/// Rows are written once by the loader and never updated. Nothing prevents
/// the same verse from being stored twice when a load is repeated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerseRecord {
    pub version: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

impl std::fmt::Display for VerseRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} {}:{} {}", self.version, self.book, self.chapter, self.verse, self.text)
    }
}
