//! Record Parser - one raw line in, one verse (or nothing) out
//!
//! Accepted shape: `<book> <chapter>:<verse> <text>`
//!
//! - `book` is any run of non-whitespace characters
//! - `chapter` and `verse` are ASCII digit runs
//! - `text` is the remainder of the line, leading whitespace trimmed
//!
//! Parsing never fails hard: anything that does not fit the shape is simply
//! not a verse.

use regex::Regex;
use crate::verse::ParsedVerse;

const VERSE_PATTERN: &str = r"^(\S+)\s+([0-9]+):([0-9]+)\s+(.+)$";

/// Line parser for `Book Chapter:Verse Text` input
pub struct VerseParser {
    regex: Regex,
}

impl Default for VerseParser {
    fn default() -> Self {
        Self::new()
    }
}

impl VerseParser {
    pub fn new() -> Self {
        Self {
            regex: Regex::new(VERSE_PATTERN).expect("Invalid verse pattern"),
        }
    }

    /// Cheap pre-filter: blank lines and lines without a colon are never verses.
    pub fn is_candidate(line: &str) -> bool {
        !line.trim().is_empty() && line.contains(':')
    }

    /// Parse one line into a verse.
    ///
    /// Chapter or verse digits that do not fit a `u32` become `0`; the line
    /// is still accepted.
    pub fn parse_line(&self, line: &str) -> Option<ParsedVerse> {
        if !Self::is_candidate(line) {
            return None;
        }

        let caps = self.regex.captures(line)?;
        let book = caps.get(1)?.as_str();
        let chapter = caps.get(2).map_or(0, |m| m.as_str().parse::<u32>().unwrap_or(0));
        let verse = caps.get(3).map_or(0, |m| m.as_str().parse::<u32>().unwrap_or(0));
        let text = caps.get(4)?.as_str().trim_start();

        if text.trim().is_empty() {
            return None;
        }

        Some(ParsedVerse::new(book, chapter, verse, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_genesis() {
        let parser = VerseParser::new();
        let verse = parser
            .parse_line("Genesis 1:1 In the beginning God created the heavens and the earth.")
            .unwrap();

        assert_eq!(verse.book, "Genesis");
        assert_eq!(verse.chapter, 1);
        assert_eq!(verse.verse, 1);
        assert_eq!(verse.text, "In the beginning God created the heavens and the earth.");
    }

    #[test]
    fn test_blank_and_colonless_lines_are_skipped() {
        let parser = VerseParser::new();
        assert!(parser.parse_line("").is_none());
        assert!(parser.parse_line("   \t").is_none());
        assert!(parser.parse_line("not a verse line").is_none());
        assert!(parser.parse_line("Genesis 1 1 no colon here").is_none());
        assert!(!VerseParser::is_candidate("Genesis"));
        assert!(VerseParser::is_candidate("Genesis 1:1 x"));
    }

    #[test]
    fn test_colon_with_wrong_shape_is_skipped() {
        let parser = VerseParser::new();
        assert!(parser.parse_line("Note: this is a heading").is_none());
        assert!(parser.parse_line("Genesis 1:a text").is_none());
        assert!(parser.parse_line("Genesis1:1 text").is_none());
        assert!(parser.parse_line(" Genesis 1:1 leading space").is_none());
        assert!(parser.parse_line("Genesis 1:1").is_none());
    }

    #[test]
    fn test_text_leading_whitespace_trimmed() {
        let parser = VerseParser::new();
        let verse = parser.parse_line("John 3:16 \t  For God so loved the world.").unwrap();
        assert_eq!(verse.text, "For God so loved the world.");
    }

    #[test]
    fn test_whitespace_only_text_is_rejected() {
        let parser = VerseParser::new();
        assert!(parser.parse_line("John 3:16     ").is_none());
    }

    #[test]
    fn test_book_token_may_hold_punctuation() {
        let parser = VerseParser::new();
        let verse = parser.parse_line("Song_of_Solomon 2:1 I am the rose of Sharon").unwrap();
        assert_eq!(verse.book, "Song_of_Solomon");

        let verse = parser.parse_line("1John 1:9 If we confess our sins").unwrap();
        assert_eq!(verse.book, "1John");
        assert_eq!(verse.chapter, 1);
        assert_eq!(verse.verse, 9);
    }

    #[test]
    fn test_overflowing_numbers_are_zero_filled() {
        let parser = VerseParser::new();
        let verse = parser.parse_line("Psalms 99999999999:1 Praise ye the LORD.").unwrap();
        assert_eq!(verse.chapter, 0);
        assert_eq!(verse.verse, 1);
        assert_eq!(verse.text, "Praise ye the LORD.");
    }

    #[test]
    fn test_non_ascii_digits_are_not_verses() {
        let parser = VerseParser::new();
        assert!(parser.parse_line("Psalms ١٢:٣ Help, LORD").is_none());
        assert!(parser.parse_line("Psalms 12:٣ Help, LORD").is_none());
    }

    #[test]
    fn test_colons_inside_text_are_kept() {
        let parser = VerseParser::new();
        let verse = parser.parse_line("Exodus 20:2 I am the LORD thy God: which brought thee out").unwrap();
        assert_eq!(verse.chapter, 20);
        assert_eq!(verse.verse, 2);
        assert_eq!(verse.text, "I am the LORD thy God: which brought thee out");
    }
}
