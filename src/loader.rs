//! Bulk Loader - streams a flat text file into the verses table
//!
//! One line is read, parsed and written at a time. Each accepted verse is
//! inserted immediately through a single prepared statement; there is no
//! batching and no transaction spanning several verses.
//!
//! - Blank lines, lines without a colon and lines that do not parse are skipped
//! - A failed insert is logged and skipped; the load continues
//! - Failing to open or read the input ends the load with an error

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use crate::Result;
use crate::parser::VerseParser;
use crate::storage::VerseStore;
use crate::verse::DEFAULT_VERSION;

/// Lines between two progress reports
pub const DEFAULT_PROGRESS_EVERY: usize = 1000;

#[derive(Debug, Clone)]
pub struct LoaderOptions {
    /// Version label stamped on every row of this run
    pub version: String,
    /// Report progress after this many lines (0 disables reports)
    pub progress_every: usize,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }
}

/// Running totals of a load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Lines read, including blank and rejected ones
    pub lines: usize,
    /// Verses written successfully
    pub inserted: usize,
    /// Verses that parsed but failed to write
    pub failed: usize,
}

type ProgressHook<'a> = Box<dyn FnMut(&LoadStats) + 'a>;

pub struct BulkLoader<'a> {
    store: &'a VerseStore,
    parser: VerseParser,
    options: LoaderOptions,
    on_progress: Option<ProgressHook<'a>>,
}

impl<'a> BulkLoader<'a> {
    pub fn new(store: &'a VerseStore, options: LoaderOptions) -> Self {
        Self {
            store,
            parser: VerseParser::new(),
            options,
            on_progress: None,
        }
    }

    /// Called with the running totals at every progress report
    pub fn with_progress(mut self, hook: impl FnMut(&LoadStats) + 'a) -> Self {
        self.on_progress = Some(Box::new(hook));
        self
    }

    /// Open `path` and load it
    pub fn load_file(&mut self, path: &Path) -> Result<LoadStats> {
        let file = File::open(path)?;
        tracing::info!("Loading verses from {}", path.display());
        self.load(BufReader::new(file))
    }

    /// Load every line of `reader`
    pub fn load<R: BufRead>(&mut self, mut reader: R) -> Result<LoadStats> {
        let store = self.store;
        let mut writer = store.insert_statement(&self.options.version)?;
        let mut stats = LoadStats::default();
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            stats.lines += 1;

            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);

            if VerseParser::is_candidate(line) {
                if let Some(verse) = self.parser.parse_line(line) {
                    match writer.insert(&verse) {
                        Ok(()) => {
                            stats.inserted += 1;
                            tracing::debug!("Inserted {}", verse.reference());
                        }
                        Err(e) => {
                            stats.failed += 1;
                            tracing::warn!(
                                book = %verse.book,
                                chapter = verse.chapter,
                                verse = verse.verse,
                                "Failed to insert verse: {}",
                                e
                            );
                        }
                    }
                }
            }

            if self.options.progress_every > 0 && stats.lines % self.options.progress_every == 0 {
                tracing::info!("Processed {} lines, inserted {} verses", stats.lines, stats.inserted);
                if let Some(hook) = self.on_progress.as_mut() {
                    hook(&stats);
                }
            }
        }

        tracing::info!(
            "Finished processing. Total lines: {}, Total verses inserted: {}, Failed: {}",
            stats.lines,
            stats.inserted,
            stats.failed
        );
        Ok(stats)
    }
}
