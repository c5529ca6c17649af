//! Versedb CLI - ingest scripture text and serve verse lookups

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use versedb::config::{self, EnvConfig};
use versedb::loader::{BulkLoader, LoaderOptions, DEFAULT_PROGRESS_EVERY};
use versedb::provision::{ProvisionOutcome, SchemaProvisioner};
use versedb::storage::{VerseStore, schema::VERSES_TABLE};
use versedb::ui::{self, Icons};
use versedb::verse::DEFAULT_VERSION;

#[derive(Parser)]
#[command(name = "versedb")]
#[command(version)]
#[command(about = "Scripture verse store - flat-text ingester and read-only HTTP query API")]
#[command(long_about = r#"
Versedb loads a plain text file of verses into a database and serves them over HTTP.

Input lines look like:
  Genesis 1:1 In the beginning God created the heaven and the earth.

Example usage:
  versedb ingest --input bible_text.txt --bible-version KJV
  versedb serve
  versedb stats
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the env file with DB_* and API_PORT settings
    #[arg(short, long, global = true, default_value = ".env")]
    env: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Provision the schema and load a verse file
    Ingest {
        /// Verse text file (defaults to versedb.toml `input`, then bible_text.txt)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Version label stored with every verse
        #[arg(short = 'b', long = "bible-version")]
        version: Option<String>,

        /// Lines between progress reports
        #[arg(long)]
        progress_every: Option<usize>,

        /// Path to the ingestion config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Create the verses table if needed and check write permissions
    Init,

    /// Run the HTTP query service
    Serve {
        /// Listen port (defaults to API_PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Show statistics about the stored verses
    Stats {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    if let Err(e) = run(cli) {
        tracing::error!("{}", fatal_message(&e));
        std::process::exit(1);
    }
}

/// The whole error chain on one line, outermost context first
fn fatal_message(err: &anyhow::Error) -> String {
    format!("{:#}", err)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let env = EnvConfig::load(&cli.env)?;
    for key in env.database.ignored_settings() {
        tracing::warn!("{} is set but not used by the embedded SQLite store", key);
    }

    match cli.command {
        Commands::Ingest { input, version, progress_every, config } => {
            let file_config = config::load_config(config.as_deref())?.unwrap_or_default();
            let input = input
                .or(file_config.input)
                .unwrap_or_else(|| PathBuf::from("bible_text.txt"));
            let options = LoaderOptions {
                version: version
                    .or(file_config.version)
                    .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
                progress_every: progress_every
                    .or(file_config.progress_every)
                    .unwrap_or(DEFAULT_PROGRESS_EVERY),
            };

            let store = open_store(&env)?;
            provision(&store)?;

            ui::header(Icons::BOOK, "Ingesting verses");
            ui::status(Icons::FILE, "Input", &input.display().to_string());
            ui::status(Icons::TAG, "Version", &options.version);

            let progress = ui::LoadProgress::new("Loading verses");
            let stats = BulkLoader::new(&store, options)
                .with_progress(|s| progress.update(s))
                .load_file(&input)
                .map_err(|e| load_error(e, &input))?;
            progress.finish(&stats);

            if stats.failed > 0 {
                ui::warn(&format!("{} verses failed to insert; see log for details", stats.failed));
            }

            // Show final stats
            if !versedb::output::is_quiet() {
                println!("{}", store.stats()?);
            }
        }

        Commands::Init => {
            let store = open_store(&env)?;
            provision(&store)?;
            ui::success("Database connection and table verified successfully");
        }

        Commands::Serve { port } => {
            let port = match port {
                Some(port) => port,
                None => env.require_api_port()?,
            };
            let store = open_store(&env)?;

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(versedb::server::start_server(port, store))?;
        }

        Commands::Stats { format } => {
            let store = open_store(&env)?;
            if !store.table_exists(VERSES_TABLE)? {
                anyhow::bail!("{} table does not exist; run `versedb init` or `versedb ingest` first", VERSES_TABLE);
            }
            let stats = store.stats()?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&stats)?),
                OutputFormat::Text => {
                    ui::header(Icons::STATS, &format!("Versedb Statistics ({})", env.database.name));
                    println!(
                        "{}",
                        ui::stats_table(&[
                            ("Verses", stats.verses.to_string()),
                            ("Books", stats.books.to_string()),
                            ("Versions", stats.versions.to_string()),
                        ])
                    );
                }
            }
        }
    }

    Ok(())
}

/// Only I/O failures are about the input file; store errors keep their own message.
fn load_error(err: versedb::Error, input: &Path) -> anyhow::Error {
    match err {
        versedb::Error::Io(e) => anyhow::Error::new(e).context(format!("failed to read {}", input.display())),
        other => other.into(),
    }
}

fn open_store(env: &EnvConfig) -> anyhow::Result<VerseStore> {
    let path = env.database.path();
    let store = VerseStore::open(&path)
        .with_context(|| format!("failed to open database {}", path.display()))?;
    tracing::info!("Successfully connected to the database");
    ui::status(Icons::DATABASE, "Database", &display_path(&path));
    Ok(store)
}

fn provision(store: &VerseStore) -> anyhow::Result<()> {
    ui::section("Schema");
    match SchemaProvisioner::new(store).run()? {
        ProvisionOutcome::Created => ui::summary_row("verses table:", "created"),
        ProvisionOutcome::AlreadyExists => ui::summary_row("verses table:", "already exists"),
    }
    ui::summary_row("permissions:", "ok");
    Ok(())
}

fn display_path(path: &Path) -> String {
    std::fs::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_stats_format_is_validated() {
        let cli = Cli::try_parse_from(["versedb", "stats", "--format", "json"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats { format: OutputFormat::Json }));

        let cli = Cli::try_parse_from(["versedb", "stats"]).unwrap();
        assert!(matches!(cli.command, Commands::Stats { format: OutputFormat::Text }));

        assert!(Cli::try_parse_from(["versedb", "stats", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_io_load_error_names_the_input() {
        let err = versedb::Error::Io(io::Error::new(io::ErrorKind::NotFound, "no such file"));
        let message = fatal_message(&load_error(err, Path::new("bible_text.txt")));
        assert_eq!(message, "failed to read bible_text.txt: no such file");
    }

    #[test]
    fn test_storage_load_error_is_not_blamed_on_the_input() {
        let err = versedb::Error::Storage(rusqlite::Error::InvalidQuery);
        let message = fatal_message(&load_error(err, Path::new("bible_text.txt")));
        assert!(!message.contains("failed to read"));
        assert!(message.starts_with("Storage error"));
    }

    #[test]
    fn test_fatal_message_is_one_line_with_the_cause() {
        let err = anyhow::Error::new(io::Error::other("disk I/O error")).context("failed to open database verses.db");
        let message = fatal_message(&err);
        assert_eq!(message, "failed to open database verses.db: disk I/O error");
        assert!(!message.contains('\n'));
    }
}
