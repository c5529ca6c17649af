use crate::loader::LoadStats;
use crate::output::is_quiet;
use crate::ui::{theme, Icons};
use indicatif::{HumanDuration, ProgressBar};
use owo_colors::OwoColorize;
use std::time::{Duration, Instant};

/// Spinner shown while the loader runs; hidden when stdout is not a terminal
pub struct LoadProgress {
    pb: ProgressBar,
    started: Instant,
}

impl LoadProgress {
    pub fn new(message: &str) -> Self {
        let pb = if console::Term::stdout().is_term() && !is_quiet() {
            let pb = ProgressBar::new_spinner();
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message.to_string());
        Self {
            pb,
            started: Instant::now(),
        }
    }

    /// Refresh the spinner from a loader progress report
    pub fn update(&self, stats: &LoadStats) {
        self.pb.set_message(format!(
            "{} lines, {} verses inserted",
            stats.lines, stats.inserted
        ));
    }

    pub fn finish(&self, stats: &LoadStats) {
        self.pb.finish_and_clear();
        if is_quiet() {
            return;
        }
        println!(
            "{} {}",
            Icons::CHECK.style(theme().ok),
            format!("Loaded in {}", HumanDuration(self.started.elapsed())).style(theme().ok)
        );
        println!(
            "  {} {}  {} {}  {} {}",
            Icons::FILE.style(theme().value),
            stats.lines,
            Icons::SCROLL.style(theme().value),
            stats.inserted,
            Icons::CROSS.style(theme().value),
            stats.failed
        );
    }
}
