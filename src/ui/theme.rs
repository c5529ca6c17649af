//! Terminal styles for CLI output, resolved once per process

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Style roles used by the status lines and the ingest summary
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub heading: Style,
    pub label: Style,
    pub value: Style,
    pub ok: Style,
    pub caution: Style,
}

impl Theme {
    /// Every role unstyled when `color` is false
    pub fn new(color: bool) -> Self {
        if !color {
            let plain = Style::new();
            return Self { heading: plain, label: plain, value: plain, ok: plain, caution: plain };
        }
        Self {
            heading: Style::new().cyan().bold(),
            label: Style::new().dimmed(),
            value: Style::new().magenta(),
            ok: Style::new().green().bold(),
            caution: Style::new().yellow().bold(),
        }
    }

    /// Color only on a terminal with `NO_COLOR` unset
    pub fn detect() -> Self {
        Self::new(console::Term::stdout().is_term() && std::env::var_os("NO_COLOR").is_none())
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
