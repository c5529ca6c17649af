pub mod icons;
pub mod output;
pub mod progress;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{header, section, status, success, summary_row, warn};
pub use progress::LoadProgress;
pub use table::stats_table;
pub use theme::{theme, Theme};
