pub mod alphabet;
pub mod cancel;
pub mod config;
pub mod enumerator;
pub mod input;
pub mod parallel;
pub mod report;
pub mod sequential;
pub mod state;
pub mod validation;

pub use alphabet::Alphabet;
pub use config::SearchConfig;
pub use parallel::ParallelRunner;
pub use report::{ReportFormatter, RunMode, RunReport};
pub use sequential::SequentialRunner;
pub use state::{RunStatus, SearchState};

use std::time::Duration;

/// Whole seconds of `d` as `hh:mm:ss` (hours are not wrapped at 24).
pub fn format_hms(d: Duration) -> String {
    let secs = d.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    format!("{:02}:{:02}:{:02}", h, m, s)
}
