//! # Report — Run Snapshots and Their Human-Readable Rendering
//!
//! A runner hands back a [`RunReport`]: an immutable snapshot of its
//! `SearchState` taken after every unit of work has finished. Rendering is a
//! pure function of that snapshot.

use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

use crate::state::{RunStatus, SearchState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    Sequential,
    Parallel,
}

impl RunMode {
    pub fn banner(self) -> &'static str {
        match self {
            RunMode::Sequential => "***** Sequential Bruteforce *****",
            RunMode::Parallel => "***** Parallel Bruteforce *****",
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    pub mode: RunMode,
    pub status: RunStatus,
    pub running: bool,
    pub match_found: bool,
    pub cracked: Option<String>,
    pub comparisons: u64,
    pub comparisons_by_length: BTreeMap<usize, u64>,
    #[serde(rename = "elapsed_secs", serialize_with = "serialize_secs")]
    pub elapsed: Duration,
    #[serde(rename = "budget_secs", serialize_with = "serialize_secs")]
    pub budget: Duration,
}

fn serialize_secs<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64())
}

impl RunReport {
    pub fn snapshot(mode: RunMode, state: &SearchState, budget: Duration) -> Self {
        RunReport {
            mode,
            status: state.status(),
            running: state.is_running(),
            match_found: state.match_found(),
            cracked: state.cracked().map(str::to_string),
            comparisons: state.comparisons(),
            comparisons_by_length: state.comparisons_by_length(),
            elapsed: state.elapsed().unwrap_or_default(),
            budget,
        }
    }
}

pub struct ReportFormatter;

impl ReportFormatter {
    pub fn render(report: &RunReport) -> String {
        let mut out = String::new();
        match report.cracked.as_deref() {
            Some(password) if report.match_found => {
                out.push_str(&format!("Match found, password={}\n", password));
            }
            _ => out.push_str("Failed to find a match in time.\n"),
        }
        if report.status == RunStatus::Cancelled {
            out.push_str("Parallel tasks cancelled.\n");
        }
        out.push_str(&format!("Elapsed time: {}\n", format_elapsed(report.elapsed)));
        out.push_str(&format!("Comparison count: {}\n", report.comparisons));
        out
    }

    pub fn render_json(report: &RunReport) -> serde_json::Result<String> {
        serde_json::to_string(report)
    }
}

/// `hh:mm:ss.fffffff` with 100 ns ticks.
pub fn format_elapsed(d: Duration) -> String {
    let ticks = d.subsec_nanos() / 100;
    format!("{}.{:07}", crate::format_hms(d), ticks)
}
