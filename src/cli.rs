//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Resolves the target
//! and time limit, builds the [`SearchConfig`], performs the requested runs
//! with a fresh `SearchState` each, and prints their reports.

use anyhow::{Context, Result};
use lettercrack::input::{prompt_password, prompt_time_limit};
use lettercrack::report::ReportFormatter;
use lettercrack::validation::{parse_time_limit, validate_password};
use lettercrack::{ParallelRunner, RunMode, RunReport, SearchConfig, SearchState, SequentialRunner};
use std::io::{self, Write};
use std::time::Duration;
use tracing::{info, info_span, warn};

use super::{Cli, Mode};

// ── Run Orchestration ───────────────────────────────────────────

pub fn run(cli: &Cli) -> Result<()> {
    let base = SearchConfig::default()
        .with_alphabet(cli.alphabet.clone())
        .with_lengths(cli.min_length, cli.max_length);
    base.validate()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();

    let password = match &cli.password {
        Some(p) => {
            validate_password(p, &cli.alphabet, cli.min_length, cli.max_length)
                .context("invalid --password")?;
            p.clone()
        }
        None => prompt_password(&mut input, &mut stdout, &cli.alphabet, cli.min_length, cli.max_length)?,
    };
    let budget = match &cli.time_limit {
        Some(t) => parse_time_limit(t).context("invalid --time-limit")?,
        None => prompt_time_limit(&mut input, &mut stdout)?,
    };

    let config = base.with_budget(budget);

    info!(
        threads = rayon::current_num_threads(),
        alphabet = %config.alphabet,
        min_length = config.min_length,
        max_length = config.max_length,
        budget = %lettercrack::format_hms(budget),
        "lettercrack starting"
    );

    let progress = (cli.progress_secs > 0).then(|| Duration::from_secs(cli.progress_secs));

    if matches!(cli.mode, Mode::Both | Mode::Sequential) {
        let report = run_mode(RunMode::Sequential, &config, &password, progress);
        print_report(&mut stdout, &report, cli.json)?;
    }
    if matches!(cli.mode, Mode::Both | Mode::Parallel) {
        let report = run_mode(RunMode::Parallel, &config, &password, progress);
        print_report(&mut stdout, &report, cli.json)?;
    }
    Ok(())
}

/// Perform one run on a fresh state, with an optional progress reporter attached.
fn run_mode(
    mode: RunMode,
    config: &SearchConfig,
    password: &str,
    progress: Option<Duration>,
) -> RunReport {
    let _span = info_span!("run", mode = ?mode).entered();
    let state = SearchState::new(config.max_length);
    let reporter = progress.map(|interval| state.start_reporter(interval));

    let report = match mode {
        RunMode::Sequential => SequentialRunner::new(config).run_with_state(password, &state),
        RunMode::Parallel => ParallelRunner::new(config).run_with_state(password, &state),
    };

    if let Some(reporter) = reporter {
        reporter.stop();
    }
    info!(
        status = ?report.status,
        comparisons = report.comparisons,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "run complete"
    );
    report
}

fn print_report<W: Write>(out: &mut W, report: &RunReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", ReportFormatter::render_json(report)?)?;
    } else {
        writeln!(out, "{}", report.mode.banner())?;
        writeln!(out, "{}", ReportFormatter::render(report))?;
    }
    out.flush()?;
    Ok(())
}

// ── Search Pool ─────────────────────────────────────────────────

/// Size the global rayon pool the parallel runner fans out on.
///
/// Without `--threads` or `--qos` the pool is left to rayon's defaults (one
/// worker per core, or `RAYON_NUM_THREADS`). Workers are named `search-<n>`.
pub fn configure_rayon(threads: Option<usize>, qos: bool) -> Result<()> {
    if threads.is_none() && !qos {
        return Ok(());
    }
    let builder = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .thread_name(|i| format!("search-{}", i));
    build_search_pool(builder, qos).context("could not configure the search thread pool")?;
    info!(
        threads = rayon::current_num_threads(),
        qos,
        "search thread pool configured"
    );
    Ok(())
}

/// On macOS, `qos` runs every worker at user-initiated QoS so the parallel
/// run is not parked on efficiency cores.
#[cfg(target_os = "macos")]
fn build_search_pool(
    builder: rayon::ThreadPoolBuilder,
    qos: bool,
) -> Result<(), rayon::ThreadPoolBuildError> {
    if !qos {
        return builder.build_global();
    }
    builder
        .spawn_handler(|worker| {
            let mut spawn = std::thread::Builder::new();
            if let Some(name) = worker.name() {
                spawn = spawn.name(name.to_owned());
            }
            spawn.spawn(move || {
                // SAFETY: only changes the scheduling class of this worker thread.
                unsafe {
                    libc::pthread_set_qos_class_self_np(
                        libc::qos_class_t::QOS_CLASS_USER_INITIATED,
                        0,
                    );
                }
                worker.run();
            })?;
            Ok(())
        })
        .build_global()
}

#[cfg(not(target_os = "macos"))]
fn build_search_pool(
    builder: rayon::ThreadPoolBuilder,
    qos: bool,
) -> Result<(), rayon::ThreadPoolBuildError> {
    if qos {
        warn!("--qos only applies on macOS, ignoring");
    }
    builder.build_global()
}
