//! # Main — CLI Entry Point
//!
//! Parses flags, initializes logging and the rayon pool, then hands off to
//! [`cli::run`] which gathers the target and time limit (from flags or
//! interactive prompts) and performs the sequential and parallel runs.
//!
//! ## Options
//!
//! - `--password` / `--time-limit`: skip the prompts (validated the same way).
//! - `--alphabet`, `--min-length`, `--max-length`: search space.
//! - `--mode`: `both` (default), `sequential` or `parallel`.
//! - `--threads`: rayon pool size (default: all logical cores).
//! - `--qos`: macOS QoS P-core scheduling via `pthread_set_qos_class_self_np`.
//! - `--json`: one JSON report per run on stdout instead of text.
//! - `--progress-secs`: periodic progress log interval (0 = off).
//!
//! Logging goes to stderr: `LOG_FORMAT=json` for JSON lines, `RUST_LOG` to
//! filter (default `info`).

mod cli;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use lettercrack::config::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};
use lettercrack::Alphabet;

#[derive(Parser)]
#[command(
    name = "lettercrack",
    about = "Exhaustive password recovery, sequential and parallel, under a time limit"
)]
struct Cli {
    /// Password to recover (prompted for when omitted)
    #[arg(long)]
    password: Option<String>,

    /// Time limit as hh:mm:ss (prompted for when omitted)
    #[arg(long)]
    time_limit: Option<String>,

    /// Symbols to enumerate, in order
    #[arg(long, env = "LETTERCRACK_ALPHABET", default_value = lettercrack::alphabet::UPPERCASE)]
    alphabet: Alphabet,

    /// Shortest length searched (and shortest password accepted)
    #[arg(long, default_value_t = MIN_PASSWORD_LENGTH)]
    min_length: usize,

    /// Exclusive upper bound of lengths searched (and longest password accepted)
    #[arg(long, default_value_t = MAX_PASSWORD_LENGTH)]
    max_length: usize,

    /// Which runs to perform
    #[arg(long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,

    /// Number of rayon worker threads (defaults to all logical cores)
    #[arg(long, env = "LETTERCRACK_THREADS")]
    threads: Option<usize>,

    /// Set macOS QoS class to user-initiated for rayon threads (P-core scheduling on Apple Silicon)
    #[arg(long)]
    qos: bool,

    /// Print each run's report as a JSON line
    #[arg(long)]
    json: bool,

    /// Log search progress every N seconds (0 disables)
    #[arg(long, default_value_t = 0)]
    progress_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    Both,
    Sequential,
    Parallel,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // LOG_FORMAT=json for machine-readable logs, human-readable otherwise
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_default();
    if log_format == "json" {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }

    let cli = Cli::parse();
    cli::configure_rayon(cli.threads, cli.qos)?;
    cli::run(&cli)
}
