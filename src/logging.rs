//! Tracing setup.
//!
//! The dashboard owns the terminal, so in that mode logs go to a file under the platform
//! cache directory:
//! - macOS: `~/Library/Caches/ai-model-monitor/ai-model-monitor.log`
//! - Linux: `~/.cache/ai-model-monitor/ai-model-monitor.log`
//! - Windows: `%LOCALAPPDATA%\ai-model-monitor\ai-model-monitor.log`
//!
//! One-shot commands log to stderr.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;

const APP_DIR: &str = "ai-model-monitor";
const LOG_FILENAME: &str = "ai-model-monitor.log";

/// Where log events are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

/// Map `-v` occurrences to a level: none → ERROR, up to 4+ → TRACE
pub fn level_for_verbosity(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Default log file used by the dashboard
pub fn default_log_path() -> Result<PathBuf> {
    let cache_base = dirs::cache_dir().context("Failed to get platform cache directory")?;
    Ok(cache_base.join(APP_DIR).join(LOG_FILENAME))
}

fn filter_directive(level: LevelFilter) -> String {
    format!("off,ai_model_monitor={}", level.to_string().to_lowercase())
}

/// Install the global subscriber. Only events from this crate are recorded.
pub fn init(verbose: u8, target: LogTarget) -> Result<()> {
    let filter = filter_directive(level_for_verbosity(verbose));

    let result = match target {
        LogTarget::Stderr => tracing_subscriber::fmt()
            .compact()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init(),
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory: {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file))
                .with_env_filter(filter)
                .try_init()
        }
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))
}

/// File logging for the dashboard.
///
/// Returns the log path on success. On failure no subscriber is installed and the
/// dashboard runs without logs; the caller reports the error.
pub fn init_dashboard(verbose: u8, log_path: Result<PathBuf>) -> Result<PathBuf> {
    let path = log_path?;
    init(verbose, LogTarget::File(path.clone()))?;
    Ok(path)
}
