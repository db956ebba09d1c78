//! Tracing subscriber setup.
//!
//! Every crate of the workspace reports through `tracing`. Hosts that do not
//! install their own subscriber can call [`install_tracing`] once at startup.

use std::str::FromStr;
use std::sync::{Arc, Mutex, Once, OnceLock};

use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer};

const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

// ============================================================================
// Global State
// ============================================================================

static TRACING_INSTALLED: Once = Once::new();
static LOG_LEVEL: OnceLock<Arc<Mutex<LevelFilter>>> = OnceLock::new();

fn log_level_handle() -> Arc<Mutex<LevelFilter>> {
    LOG_LEVEL
        .get_or_init(|| Arc::new(Mutex::new(DEFAULT_LOG_LEVEL)))
        .clone()
}

/// Current runtime log level.
#[must_use]
pub fn log_level() -> LevelFilter {
    log_level_handle()
        .lock()
        .map_or(DEFAULT_LOG_LEVEL, |guard| *guard)
}

/// Updates the runtime log level. Unknown levels fall back to `info`.
pub fn set_log_level(level: &str) {
    let parsed = LevelFilter::from_str(level).unwrap_or(DEFAULT_LOG_LEVEL);
    if let Ok(mut guard) = log_level_handle().lock() {
        *guard = parsed;
    }
}

// ============================================================================
// Installation
// ============================================================================

/// Installs a console subscriber (idempotent).
///
/// Events pass through `RUST_LOG` (defaulting to `info`) and then through
/// the level set with [`set_log_level`]. If another subscriber is already
/// installed, this does nothing.
pub fn install_tracing() {
    TRACING_INSTALLED.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let console = fmt::layer()
            .with_target(true)
            .with_filter(filter)
            .with_filter(filter_fn(|metadata| *metadata.level() <= log_level()));

        if tracing_subscriber::registry().with(console).try_init().is_err() {
            eprintln!("hubui: a tracing subscriber is already installed");
        }
    });
}
