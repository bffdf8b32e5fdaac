//! File-backed logger setup.
//!
//! The TUI owns stdout and stderr while it runs, so log records go to
//! `<cache dir>/tuneq/tuneq.log`. `RUST_LOG` controls the filter.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;

const DEFAULT_FILTER: &str = "warn";

/// Location of the log file, if the platform has a cache directory.
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join("tuneq").join("tuneq.log"))
}

/// Installs the global logger. Logging stays disabled if the file cannot be opened.
pub fn init_logger() {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(DEFAULT_FILTER),
    )
    .target(env_logger::Target::Pipe(Box::new(file)))
    .format_timestamp_millis()
    .try_init();

    log::info!("tuneq {} started", env!("CARGO_PKG_VERSION"));
}
