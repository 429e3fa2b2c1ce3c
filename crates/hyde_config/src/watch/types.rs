//! Core types for the watch loop.
//!
//! - [`WatchError`] - watcher setup failures
//! - [`WatchState`] - where the loop is in its Idle → Debounced → Idle cycle
//! - [`WatchOptions`] - debounce and settle timings
//! - [`WatchStats`] - counters reported when the loop stops

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

use miette::Diagnostic;
use thiserror::Error;

/// Events for the same file closer together than this are collapsed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Pause after accepting an event so the editor can finish writing.
pub const DEFAULT_SETTLE: Duration = Duration::from_millis(50);

/// Error type for starting the watch loop.
///
/// These are fatal to daemon mode. Outputs produced by the initial pass are
/// kept.
#[derive(Debug, Error, Diagnostic)]
#[non_exhaustive]
pub enum WatchError {
    /// Failed to initialize the file watcher.
    #[error("failed to initialize file watcher: {message}")]
    #[diagnostic(
        code(hyde_config::watch::init_failed),
        help("check the inotify limits (fs.inotify.max_user_instances)")
    )]
    InitFailed {
        /// Human-readable error message.
        message: String,
        /// The underlying notify error, if available.
        #[source]
        source: Option<notify::Error>,
    },

    /// Failed to watch the source's directory.
    #[error("failed to watch path '{path}': {message}")]
    #[diagnostic(
        code(hyde_config::watch::path_error),
        help("Ensure the directory exists and you have read permissions")
    )]
    PathError {
        /// The path that could not be watched.
        path: PathBuf,
        /// Human-readable error message.
        message: String,
    },
}

impl WatchError {
    /// Create a new `InitFailed` error.
    pub fn init_failed(message: impl Into<String>, source: Option<notify::Error>) -> Self {
        Self::InitFailed {
            message: message.into(),
            source,
        }
    }

    /// Create a new `PathError`.
    pub fn path_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::PathError {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// State of the watch loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WatchState {
    /// Waiting for filesystem events.
    Idle,

    /// An event was accepted and a pass is running.
    Debounced,

    /// The event source closed; the loop has exited.
    Stopped,
}

impl Display for WatchState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),

            Self::Debounced => f.write_str("debounced"),

            Self::Stopped => f.write_str("stopped"),
        }
    }
}

/// Timing knobs for the watch loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct WatchOptions {
    /// Minimum gap between the last accepted modification and a new event.
    pub debounce: Duration,

    /// Sleep between accepting an event and running the pass.
    pub settle: Duration,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            settle: DEFAULT_SETTLE,
        }
    }
}

impl WatchOptions {
    /// Set the debounce interval.
    #[must_use]
    pub const fn debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Set the settle delay.
    #[must_use]
    pub const fn settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }
}

/// Counters collected over the lifetime of a watch loop.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct WatchStats {
    /// Events that named the source file.
    pub matched: u64,

    /// Events that triggered a pass.
    pub accepted: u64,

    /// Events dropped by the debounce window.
    pub debounced: u64,

    /// Passes that reported failure.
    pub failed_passes: u64,

    /// Events dropped because the source could not be stat'ed.
    pub stat_failures: u64,

    /// Errors reported by the watcher backend.
    pub watcher_errors: u64,
}
