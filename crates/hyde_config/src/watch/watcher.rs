//! The filesystem watch loop.
//!
//! [`SourceWatch`] owns the debounce state and drives the
//! Idle → Debounced → Idle cycle from two channels: filesystem events and
//! watcher errors. [`watch`] wires it to a `notify` watcher on the source's
//! parent directory and a [`Pipeline`].

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::SystemTime;

use crossbeam_channel::{Receiver, bounded, select};
use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, error, info};

use super::debounce::Debouncer;
use super::types::{WatchError, WatchOptions, WatchState, WatchStats};
use crate::pipeline::Pipeline;

/// Capacity of the event channel between notify and the loop.
const EVENT_CAPACITY: usize = 100;

/// Capacity of the error channel between notify and the loop.
const ERROR_CAPACITY: usize = 16;

/// Watch state for one source file.
#[derive(Debug)]
pub struct SourceWatch {
    source: PathBuf,
    directory: PathBuf,
    file_name: OsString,
    options: WatchOptions,
    debouncer: Debouncer,
    state: WatchState,
    stats: WatchStats,
}

impl SourceWatch {
    /// Create the watch state for `source`. The debounce window starts now.
    ///
    /// # Errors
    ///
    /// Returns [`WatchError::PathError`] if `source` has no file name.
    pub fn new(source: impl Into<PathBuf>, options: WatchOptions) -> Result<Self, WatchError> {
        let source = source.into();

        let file_name = source
            .file_name()
            .ok_or_else(|| WatchError::path_error(&source, "path has no file name"))?
            .to_os_string();

        let directory = match source.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        Ok(Self {
            debouncer: Debouncer::new(options.debounce),
            source,
            directory,
            file_name,
            options,
            state: WatchState::Idle,
            stats: WatchStats::default(),
        })
    }

    /// The watched source file.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The directory registered with the watcher.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Current loop state.
    #[must_use]
    pub const fn state(&self) -> WatchState {
        self.state
    }

    /// Counters so far.
    #[must_use]
    pub const fn stats(&self) -> WatchStats {
        self.stats
    }

    /// Returns `true` if any path of `event` has the source's file name.
    fn names_source(&self, event: &Event) -> bool {
        event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(self.file_name.as_os_str()))
    }

    /// Handles one filesystem event, running `reprocess` if it is accepted.
    ///
    /// Returns the state after handling, which is always
    /// [`WatchState::Idle`] unless the loop has stopped.
    pub fn handle_event<F>(&mut self, event: &Event, reprocess: &mut F) -> WatchState
    where
        F: FnMut() -> bool,
    {
        if !self.names_source(event) {
            return self.state;
        }

        self.stats.matched += 1;
        debug!(kind = ?event.kind, paths = ?event.paths, "received event");

        if !is_write_or_create(&event.kind) {
            return self.state;
        }

        let metadata = match std::fs::metadata(&self.source) {
            Ok(metadata) => metadata,
            Err(e) => {
                self.stats.stat_failures += 1;
                error!(path = %self.source.display(), error = %e, "failed to stat file");
                return self.state;
            }
        };

        let modified = metadata.modified().unwrap_or_else(|_| SystemTime::now());

        if !self.debouncer.try_accept(SystemTime::now(), modified) {
            self.stats.debounced += 1;
            debug!("skipping event, within debounce interval");
            return self.state;
        }

        self.stats.accepted += 1;
        self.state = WatchState::Debounced;
        info!(
            path = %self.source.display(),
            bytes = metadata.len(),
            "config file changed, reprocessing"
        );

        thread::sleep(self.options.settle);

        if !reprocess() {
            self.stats.failed_passes += 1;
        }

        self.state = WatchState::Idle;
        self.state
    }

    /// Logs a watcher backend error; the loop keeps running.
    pub fn handle_error(&mut self, err: &notify::Error) {
        self.stats.watcher_errors += 1;
        error!(error = %err, "watcher error");
    }

    /// Runs until either channel closes, then returns the collected stats.
    pub fn run<F>(
        &mut self,
        events: &Receiver<Event>,
        errors: &Receiver<notify::Error>,
        mut reprocess: F,
    ) -> WatchStats
    where
        F: FnMut() -> bool,
    {
        self.state = WatchState::Idle;

        loop {
            select! {
                recv(events) -> msg => match msg {
                    Ok(event) => {
                        self.handle_event(&event, &mut reprocess);
                    }
                    Err(_) => break,
                },

                recv(errors) -> msg => match msg {
                    Ok(err) => self.handle_error(&err),
                    Err(_) => break,
                },
            }
        }

        self.state = WatchState::Stopped;
        info!(stats = ?self.stats, "watcher channel closed, stopping");
        self.stats
    }
}

/// Returns `true` for event kinds that mean the file has new content.
fn is_write_or_create(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_)
            | EventKind::Modify(
                ModifyKind::Any
                    | ModifyKind::Data(_)
                    | ModifyKind::Name(RenameMode::To | RenameMode::Both)
            )
    )
}

/// Create a notify watcher on `directory` that splits its results onto an
/// event channel and an error channel.
///
/// The channels close when the returned watcher is dropped.
pub fn start_notify(
    directory: &Path,
) -> Result<(RecommendedWatcher, Receiver<Event>, Receiver<notify::Error>), WatchError> {
    let (event_tx, event_rx) = bounded::<Event>(EVENT_CAPACITY);
    let (error_tx, error_rx) = bounded::<notify::Error>(ERROR_CAPACITY);

    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        // Send only fails once the loop is gone
        match res {
            Ok(event) => {
                let _ = event_tx.send(event);
            }
            Err(e) => {
                let _ = error_tx.send(e);
            }
        }
    })
    .map_err(|e| WatchError::init_failed(format!("failed to create file watcher: {e}"), Some(e)))?;

    watcher
        .watch(directory, RecursiveMode::NonRecursive)
        .map_err(|e| WatchError::path_error(directory, format!("failed to watch: {e}")))?;

    Ok((watcher, event_rx, error_rx))
}

/// Watches the pipeline's source and reruns the pipeline on every accepted
/// change. Blocks until the watcher's channels close.
///
/// # Errors
///
/// Returns a [`WatchError`] if the watcher cannot be created or the
/// source's directory cannot be registered.
pub fn watch(pipeline: &Pipeline, options: WatchOptions) -> Result<WatchStats, WatchError> {
    let mut source_watch = SourceWatch::new(pipeline.source(), options)?;
    let (_watcher, events, errors) = start_notify(source_watch.directory())?;

    info!(
        directory = %source_watch.directory().display(),
        file = %source_watch.file_name.to_string_lossy(),
        "watching for changes"
    );

    Ok(source_watch.run(&events, &errors, || pipeline.run()))
}
