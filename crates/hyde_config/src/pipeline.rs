//! One full reprocessing pass: load, flatten both outputs, write both.
//!
//! ```text
//!                      ┌──────────────┐     ┌──────────┐
//!                 ┌───▶│ EnvFlattener │────▶│ env Sink │
//! ┌────────────┐  │    └──────────────┘     └──────────┘
//! │ Document   │──┤         (rayon::join)
//! │ (shared,   │  │    ┌───────────────┐    ┌───────────┐
//! │ read-only) │  └───▶│ HyprFlattener │───▶│ hypr Sink │
//! └────────────┘       └───────────────┘    └───────────┘
//! ```
//!
//! The two branches never share mutable state, and a failure in one does
//! not stop the other from writing.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, error};

use crate::error::display_chain;
use crate::file::{DocumentLoader, LoadError};
use crate::flatten::{EnvFlattener, FlattenError, HyprFlattener, LineSet, OutputKind};
use crate::output::{Sink, WriteError};

/// Why one output branch of a pass did not produce a file.
#[derive(Debug, Error, Diagnostic)]
pub enum BranchError {
    /// The flattener produced no lines.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Flatten(#[from] FlattenError),

    /// The output could not be written.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Write(#[from] WriteError),
}

/// Outcome of a pass whose document loaded successfully.
#[derive(Debug)]
pub struct PassReport {
    /// Lines written to the env output, or why not.
    pub env: Result<usize, BranchError>,

    /// Lines written to the hypr output, or why not.
    pub hypr: Result<usize, BranchError>,
}

impl PassReport {
    /// Returns `true` if both outputs were written.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.env.is_ok() && self.hypr.is_ok()
    }

    /// Logs an error for each output that was not updated.
    pub fn log_failures(&self) {
        let branches = [(OutputKind::Env, &self.env), (OutputKind::Hypr, &self.hypr)];

        for (output, result) in branches {
            if let Err(e) = result {
                error!(%output, error = %display_chain(e), "output not updated");
            }
        }
    }
}

/// The full source → outputs transformation.
#[derive(Clone, Debug)]
pub struct Pipeline {
    source: PathBuf,
    env: Sink,
    hypr: Sink,
    export: bool,
}

impl Pipeline {
    /// Create a pipeline reading `source` and writing to the two sinks.
    #[must_use]
    pub fn new(source: impl Into<PathBuf>, env: Sink, hypr: Sink, export: bool) -> Self {
        Self {
            source: source.into(),
            env,
            hypr,
            export,
        }
    }

    /// The source document path.
    #[must_use]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The env output sink.
    #[must_use]
    pub const fn env_sink(&self) -> &Sink {
        &self.env
    }

    /// The hypr output sink.
    #[must_use]
    pub const fn hypr_sink(&self) -> &Sink {
        &self.hypr
    }

    /// Returns `true` if env lines are prefixed with `export `.
    #[must_use]
    pub const fn export(&self) -> bool {
        self.export
    }

    /// Runs one pass and logs every failure.
    ///
    /// Returns `true` only if the document loaded and both outputs were
    /// written.
    pub fn run(&self) -> bool {
        match self.run_pass() {
            Ok(report) => {
                report.log_failures();
                report.is_success()
            }

            Err(e) => {
                error!(
                    path = %self.source.display(),
                    error = %display_chain(&e),
                    "failed to load configuration, outputs left untouched"
                );
                false
            }
        }
    }

    /// Runs one pass and returns what happened to each output.
    ///
    /// # Errors
    ///
    /// Returns the [`LoadError`] if the document could not be loaded; in
    /// that case neither output is touched.
    pub fn run_pass(&self) -> Result<PassReport, LoadError> {
        let document = DocumentLoader::load(&self.source)?;
        let env_flattener = EnvFlattener::new(self.export);
        let hypr_flattener = HyprFlattener::new();

        let (env, hypr) = rayon::join(
            || Self::branch(OutputKind::Env, &self.env, || env_flattener.flatten(&document)),
            || {
                Self::branch(OutputKind::Hypr, &self.hypr, || {
                    hypr_flattener.flatten(&document)
                })
            },
        );

        Ok(PassReport { env, hypr })
    }

    fn branch<F>(output: OutputKind, sink: &Sink, flatten: F) -> Result<usize, BranchError>
    where
        F: FnOnce() -> Result<LineSet, FlattenError>,
    {
        let lines = flatten()?;
        debug!(%output, lines = lines.len(), "generated lines");

        sink.write(output, &lines)?;
        Ok(lines.len())
    }
}
