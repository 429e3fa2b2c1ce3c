//! Top-level error type.
//!
//! Each stage has its own error enum; [`Error`] wraps them with diagnostic
//! transparency so the binary can hand any failure to [`miette::Report`].
//!
//! | Variant | Stage | Effect |
//! |---------|-------|--------|
//! | [`Error::Load`] | reading / parsing the source | pass aborted, outputs untouched |
//! | [`Error::Watch`] | watcher setup | daemon mode not entered |
//! | [`Error::OutputDir`] | creating output directories | startup aborted |
//! | [`Error::PassFailed`] | one-off pass with a failed branch | non-zero exit |
//!
//! Flatten and write failures stay per branch in
//! [`BranchError`](crate::BranchError); they are logged by the pipeline and
//! surface here only as [`Error::PassFailed`].

use std::error::Error as StdError;
use std::fmt::Write as _;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::file::LoadError;
use crate::watch::WatchError;

/// Any failure the crate can report.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    /// The source document could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    /// The file watcher could not be started.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Watch(#[from] WatchError),

    /// An output directory could not be created.
    #[error("failed to create output directory {path}")]
    #[diagnostic(
        code(hyde_config::output_dir),
        help("check permissions on the parent of the output path")
    )]
    OutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// An output was not updated in one-off mode.
    #[error("configuration loaded but an output was not updated")]
    #[diagnostic(
        code(hyde_config::pass_failed),
        help("see the errors logged above")
    )]
    PassFailed,
}

/// Renders an error and its `source()` chain as `outer: inner: root`.
pub(crate) fn display_chain(err: &dyn StdError) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, ": {cause}");
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::WriteError;

    #[test]
    fn test_display_chain_includes_io_cause() {
        let err = WriteError::Create {
            path: PathBuf::from("/nope/config.tmp"),
            source: std::io::Error::other("permission denied"),
        };
        assert_eq!(
            display_chain(&err),
            "failed to create temp file /nope/config.tmp: permission denied"
        );
    }

    #[test]
    fn test_transparent_wrapping() {
        let err: Error = LoadError::Empty {
            path: "config.toml".into(),
        }
        .into();
        assert_eq!(err.to_string(), "configuration file is empty: config.toml");
    }
}
