//! Atomic output writing.
//!
//! A [`LineSet`] is written to `<target>.tmp`, flushed, synced to disk and
//! then renamed over the target. Readers of the target (a shell sourcing the
//! env file, Hyprland sourcing its config) therefore see either the previous
//! content or the complete new content, never a prefix of it. On any failure
//! the temp file is removed and the target is left as it was.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{info, warn};

use crate::flatten::{LineSet, OutputKind};

/// Error type for writing an output file.
#[derive(Debug, Error, Diagnostic)]
pub enum WriteError {
    /// Refused to replace a file with nothing.
    #[error("refusing to write an empty line set to {path}")]
    #[diagnostic(code(hyde_config::write::empty))]
    EmptyLineSet {
        /// The target that was left untouched.
        path: PathBuf,
    },

    /// The temp file could not be created.
    #[error("failed to create temp file {path}")]
    #[diagnostic(
        code(hyde_config::write::create),
        help("check that the output directory exists and is writable")
    )]
    Create {
        /// The temp file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Writing or flushing the temp file failed.
    #[error("failed to write temp file {path}")]
    #[diagnostic(code(hyde_config::write::write), help("check free disk space"))]
    Write {
        /// The temp file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// `fsync` on the temp file failed.
    #[error("failed to sync temp file {path} to disk")]
    #[diagnostic(code(hyde_config::write::sync))]
    Sync {
        /// The temp file path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Renaming the temp file over the target failed.
    #[error("failed to replace {to} with {from}")]
    #[diagnostic(
        code(hyde_config::write::rename),
        help("the temp file must be on the same filesystem as the target")
    )]
    Rename {
        /// The temp file path.
        from: PathBuf,
        /// The target path.
        to: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Where a rendered line set goes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Sink {
    /// Atomically replace this file.
    File(PathBuf),

    /// No path configured; emit each line as a log event.
    Log,
}

impl Sink {
    /// Builds a sink from an optional path; an empty path means [`Sink::Log`].
    #[must_use]
    pub fn from_path(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) if !path.as_os_str().is_empty() => Self::File(path),

            _ => Self::Log,
        }
    }

    /// The target path, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),

            Self::Log => None,
        }
    }

    /// Writes `lines` for `output`.
    ///
    /// # Errors
    ///
    /// Only file sinks fail; see [`write_atomic`].
    pub fn write(&self, output: OutputKind, lines: &LineSet) -> Result<(), WriteError> {
        match self {
            Self::File(path) => {
                write_atomic(path, lines)?;
                info!(%output, path = %path.display(), lines = lines.len(), "output written");
            }

            Self::Log => {
                info!(%output, "no output file specified");
                for line in lines {
                    info!(%output, "{line}");
                }
            }
        }

        Ok(())
    }
}

/// The sibling temp path for `target`: the file name with `.tmp` appended.
#[must_use]
pub fn temp_path(target: &Path) -> PathBuf {
    let mut name = OsString::from(target.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Atomically replaces `target` with `lines`, one per line, newline-terminated.
///
/// # Errors
///
/// Returns a [`WriteError`] for an empty line set or any failing I/O step.
/// The temp file never survives a failure.
pub fn write_atomic(target: &Path, lines: &LineSet) -> Result<(), WriteError> {
    write_atomic_with(target, lines, |from, to| fs::rename(from, to))
}

/// [`write_atomic`] with the final rename step supplied by the caller.
pub(crate) fn write_atomic_with<R>(
    target: &Path,
    lines: &LineSet,
    rename: R,
) -> Result<(), WriteError>
where
    R: FnOnce(&Path, &Path) -> io::Result<()>,
{
    if lines.is_empty() {
        return Err(WriteError::EmptyLineSet {
            path: target.to_path_buf(),
        });
    }

    let tmp = temp_path(target);

    let result = write_temp(&tmp, lines).and_then(|()| {
        rename(&tmp, target).map_err(|source| WriteError::Rename {
            from: tmp.clone(),
            to: target.to_path_buf(),
            source,
        })
    });

    if result.is_err()
        && tmp.exists()
        && let Err(e) = fs::remove_file(&tmp)
    {
        warn!(path = %tmp.display(), error = %e, "failed to remove temp file");
    }

    result
}

fn write_temp(tmp: &Path, lines: &LineSet) -> Result<(), WriteError> {
    let file = File::create(tmp).map_err(|source| WriteError::Create {
        path: tmp.to_path_buf(),
        source,
    })?;

    let write_err = |source| WriteError::Write {
        path: tmp.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);
    for line in lines {
        writer.write_all(line.as_bytes()).map_err(write_err)?;
        writer.write_all(b"\n").map_err(write_err)?;
    }

    let file = writer.into_inner().map_err(|e| write_err(e.into_error()))?;

    file.sync_all().map_err(|source| WriteError::Sync {
        path: tmp.to_path_buf(),
        source,
    })
}
