//! Subscriber setup for the binary.

use std::error::Error as StdError;

use tracing_subscriber::EnvFilter;

/// How much the process logs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Verbosity {
    /// Warnings and errors only.
    #[default]
    Quiet,

    /// Adds progress messages and line dumps for unset outputs.
    Verbose,

    /// Adds per-key tracing.
    Debug,
}

impl Verbosity {
    /// `--debug` wins over `--verbose`.
    #[must_use]
    pub const fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            Self::Debug
        } else if verbose {
            Self::Verbose
        } else {
            Self::Quiet
        }
    }

    /// The [`EnvFilter`] directive for this level.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Quiet => "warn",

            Self::Verbose => "info",

            Self::Debug => "debug",
        }
    }
}

/// Install the global fmt subscriber on stderr.
///
/// `RUST_LOG` overrides the level chosen by the flags. Timestamps are only
/// printed in verbose and debug mode.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init(verbosity: Verbosity) -> Result<(), Box<dyn StdError + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    match verbosity {
        Verbosity::Quiet => builder.without_time().try_init(),

        Verbosity::Verbose | Verbosity::Debug => builder.try_init(),
    }
}
