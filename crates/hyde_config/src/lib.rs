//! # hyde-config
//!
//! Turns one HyDE configuration document into two derived files and keeps
//! them in sync:
//!
//! - a shell **env file** of `export KEY=value` lines, for everything outside
//!   the `hyprland*` sections
//! - a **Hyprland fragment** of `$VARIABLE=value` lines, for everything
//!   inside them
//!
//! ## Example
//!
//! ```toml
//! [foo]
//! bar = true
//! baz = [1, 2]
//!
//! [hyprland.general]
//! gaps_in = 5
//! ```
//!
//! produces
//!
//! ```text
//! # env file
//! export FOO_BAR=true
//! export FOO_BAZ=("1" "2")
//!
//! # hyprland.conf
//! $GENERAL.GAPS_IN=5
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Type |
//! |-------|------|
//! | Load + parse | [`DocumentLoader`] → [`Document`] |
//! | Flatten (in parallel) | [`EnvFlattener`], [`HyprFlattener`] → [`LineSet`] |
//! | Write | [`Sink`] (atomic temp-file rename, or the log) |
//! | Orchestrate | [`Pipeline`] |
//! | Live reload | [`watch::watch`] |
//!
//! ```rust,ignore
//! use hyde_config::{Pipeline, Sink, watch};
//!
//! let pipeline = Pipeline::new(
//!     "config.toml",
//!     Sink::File("state/config".into()),
//!     Sink::File("state/hyprland.conf".into()),
//!     true,
//! );
//!
//! pipeline.run();
//! watch::watch(&pipeline, watch::WatchOptions::default())?;
//! ```

pub mod cli;
mod error;
pub mod file;
pub mod flatten;
pub mod logging;
pub mod output;
pub mod pipeline;
mod value;
pub mod watch;

pub use error::Error;
pub use file::{DocumentLoader, FileFormat, LoadError};
pub use flatten::{EnvFlattener, FlattenError, HyprFlattener, LineSet, OutputKind};
pub use output::{Sink, WriteError};
pub use pipeline::{BranchError, PassReport, Pipeline};
pub use value::{Document, Value};
pub use watch::{WatchError, WatchOptions};
