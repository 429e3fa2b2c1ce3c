//! Source document loading.
//!
//! The loader turns the configuration file into an immutable
//! [`Document`](crate::Document). It refuses missing, zero-byte and
//! key-less files so a half-written save never reaches the flatteners.
//!
//! # Supported Formats
//!
//! | Format | Feature Flag | Extensions |
//! |--------|--------------|------------|
//! | TOML | `toml` (default) | `.toml`, anything unrecognized |
//! | JSON | always | `.json` |
//! | YAML | `yaml` | `.yaml`, `.yml` |

// LoadError carries the source text and span for miette diagnostics
#![allow(clippy::result_large_err)]

mod error;
mod format;
mod loader;

pub use error::LoadError;
pub use format::FileFormat;
pub use loader::DocumentLoader;
