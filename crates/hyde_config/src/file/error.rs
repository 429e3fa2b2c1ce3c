//! Document loading errors with rich diagnostics.

use miette::{Diagnostic, NamedSource, SourceSpan};

/// Error type for loading the source document.
///
/// Any of these aborts the current pass before either output is touched.
/// Parse errors carry the file content and a span so [`miette`] can point at
/// the offending line:
///
/// ```text
/// Error: TOML parse error in config.toml
///    ╭─[config.toml:3:8]
///    │
///  3 │ gaps_in = = 5
///    │           ^ invalid string
///    ╰────
///   help: check for missing quotes, invalid values, or syntax errors
/// ```
#[derive(Debug, Diagnostic, thiserror::Error)]
pub enum LoadError {
    /// Source file not found
    #[error("configuration file not found: {path}")]
    #[diagnostic(
        code(hyde_config::load::not_found),
        help("ensure the file exists at the specified path")
    )]
    NotFound {
        /// Path to the missing file
        path: String,
    },

    /// Failed to stat or read the file
    #[error("failed to read configuration file: {path}")]
    #[diagnostic(
        code(hyde_config::load::read_error),
        help("check file permissions and ensure it's readable")
    )]
    ReadError {
        /// Path to the file
        path: String,

        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file exists but has no bytes
    #[error("configuration file is empty: {path}")]
    #[diagnostic(
        code(hyde_config::load::empty_file),
        help("the file may still be being written; the next save will retrigger")
    )]
    Empty {
        /// Path to the file
        path: String,
    },

    /// Unknown file format
    #[error("unknown configuration file format: .{extension}")]
    #[diagnostic(
        code(hyde_config::load::unknown_format),
        help("supported formats: .toml, .json, .yaml, .yml")
    )]
    UnknownFormat {
        /// The file extension that wasn't recognized
        extension: String,
    },

    /// Parse error with source location
    #[error("{format} parse error in {path}")]
    #[diagnostic(code(hyde_config::load::parse_error))]
    Parse {
        /// Format name (JSON, TOML, YAML)
        format: &'static str,

        /// Path to the file
        path: String,

        /// The source file content for display
        #[source_code]
        src: NamedSource<String>,

        /// The location of the error
        #[label("{message}")]
        span: SourceSpan,

        /// Description of what went wrong
        message: String,

        /// Suggestion for how to fix
        #[help]
        help: String,
    },

    /// Parse error without source location (fallback)
    #[error("{format} parse error: {message}")]
    #[diagnostic(code(hyde_config::load::parse_error))]
    ParseNoSpan {
        /// Format name
        format: &'static str,

        /// Error message
        message: String,

        /// Suggestion for how to fix
        #[help]
        help: String,
    },

    /// The document parsed but is not a non-empty mapping
    #[error("configuration document has no keys: {path}")]
    #[diagnostic(
        code(hyde_config::load::empty_document),
        help("the top level of the document must be a table with at least one key")
    )]
    EmptyDocument {
        /// Path to the file
        path: String,
    },
}
