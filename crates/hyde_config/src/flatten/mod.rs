//! Flattening a [`Document`](crate::Document) into output lines.
//!
//! Two flatteners walk the same document and partition it:
//!
//! | Flattener | Keys it emits | Line shape |
//! |-----------|---------------|------------|
//! | [`EnvFlattener`] | everything outside `hyprland*` root sections | `[export ]FOO_BAR=value` |
//! | [`HyprFlattener`] | only `hyprland*` root sections and their descendants | `$SECTION.KEY=value` |
//!
//! Both are pure functions of the document: flattening the same document
//! twice produces identical [`LineSet`]s, and neither holds any state that
//! would need synchronizing when they run side by side.

mod env;
mod hypr;

use std::fmt::{self, Display, Formatter};

use miette::Diagnostic;
use thiserror::Error;

pub use env::EnvFlattener;
pub use hypr::HyprFlattener;

/// Name prefix that marks a root key as a Hyprland section.
pub const HYPR_PREFIX: &str = "hyprland";

/// Returns `true` if a root key belongs to the Hyprland output.
#[must_use]
pub fn is_hypr_section(key: &str) -> bool {
    key.starts_with(HYPR_PREFIX)
}

/// Which derived file a line set is destined for.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OutputKind {
    /// The shell environment file.
    Env,

    /// The Hyprland variable file.
    Hypr,
}

impl Display for OutputKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env => f.write_str("env"),

            Self::Hypr => f.write_str("hypr"),
        }
    }
}

/// Error produced when a flattener has nothing to emit.
#[derive(Debug, Error, Diagnostic)]
pub enum FlattenError {
    /// The document contains no keys for this output.
    #[error("no {output} lines generated from the document")]
    #[diagnostic(
        code(hyde_config::flatten::no_lines),
        help("the existing output file was left untouched")
    )]
    NoLines {
        /// The output that would have been written.
        output: OutputKind,
    },
}

/// The rendered lines of one output file, in emission order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LineSet {
    lines: Vec<String>,
}

impl LineSet {
    /// Create an empty line set.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    pub(crate) fn push(&mut self, line: String) {
        self.lines.push(line);
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if no lines were emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Returns `true` if any line is exactly `line`.
    #[must_use]
    pub fn contains(&self, line: &str) -> bool {
        self.iter().any(|l| l == line)
    }

    /// The exact file content: every line followed by a newline.
    #[must_use]
    pub fn contents(&self) -> String {
        let mut out = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    pub(crate) fn into_non_empty(self, output: OutputKind) -> Result<Self, FlattenError> {
        if self.is_empty() {
            Err(FlattenError::NoLines { output })
        } else {
            Ok(self)
        }
    }
}

impl<S: Into<String>> FromIterator<S> for LineSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contents_has_trailing_newline() {
        let lines: LineSet = ["A=1", "B=2"].into_iter().collect();
        assert_eq!(lines.contents(), "A=1\nB=2\n");
        assert_eq!(lines.len(), 2);
        assert!(lines.contains("B=2"));
    }

    #[test]
    fn test_empty_line_set_is_an_error() {
        let err = LineSet::new().into_non_empty(OutputKind::Hypr).unwrap_err();
        assert_eq!(err.to_string(), "no hypr lines generated from the document");
    }

    #[test]
    fn test_hypr_section_prefix() {
        assert!(is_hypr_section("hyprland"));
        assert!(is_hypr_section("hyprland-env"));
        assert!(is_hypr_section("hyprland_general"));
        assert!(!is_hypr_section("Hyprland"));
        assert!(!is_hypr_section("wallpaper"));
    }
}
