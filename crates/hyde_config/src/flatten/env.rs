//! Shell environment file flattener.

use tracing::debug;

use super::{FlattenError, LineSet, OutputKind, is_hypr_section};
use crate::value::{Document, Value};

/// Keys never emitted to the env file, at any depth.
///
/// `$schema` is additionally matched case-insensitively.
pub const RESERVED_KEYS: &[&str] = &[
    "$schema",
    "hyprland",
    "hyprland-ipc",
    "hyprland-env",
    "hyprland-start",
];

/// Flattens a document into `KEY=value` shell assignments.
///
/// Key paths are upper-cased and joined with `_`, so `[foo] bar = 1`
/// becomes `FOO_BAR=1`. Values are rendered by type:
///
/// | Value | Rendering |
/// |-------|-----------|
/// | sequence | `("a" "b")` (bash array) |
/// | boolean | `true` / `false` |
/// | integer, float | natural decimal form |
/// | string | `"text"` |
///
/// With export mode on every line is prefixed with `export `.
#[derive(Clone, Copy, Debug)]
pub struct EnvFlattener {
    export: bool,
}

impl EnvFlattener {
    /// Create a flattener; `export` selects `export KEY=value` lines.
    #[must_use]
    pub const fn new(export: bool) -> Self {
        Self { export }
    }

    /// Returns `true` if lines are prefixed with `export `.
    #[must_use]
    pub const fn export(&self) -> bool {
        self.export
    }

    /// Flatten `document` into env lines.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::NoLines`] if nothing outside the Hyprland
    /// sections produced a line.
    pub fn flatten(&self, document: &Document) -> Result<LineSet, FlattenError> {
        let mut lines = LineSet::new();
        self.visit(document, None, &mut lines);
        lines.into_non_empty(OutputKind::Env)
    }

    fn visit(&self, map: &Document, parent: Option<&str>, out: &mut LineSet) {
        for (key, value) in map {
            if is_reserved(key) || (parent.is_none() && is_hypr_section(key)) {
                debug!(key = %key, "skipping ignored key");
                continue;
            }

            if key.starts_with('$') {
                continue;
            }

            let path = match parent {
                Some(parent) => format!("{parent}_{}", key.to_uppercase()),
                None => key.to_uppercase(),
            };

            let rendered = match value {
                Value::Mapping(nested) => {
                    self.visit(nested, Some(&path), out);
                    continue;
                }

                Value::Sequence(items) => {
                    let quoted: Vec<String> =
                        items.iter().map(|item| format!("\"{item}\"")).collect();
                    format!("({})", quoted.join(" "))
                }

                Value::Boolean(b) => b.to_string(),

                Value::Integer(_) | Value::Float(_) => value.to_string(),

                Value::String(s) => format!("\"{s}\""),
            };

            out.push(self.line(&path, &rendered));
        }
    }

    fn line(&self, key: &str, value: &str) -> String {
        if self.export {
            format!("export {key}={value}")
        } else {
            format!("{key}={value}")
        }
    }
}

fn is_reserved(key: &str) -> bool {
    key.eq_ignore_ascii_case("$schema") || RESERVED_KEYS.contains(&key)
}
