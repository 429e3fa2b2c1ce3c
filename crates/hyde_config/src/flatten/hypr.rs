//! Hyprland variable file flattener.
//!
//! Only root keys starting with `hyprland`, and everything below them, are
//! emitted. Keys are rewritten into Hyprland variables:
//!
//! | Document path | Line |
//! |---------------|------|
//! | `hyprland.gaps_in = 5` | `$GAPS_IN=5` |
//! | `hyprland.general.gaps_in = 5` | `$GENERAL.GAPS_IN=5` |
//! | `hyprland-env.QT_STYLE = "kvantum"` | `$env.QT_STYLE=kvantum` |
//! | `hyprland_general.hyprland_gaps = 5` | `general_gaps=5` |

use tracing::debug;

use super::{FlattenError, HYPR_PREFIX, LineSet, OutputKind, is_hypr_section};
use crate::value::{Document, Value};

/// Prefix stripped from every in-scope key name before rewriting.
const STRIP_PREFIX: &str = "hyprland_";

/// Separators allowed between `hyprland` and a section namespace.
const NAMESPACE_SEPARATORS: [char; 3] = ['-', '_', '.'];

/// Flattens the `hyprland*` sections of a document into Hyprland variables.
///
/// Values are never quoted: sequences are joined with `, `, scalars use
/// their natural form.
#[derive(Clone, Copy, Debug, Default)]
pub struct HyprFlattener;

impl HyprFlattener {
    /// Create a flattener.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Flatten the Hyprland sections of `document`.
    ///
    /// # Errors
    ///
    /// Returns [`FlattenError::NoLines`] if the document has no
    /// `hyprland*` section with at least one leaf.
    pub fn flatten(&self, document: &Document) -> Result<LineSet, FlattenError> {
        let mut lines = LineSet::new();

        for (key, value) in document {
            if !is_hypr_section(key) {
                debug!(key = %key, "skipping non-hyprland key");
                continue;
            }

            debug!(key = %key, "found hyprland section");
            self.emit("", key, value, &mut lines);
        }

        lines.into_non_empty(OutputKind::Hypr)
    }

    fn emit(&self, parent: &str, key: &str, value: &Value, out: &mut LineSet) {
        let path = rewrite_key(parent, key);

        let rendered = match value {
            Value::Mapping(nested) => {
                for (child_key, child) in nested {
                    self.emit(&path, child_key, child, out);
                }
                return;
            }

            Value::Sequence(items) => items
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),

            Value::Boolean(_) | Value::Integer(_) | Value::Float(_) | Value::String(_) => {
                value.to_string()
            }
        };

        out.push(format!("{path}={rendered}"));
    }
}

/// Computes the output key for `key` nested under the rewritten `parent`.
///
/// 1. A leading `hyprland_` is stripped from `key`.
/// 2. At the root the stripped key is the path.
/// 3. Under a `hyprland*` section root the key becomes a variable,
///    namespaced by whatever follows `hyprland` and one separator.
/// 4. Under an existing `$` variable the upper-cased key is appended
///    with `.`.
/// 5. Otherwise the key is joined to the parent with `_`, case preserved.
#[must_use]
pub fn rewrite_key(parent: &str, key: &str) -> String {
    let stripped = key.strip_prefix(STRIP_PREFIX).unwrap_or(key);

    if parent.is_empty() {
        return stripped.to_string();
    }

    if let Some(rest) = parent.strip_prefix(HYPR_PREFIX) {
        let namespace = rest.strip_prefix(NAMESPACE_SEPARATORS).unwrap_or(rest);
        return if namespace.is_empty() {
            format!("${}", stripped.to_uppercase())
        } else {
            format!("${namespace}.{}", stripped.to_uppercase())
        };
    }

    if parent.starts_with('$') {
        return format!("{parent}.{}", stripped.to_uppercase());
    }

    format!("{parent}_{stripped}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(pairs: Vec<(&str, Value)>) -> Document {
        pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
    }

    #[test]
    fn test_rewrite_key_rules() {
        assert_eq!(rewrite_key("", "hyprland"), "hyprland");
        assert_eq!(rewrite_key("", "hyprland_general"), "general");
        assert_eq!(rewrite_key("hyprland", "gaps_in"), "$GAPS_IN");
        assert_eq!(rewrite_key("hyprland", "hyprland_gaps"), "$GAPS");
        assert_eq!(rewrite_key("hyprland-env", "QT_style"), "$env.QT_STYLE");
        assert_eq!(rewrite_key("hyprland-start", "bar"), "$start.BAR");
        assert_eq!(rewrite_key("$GENERAL", "gaps_in"), "$GENERAL.GAPS_IN");
        assert_eq!(rewrite_key("general", "hyprland_gaps"), "general_gaps");
        assert_eq!(rewrite_key("general", "Border"), "general_Border");
    }

    #[test]
    fn test_namespace_offset_follows_prefix_length() {
        // Without a separator nothing past the prefix is dropped
        assert_eq!(rewrite_key("hyprlandfoo", "x"), "$foo.X");
        assert_eq!(rewrite_key("hyprland.ipc", "x"), "$ipc.X");
    }

    #[test]
    fn test_nested_section_lines() {
        let document = doc(vec![(
            "hyprland",
            Value::Mapping(doc(vec![(
                "general",
                Value::Mapping(doc(vec![("gaps_in", Value::Integer(5))])),
            )])),
        )]);

        let lines = HyprFlattener::new().flatten(&document).unwrap();
        assert_eq!(lines.contents(), "$GENERAL.GAPS_IN=5\n");
    }

    #[test]
    fn test_values_are_unquoted() {
        let document = doc(vec![(
            "hyprland",
            Value::Mapping(doc(vec![
                ("font", Value::from("JetBrains Mono")),
                ("blur", Value::Boolean(true)),
                ("opacity", Value::Float(0.9)),
                ("monitors", Value::from(vec!["DP-1", "HDMI-A-1"])),
            ])),
        )]);

        let lines = HyprFlattener::new().flatten(&document).unwrap();
        assert!(lines.contains("$FONT=JetBrains Mono"));
        assert!(lines.contains("$BLUR=true"));
        assert!(lines.contains("$OPACITY=0.9"));
        assert!(lines.contains("$MONITORS=DP-1, HDMI-A-1"));
    }

    #[test]
    fn test_non_hypr_roots_ignored() {
        let document = doc(vec![
            (
                "foo",
                Value::Mapping(doc(vec![("hyprland_x", Value::Integer(1))])),
            ),
            ("hyprland-env", Value::Mapping(doc(vec![("A", Value::Integer(2))]))),
        ]);

        let lines = HyprFlattener::new().flatten(&document).unwrap();
        assert_eq!(lines.contents(), "$env.A=2\n");
    }

    #[test]
    fn test_no_hypr_sections_is_no_lines() {
        let document = doc(vec![("theme", Value::from("dark"))]);
        let err = HyprFlattener::new().flatten(&document).unwrap_err();
        assert!(matches!(
            err,
            FlattenError::NoLines {
                output: OutputKind::Hypr
            }
        ));
    }
}
