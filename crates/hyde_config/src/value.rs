//! The parsed document model.
//!
//! Every supported input format is converted into the closed [`Value`] union
//! so the flatteners can match exhaustively on it. A [`Document`] is the root
//! mapping; it is a [`BTreeMap`] so iteration order, and therefore every
//! rendered line set, is deterministic.
//!
//! ```rust,ignore
//! use hyde_config::{Document, Value};
//!
//! let mut doc = Document::new();
//! doc.insert("gaps_in".to_string(), Value::Integer(5));
//! assert_eq!(doc["gaps_in"].to_string(), "5");
//! ```

use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};
use std::ops::Range;

use serde_json as SJSON;

/// Root mapping of a configuration document, keyed by string.
pub type Document = BTreeMap<String, Value>;

/// A value in a parsed configuration document.
///
/// | Variant | Source types |
/// |---------|--------------|
/// | `Mapping` | TOML table, JSON object, YAML mapping |
/// | `Sequence` | TOML array, JSON/YAML array |
/// | `Boolean` | `true` / `false` |
/// | `Integer` | integers that fit in `i64` |
/// | `Float` | floats, and integers outside `i64` |
/// | `String` | strings, TOML datetimes, `null` (as `""`) |
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A nested mapping.
    Mapping(Document),

    /// An ordered list of values.
    Sequence(Vec<Value>),

    /// A boolean.
    Boolean(bool),

    /// A signed integer.
    Integer(i64),

    /// A floating-point number.
    Float(f64),

    /// Any other scalar, in its string form.
    String(String),
}

impl Value {
    /// Returns the nested mapping, if this is one.
    #[must_use]
    pub const fn as_mapping(&self) -> Option<&Document> {
        match self {
            Self::Mapping(map) => Some(map),

            _ => None,
        }
    }

    /// Short name of the variant, for log output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Mapping(_) => "mapping",

            Self::Sequence(_) => "sequence",

            Self::Boolean(_) => "boolean",

            Self::Integer(_) => "integer",

            Self::Float(_) => "float",

            Self::String(_) => "string",
        }
    }

    /// Converts a JSON value (also the target of YAML parsing).
    pub(crate) fn from_json(json: SJSON::Value) -> Self {
        match json {
            SJSON::Value::Null => Self::String(String::new()),

            SJSON::Value::Bool(b) => Self::Boolean(b),

            SJSON::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::Float(n.as_f64().unwrap_or(f64::NAN)),
            },

            SJSON::Value::String(s) => Self::String(s),

            SJSON::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from_json).collect())
            }

            SJSON::Value::Object(map) => Self::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts a TOML value.
    #[cfg(feature = "toml")]
    pub(crate) fn from_toml(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::String(s),

            toml::Value::Integer(i) => Self::Integer(i),

            toml::Value::Float(f) => Self::Float(f),

            toml::Value::Boolean(b) => Self::Boolean(b),

            toml::Value::Datetime(dt) => Self::String(dt.to_string()),

            toml::Value::Array(items) => {
                Self::Sequence(items.into_iter().map(Self::from_toml).collect())
            }

            toml::Value::Table(table) => Self::Mapping(document_from_toml(table)),
        }
    }
}

/// Converts a parsed TOML table into a [`Document`].
#[cfg(feature = "toml")]
pub(crate) fn document_from_toml(table: toml::Table) -> Document {
    table
        .into_iter()
        .map(|(k, v)| (k, Value::from_toml(v)))
        .collect()
}

/// Magnitudes outside this range render in shortest exponent form.
const PLAIN_FLOAT_RANGE: Range<f64> = 1e-5..1e16;

fn write_float(f: &mut Formatter<'_>, x: f64) -> fmt::Result {
    let magnitude = x.abs();

    if x.is_finite() && magnitude != 0.0 && !PLAIN_FLOAT_RANGE.contains(&magnitude) {
        write!(f, "{x:e}")
    } else {
        write!(f, "{x}")
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean(b) => write!(f, "{b}"),

            Self::Integer(i) => write!(f, "{i}"),

            Self::Float(x) => write_float(f, *x),

            Self::String(s) => f.write_str(s),

            Self::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }

            Self::Mapping(map) => {
                f.write_str("{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{k} = {v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Document> for Value {
    fn from(map: Document) -> Self {
        Self::Mapping(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display_is_natural() {
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Integer(-42).to_string(), "-42");
        assert_eq!(Value::Float(1.5).to_string(), "1.5");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::from("Catppuccin Mocha").to_string(), "Catppuccin Mocha");
    }

    #[test]
    fn test_float_display_extremes() {
        assert_eq!(Value::Float(1e300).to_string(), "1e300");
        assert_eq!(Value::Float(-2.5e20).to_string(), "-2.5e20");
        assert_eq!(Value::Float(1.5e-7).to_string(), "1.5e-7");
        assert_eq!(Value::Float(123_456.75).to_string(), "123456.75");
        assert_eq!(Value::Float(0.0).to_string(), "0");
        assert_eq!(Value::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(Value::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Value::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(
            Value::Float(u64::MAX as f64).to_string(),
            "1.8446744073709552e19"
        );
    }

    #[test]
    fn test_container_display() {
        let seq = Value::from(vec![1_i64, 2]);
        assert_eq!(seq.to_string(), "[1, 2]");

        let mut map = Document::new();
        map.insert("a".into(), Value::Integer(1));
        map.insert("b".into(), Value::from("x"));
        assert_eq!(Value::Mapping(map).to_string(), "{a = 1, b = x}");
    }

    #[test]
    fn test_from_json_numbers() {
        let json = SJSON::json!({"small": 5, "big": u64::MAX, "frac": 0.25, "none": null});
        let Value::Mapping(map) = Value::from_json(json) else {
            panic!("expected mapping");
        };

        assert_eq!(map["small"], Value::Integer(5));
        assert!(matches!(map["big"], Value::Float(_)));
        assert_eq!(map["frac"], Value::Float(0.25));
        assert_eq!(map["none"], Value::String(String::new()));
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_from_toml_datetime_is_string() {
        let table: toml::Table = toml::from_str("at = 1979-05-27T07:32:00Z").unwrap();
        let doc = document_from_toml(table);
        assert_eq!(doc["at"], Value::String("1979-05-27T07:32:00Z".into()));
        assert_eq!(doc["at"].kind(), "string");
    }
}
