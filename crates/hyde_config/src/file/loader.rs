//! Reading and parsing the source document.

use std::io::ErrorKind;
use std::path::Path;

use miette::{NamedSource, SourceSpan};
use serde_json as SJSON;
use tracing::debug;

#[cfg(feature = "yaml")]
use serde_saphyr as YAML;

#[cfg(feature = "toml")]
use toml as TOML;

use super::error::LoadError;
use super::format::FileFormat;
use crate::value::{Document, Value};

/// Loads the source document from disk.
///
/// Loading validates, in order: the file exists, it has at least one byte,
/// it parses in its detected format, and the top level is a non-empty
/// mapping. The returned [`Document`] is owned and never mutated afterwards,
/// so it can be shared read-only between the two flatteners.
pub struct DocumentLoader;

impl DocumentLoader {
    /// Reads and parses the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] naming the first precondition that failed.
    pub fn load(path: &Path) -> Result<Document, LoadError> {
        let path_str = path.display().to_string();

        let metadata = std::fs::metadata(path).map_err(|e| Self::io_error(&path_str, e))?;
        if metadata.len() == 0 {
            return Err(LoadError::Empty { path: path_str });
        }

        let bytes = std::fs::read(path).map_err(|e| Self::io_error(&path_str, e))?;

        // The file can be truncated between the stat and the read
        if bytes.is_empty() {
            return Err(LoadError::Empty { path: path_str });
        }

        debug!(path = %path_str, bytes = bytes.len(), "read configuration file");

        let format = FileFormat::detect(path).ok_or_else(|| LoadError::UnknownFormat {
            extension: path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("unknown")
                .to_string(),
        })?;

        let content =
            String::from_utf8(bytes).map_err(|e| Self::utf8_error(&e, format, path))?;

        let document = Self::parse_str(&content, format, path)?;

        debug!(path = %path_str, keys = document.len(), "configuration document loaded");

        Ok(document)
    }

    /// Parses document text with an explicit format.
    ///
    /// `path` is only used to label diagnostics.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] / [`LoadError::ParseNoSpan`] on syntax
    /// errors and [`LoadError::EmptyDocument`] when the top level has no keys.
    pub fn parse_str(
        content: &str,
        format: FileFormat,
        path: &Path,
    ) -> Result<Document, LoadError> {
        let document = match format {
            FileFormat::Json => {
                let json: SJSON::Value = SJSON::from_str(content)
                    .map_err(|e| Self::json_parse_error(&e, content, path))?;
                Self::top_level_mapping(json, format)?
            }

            #[cfg(feature = "toml")]
            FileFormat::Toml => {
                let table: TOML::Table = TOML::from_str(content)
                    .map_err(|e| Self::toml_parse_error(&e, content, path))?;
                crate::value::document_from_toml(table)
            }

            #[cfg(feature = "yaml")]
            FileFormat::Yaml => {
                let yaml: SJSON::Value = YAML::from_str(content)
                    .map_err(|e| Self::yaml_parse_error(&e, content, path))?;
                Self::top_level_mapping(yaml, format)?
            }
        };

        if document.is_empty() {
            return Err(LoadError::EmptyDocument {
                path: path.display().to_string(),
            });
        }

        Ok(document)
    }

    fn io_error(path: &str, e: std::io::Error) -> LoadError {
        if e.kind() == ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_string(),
            }
        } else {
            LoadError::ReadError {
                path: path.to_string(),
                source: e,
            }
        }
    }

    fn top_level_mapping(json: SJSON::Value, format: FileFormat) -> Result<Document, LoadError> {
        match Value::from_json(json) {
            Value::Mapping(document) => Ok(document),

            other => Err(LoadError::ParseNoSpan {
                format: format.name(),
                message: format!("top level is a {}, expected a mapping", other.kind()),
                help: "wrap the configuration in a top-level object".to_string(),
            }),
        }
    }

    // ============================================================================
    // Diagnostics
    // ============================================================================

    /// Converts a byte offset to a [`SourceSpan`] covering the next token.
    fn offset_to_span(offset: usize, content: &str) -> SourceSpan {
        let offset = offset.min(content.len());
        let remaining = content.get(offset..).unwrap_or_default();
        let len = remaining
            .find(|c: char| c.is_whitespace() || c == ',' || c == '}' || c == ']')
            .unwrap_or_else(|| remaining.len().min(20))
            .max(1);

        SourceSpan::new(offset.into(), len)
    }

    /// Convert line/column (1-indexed) to byte offset.
    fn line_col_to_offset(content: &str, line: usize, col: usize) -> usize {
        let mut offset = 0;

        for (i, l) in content.lines().enumerate() {
            if (i + 1) == line {
                return offset + col.saturating_sub(1);
            }

            offset += l.len() + 1;
        }

        offset
    }

    /// Maps invalid UTF-8 to a parse error at the first bad byte.
    fn utf8_error(e: &std::string::FromUtf8Error, format: FileFormat, path: &Path) -> LoadError {
        let offset = e.utf8_error().valid_up_to();
        let content = String::from_utf8_lossy(e.as_bytes()).into_owned();
        let invalid = e.utf8_error().error_len().unwrap_or(1);

        LoadError::Parse {
            format: format.name(),
            path: path.display().to_string(),
            span: SourceSpan::new(offset.into(), invalid),
            src: NamedSource::new(path.display().to_string(), content),
            message: format!("invalid UTF-8 at byte {offset}"),
            help: "save the file as UTF-8".to_string(),
        }
    }

    fn json_parse_error(e: &SJSON::Error, content: &str, path: &Path) -> LoadError {
        let offset = Self::line_col_to_offset(content, e.line(), e.column());

        LoadError::Parse {
            format: "JSON",
            path: path.display().to_string(),
            src: NamedSource::new(path.display().to_string(), content.to_string()),
            span: Self::offset_to_span(offset, content),
            message: e.to_string(),
            help: "check for missing commas, quotes, or brackets".to_string(),
        }
    }

    #[cfg(feature = "toml")]
    fn toml_parse_error(e: &TOML::de::Error, content: &str, path: &Path) -> LoadError {
        let help = "check for missing quotes, invalid values, or syntax errors".to_string();

        match e.span() {
            Some(span) => LoadError::Parse {
                format: "TOML",
                path: path.display().to_string(),
                src: NamedSource::new(path.display().to_string(), content.to_string()),
                span: SourceSpan::new(span.start.into(), span.end - span.start),
                message: e.message().to_string(),
                help,
            },

            None => LoadError::ParseNoSpan {
                format: "TOML",
                message: e.to_string(),
                help,
            },
        }
    }

    #[cfg(feature = "yaml")]
    fn yaml_parse_error(e: &YAML::Error, content: &str, path: &Path) -> LoadError {
        let msg = e.to_string();
        let help = "check indentation and ensure proper YAML syntax".to_string();

        match Self::extract_yaml_location(&msg) {
            Some((line, col)) => {
                let offset = Self::line_col_to_offset(content, line, col);

                LoadError::Parse {
                    format: "YAML",
                    path: path.display().to_string(),
                    src: NamedSource::new(path.display().to_string(), content.to_string()),
                    span: Self::offset_to_span(offset, content),
                    message: msg,
                    help,
                }
            }

            None => LoadError::ParseNoSpan {
                format: "YAML",
                message: msg,
                help,
            },
        }
    }

    /// Try to extract line/column from a YAML error message.
    #[cfg(feature = "yaml")]
    fn extract_yaml_location(msg: &str) -> Option<(usize, usize)> {
        let after_line = msg.split_once("line ")?.1;
        let line_end = after_line.find(|c: char| !c.is_ascii_digit())?;
        let line = after_line.get(..line_end)?.parse::<usize>().ok()?;

        let after_col = after_line.split_once("column ")?.1;
        let col_end = after_col
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(after_col.len());
        let col = after_col.get(..col_end)?.parse::<usize>().ok()?;

        Some((line, col))
    }
}
