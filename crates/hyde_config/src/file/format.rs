//! Source document format detection.
//!
//! | Format | Feature | Extensions |
//! |--------|---------|------------|
//! | TOML | `toml` (default) | `.toml`, or no/unknown extension |
//! | JSON | always | `.json` |
//! | YAML | `yaml` | `.yaml`, `.yml` |

use std::path::Path;

/// Supported source document formats.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FileFormat {
    /// JSON format (`.json` extension).
    Json,

    /// TOML format (`.toml` extension).
    ///
    /// Requires the `toml` feature flag.
    #[cfg(feature = "toml")]
    Toml,

    /// YAML format (`.yaml` or `.yml` extension).
    ///
    /// Requires the `yaml` feature flag.
    #[cfg(feature = "yaml")]
    Yaml,
}

impl FileFormat {
    /// Detects the format from the file extension.
    ///
    /// Returns `None` if the extension is not recognized or if the
    /// required feature flag is not enabled.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;

        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),

            #[cfg(feature = "toml")]
            "toml" => Some(Self::Toml),

            #[cfg(feature = "yaml")]
            "yaml" | "yml" => Some(Self::Yaml),

            _ => None,
        }
    }

    /// Detects the format, treating anything unrecognized as TOML when the
    /// `toml` feature is enabled.
    #[must_use]
    pub fn detect(path: &Path) -> Option<Self> {
        Self::from_path(path).or(Self::fallback())
    }

    #[cfg(feature = "toml")]
    const fn fallback() -> Option<Self> {
        Some(Self::Toml)
    }

    #[cfg(not(feature = "toml"))]
    const fn fallback() -> Option<Self> {
        None
    }

    /// Get the format name for error messages.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Json => "JSON",

            #[cfg(feature = "toml")]
            Self::Toml => "TOML",

            #[cfg(feature = "yaml")]
            Self::Yaml => "YAML",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_always_detected() {
        assert_eq!(
            FileFormat::from_path(Path::new("config.JSON")),
            Some(FileFormat::Json)
        );
        assert_eq!(FileFormat::Json.name(), "JSON");
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_is_the_fallback() {
        assert_eq!(
            FileFormat::from_path(Path::new("config.toml")),
            Some(FileFormat::Toml)
        );
        assert_eq!(FileFormat::from_path(Path::new("config")), None);
        assert_eq!(
            FileFormat::detect(Path::new("config")),
            Some(FileFormat::Toml)
        );
        assert_eq!(
            FileFormat::detect(Path::new("config.txt")),
            Some(FileFormat::Toml)
        );
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_yaml_extensions() {
        assert_eq!(
            FileFormat::from_path(Path::new("config.yml")),
            Some(FileFormat::Yaml)
        );
        assert_eq!(
            FileFormat::from_path(Path::new("config.yaml")),
            Some(FileFormat::Yaml)
        );
    }
}
