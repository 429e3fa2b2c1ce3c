//! Command-line flags and default paths.
//!
//! Every path flag can also be set through an environment variable; an
//! explicit empty value for `--env` / `--hypr` disables that file and logs
//! its lines instead.
//!
//! | Flag | Env var | Default |
//! |------|---------|---------|
//! | `--input` | `HYDE_CONFIG_INPUT` | `$XDG_CONFIG_HOME/hyde/config.toml` |
//! | `--env` | `HYDE_CONFIG_ENV` | `$XDG_STATE_HOME/hyde/config` |
//! | `--hypr` | `HYDE_CONFIG_HYPR` | `$XDG_STATE_HOME/hyde/hyprland.conf` |

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use crate::error::Error;
use crate::logging::Verbosity;
use crate::output::Sink;
use crate::pipeline::Pipeline;

/// Directory under the XDG config/state homes.
const APP_DIR: &str = "hyde";

/// Parse a HyDE config file into an env file and a Hyprland config fragment.
#[derive(Debug, Parser)]
#[command(name = "hyde-config", version, about)]
pub struct Cli {
    /// The input TOML file to parse [default: $XDG_CONFIG_HOME/hyde/config.toml]
    #[arg(long = "input", env = "HYDE_CONFIG_INPUT", value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// The output environment file; empty logs the lines instead [default: $XDG_STATE_HOME/hyde/config]
    #[arg(long = "env", env = "HYDE_CONFIG_ENV", value_name = "PATH")]
    pub env: Option<String>,

    /// The output Hyprland file; empty logs the lines instead [default: $XDG_STATE_HOME/hyde/hyprland.conf]
    #[arg(long = "hypr", env = "HYDE_CONFIG_HYPR", value_name = "PATH")]
    pub hypr: Option<String>,

    /// Run once without watching for changes (daemon mode is default)
    #[arg(long)]
    pub no_daemon: bool,

    /// Write `KEY=value` instead of `export KEY=value`
    #[arg(long)]
    pub no_export: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

/// Fully resolved runtime settings.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Source document.
    pub input: PathBuf,

    /// Env output.
    pub env: Sink,

    /// Hypr output.
    pub hypr: Sink,

    /// Keep watching after the first pass.
    pub daemon: bool,

    /// Prefix env lines with `export `.
    pub export: bool,

    /// Log level selection.
    pub verbosity: Verbosity,
}

impl Cli {
    /// Resolve defaults and flags into [`Settings`].
    #[must_use]
    pub fn settings(&self) -> Settings {
        let env = self
            .env
            .clone()
            .map_or_else(default_env_file, PathBuf::from);
        let hypr = self
            .hypr
            .clone()
            .map_or_else(default_hypr_file, PathBuf::from);

        Settings {
            input: self.input.clone().unwrap_or_else(default_input),
            env: Sink::from_path(Some(env)),
            hypr: Sink::from_path(Some(hypr)),
            daemon: !self.no_daemon,
            export: !self.no_export,
            verbosity: Verbosity::from_flags(self.verbose, self.debug),
        }
    }
}

impl Settings {
    /// Build the pipeline these settings describe.
    #[must_use]
    pub fn pipeline(&self) -> Pipeline {
        Pipeline::new(
            self.input.clone(),
            self.env.clone(),
            self.hypr.clone(),
            self.export,
        )
    }

    /// Log the resolved configuration.
    pub fn log_summary(&self) {
        info!(path = %self.input.display(), "using config file");
        info!(path = %display_sink(&self.env), "using env output file");
        info!(path = %display_sink(&self.hypr), "using hypr output file");
        info!(
            export = self.export,
            daemon = self.daemon,
            debug = self.verbosity == Verbosity::Debug,
            "modes"
        );
    }

    /// Create the parent directories of both output files.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutputDir`] if a directory cannot be created.
    pub fn ensure_output_dirs(&self) -> Result<(), Error> {
        for sink in [&self.env, &self.hypr] {
            let Some(parent) = sink.path().and_then(Path::parent) else {
                continue;
            };
            if parent.as_os_str().is_empty() {
                continue;
            }

            std::fs::create_dir_all(parent).map_err(|source| Error::OutputDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        Ok(())
    }
}

fn display_sink(sink: &Sink) -> String {
    sink.path()
        .map_or_else(|| "<log>".to_string(), |p| p.display().to_string())
}

/// `$XDG_CONFIG_HOME`, falling back to `~/.config`.
fn config_home() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from(".config"))
}

/// `$XDG_STATE_HOME`, falling back to the local data dir, then `~/.local/state`.
fn state_home() -> PathBuf {
    dirs::state_dir()
        .or_else(dirs::data_local_dir)
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("state")))
        .unwrap_or_else(|| PathBuf::from(".local/state"))
}

/// Default source document path.
#[must_use]
pub fn default_input() -> PathBuf {
    config_home().join(APP_DIR).join("config.toml")
}

/// Default env output path.
#[must_use]
pub fn default_env_file() -> PathBuf {
    state_home().join(APP_DIR).join("config")
}

/// Default hypr output path.
#[must_use]
pub fn default_hypr_file() -> PathBuf {
    state_home().join(APP_DIR).join("hyprland.conf")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_paths_end_with_hyde_names() {
        assert!(default_input().ends_with("hyde/config.toml"));
        assert!(default_env_file().ends_with("hyde/config"));
        assert!(default_hypr_file().ends_with("hyde/hyprland.conf"));
    }

    #[test]
    fn test_ensure_output_dirs_creates_parents() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            input: dir.path().join("config.toml"),
            env: Sink::File(dir.path().join("state/hyde/config")),
            hypr: Sink::Log,
            daemon: false,
            export: true,
            verbosity: Verbosity::Quiet,
        };

        settings.ensure_output_dirs().unwrap();
        assert!(dir.path().join("state/hyde").is_dir());
    }
}
