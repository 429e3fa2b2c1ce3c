//! CLI integration tests.
//!
//! Flag parsing, env var fallbacks and resolution into settings.

#![allow(clippy::pedantic)]

use std::path::{Path, PathBuf};

use clap::Parser;
use hyde_config::Sink;
use hyde_config::cli::{Cli, default_env_file, default_hypr_file, default_input};
use hyde_config::logging::Verbosity;
use serial_test::serial;

const VARS: &[&str] = &["HYDE_CONFIG_INPUT", "HYDE_CONFIG_ENV", "HYDE_CONFIG_HYPR"];

fn cleanup_env() {
    unsafe {
        for k in VARS {
            std::env::remove_var(*k);
        }
    }
}

fn with_env<F, R>(vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    cleanup_env();
    unsafe {
        for (k, v) in vars {
            std::env::set_var(*k, *v);
        }
    }

    let result = f();

    cleanup_env();
    result
}

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["hyde-config"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

// ============================================================================
// Defaults
// ============================================================================

#[test]
#[serial]
fn test_defaults() {
    let settings = with_env(&[], || parse(&[]).settings());

    assert_eq!(settings.input, default_input());
    assert_eq!(settings.env, Sink::File(default_env_file()));
    assert_eq!(settings.hypr, Sink::File(default_hypr_file()));
    assert!(settings.daemon);
    assert!(settings.export);
    assert_eq!(settings.verbosity, Verbosity::Quiet);
}

// ============================================================================
// Flags
// ============================================================================

#[test]
#[serial]
fn test_explicit_paths() {
    let settings = with_env(&[], || {
        parse(&[
            "--input",
            "/tmp/in.toml",
            "--env",
            "/tmp/out/config",
            "--hypr",
            "/tmp/out/hyprland.conf",
        ])
        .settings()
    });

    assert_eq!(settings.input, PathBuf::from("/tmp/in.toml"));
    assert_eq!(settings.env.path(), Some(Path::new("/tmp/out/config")));
    assert_eq!(settings.hypr.path(), Some(Path::new("/tmp/out/hyprland.conf")));
}

#[test]
#[serial]
fn test_empty_output_path_logs_instead() {
    let settings = with_env(&[], || parse(&["--env", "", "--hypr", ""]).settings());

    assert_eq!(settings.env, Sink::Log);
    assert_eq!(settings.hypr, Sink::Log);
}

#[test]
#[serial]
fn test_mode_flags() {
    let settings = with_env(&[], || parse(&["--no-daemon", "--no-export"]).settings());

    assert!(!settings.daemon);
    assert!(!settings.export);
}

#[test]
#[serial]
fn test_verbosity_flags() {
    let verbose = with_env(&[], || parse(&["-v"]).settings());
    assert_eq!(verbose.verbosity, Verbosity::Verbose);

    let debug = with_env(&[], || parse(&["--verbose", "--debug"]).settings());
    assert_eq!(debug.verbosity, Verbosity::Debug);
}

#[test]
fn test_unknown_flag_rejected() {
    let result = Cli::try_parse_from(["hyde-config", "--bogus"]);
    assert!(result.is_err());
}

// ============================================================================
// Environment variable fallback
// ============================================================================

#[test]
#[serial]
fn test_env_vars_fill_paths() {
    let settings = with_env(
        &[
            ("HYDE_CONFIG_INPUT", "/srv/hyde/config.toml"),
            ("HYDE_CONFIG_ENV", "/srv/state/config"),
            ("HYDE_CONFIG_HYPR", "/srv/state/hyprland.conf"),
        ],
        || parse(&[]).settings(),
    );

    assert_eq!(settings.input, PathBuf::from("/srv/hyde/config.toml"));
    assert_eq!(settings.env.path(), Some(Path::new("/srv/state/config")));
    assert_eq!(
        settings.hypr.path(),
        Some(Path::new("/srv/state/hyprland.conf"))
    );
}

#[test]
#[serial]
fn test_flag_beats_env_var() {
    let settings = with_env(&[("HYDE_CONFIG_INPUT", "/srv/from-env.toml")], || {
        parse(&["--input", "/srv/from-flag.toml"]).settings()
    });

    assert_eq!(settings.input, PathBuf::from("/srv/from-flag.toml"));
}

// ============================================================================
// Pipeline wiring
// ============================================================================

#[test]
#[serial]
fn test_settings_build_pipeline() {
    let settings = with_env(&[], || {
        parse(&["--input", "/srv/in.toml", "--env", "", "--no-export"]).settings()
    });

    let pipeline = settings.pipeline();
    assert_eq!(pipeline.source(), Path::new("/srv/in.toml"));
}
