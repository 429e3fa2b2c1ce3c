use clap::Parser;
use miette::Result;
use tracing::{error, info};

use hyde_config::cli::Cli;
use hyde_config::{Error, WatchOptions, logging, watch};

fn main() -> Result<()> {
    let settings = Cli::parse().settings();

    logging::init(settings.verbosity)
        .map_err(|e| miette::miette!("failed to initialize logging: {e}"))?;

    settings.log_summary();
    settings.ensure_output_dirs()?;

    let pipeline = settings.pipeline();

    if !settings.daemon {
        info!("running in one-off mode (no watching for changes)");
        let report = pipeline.run_pass().map_err(Error::from)?;
        report.log_failures();

        return if report.is_success() {
            Ok(())
        } else {
            Err(Error::PassFailed.into())
        };
    }

    pipeline.run();

    info!(path = %pipeline.source().display(), "starting daemon mode");

    match watch::watch(&pipeline, WatchOptions::default()) {
        Ok(stats) => {
            info!(?stats, "watch loop finished");
            Ok(())
        }

        Err(e) => {
            error!(error = %e, "file watching unavailable");
            Err(Error::from(e).into())
        }
    }
}
