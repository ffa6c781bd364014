mod cli;
mod commands;
mod script;

use std::process::ExitCode;

use keycap_common::ConfigError;
use keycap_config::SettingsStore;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

/// A bad `--log-level` or `[logging] level` falls back to plain `info`.
fn log_directive(directive: &str) -> Directive {
    directive.parse().unwrap_or_else(|e| {
        eprintln!("keycap: ignoring log level {directive:?}: {e}");
        LevelFilter::INFO.into()
    })
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_directive(directive)))
        .init();
}

fn open_settings(args: &cli::Args) -> Result<SettingsStore, ConfigError> {
    match &args.config {
        Some(path) => SettingsStore::open(path),
        None => SettingsStore::open_default(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Settings are opened before logging so `[logging] level` can apply.
    let store = open_settings(&args);

    let config_directive = store
        .as_ref()
        .map(|s| s.config().logging.level.directive())
        .unwrap_or("keycap=info");
    init_logging(args.log_level.as_deref().unwrap_or(config_directive));

    let store = match store {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to open settings: {e}");
            eprintln!("keycap: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(path) = store.path() {
        tracing::info!("using settings at {}", path.display());
    }

    let os = args.os.unwrap_or_else(|| store.config().capture.os_type());
    match commands::run(args.command, store, os).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("command failed: {e:?}");
            eprintln!("keycap: {e}");
            ExitCode::FAILURE
        }
    }
}
