//! Usage: Process-wide tracing setup (stdout + daily rolling file under the app log dir).

use crate::app_paths;
use std::sync::OnceLock;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const LOG_FILTER_ENV: &str = "ONDEMAND_SHELL_LOG";
const DEFAULT_LOG_FILTER: &str = "info,ondemand_shell_lib=debug";
const LOG_FILE_PREFIX: &str = "ondemand-shell.log";

static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

pub(crate) fn init(app: &tauri::AppHandle) {
    let file_layer = match app_paths::app_log_dir(app) {
        Ok(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().with_ansi(false).with_writer(writer))
        }
        Err(err) => {
            eprintln!("[ondemand-shell] file logging disabled: {err}");
            None
        }
    };

    let subscriber = tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer().with_target(true))
        .with(file_layer);

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        // Already initialized (e.g. setup re-entered); keep the existing subscriber.
        return;
    }

    // Tauri and its plugins log through the `log` facade.
    if let Err(err) = tracing_log::LogTracer::init() {
        tracing::debug!("log bridge not installed: {}", err);
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "logging initialized");
}
