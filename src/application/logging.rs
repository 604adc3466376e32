use std::borrow::Cow;

use tracing::{dispatcher, error, info};
use tracing_subscriber::{prelude::*, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Initialise le logging :
/// - filtre: RUST_LOG, sinon `fallback` (config `runtime.rust_log`), sinon `info`
/// - journald si présent (feature `journald`)
/// - sinon stderr (fmt)
pub fn init_logging(fallback: Option<&str>) {
    if dispatcher::has_been_set() {
        return;
    }

    let filter = build_filter(fallback);

    #[cfg(feature = "journald")]
    if std::path::Path::new("/run/systemd/journal/socket").exists() {
        if let Ok(layer) = tracing_journald::layer() {
            if tracing_subscriber::registry()
                .with(build_filter(fallback))
                .with(layer)
                .try_init()
                .is_ok()
            {
                return;
            }
        }
    }

    // Fallback: stderr lisible (pas d’ANSI forcé)
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn build_filter(fallback: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_env("RUST_LOG")
        .or_else(|_| EnvFilter::try_new(fallback.unwrap_or(DEFAULT_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Évènements structurés du cycle de vie du serveur.
#[derive(Debug, Clone)]
pub enum LogEvent<'a> {
    HttpServerStarted { addr: Cow<'a, str>, demarches: usize },
    HttpBindFailed { addr: Cow<'a, str>, error: Cow<'a, str> },
    HttpServerShutdown { signal: Cow<'a, str> },
}

impl LogEvent<'_> {
    pub fn emit(&self) {
        match self {
            LogEvent::HttpServerStarted { addr, demarches } => {
                info!(addr = %addr, demarches, "http_server_started")
            }
            LogEvent::HttpBindFailed { addr, error } => {
                error!(addr = %addr, error = %error, "http_bind_failed")
            }
            LogEvent::HttpServerShutdown { signal } => {
                info!(signal = %signal, "http_server_shutdown")
            }
        }
    }
}
