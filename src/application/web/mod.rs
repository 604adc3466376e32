//! Module web: API JSON des démarches et de la recherche de mairie.
//!
//! Endpoints :
//!   GET /api/demarches          -> catalogue complet
//!   GET /api/demarches/:slug    -> une démarche
//!   GET /api/mairies?lat&lon    -> mairies de la commune aux coordonnées
//!   GET /api/search?q&type&limit&lat&lon -> adresses puis démarches
//!   GET /healthz                -> état du service
//!
//! Usage (ex. depuis un binaire) :
//!   let state = demarche_facile::AppState::new(Some(catalog), geocoder);
//!   demarche_facile::serve_http(([127, 0, 0, 1], 3000), state).await?;

mod error;
mod handlers;

use std::{borrow::Cow, net::SocketAddr, sync::Arc, time::Instant};

use axum::{
    extract::Request,
    http::{
        header::{self, HeaderName, HeaderValue},
        HeaderMap,
    },
    middleware::{self, Next},
    response::Response,
    routing::get,
    Router,
};
use tracing::{debug, warn};

use crate::application::catalog::Catalog;
use crate::application::logging::LogEvent;
use crate::domain::DemarcheError;
use crate::infrastructure::geocode::Geocoder;

pub use error::ApiError;

#[cfg(unix)]
use std::future::pending;
#[cfg(unix)]
use tokio::signal::unix::{signal as unix_signal, SignalKind};

const HEADER_REFERRER_POLICY: HeaderName = HeaderName::from_static("referrer-policy");
const HEADER_X_FRAME_OPTIONS: HeaderName = HeaderName::from_static("x-frame-options");
const HEADER_X_CONTENT_TYPE_OPTIONS: HeaderName = HeaderName::from_static("x-content-type-options");

/// État partagé entre requêtes: catalogue en lecture seule et client de géocodage.
#[derive(Clone)]
pub struct AppState {
    catalog: Option<Catalog>,
    geocoder: Arc<dyn Geocoder>,
}

impl AppState {
    /// `catalog = None` si le chargement a échoué: `/api/demarches` répond alors 500.
    pub fn new(catalog: Option<Catalog>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self { catalog, geocoder }
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn geocoder(&self) -> &dyn Geocoder {
        self.geocoder.as_ref()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/demarches", get(handlers::list_demarches))
        .route("/api/demarches/:slug", get(handlers::get_demarche))
        .route("/api/mairies", get(handlers::mairies))
        .route("/api/search", get(handlers::search))
        .route("/healthz", get(handlers::healthz))
        .layer(middleware::from_fn(http_layer))
        .with_state(state)
}

async fn http_layer(req: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let mut response = next.run(req).await;
    apply_security_headers(response.headers_mut());

    let status = response.status();
    if status.is_server_error() {
        warn!(%method, %path, status = status.as_u16(), duration_ms = started_at.elapsed().as_millis(), "http_request");
    } else {
        debug!(%method, %path, status = status.as_u16(), duration_ms = started_at.elapsed().as_millis(), "http_request");
    }
    response
}

fn apply_security_headers(headers: &mut HeaderMap) {
    headers.insert(
        HEADER_REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    headers.insert(HEADER_X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        HEADER_X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
}

pub async fn serve_http<A: Into<SocketAddr>>(addr: A, state: AppState) -> Result<(), DemarcheError> {
    let demarches = state.catalog().map(Catalog::len).unwrap_or(0);
    let app = build_router(state);

    let bind_addr: SocketAddr = addr.into();
    let listener = match tokio::net::TcpListener::bind(bind_addr).await {
        Ok(l) => l,
        Err(err) => {
            LogEvent::HttpBindFailed {
                addr: Cow::Owned(bind_addr.to_string()),
                error: Cow::Owned(err.to_string()),
            }
            .emit();
            return Err(map_io(err));
        }
    };
    let bind_addr = listener.local_addr().unwrap_or(bind_addr);
    LogEvent::HttpServerStarted {
        addr: Cow::Owned(bind_addr.to_string()),
        demarches,
    }
    .emit();

    let shutdown = async move {
        let signal = wait_for_shutdown_signal().await;
        LogEvent::HttpServerShutdown {
            signal: Cow::Borrowed(signal),
        }
        .emit();
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(map_io)?;

    Ok(())
}

#[cfg(unix)]
async fn wait_for_shutdown_signal() -> &'static str {
    let mut sigterm = unix_signal(SignalKind::terminate()).ok();

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            match res {
                Ok(()) => "ctrl_c",
                Err(err) => {
                    warn!(error = ?err, "ctrl_c_wait_failed");
                    "ctrl_c_error"
                }
            }
        }
        _ = async {
            if let Some(signal) = sigterm.as_mut() {
                signal.recv().await;
            } else {
                pending::<()>().await;
            }
        } => "sigterm",
    }
}

#[cfg(not(unix))]
async fn wait_for_shutdown_signal() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "ctrl_c",
        Err(err) => {
            warn!(error = ?err, "ctrl_c_wait_failed");
            "ctrl_c_error"
        }
    }
}

fn map_io(e: impl std::error::Error + Send + Sync + 'static) -> DemarcheError {
    DemarcheError::Io(format!("I/O/Serve error: {e}"))
}
