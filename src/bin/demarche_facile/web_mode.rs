use crate::cli_opts::Opts;
use anyhow::{bail, Context, Result};
use demarche_facile::{AppConfig, AppState, Catalog};
use std::net::{IpAddr, SocketAddr};
use tracing::error;

pub(crate) async fn run(opts: &Opts, cfg: &AppConfig) -> Result<()> {
    let addr: SocketAddr = cfg
        .server
        .bind
        .parse()
        .with_context(|| format!("adresse d'écoute invalide: {}", cfg.server.bind))?;
    validate_bind(&addr, opts.web_allow_remote)?;

    // Catalogue absent: le serveur démarre quand même, /api/demarches répond 500.
    let catalog = match Catalog::load(cfg.catalog.path.as_deref()) {
        Ok(c) => Some(c),
        Err(err) => {
            error!(error = %err, "catalog_unavailable");
            None
        }
    };
    let geocoder = demarche_facile::build_geocoder(cfg)?;

    demarche_facile::serve_http(addr, AppState::new(catalog, geocoder)).await?;
    Ok(())
}

fn is_loopback(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => v4.is_loopback(),
        IpAddr::V6(v6) => v6.is_loopback(),
    }
}

fn validate_bind(addr: &SocketAddr, allow_remote: bool) -> Result<()> {
    if !is_loopback(addr.ip()) && !allow_remote {
        bail!(
            "refus d’écoute non locale: utilisez --web-allow-remote si vous assumez l’exposition."
        );
    }
    Ok(())
}
