use crate::cli_opts::Opts;
use anyhow::{Context, Result};
use demarche_facile::AppConfig;

/// Config TOML (si fournie) puis surcharges CLI.
pub(crate) fn load_config(opts: &Opts) -> Result<AppConfig> {
    #[cfg(feature = "config")]
    let mut cfg = match &opts.config {
        Some(path) => demarche_facile::load_config_from_path(path)
            .with_context(|| format!("chargement config TOML {}", path.display()))?,
        None => AppConfig::default(),
    };

    #[cfg(not(feature = "config"))]
    let mut cfg = {
        if opts.config.is_some() {
            anyhow::bail!("--config nécessite la feature `config`.");
        }
        AppConfig::default()
    };

    apply_overrides(&mut cfg, opts);
    demarche_facile::validate_config(&cfg).context("config invalide")?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut AppConfig, opts: &Opts) {
    if let Some(addr) = opts.web {
        cfg.server.bind = addr.to_string();
    }
    if let Some(url) = &opts.geocode_url {
        cfg.geocode.base_url = url.clone();
    }
    if let Some(path) = &opts.catalog {
        cfg.catalog.path = Some(path.clone());
    }
}
