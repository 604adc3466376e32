use std::sync::Arc;

use crate::domain::{AppConfig, DemarcheError};
use crate::infrastructure::geocode::{Geocoder, GeoplateformeClient};
use crate::infrastructure::ipapi::IpApiClient;

pub mod catalog;
pub mod locate;
pub mod logging;
pub mod mairie;
pub mod search;
pub mod web;

#[cfg(feature = "config")]
pub fn load_config_from_path<P: AsRef<std::path::Path>>(
    path: P,
) -> Result<AppConfig, DemarcheError> {
    let path_ref = path.as_ref();
    if path_ref
        .components()
        .any(|c| matches!(c, std::path::Component::ParentDir))
    {
        return Err(DemarcheError::Config(format!(
            "{}: chemins contenant `..` refusés",
            path_ref.display()
        )));
    }
    let data = std::fs::read_to_string(path_ref).map_err(|e| {
        tracing::error!(path = %path_ref.display(), error = %e, "config_error");
        DemarcheError::Config(format!("read {}: {e}", path_ref.display()))
    })?;
    let cfg = toml::from_str::<AppConfig>(&data).map_err(|e| {
        tracing::error!(path = %path_ref.display(), error = %e, "config_error");
        DemarcheError::Config(format!("toml parse: {e}"))
    })?;
    validate_config(&cfg)?;
    Ok(cfg)
}

/// Contrôles de cohérence après désérialisation.
pub fn validate_config(cfg: &AppConfig) -> Result<(), DemarcheError> {
    for (field, raw) in [
        ("geocode.base_url", cfg.geocode.base_url.as_str()),
        ("ip_locate.url", cfg.ip_locate.url.as_str()),
    ] {
        let parsed = url::Url::parse(raw)
            .map_err(|e| DemarcheError::Config(format!("{field}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DemarcheError::Config(format!(
                "{field}: schéma http(s) requis"
            )));
        }
    }
    Ok(())
}

/// Client Géoplateforme partagé derrière le trait [`Geocoder`].
pub fn build_geocoder(cfg: &AppConfig) -> Result<Arc<dyn Geocoder>, DemarcheError> {
    let client = GeoplateformeClient::new(&cfg.geocode)?;
    Ok(Arc::new(client))
}

pub fn build_ip_locator(cfg: &AppConfig) -> Result<IpApiClient, DemarcheError> {
    Ok(IpApiClient::new(&cfg.ip_locate, &cfg.geocode.user_agent)?)
}
