//! Client HTTP de la Géoplateforme (`/reverse`, `/search`).
//!
//! Sans état: une requête réseau par appel, ni retry ni cache. Un décorateur
//! autour de [`Geocoder`] peut ajouter l'un ou l'autre si besoin.

use async_trait::async_trait;
use tracing::{debug, warn};
use url::Url;

use crate::domain::{Coordinates, FeatureCollection, GeocodeConfig, GeocodeError, SearchQuery};

/// Accès au service de géocodage.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Géocodage inverse sur l'index adresse. Aucune feature ⇒ [`GeocodeError::EmptyResult`].
    async fn reverse(&self, at: Coordinates) -> Result<FeatureCollection, GeocodeError>;

    /// Recherche plein texte (adresse ou POI).
    async fn search(&self, query: &SearchQuery) -> Result<FeatureCollection, GeocodeError>;
}

#[derive(Debug, Clone)]
pub struct GeoplateformeClient {
    client: reqwest::Client,
    base_url: String,
}

impl GeoplateformeClient {
    pub fn new(cfg: &GeocodeConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(cfg.user_agent.clone())
            .build()
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn reverse_url(&self, at: Coordinates) -> Result<Url, GeocodeError> {
        let params = [
            ("lon", at.lon.to_string()),
            ("lat", at.lat.to_string()),
            ("index", "address".to_string()),
        ];
        Url::parse_with_params(&format!("{}/reverse", self.base_url), &params)
            .map_err(|e| GeocodeError::Transport(format!("url invalide: {e}")))
    }

    pub(crate) fn search_url(&self, query: &SearchQuery) -> Result<Url, GeocodeError> {
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.q.clone()),
            ("limit", query.limit.to_string()),
        ];
        if query.autocomplete {
            params.push(("autocomplete", "true".into()));
        }
        params.push(("index", query.index.as_str().into()));
        if let Some(code) = &query.citycode {
            params.push(("citycode", code.clone()));
        }
        if let Some(near) = query.near {
            params.push(("lat", near.lat.to_string()));
            params.push(("lon", near.lon.to_string()));
        }
        Url::parse_with_params(&format!("{}/search", self.base_url), &params)
            .map_err(|e| GeocodeError::Transport(format!("url invalide: {e}")))
    }

    async fn fetch(&self, url: Url) -> Result<FeatureCollection, GeocodeError> {
        debug!(url = %url, "geocode_request");
        let resp = self.client.get(url.clone()).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(url = %url, status = status.as_u16(), "geocode_upstream_error");
            return Err(GeocodeError::Upstream {
                status: status.as_u16(),
            });
        }
        let body = resp.text().await?;
        let collection: FeatureCollection =
            serde_json::from_str(&body).map_err(|e| GeocodeError::Decode(e.to_string()))?;
        debug!(features = collection.features.len(), "geocode_response");
        Ok(collection)
    }
}

#[async_trait]
impl Geocoder for GeoplateformeClient {
    async fn reverse(&self, at: Coordinates) -> Result<FeatureCollection, GeocodeError> {
        let url = self.reverse_url(at)?;
        let collection = self.fetch(url).await?;
        if collection.is_empty() {
            return Err(GeocodeError::EmptyResult);
        }
        Ok(collection)
    }

    async fn search(&self, query: &SearchQuery) -> Result<FeatureCollection, GeocodeError> {
        let url = self.search_url(query)?;
        self.fetch(url).await
    }
}
