//! Géolocalisation approximative par IP (`https://ipapi.co/json/`).

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Coordinates, GeocodeError, IpLocateConfig};

#[async_trait]
pub trait IpLocator: Send + Sync {
    /// `Ok(None)` si le service répond sans coordonnées exploitables.
    async fn locate(&self) -> Result<Option<Coordinates>, GeocodeError>;
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(default)]
    city: Option<String>,
}

impl IpApiResponse {
    fn coordinates(&self) -> Option<Coordinates> {
        let at = Coordinates::new(self.latitude?, self.longitude?);
        at.is_valid().then_some(at)
    }
}

#[derive(Debug, Clone)]
pub struct IpApiClient {
    client: reqwest::Client,
    url: String,
}

impl IpApiClient {
    pub fn new(cfg: &IpLocateConfig, user_agent: &str) -> Result<Self, GeocodeError> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| GeocodeError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            url: cfg.url.clone(),
        })
    }
}

#[async_trait]
impl IpLocator for IpApiClient {
    async fn locate(&self) -> Result<Option<Coordinates>, GeocodeError> {
        debug!(url = %self.url, "ip_locate_request");
        let resp = self.client.get(&self.url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "ip_locate_upstream_error");
            return Err(GeocodeError::Upstream {
                status: status.as_u16(),
            });
        }
        let body: IpApiResponse = resp.json().await?;
        let at = body.coordinates();
        debug!(
            found = at.is_some(),
            city = body.city.as_deref().unwrap_or(""),
            "ip_locate_response"
        );
        Ok(at)
    }
}
