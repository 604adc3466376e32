use tracing::{info, warn};

use super::mairie::find_mairies;
use crate::domain::{Coordinates, DemarcheError, MairieResult};
use crate::infrastructure::geocode::Geocoder;
use crate::infrastructure::ipapi::IpLocator;

/// Résultat du mode `--locate`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct LocateOutcome {
    pub position: Coordinates,
    pub mairies: Vec<MairieResult>,
}

/// Position approximative par IP, puis recherche des mairies.
/// `Ok(None)` si la position n'est pas disponible (saisie manuelle requise).
pub async fn locate_by_ip(
    locator: &dyn IpLocator,
    geocoder: &dyn Geocoder,
) -> Result<Option<LocateOutcome>, DemarcheError> {
    let position = match locator.locate().await {
        Ok(Some(at)) => at,
        Ok(None) => {
            warn!("ip_locate_unavailable");
            return Ok(None);
        }
        Err(err) => {
            warn!(error = %err, "ip_locate_failed");
            return Ok(None);
        }
    };
    info!(lat = position.lat, lon = position.lon, "ip_located");
    let mairies = find_mairies(geocoder, position).await?;
    Ok(Some(LocateOutcome { position, mairies }))
}
