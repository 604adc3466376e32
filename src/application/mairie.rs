//! Recherche de la mairie: géocodage inverse → POI « mairie » → filtrage.

use tracing::{debug, info, warn};

use crate::domain::{
    Coordinates, DemarcheError, Feature, GeocodeError, MairieResult, SearchIndex, SearchQuery,
};
use crate::infrastructure::geocode::Geocoder;

const MAIRIE_KEYWORD: &str = "mairie";
const EXCLUDED_KEYWORD: &str = "parking";
const MAIRIE_CATEGORY: &str = "mairie";
const MAIRIE_SEARCH_LIMIT: usize = 10;
const UNKNOWN_COMMUNE: &str = "Commune inconnue";

/// Commune résolue par géocodage inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commune {
    pub name: String,
    /// Code INSEE.
    pub code: String,
}

/// Garde les POI désignant une mairie située dans `target_city_code`,
/// dans l'ordre d'entrée. `city_fallback` remplit la ville absente.
pub fn filter_mairies(
    features: &[Feature],
    target_city_code: &str,
    city_fallback: &str,
) -> Vec<MairieResult> {
    features
        .iter()
        .filter(|f| {
            let props = f.normalized();
            let toponym = props.toponym.as_deref().unwrap_or("").to_lowercase();
            let name = props.name.as_deref().unwrap_or("").to_lowercase();

            let is_mairie = (toponym.contains(MAIRIE_KEYWORD) || name.contains(MAIRIE_KEYWORD))
                && !toponym.contains(EXCLUDED_KEYWORD)
                && !name.contains(EXCLUDED_KEYWORD)
                && props.category.iter().any(|c| c == MAIRIE_CATEGORY);
            let same_city = props.citycode.as_deref() == Some(target_city_code);

            debug!(
                toponym = %toponym,
                name = %name,
                citycode = props.citycode.as_deref().unwrap_or(""),
                is_mairie,
                same_city,
                "mairie_candidate"
            );
            is_mairie && same_city
        })
        .map(|f| to_mairie(f, city_fallback))
        .collect()
}

fn to_mairie(feature: &Feature, city_fallback: &str) -> MairieResult {
    let props = feature.normalized();
    let nom = props
        .toponym
        .or(props.name)
        .unwrap_or_else(|| "Mairie".to_string());
    MairieResult {
        adresse: nom.clone(),
        nom,
        postcode: props.postcode.unwrap_or_default(),
        city: props.city.unwrap_or_else(|| city_fallback.to_string()),
        latitude: feature.latitude().unwrap_or(0.0),
        longitude: feature.longitude().unwrap_or(0.0),
        category: MAIRIE_CATEGORY.to_string(),
        score: props.score.unwrap_or(0.0),
    }
}

/// Étape 1: commune aux coordonnées données (première feature).
pub async fn resolve_commune(
    geocoder: &dyn Geocoder,
    at: Coordinates,
) -> Result<Commune, DemarcheError> {
    let collection = match geocoder.reverse(at).await {
        Ok(c) => c,
        Err(GeocodeError::EmptyResult) => return Err(DemarcheError::CommuneNotFound),
        Err(e) => return Err(e.into()),
    };
    let Some(first) = collection.features.first() else {
        return Err(DemarcheError::CommuneNotFound);
    };
    let props = first.normalized();
    let Some(code) = props.citycode.or(props.code) else {
        warn!(lat = at.lat, lon = at.lon, "commune_without_code");
        return Err(DemarcheError::CommuneNotFound);
    };
    let name = props
        .city
        .or(props.commune)
        .unwrap_or_else(|| UNKNOWN_COMMUNE.to_string());
    Ok(Commune { name, code })
}

/// Étapes 2 et 3: POI « mairie » de la commune, filtrés sur son code INSEE.
pub async fn mairies_in_commune(
    geocoder: &dyn Geocoder,
    commune: &Commune,
) -> Result<Vec<MairieResult>, DemarcheError> {
    let query = SearchQuery::new(MAIRIE_KEYWORD, SearchIndex::Poi)
        .citycode(commune.code.clone())
        .limit(MAIRIE_SEARCH_LIMIT);
    let candidates = geocoder.search(&query).await?;
    let mairies = filter_mairies(&candidates.features, &commune.code, &commune.name);
    info!(
        commune = %commune.name,
        code = %commune.code,
        candidates = candidates.features.len(),
        kept = mairies.len(),
        "mairie_lookup"
    );
    Ok(mairies)
}

/// Flux complet: commune, puis mairies de cette commune.
pub async fn find_mairies(
    geocoder: &dyn Geocoder,
    at: Coordinates,
) -> Result<Vec<MairieResult>, DemarcheError> {
    let commune = resolve_commune(geocoder, at).await?;
    mairies_in_commune(geocoder, &commune).await
}
