//! Recherche combinée: adresses/POI (Géoplateforme) puis démarches du catalogue.

use tracing::{debug, warn};

use super::catalog::Catalog;
use crate::domain::{
    AddressResult, Coordinates, Feature, SearchIndex, SearchQuery, SearchResult,
};
use crate::infrastructure::geocode::Geocoder;

pub const DEFAULT_LIMIT: usize = 10;

/// Paramètres validés d'une recherche combinée.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    pub q: String,
    pub limit: usize,
    pub index: SearchIndex,
    pub near: Option<Coordinates>,
}

impl SearchParams {
    /// `None` si `q` est absent ou blanc.
    pub fn parse(
        q: Option<&str>,
        kind: Option<&str>,
        limit: Option<&str>,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Option<Self> {
        let q = q.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self {
            q: q.to_string(),
            limit: parse_limit(limit),
            index: SearchIndex::from_hint(kind),
            near: parse_bias(lat, lon),
        })
    }

    /// Nombre maximal de démarches renvoyées: `max(1, limit / 2)`.
    pub fn service_limit(&self) -> usize {
        (self.limit / 2).max(1)
    }
}

/// Entier strictement positif, sinon [`DEFAULT_LIMIT`].
pub fn parse_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_LIMIT)
}

fn parse_bias(lat: Option<&str>, lon: Option<&str>) -> Option<Coordinates> {
    let lat = lat?.trim().parse::<f64>().ok()?;
    let lon = lon?.trim().parse::<f64>().ok()?;
    let at = Coordinates::new(lat, lon);
    at.is_valid().then_some(at)
}

/// Adresses d'abord, démarches ensuite, sans re-classement entre les deux.
/// Un échec du géocodage vide la branche adresse sans interrompre la requête.
pub async fn combined_search(
    geocoder: &dyn Geocoder,
    catalog: &Catalog,
    params: &SearchParams,
) -> Vec<SearchResult> {
    let query = SearchQuery::new(params.q.clone(), params.index)
        .limit(params.limit)
        .autocomplete(true)
        .near(params.near);

    let addresses: Vec<SearchResult> = match geocoder.search(&query).await {
        Ok(collection) => collection
            .features
            .iter()
            .map(|f| SearchResult::Address(to_address(f, params.index)))
            .collect(),
        Err(err) => {
            warn!(query = %params.q, error = %err, "address_search_degraded");
            Vec::new()
        }
    };

    let services = catalog.search(&params.q, params.service_limit());
    debug!(
        query = %params.q,
        addresses = addresses.len(),
        services = services.len(),
        "combined_search"
    );

    let mut results = addresses;
    results.extend(services.into_iter().map(SearchResult::Service));
    results
}

fn to_address(feature: &Feature, index: SearchIndex) -> AddressResult {
    let props = feature.normalized();
    let latitude = feature.latitude().unwrap_or(0.0);
    let longitude = feature.longitude().unwrap_or(0.0);
    let label = props
        .label
        .clone()
        .or_else(|| props.name.clone())
        .or_else(|| props.toponym.clone())
        .unwrap_or_else(|| "Résultat".to_string());
    AddressResult {
        id: props
            .id
            .unwrap_or_else(|| format!("{longitude},{latitude}")),
        kind: props.kind.unwrap_or_else(|| index.as_str().to_string()),
        label,
        name: props.name.or(props.toponym).unwrap_or_default(),
        address: props.label.unwrap_or_default(),
        city: props.city.unwrap_or_default(),
        postcode: props.postcode.unwrap_or_default(),
        citycode: props.citycode.unwrap_or_default(),
        latitude,
        longitude,
        score: props.score.unwrap_or(0.0),
        category: props.category.into_iter().next().unwrap_or_default(),
        housenumber: props.housenumber.unwrap_or_default(),
        street: props.street.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn limit_defaults() {
        assert_eq!(parse_limit(None), 10);
        assert_eq!(parse_limit(Some("abc")), 10);
        assert_eq!(parse_limit(Some("0")), 10);
        assert_eq!(parse_limit(Some("-3")), 10);
        assert_eq!(parse_limit(Some("7")), 7);
    }

    #[test]
    fn service_limit_is_half_with_floor_of_one() {
        let mut p = SearchParams::parse(Some("x"), None, Some("10"), None, None).expect("params");
        assert_eq!(p.service_limit(), 5);
        p.limit = 1;
        assert_eq!(p.service_limit(), 1);
        p.limit = 3;
        assert_eq!(p.service_limit(), 1);
    }

    #[test]
    fn blank_query_rejected() {
        assert!(SearchParams::parse(None, None, None, None, None).is_none());
        assert!(SearchParams::parse(Some("   "), None, None, None, None).is_none());
    }

    #[test]
    fn bias_needs_both_coordinates() {
        let p = SearchParams::parse(Some("x"), Some("poi"), None, Some("48.8"), None)
            .expect("params");
        assert_eq!(p.near, None);
        assert_eq!(p.index, SearchIndex::Poi);

        let p = SearchParams::parse(Some("x"), None, None, Some("48.8"), Some("2.3"))
            .expect("params");
        assert_eq!(p.near, Some(Coordinates::new(48.8, 2.3)));
    }

    #[test]
    fn address_mapping_uses_fallbacks() {
        let f = Feature::point(
            2.0,
            48.0,
            json!({"toponyme": "Gare", "city": "Paris", "category": ["gare", "transport"]}),
        );
        let a = to_address(&f, SearchIndex::Poi);
        assert_eq!(a.label, "Gare");
        assert_eq!(a.name, "Gare");
        assert_eq!(a.kind, "poi");
        assert_eq!(a.address, "");
        assert_eq!(a.category, "gare");
        assert_eq!(a.latitude, 48.0);
        assert_eq!(a.id, "2,48");
    }
}
