//! Features GeoJSON renvoyées par la Géoplateforme.
//!
//! Selon l'index interrogé, certaines propriétés (`name`, `city`, `citycode`,
//! `category`…) arrivent soit en scalaire, soit en tableau. Tout passe par
//! [`NormalizedProperties`] avant d'être filtré ou affiché.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Collection de features. Un `features` absent ou mal formé donne une liste vide.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureCollection {
    #[serde(default, deserialize_with = "lenient_features")]
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Géométrie ou propriétés `null` ne font pas rejeter la feature.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<Geometry>,
    #[serde(default, deserialize_with = "lenient_properties")]
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    /// `[lon, lat]`; une entrée non numérique vaut `None`.
    #[serde(default, deserialize_with = "lenient_coordinates")]
    pub coordinates: Vec<Option<f64>>,
}

impl Feature {
    /// Feature ponctuelle; `properties` doit être un objet JSON, sinon vide.
    pub fn point(lon: f64, lat: f64, properties: Value) -> Self {
        let properties = match properties {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Self {
            geometry: Some(Geometry {
                coordinates: vec![Some(lon), Some(lat)],
            }),
            properties,
        }
    }

    pub fn longitude(&self) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.first().copied().flatten()
    }

    pub fn latitude(&self) -> Option<f64> {
        self.geometry.as_ref()?.coordinates.get(1).copied().flatten()
    }

    pub fn normalized(&self) -> NormalizedProperties {
        NormalizedProperties::from_map(&self.properties)
    }
}

/// Propriétés ramenées à des scalaires (premier élément si tableau).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedProperties {
    pub id: Option<String>,
    pub kind: Option<String>,
    pub label: Option<String>,
    pub toponym: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub commune: Option<String>,
    pub citycode: Option<String>,
    pub code: Option<String>,
    pub postcode: Option<String>,
    pub housenumber: Option<String>,
    pub street: Option<String>,
    /// Toujours une liste, même si l'API renvoie un scalaire.
    pub category: Vec<String>,
    pub score: Option<f64>,
}

impl NormalizedProperties {
    pub fn from_map(props: &Map<String, Value>) -> Self {
        let text = |key: &str| props.get(key).and_then(first_text);
        Self {
            id: text("id"),
            kind: text("type"),
            label: text("label"),
            toponym: text("toponym").or_else(|| text("toponyme")),
            name: text("name"),
            city: text("city"),
            commune: text("commune"),
            citycode: text("citycode"),
            code: text("code"),
            postcode: text("postcode"),
            housenumber: text("housenumber"),
            street: text("street"),
            category: props.get("category").map(text_list).unwrap_or_default(),
            score: props.get("score").and_then(first_number),
        }
    }
}

/// Premier scalaire textuel d'une valeur (les nombres sont rendus en texte).
fn first_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => items.first().and_then(first_text),
        _ => None,
    }
}

fn first_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Array(items) => items.first().and_then(first_number),
        _ => None,
    }
}

fn text_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(first_text).collect(),
        other => first_text(other).into_iter().collect(),
    }
}

fn lenient_features<'de, D>(deserializer: D) -> Result<Vec<Feature>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let Value::Array(items) = raw else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<Feature>(item).ok())
        .collect())
}

fn lenient_geometry<'de, D>(deserializer: D) -> Result<Option<Geometry>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value::<Geometry>(raw).ok())
}

fn lenient_coordinates<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items.iter().map(Value::as_f64).collect()),
        _ => Ok(Vec::new()),
    }
}

fn lenient_properties<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalar_and_array_shapes_normalize_the_same() {
        let scalar = Feature::point(
            2.35,
            48.85,
            json!({"name": "Mairie", "citycode": "75056", "category": "mairie"}),
        );
        let array = Feature::point(
            2.35,
            48.85,
            json!({"name": ["Mairie", "Hôtel de ville"], "citycode": ["75056"], "category": ["mairie"]}),
        );
        assert_eq!(scalar.normalized(), array.normalized());
        assert_eq!(array.normalized().name.as_deref(), Some("Mairie"));
        assert_eq!(array.normalized().category, vec!["mairie".to_string()]);
    }

    #[test]
    fn numeric_postcode_becomes_text() {
        let f = Feature::point(0.0, 0.0, json!({"postcode": 75001, "score": [0.42]}));
        let props = f.normalized();
        assert_eq!(props.postcode.as_deref(), Some("75001"));
        assert_eq!(props.score, Some(0.42));
    }

    #[test]
    fn missing_or_malformed_features_are_empty() {
        let none: FeatureCollection = serde_json::from_str(r#"{"type":"FeatureCollection"}"#)
            .expect("missing features");
        assert!(none.is_empty());

        let wrong: FeatureCollection =
            serde_json::from_str(r#"{"features": "oops"}"#).expect("wrong type");
        assert!(wrong.is_empty());
    }

    #[test]
    fn geometry_is_lon_lat() {
        let f = Feature::point(2.3522, 48.8566, json!({}));
        assert_eq!(f.longitude(), Some(2.3522));
        assert_eq!(f.latitude(), Some(48.8566));

        let bare = Feature::default();
        assert_eq!(bare.latitude(), None);
    }

    #[test]
    fn null_geometry_or_properties_keep_the_feature() {
        let raw = r#"{"features": [
            {"geometry": {"coordinates": null}, "properties": {"toponym": "Mairie A", "citycode": "75056", "category": "mairie"}},
            {"geometry": {"coordinates": [2.3, null]}, "properties": {"toponym": "Mairie B", "citycode": "75056", "category": "mairie"}},
            {"geometry": null, "properties": null},
            {"geometry": {"coordinates": [2.3, 48.8]}, "properties": {"toponym": "Mairie C", "citycode": "75056", "category": "mairie"}}
        ]}"#;
        let fc: FeatureCollection = serde_json::from_str(raw).expect("collection");
        assert_eq!(fc.features.len(), 4);

        assert_eq!(fc.features[0].latitude(), None);
        assert_eq!(fc.features[0].normalized().toponym.as_deref(), Some("Mairie A"));
        assert_eq!(fc.features[1].longitude(), Some(2.3));
        assert_eq!(fc.features[1].latitude(), None);
        assert!(fc.features[2].geometry.is_none());
        assert!(fc.features[2].properties.is_empty());
        assert_eq!(fc.features[3].latitude(), Some(48.8));
    }

    #[test]
    fn non_object_items_are_skipped() {
        let fc: FeatureCollection =
            serde_json::from_str(r#"{"features": [42, "x", {"properties": {"name": "Mairie"}}]}"#)
                .expect("collection");
        assert_eq!(fc.features.len(), 1);
        assert_eq!(fc.features[0].normalized().name.as_deref(), Some("Mairie"));
    }
}
