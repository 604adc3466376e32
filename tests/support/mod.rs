#![allow(dead_code)]

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use demarche_facile::{
    build_router, AppState, Catalog, Coordinates, Feature, FeatureCollection, GeocodeError,
    Geocoder, SearchIndex, SearchQuery,
};
use serde_json::{json, Value};
use tower::ServiceExt;

pub const PARIS_CODE: &str = "75056";

/// Double du service de géocodage: réponses figées, appels enregistrés.
pub struct FakeGeocoder {
    pub reverse_result: Mutex<Result<Vec<Feature>, u16>>,
    pub address_result: Mutex<Result<Vec<Feature>, u16>>,
    pub poi_result: Mutex<Result<Vec<Feature>, u16>>,
    pub searches: Mutex<Vec<SearchQuery>>,
    pub reverse_calls: AtomicU64,
}

impl Default for FakeGeocoder {
    fn default() -> Self {
        Self {
            reverse_result: Mutex::new(Ok(vec![paris_address()])),
            address_result: Mutex::new(Ok(Vec::new())),
            poi_result: Mutex::new(Ok(Vec::new())),
            searches: Mutex::new(Vec::new()),
            reverse_calls: AtomicU64::new(0),
        }
    }
}

impl FakeGeocoder {
    pub fn with_pois(pois: Vec<Feature>) -> Self {
        let fake = Self::default();
        *fake.poi_result.lock().unwrap() = Ok(pois);
        fake
    }

    pub fn recorded_searches(&self) -> Vec<SearchQuery> {
        self.searches.lock().unwrap().clone()
    }
}

fn answer(result: &Mutex<Result<Vec<Feature>, u16>>) -> Result<FeatureCollection, GeocodeError> {
    match &*result.lock().unwrap() {
        Ok(features) => Ok(FeatureCollection::from_features(features.clone())),
        Err(status) => Err(GeocodeError::Upstream { status: *status }),
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn reverse(&self, _at: Coordinates) -> Result<FeatureCollection, GeocodeError> {
        self.reverse_calls.fetch_add(1, Ordering::Relaxed);
        let collection = answer(&self.reverse_result)?;
        if collection.is_empty() {
            return Err(GeocodeError::EmptyResult);
        }
        Ok(collection)
    }

    async fn search(&self, query: &SearchQuery) -> Result<FeatureCollection, GeocodeError> {
        self.searches.lock().unwrap().push(query.clone());
        match query.index {
            SearchIndex::Address => answer(&self.address_result),
            SearchIndex::Poi => answer(&self.poi_result),
        }
    }
}

pub fn paris_address() -> Feature {
    Feature::point(
        2.3522,
        48.8566,
        json!({"label": "Place de l'Hôtel de Ville 75004 Paris", "city": "Paris", "citycode": PARIS_CODE}),
    )
}

pub fn mairie_poi(toponym: &str, citycode: &str) -> Feature {
    Feature::point(
        2.3522,
        48.8566,
        json!({"toponym": toponym, "citycode": [citycode], "category": ["mairie"], "postcode": ["75004"], "city": ["Paris"]}),
    )
}

pub fn app(fake: Arc<FakeGeocoder>) -> axum::Router {
    let catalog = Catalog::embedded().expect("embedded catalog");
    build_router(AppState::new(Some(catalog), fake))
}

pub async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .expect("router response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
