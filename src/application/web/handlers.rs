use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::{ApiError, AppState};
use crate::application::catalog::Catalog;
use crate::application::mairie::{mairies_in_commune, resolve_commune};
use crate::application::search::{combined_search, SearchParams};
use crate::domain::{Coordinates, Demarche, MairieResult, SearchResult};
use crate::shared::SharedSlice;

#[derive(Debug, Default, Deserialize)]
pub(super) struct MairieParams {
    lat: Option<String>,
    lon: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct SearchQueryParams {
    q: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    limit: Option<String>,
    lat: Option<String>,
    lon: Option<String>,
}

pub(super) async fn list_demarches(
    State(state): State<AppState>,
) -> Result<Json<SharedSlice<Demarche>>, ApiError> {
    let Some(catalog) = state.catalog() else {
        error!("catalog_unavailable");
        return Err(ApiError::Internal("Data not found".into()));
    };
    Ok(Json(catalog.shared()))
}

pub(super) async fn get_demarche(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Demarche>, ApiError> {
    let Some(catalog) = state.catalog() else {
        error!("catalog_unavailable");
        return Err(ApiError::Internal("Data not found".into()));
    };
    catalog
        .find_by_slug(&slug)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Démarche inconnue: {slug}")))
}

pub(super) async fn mairies(
    State(state): State<AppState>,
    Query(params): Query<MairieParams>,
) -> Result<Json<Vec<MairieResult>>, ApiError> {
    let at = parse_position(params.lat.as_deref(), params.lon.as_deref())?;

    let commune = resolve_commune(state.geocoder(), at)
        .await
        .map_err(|e| ApiError::from_domain(e, "Erreur lors de la récupération de la commune"))?;
    let mairies = mairies_in_commune(state.geocoder(), &commune)
        .await
        .map_err(|e| ApiError::from_domain(e, "Erreur lors de la récupération des mairies"))?;
    Ok(Json(mairies))
}

fn parse_position(lat: Option<&str>, lon: Option<&str>) -> Result<Coordinates, ApiError> {
    let (Some(lat), Some(lon)) = (
        lat.map(str::trim).filter(|s| !s.is_empty()),
        lon.map(str::trim).filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::Validation("lat et lon requis".into()));
    };
    let (Ok(lat), Ok(lon)) = (lat.parse::<f64>(), lon.parse::<f64>()) else {
        return Err(ApiError::Validation(
            "Veuillez entrer des coordonnées valides (nombres)".into(),
        ));
    };
    let at = Coordinates::new(lat, lon);
    if !at.is_valid() {
        return Err(ApiError::Validation(
            "Coordonnées invalides (lat: -90 à 90, lon: -180 à 180)".into(),
        ));
    }
    Ok(at)
}

pub(super) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Some(params) = SearchParams::parse(
        params.q.as_deref(),
        params.kind.as_deref(),
        params.limit.as_deref(),
        params.lat.as_deref(),
        params.lon.as_deref(),
    ) else {
        return Err(ApiError::Validation("Paramètre 'q' requis".into()));
    };

    let catalog = state.catalog().cloned().unwrap_or_else(Catalog::empty);
    let results = combined_search(state.geocoder(), &catalog, &params).await;
    Ok(Json(results))
}

pub(super) async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    let demarches = state.catalog().map(|c| c.len());
    Json(json!({
        "status": if demarches.is_some() { "ok" } else { "degraded" },
        "demarches": demarches.unwrap_or(0),
    }))
}
