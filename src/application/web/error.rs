use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::domain::{DemarcheError, GeocodeError};

/// Erreur HTTP, rendue en `{"error": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Paramètre manquant ou invalide (400).
    Validation(String),
    /// Ressource absente (404).
    NotFound(String),
    /// Statut renvoyé par l'API amont, relayé tel quel.
    Upstream { status: u16, message: String },
    /// Tout le reste (500).
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => StatusCode::from_u16(*status)
                .ok()
                .filter(|s| s.is_client_error() || s.is_server_error())
                .unwrap_or(StatusCode::BAD_GATEWAY),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(m)
            | ApiError::NotFound(m)
            | ApiError::Upstream { message: m, .. }
            | ApiError::Internal(m) => m,
        }
    }

    /// Traduction d'une erreur métier; `upstream_message` décrit l'étape en échec.
    pub fn from_domain(err: DemarcheError, upstream_message: &str) -> Self {
        match err {
            DemarcheError::CommuneNotFound | DemarcheError::Geocode(GeocodeError::EmptyResult) => {
                ApiError::NotFound("Commune non trouvée".into())
            }
            DemarcheError::Geocode(GeocodeError::Upstream { status }) => ApiError::Upstream {
                status,
                message: upstream_message.to_string(),
            },
            other => {
                error!(error = %other, "internal_error");
                ApiError::Internal(format!("Erreur serveur: {other}"))
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.message() }))).into_response()
    }
}
