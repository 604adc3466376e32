use thiserror::Error;

/// Erreurs de l'adaptateur de géocodage (Géoplateforme, ipapi).
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// Réponse HTTP non-2xx de l'API amont.
    #[error("upstream returned HTTP {status}")]
    Upstream { status: u16 },

    /// Échec réseau (DNS, connexion, TLS…).
    #[error("transport error: {0}")]
    Transport(String),

    /// Corps de réponse illisible (JSON invalide).
    #[error("decode error: {0}")]
    Decode(String),

    /// Le géocodage inverse n'a renvoyé aucune feature.
    #[error("empty result")]
    EmptyResult,
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            GeocodeError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            GeocodeError::Upstream {
                status: status.as_u16(),
            }
        } else {
            GeocodeError::Transport(err.to_string())
        }
    }
}

/// Erreurs possibles de la bibliothèque.
#[derive(Debug, Error)]
pub enum DemarcheError {
    /// Catalogue des démarches absent ou invalide.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Erreur de config.
    #[error("config error: {0}")]
    Config(String),

    /// Appel au service de géocodage en échec.
    #[error("geocode error: {0}")]
    Geocode(#[from] GeocodeError),

    /// Aucune commune aux coordonnées données.
    #[error("commune not found")]
    CommuneNotFound,

    /// Erreur d'entrée/sortie (bind, fichier…).
    #[error("io error: {0}")]
    Io(String),
}
