use serde::Deserialize;

pub const DEFAULT_BIND: &str = "127.0.0.1:3000";
pub const DEFAULT_GEOCODE_BASE_URL: &str = "https://data.geopf.fr/geocodage";
pub const DEFAULT_IP_LOCATE_URL: &str = "https://ipapi.co/json/";
pub const DEFAULT_USER_AGENT: &str = concat!("demarche-facile/", env!("CARGO_PKG_VERSION"));

/// Configuration haut-niveau.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Écoute HTTP.
    pub server: ServerConfig,
    /// Service de géocodage (Géoplateforme).
    pub geocode: GeocodeConfig,
    /// Géolocalisation approximative par IP (mode --locate).
    pub ip_locate: IpLocateConfig,
    /// Source du catalogue des démarches.
    pub catalog: CatalogConfig,
    /// Paramètres runtime (logging).
    pub runtime: RuntimeConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    /// Adresse d'écoute (ADDR:PORT).
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeocodeConfig {
    /// URL de base, sans `/` final (ex: https://data.geopf.fr/geocodage).
    pub base_url: String,
    /// En-tête User-Agent envoyé à l'API.
    pub user_agent: String,
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GEOCODE_BASE_URL.into(),
            user_agent: DEFAULT_USER_AGENT.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IpLocateConfig {
    pub url: String,
}

impl Default for IpLocateConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_IP_LOCATE_URL.into(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Fichier JSON des démarches. Absent: catalogue embarqué.
    pub path: Option<std::path::PathBuf>,
}

/// Paramètres runtime supplémentaires.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RuntimeConfig {
    /// Valeur utilisée pour le filtre de logs si RUST_LOG est absent.
    pub rust_log: Option<String>,
}
