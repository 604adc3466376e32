//! demarche_facile — API des démarches administratives et recherche de mairie.
//!
//! # Examples
//! ```rust
//! use demarche_facile::Catalog;
//! let catalog = Catalog::embedded().expect("catalogue");
//! assert!(catalog.find_by_slug("passeport").is_some());
//! ```

#![forbid(unsafe_code)]

mod application;
pub mod domain;
mod infrastructure;
mod shared;

pub use domain::{
    AddressResult, AppConfig, Coordinates, Demarche, DemarcheError, Feature, FeatureCollection,
    GeocodeError, Lieu, MairieResult, NormalizedProperties, SearchIndex, SearchQuery,
    SearchResult, ServiceResult,
};

// API fonctionnelle
pub use application::catalog::Catalog;
pub use application::locate::{locate_by_ip, LocateOutcome};
pub use application::mairie::{
    filter_mairies, find_mairies, mairies_in_commune, resolve_commune, Commune,
};
pub use application::search::{combined_search, parse_limit, SearchParams, DEFAULT_LIMIT};
pub use application::{build_geocoder, build_ip_locator, validate_config};

#[cfg(feature = "config")]
pub use application::load_config_from_path;

pub use application::web::{build_router, serve_http, ApiError, AppState};

pub use application::logging::{init_logging, LogEvent};

pub use infrastructure::geocode::{Geocoder, GeoplateformeClient};
pub use infrastructure::ipapi::{IpApiClient, IpLocator};

pub use shared::SharedSlice;
