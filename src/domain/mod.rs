pub mod config;
pub mod error;
pub mod feature;
pub mod model;

pub use config::{
    AppConfig, CatalogConfig, GeocodeConfig, IpLocateConfig, RuntimeConfig, ServerConfig,
};
pub use error::{DemarcheError, GeocodeError};
pub use feature::{Feature, FeatureCollection, Geometry, NormalizedProperties};
pub use model::{
    AddressResult, Coordinates, Demarche, Lieu, MairieResult, SearchIndex, SearchQuery,
    SearchResult, ServiceResult,
};
