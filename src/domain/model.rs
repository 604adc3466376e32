use serde::{Deserialize, Serialize};

/// Lieu de dépôt d'une démarche (mairie, préfecture, site en ligne…).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lieu {
    pub nom: String,
    /// Lien externe optionnel (ex: ANTS, service-public.fr).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lien: Option<String>,
}

/// Une démarche administrative du catalogue statique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demarche {
    /// Identifiant unique, utilisé comme segment d'URL.
    pub slug: String,
    pub titre: String,
    /// Pièces justificatives, dans l'ordre d'affichage.
    pub documents: Vec<String>,
    /// Chaînes d'affichage, non interprétées.
    pub prix: String,
    pub delai: String,
    pub lieu: Lieu,
}

/// Mairie retenue après filtrage des POI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MairieResult {
    pub nom: String,
    pub adresse: String,
    pub postcode: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Toujours `"mairie"`.
    pub category: String,
    pub score: f64,
}

/// Résultat issu du géocodage (adresse ou POI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddressResult {
    pub id: String,
    /// Type renvoyé par l'API (`housenumber`, `street`, `poi`…).
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub citycode: String,
    pub latitude: f64,
    pub longitude: f64,
    pub score: f64,
    pub category: String,
    pub housenumber: String,
    pub street: String,
}

/// Résultat issu du catalogue des démarches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResult {
    pub titre: String,
    pub slug: String,
    pub prix: String,
    pub delai: String,
    pub lieu: Lieu,
}

impl From<&Demarche> for ServiceResult {
    fn from(d: &Demarche) -> Self {
        Self {
            titre: d.titre.clone(),
            slug: d.slug.clone(),
            prix: d.prix.clone(),
            delai: d.delai.clone(),
            lieu: d.lieu.clone(),
        }
    }
}

/// Résultat de la recherche combinée.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum SearchResult {
    Address(AddressResult),
    Service(ServiceResult),
}

impl SearchResult {
    pub fn is_address(&self) -> bool {
        matches!(self, SearchResult::Address(_))
    }

    pub fn is_service(&self) -> bool {
        matches!(self, SearchResult::Service(_))
    }
}

/// Index interrogé côté Géoplateforme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchIndex {
    #[default]
    Address,
    Poi,
}

impl SearchIndex {
    /// `"poi"` sélectionne l'index POI ; toute autre valeur retombe sur les adresses.
    pub fn from_hint(hint: Option<&str>) -> Self {
        match hint.map(str::trim) {
            Some(h) if h.eq_ignore_ascii_case("poi") => SearchIndex::Poi,
            _ => SearchIndex::Address,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchIndex::Address => "address",
            SearchIndex::Poi => "poi",
        }
    }
}

/// Coordonnées WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// lat ∈ [-90, 90], lon ∈ [-180, 180], valeurs finies.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lon.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lon)
    }
}

/// Requête de recherche vers l'API de géocodage.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub q: String,
    pub limit: usize,
    pub autocomplete: bool,
    pub index: SearchIndex,
    pub citycode: Option<String>,
    pub near: Option<Coordinates>,
}

impl SearchQuery {
    pub fn new(q: impl Into<String>, index: SearchIndex) -> Self {
        Self {
            q: q.into(),
            limit: 10,
            autocomplete: false,
            index,
            citycode: None,
            near: None,
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn autocomplete(mut self, on: bool) -> Self {
        self.autocomplete = on;
        self
    }

    pub fn citycode(mut self, code: impl Into<String>) -> Self {
        self.citycode = Some(code.into());
        self
    }

    pub fn near(mut self, near: Option<Coordinates>) -> Self {
        self.near = near;
        self
    }
}
