use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, error, info};

use crate::domain::{Demarche, DemarcheError, ServiceResult};
use crate::infrastructure::storage;
use crate::shared::SharedSlice;

/// Catalogue des démarches, chargé une fois puis en lecture seule.
/// Clone effectue simplement un `Arc::clone`.
#[derive(Debug, Clone)]
pub struct Catalog {
    items: SharedSlice<Demarche>,
}

impl Catalog {
    /// Construit un catalogue en vérifiant l'unicité des slugs.
    pub fn from_vec(items: Vec<Demarche>) -> Result<Self, DemarcheError> {
        let mut seen = HashSet::with_capacity(items.len());
        for d in &items {
            if !seen.insert(d.slug.as_str()) {
                return Err(DemarcheError::Catalog(format!("slug dupliqué: {}", d.slug)));
            }
        }
        Ok(Self {
            items: SharedSlice::from_vec(items),
        })
    }

    pub fn empty() -> Self {
        Self {
            items: SharedSlice::from_vec(Vec::new()),
        }
    }

    /// Catalogue embarqué dans le binaire (`data/demarches.json`).
    pub fn embedded() -> Result<Self, DemarcheError> {
        let catalog = Self::from_vec(storage::read_embedded()?)?;
        info!(demarches = catalog.len(), source = "embedded", "catalog_loaded");
        Ok(catalog)
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, DemarcheError> {
        let path = path.as_ref();
        let items = storage::read_catalog_file(path).map_err(|err| {
            error!(path = %path.display(), error = %err, "catalog_error");
            err
        })?;
        let catalog = Self::from_vec(items)?;
        info!(
            demarches = catalog.len(),
            path = %path.display(),
            "catalog_loaded"
        );
        Ok(catalog)
    }

    /// Fichier si fourni, sinon catalogue embarqué.
    pub fn load(path: Option<&Path>) -> Result<Self, DemarcheError> {
        match path {
            Some(p) => Self::load_from_path(p),
            None => Self::embedded(),
        }
    }

    pub fn all(&self) -> &[Demarche] {
        self.items.as_slice()
    }

    /// Vue partagée, sérialisable telle quelle en tableau JSON.
    pub fn shared(&self) -> SharedSlice<Demarche> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Demarche> {
        self.items.iter().find(|d| d.slug == slug)
    }

    /// Démarches dont le titre ou une pièce justificative contient `query`
    /// (insensible à la casse), dans l'ordre du catalogue, au plus `max`.
    pub fn search(&self, query: &str, max: usize) -> Vec<ServiceResult> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let found: Vec<ServiceResult> = self
            .items
            .iter()
            .filter(|d| matches_query(d, &needle))
            .take(max)
            .map(ServiceResult::from)
            .collect();
        debug!(query = %needle, max, found = found.len(), "catalog_search");
        found
    }
}

fn matches_query(d: &Demarche, needle: &str) -> bool {
    d.titre.to_lowercase().contains(needle)
        || d.documents
            .iter()
            .any(|doc| doc.to_lowercase().contains(needle))
}
