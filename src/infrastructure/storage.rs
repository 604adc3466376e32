use std::fs;
use std::path::Path;

use crate::domain::{Demarche, DemarcheError};

/// Catalogue versionné avec le code, utilisé quand aucun fichier n'est configuré.
const EMBEDDED_CATALOG: &str = include_str!("../../data/demarches.json");

/// Taille maximale acceptée pour un fichier catalogue.
const CATALOG_MAX_BYTES: u64 = 4 * 1_048_576;

pub(crate) fn read_embedded() -> Result<Vec<Demarche>, DemarcheError> {
    parse_catalog(EMBEDDED_CATALOG, "<embarqué>")
}

pub(crate) fn read_catalog_file(path: &Path) -> Result<Vec<Demarche>, DemarcheError> {
    let md = fs::metadata(path).map_err(|e| {
        DemarcheError::Catalog(format!("lecture {}: {e}", path.display()))
    })?;
    if !md.is_file() {
        return Err(DemarcheError::Catalog(format!(
            "{} n'est pas un fichier régulier",
            path.display()
        )));
    }
    if md.len() > CATALOG_MAX_BYTES {
        return Err(DemarcheError::Catalog(format!(
            "{} trop volumineux (> 4 MiB)",
            path.display()
        )));
    }
    let data = fs::read_to_string(path)
        .map_err(|e| DemarcheError::Catalog(format!("lecture {}: {e}", path.display())))?;
    parse_catalog(&data, &path.display().to_string())
}

fn parse_catalog(data: &str, origin: &str) -> Result<Vec<Demarche>, DemarcheError> {
    serde_json::from_str::<Vec<Demarche>>(data)
        .map_err(|e| DemarcheError::Catalog(format!("json {origin}: {e}")))
}
