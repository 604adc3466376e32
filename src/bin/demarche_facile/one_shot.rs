use crate::cli_opts::Opts;
use crate::output::emit_json;
use anyhow::{bail, Context, Result};
use demarche_facile::{AppConfig, Catalog, Coordinates, SearchParams};

/// Modes --mairies, --locate et --search: une requête, sortie JSON sur stdout.
pub(crate) async fn run(opts: &Opts, cfg: &AppConfig) -> Result<()> {
    let geocoder = demarche_facile::build_geocoder(cfg)?;

    if let Some(pos) = opts.mairies {
        let mairies = demarche_facile::find_mairies(
            geocoder.as_ref(),
            Coordinates::new(pos.lat, pos.lon),
        )
        .await
        .context("recherche des mairies")?;
        return emit_json(&mairies, opts.pretty);
    }

    if opts.locate {
        let locator = demarche_facile::build_ip_locator(cfg)?;
        let outcome = demarche_facile::locate_by_ip(&locator, geocoder.as_ref())
            .await
            .context("recherche des mairies")?;
        let Some(outcome) = outcome else {
            bail!("position indisponible: utilisez --mairies LAT,LON");
        };
        return emit_json(&outcome, opts.pretty);
    }

    if let Some(q) = &opts.search {
        let limit = opts.limit.to_string();
        let Some(params) = SearchParams::parse(
            Some(q),
            Some(opts.search_type.as_hint()),
            Some(&limit),
            None,
            None,
        ) else {
            bail!("--search: requête vide");
        };
        let catalog = Catalog::load(cfg.catalog.path.as_deref())?;
        let results =
            demarche_facile::combined_search(geocoder.as_ref(), &catalog, &params).await;
        return emit_json(&results, opts.pretty);
    }

    Ok(())
}
