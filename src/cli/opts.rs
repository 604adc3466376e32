use clap::{ArgAction, Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

const LIMIT_MIN: u64 = 1;
const LIMIT_MAX: u64 = 100;

/// Coordonnées passées en ligne de commande (`LAT,LON`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LatLon {
    pub(crate) lat: f64,
    pub(crate) lon: f64,
}

fn parse_lat_lon(raw: &str) -> Result<LatLon, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| "format attendu: LAT,LON (ex: 48.8566,2.3522)".to_string())?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("latitude invalide: {lat}"))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("longitude invalide: {lon}"))?;
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err("coordonnées hors bornes (lat: -90 à 90, lon: -180 à 180)".into());
    }
    Ok(LatLon { lat, lon })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum SearchKind {
    Address,
    Poi,
}

impl SearchKind {
    pub(crate) fn as_hint(self) -> &'static str {
        match self {
            SearchKind::Address => "address",
            SearchKind::Poi => "poi",
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "demarche-facile",
    version,
    about = "API des démarches administratives et recherche de la mairie la plus proche"
)]
pub(crate) struct Opts {
    /// Fichier de config TOML (feature `config`)
    #[arg(long, value_name = "FILE")]
    pub(crate) config: Option<PathBuf>,

    /// Adresse:port d'écoute du serveur HTTP (défaut: config, sinon 127.0.0.1:3000)
    #[arg(
        long = "web",
        value_name = "ADDR:PORT",
        value_parser = clap::value_parser!(SocketAddr)
    )]
    pub(crate) web: Option<SocketAddr>,

    /// Autorise l’écoute réseau non locale (ex: 0.0.0.0). Sans ça, refus explicite.
    #[arg(long = "web-allow-remote", action = ArgAction::SetTrue)]
    pub(crate) web_allow_remote: bool,

    /// Fichier JSON des démarches (défaut: catalogue embarqué)
    #[arg(long, value_name = "FILE")]
    pub(crate) catalog: Option<PathBuf>,

    /// URL de base du service de géocodage
    #[arg(long = "geocode-url", value_name = "URL")]
    pub(crate) geocode_url: Option<String>,

    /// Recherche unique des mairies aux coordonnées données, puis sortie
    #[arg(
        long = "mairies",
        value_name = "LAT,LON",
        value_parser = parse_lat_lon,
        conflicts_with_all = ["locate", "search"]
    )]
    pub(crate) mairies: Option<LatLon>,

    /// Position approximative par IP puis recherche des mairies
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "search")]
    pub(crate) locate: bool,

    /// Recherche combinée unique (adresses + démarches), puis sortie
    #[arg(long, value_name = "QUERY")]
    pub(crate) search: Option<String>,

    /// Index interrogé pour --search
    #[arg(
        long = "search-type",
        value_enum,
        default_value_t = SearchKind::Address,
        requires = "search"
    )]
    pub(crate) search_type: SearchKind,

    /// Nombre maximal de résultats pour --search (bornes 1..=100)
    #[arg(
        long,
        value_name = "N",
        default_value_t = 10,
        requires = "search",
        value_parser = clap::value_parser!(u64).range(LIMIT_MIN..=LIMIT_MAX)
    )]
    pub(crate) limit: u64,

    /// Mise en forme JSON indentée (modes one-shot)
    #[arg(long, action = ArgAction::SetTrue)]
    pub(crate) pretty: bool,
}

impl Opts {
    /// Vrai si un mode one-shot est demandé (pas de serveur).
    pub(crate) fn is_one_shot(&self) -> bool {
        self.mairies.is_some() || self.locate || self.search.is_some()
    }
}
