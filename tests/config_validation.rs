#[cfg(feature = "config")]
mod t {
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn deny_parent_dir_component() {
        let err = demarche_facile::load_config_from_path("../etc/demarche-facile/cfg.toml")
            .unwrap_err();
        assert!(format!("{err}").contains(".."), "doit refuser `..`");
    }

    #[test]
    fn deny_unknown_fields() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("cfg.toml");
        fs::write(&file, "[geocode]\nbase_url = \"https://example.org\"\noops = true\n").unwrap();
        let r = demarche_facile::load_config_from_path(&file);
        assert!(r.is_err(), "champs inconnus doivent être rejetés");
    }

    #[test]
    fn reject_non_http_urls() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("cfg.toml");
        fs::write(&file, "[ip_locate]\nurl = \"file:///etc/passwd\"\n").unwrap();
        let err = demarche_facile::load_config_from_path(&file).unwrap_err();
        assert!(format!("{err}").contains("ip_locate.url"));
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("cfg.toml");
        fs::write(
            &file,
            "[server]\nbind = \"0.0.0.0:8080\"\n\n[catalog]\npath = \"/srv/demarches.json\"\n",
        )
        .unwrap();
        let cfg = demarche_facile::load_config_from_path(&file).expect("config");
        assert_eq!(cfg.server.bind, "0.0.0.0:8080");
        assert_eq!(cfg.geocode.base_url, "https://data.geopf.fr/geocodage");
        assert!(cfg.catalog.path.is_some());
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempdir().unwrap();
        let err = demarche_facile::load_config_from_path(dir.path().join("absent.toml"))
            .unwrap_err();
        assert!(format!("{err}").contains("read"));
    }
}
