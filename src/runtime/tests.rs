use std::path::PathBuf;

use super::{load_catalog, logging};
use crate::catalog::Catalog;
use crate::config::{LogSettings, Settings};

#[test]
fn logging_reports_an_already_installed_subscriber() {
    let dir = tempfile::tempdir().unwrap();
    let log = LogSettings {
        filter: "debug".to_string(),
        file: Some(dir.path().join("state").join("lull.log")),
    };

    // Only this test installs a global subscriber.
    assert!(logging::init(&log).is_ok());
    assert!(dir.path().join("state").join("lull.log").exists());

    let err = logging::init(&log).unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn catalog_argument_wins_over_configured_path() {
    let dir = tempfile::tempdir().unwrap();
    let from_arg = dir.path().join("arg.toml");
    std::fs::write(
        &from_arg,
        r#"
[[categories]]
id = "sea"
title = "Sea"

[[categories.tracks]]
id = "waves"
title = "Waves"
uri = "waves.ogg"
"#,
    )
    .unwrap();

    let mut settings = Settings::default();
    settings.catalog.path = Some(PathBuf::from("/nonexistent/catalog.toml"));

    let catalog = load_catalog(Some(from_arg), &settings).unwrap();
    assert_eq!(catalog.track_count(), 1);

    assert!(load_catalog(None, &settings).is_err());
    assert_eq!(
        load_catalog(None, &Settings::default()).unwrap(),
        Catalog::builtin()
    );
}
