use super::*;

#[test]
fn builtin_catalog_has_three_categories_of_three_tracks() {
    let catalog = Catalog::builtin();
    assert_eq!(catalog.categories().len(), 3);
    assert_eq!(catalog.track_count(), 9);
    assert!(catalog.categories().iter().all(|c| c.tracks.len() == 3));
}

#[test]
fn builtin_tracks_carry_their_category_title() {
    let catalog = Catalog::builtin();
    for category in catalog.categories() {
        for track in &category.tracks {
            assert_eq!(track.category, category.title);
            assert!(track.uri.starts_with("https://"));
        }
    }
}

#[test]
fn find_looks_up_by_id() {
    let catalog = Catalog::builtin();
    let track = catalog.find("singing-bowls").unwrap();
    assert_eq!(track.title, "Singing Bowls");
    assert_eq!(track.category, "Meditation");
    assert!(catalog.find("nope").is_none());
}

#[test]
fn from_toml_fills_missing_category_labels() {
    let catalog = Catalog::from_toml_str(
        r#"
[[categories]]
id = "night"
title = "Night"

[[categories.tracks]]
id = "owl"
title = "Owls"
uri = "/tmp/owl.ogg"

[[categories.tracks]]
id = "crickets"
title = "Crickets"
category = "Insects"
uri = "file:///tmp/crickets.ogg"
description = "Chirping."
"#,
    )
    .unwrap();

    assert_eq!(catalog.track_count(), 2);
    assert_eq!(catalog.find("owl").unwrap().category, "Night");
    let crickets = catalog.find("crickets").unwrap();
    assert_eq!(crickets.category, "Insects");
    assert_eq!(crickets.description.as_deref(), Some("Chirping."));
    assert!(crickets.artwork.is_none());
}

#[test]
fn from_toml_rejects_empty_catalog() {
    let err = Catalog::from_toml_str(
        r#"
[[categories]]
id = "empty"
title = "Empty"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::Empty));
}

#[test]
fn from_toml_rejects_duplicate_ids() {
    let err = Catalog::from_toml_str(
        r#"
[[categories]]
id = "a"
title = "A"

[[categories.tracks]]
id = "same"
title = "One"
uri = "/tmp/one.ogg"

[[categories]]
id = "b"
title = "B"

[[categories.tracks]]
id = "same"
title = "Two"
uri = "/tmp/two.ogg"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateId(id) if id == "same"));
}

#[test]
fn from_toml_rejects_duplicate_category_ids() {
    let err = Catalog::from_toml_str(
        r#"
[[categories]]
id = "rain"
title = "Rain"

[[categories.tracks]]
id = "drizzle"
title = "Drizzle"
uri = "/tmp/drizzle.ogg"

[[categories]]
id = "rain"
title = "More rain"

[[categories.tracks]]
id = "storm"
title = "Storm"
uri = "/tmp/storm.ogg"
"#,
    )
    .unwrap_err();
    assert!(matches!(err, CatalogError::DuplicateCategory(id) if id == "rain"));
}

#[test]
fn builtin_category_ids_are_unique() {
    let catalog = Catalog::builtin();
    let mut ids: Vec<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), catalog.categories().len());
}

#[test]
fn from_toml_reports_parse_errors() {
    let err = Catalog::from_toml_str("[[categories]]\nid = ").unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[test]
fn load_reads_catalog_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.toml");
    std::fs::write(
        &path,
        r#"
[[categories]]
id = "focus"
title = "Focus"

[[categories.tracks]]
id = "brown-noise"
title = "Brown Noise"
uri = "/tmp/brown.ogg"
"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    assert_eq!(catalog.categories()[0].title, "Focus");

    let missing = Catalog::load(&dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(missing, CatalogError::Io(_)));
}
