// Host-side tests for catalog parsing and layer construction.

use asterism_core::*;

#[test]
fn parses_hipparcos_style_records() {
    let json = r#"[
        {"name": "HIP 32349", "ra": 101.28715539, "dec": -16.71611582, "mag": -1.44},
        {"name": "HIP 30438", "ra": 95.98787763, "dec": -52.69571799, "mag": -0.62},
        {"name": "HIP 69673", "ra": 213.9153, "dec": 19.18241027, "mag": -0.05}
    ]"#;
    let catalog = Catalog::from_json(json).unwrap();
    assert_eq!(catalog.len(), 3);
    let sirius = catalog.get(0).unwrap();
    assert_eq!(sirius.name, "HIP 32349");
    assert_eq!(sirius.original_index, 0);
    assert_eq!(catalog.get(2).unwrap().original_index, 2);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let catalog = Catalog::from_json(r#"[{"name": "odd"}, {}]"#).unwrap();
    let odd = catalog.get(0).unwrap();
    assert_eq!(odd.ra, 0.0);
    assert_eq!(odd.dec, 0.0);
    assert!(odd.mag > 5.0);
    assert_eq!(catalog.get(1).unwrap().name, "");
}

#[test]
fn rejects_bad_or_empty_catalogs() {
    assert!(matches!(Catalog::from_json("nope"), Err(CatalogError::Parse(_))));
    assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
}

#[test]
fn resolve_missing_index_is_none() {
    let catalog = Catalog::procedural(10, 1);
    assert!(catalog.resolve(9).is_some());
    assert!(catalog.resolve(10).is_none());
    assert!(catalog.position(usize::MAX).is_none());
}

#[test]
fn resolved_stars_sit_on_the_sky_sphere() {
    let catalog = Catalog::procedural(50, 3);
    for i in 0..catalog.len() {
        let s = catalog.resolve(i).unwrap();
        assert_eq!(s.original_index, i);
        assert!((s.position.length() - SKY_RADIUS).abs() < 1e-2);
    }
}

#[test]
fn procedural_catalog_is_deterministic() {
    let a = Catalog::procedural(20, 42);
    let b = Catalog::procedural(20, 42);
    for i in 0..20 {
        assert_eq!(a.get(i), b.get(i));
    }
}

#[test]
fn layers_split_by_magnitude_and_keep_indices() {
    let json = r#"[
        {"name": "bright", "ra": 10, "dec": 0, "mag": 0.5},
        {"name": "mid", "ra": 20, "dec": 0, "mag": 3.0},
        {"name": "faint", "ra": 30, "dec": 0, "mag": 4.9},
        {"name": "bright2", "ra": 40, "dec": 0, "mag": 1.9}
    ]"#;
    let catalog = Catalog::from_json(json).unwrap();
    let layers = catalog.layers();
    assert_eq!(layers.len(), MAGNITUDE_BANDS.len());
    let idx = |l: &StarLayer| l.data.iter().map(|r| r.original_index).collect::<Vec<_>>();
    assert_eq!(idx(&layers[0]), vec![0, 3]);
    assert_eq!(idx(&layers[1]), vec![1]);
    assert_eq!(idx(&layers[2]), vec![2]);
    assert_eq!(layers[0].positions.len(), 6);
    assert_eq!(layers[0].position(1), catalog.position(3).unwrap());
}
