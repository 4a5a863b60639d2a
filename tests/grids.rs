use mgrs_grid::{
    Bounds, Error, GridConfig, GridTile, GridType, Grids, LabelerConfig, LabelerKind, ZoomGrids, MAX_MAP_ZOOM,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn zoom_index(grids: &Grids) -> Vec<ZoomGrids> {
    (0..=MAX_MAP_ZOOM).map(|zoom| grids.grids(zoom).unwrap().clone()).collect()
}

#[test]
fn default_zoom_ranges() {
    init();

    let grids = Grids::new();
    let at = |zoom: u8| grids.grids(zoom).unwrap().iter().collect::<Vec<_>>();

    assert_eq!(at(0), [GridType::Gzd]);
    assert_eq!(at(5), [GridType::Gzd, GridType::HundredKilometer]);
    assert_eq!(at(10), [GridType::Gzd, GridType::HundredKilometer, GridType::TenKilometer]);
    assert_eq!(at(16), [GridType::Gzd, GridType::HundredKilometer, GridType::HundredMeter]);
    assert_eq!(at(MAX_MAP_ZOOM), [GridType::Gzd, GridType::HundredKilometer, GridType::TenMeter]);
}

#[test]
fn enable_then_disable_restores_every_zoom() {
    init();

    let mut grids = Grids::with_types(&[GridType::Gzd, GridType::Kilometer]);
    let before = zoom_index(&grids);

    for grid_type in [GridType::HundredKilometer, GridType::TenKilometer, GridType::TenMeter] {
        grids.enable(grid_type);
        assert_ne!(zoom_index(&grids), before);
        grids.disable(grid_type);
        assert_eq!(zoom_index(&grids), before);
    }

    // Enabling an enabled grid changes nothing
    grids.enable(GridType::Kilometer);
    assert_eq!(zoom_index(&grids), before);
}

#[test]
fn set_types_enables_exactly_the_listed_types() {
    init();

    let mut grids = Grids::new();
    grids.set_types(&[GridType::TenKilometer]);

    for grid_type in GridType::ALL {
        assert_eq!(grids.is_enabled(grid_type), grid_type == GridType::TenKilometer);
    }
    assert!(grids.grids(0).unwrap().is_empty());
    assert_eq!(grids.grids(9).unwrap().iter().collect::<Vec<_>>(), [GridType::TenKilometer]);

    grids.enable_types(&[GridType::Gzd, GridType::TenMeter]);
    grids.disable_types(&[GridType::TenKilometer]);
    assert_eq!(grids.grids(19).unwrap().iter().collect::<Vec<_>>(), [GridType::Gzd, GridType::TenMeter]);
}

#[test]
fn zoom_range_errors() {
    init();

    let mut grids = Grids::new();
    let before = zoom_index(&grids);

    assert!(matches!(grids.set_zoom_range(GridType::Kilometer, 14, Some(12)), Err(Error::InvalidZoomRange(_))));
    assert!(matches!(grids.set_min_zoom(GridType::Kilometer, MAX_MAP_ZOOM + 1), Err(Error::InvalidZoomRange(_))));
    assert!(matches!(grids.set_max_zoom(GridType::Kilometer, Some(40)), Err(Error::InvalidZoomRange(_))));

    // Failed updates leave the registry untouched
    assert_eq!(zoom_index(&grids), before);
}

#[test]
fn configured_grids() {
    init();

    let ten_km = GridConfig {
        min_zoom: 7,
        max_zoom: Some(8),
        labeler: None,
        ..GridConfig::for_type(GridType::TenKilometer)
    };
    let grids = Grids::with_configs(&[ten_km]).unwrap();

    assert!(grids.grids(7).unwrap().contains(GridType::TenKilometer));
    assert!(!grids.grids(9).unwrap().contains(GridType::TenKilometer));
    assert!(!grids.has_labeler(GridType::TenKilometer));
    assert!(grids.has_labeler(GridType::Kilometer));

    let reversed = GridConfig {
        min_zoom: 9,
        max_zoom: Some(3),
        ..GridConfig::for_type(GridType::Kilometer)
    };
    assert!(matches!(Grids::with_configs(&[reversed]), Err(Error::InvalidZoomRange(_))));

    let wide_buffer = GridConfig {
        labeler: Some(LabelerConfig {
            buffer: 0.75,
            ..LabelerConfig::new(LabelerKind::Grid, 12)
        }),
        ..GridConfig::for_type(GridType::Kilometer)
    };
    assert_eq!(Grids::with_configs(&[wide_buffer]), Err(Error::InvalidBuffer(0.75)));
}

#[test]
fn label_zoom_ranges() {
    init();

    let mut grids = Grids::new();

    grids.set_label_min_zoom(GridType::Gzd, 8).unwrap();
    let labeler = grids.labeler(GridType::Gzd).unwrap();
    assert_eq!((labeler.min_zoom(), labeler.max_zoom()), (8, None));
    assert!(!labeler.is_within(7));

    grids.set_label_max_zoom(GridType::Gzd, Some(6)).unwrap();
    let labeler = grids.labeler(GridType::Gzd).unwrap();
    assert_eq!((labeler.min_zoom(), labeler.max_zoom()), (6, Some(6)));

    assert!(matches!(grids.set_label_zoom_range(GridType::Gzd, 6, Some(5)), Err(Error::InvalidZoomRange(_))));

    grids.disable_labeler(GridType::Gzd).unwrap();
    assert!(!grids.is_labeler_enabled(GridType::Gzd));
    grids.enable_labeler(GridType::Gzd).unwrap();
    assert!(grids.is_labeler_enabled(GridType::Gzd));
}

#[test]
fn draw_tile() {
    init();

    let grids = Grids::new();
    let tile = GridTile::new(256, 256, 6, Bounds::new(-78.5, 38.0, -76.0, 40.0)).unwrap();
    let drawn = grids.draw(&tile).unwrap();

    let types: Vec<_> = drawn.iter().map(|tile_grid| tile_grid.grid_type).collect();
    assert_eq!(types, [GridType::Gzd, GridType::HundredKilometer]);

    let gzd = &drawn[0];
    let names: Vec<_> = gzd.labels.iter().map(|label| label.text()).collect();
    assert_eq!(names, ["17S", "18S"]);
    // 78°W seam
    assert!(gzd.lines.iter().any(|line| line.start().longitude() == -78.0 && line.end().longitude() == -78.0));

    let squares = &drawn[1];
    assert!(squares.labels.iter().any(|label| label.text() == "UJ" && label.zone_number() == 18));
    assert!(!squares.lines.is_empty());
    assert!(squares
        .lines
        .iter()
        .all(|line| tile.bounds().contains(line.start()) && tile.bounds().contains(line.end())));
}

#[test]
fn draw_skips_disabled_labelers() {
    init();

    let mut grids = Grids::new();
    grids.disable_labeler(GridType::Gzd).unwrap();

    let tile = GridTile::new(256, 256, 4, Bounds::new(-78.5, 38.0, -76.0, 40.0)).unwrap();
    let drawn = grids.draw(&tile).unwrap();

    assert_eq!(drawn.len(), 1);
    assert!(drawn[0].labels.is_empty());
    assert!(!drawn[0].lines.is_empty());
}

#[test]
fn tile_zoom_beyond_map() {
    assert!(matches!(
        GridTile::new(256, 256, MAX_MAP_ZOOM + 1, Bounds::new(-78.5, 38.0, -76.0, 40.0)),
        Err(Error::InvalidZoomRange(_))
    ));
}
