use mgrs_grid::{
    Bounds, GridType, GridZone, Label, LatLon, Mgrs,
    grid::labeler::{column_row_labels, grid_labels, DEFAULT_BUFFER},
    zones::zones,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Labels of every zone overlapping the tile, checked against their zone
fn labels_in(tile: &Bounds, grid_type: GridType, buffer: f64) -> Vec<Label> {
    let mut labels = Vec::new();

    for zone in zones(tile) {
        let zone_labels = match grid_type {
            GridType::HundredKilometer => column_row_labels(tile, 100_000, &zone, buffer),
            _ => grid_labels(tile, grid_type, &zone, buffer),
        };

        for label in &zone_labels {
            assert_eq!(label.zone_number(), zone.number());
            assert_eq!(label.band_letter(), zone.letter());
            assert!(
                zone.bounds().contains_bounds(label.bounds(), 1e-9),
                "{} {} outside {zone}",
                label.text(),
                label.bounds()
            );
            assert!(label.bounds().intersects(tile), "{} outside tile", label.text());
        }

        labels.extend(zone_labels);
    }

    labels
}

#[test]
fn squares_straddling_zone_seam_stay_in_zone() {
    init();

    // 78°W between 17S and 18S
    let tile = Bounds::new(-79.0, 36.0, -77.0, 39.0);
    let labels = labels_in(&tile, GridType::HundredKilometer, DEFAULT_BUFFER);

    let west_edge: Vec<_> = labels
        .iter()
        .filter(|label| label.zone_number() == 18 && label.bounds().west() < -77.9)
        .collect();
    assert!(!west_edge.is_empty());
    // Inset from the seam
    assert!(west_edge.iter().all(|label| label.bounds().west() > -78.0));

    assert!(labels.iter().any(|label| label.zone_number() == 17));
}

#[test]
fn labels_without_buffer_reach_the_seam() {
    init();

    let tile = Bounds::new(-79.0, 36.0, -77.0, 39.0);
    let labels = labels_in(&tile, GridType::HundredKilometer, 0.0);

    assert!(labels
        .iter()
        .any(|label| label.zone_number() == 18 && (label.bounds().west() - -78.0).abs() < 1e-9));
    assert!(labels
        .iter()
        .any(|label| label.zone_number() == 17 && (label.bounds().east() - -78.0).abs() < 1e-9));
}

#[test]
fn square_labels_name_the_square_they_cover() {
    init();

    let tile = Bounds::new(-78.0, 37.0, -75.0, 40.0);

    for label in labels_in(&tile, GridType::HundredKilometer, DEFAULT_BUFFER) {
        let square = Mgrs::from_latlon(label.center(), 0).unwrap();
        assert_eq!(square.square_id(), label.text(), "at {}", label.center());
    }
}

#[test]
fn band_seam_splits_labels() {
    init();

    // 40°N between 18S and 18T
    let tile = Bounds::new(-76.0, 39.5, -75.0, 40.5);
    let labels = labels_in(&tile, GridType::TenKilometer, DEFAULT_BUFFER);

    assert!(labels.iter().any(|label| label.band_letter() == 'S'));
    assert!(labels.iter().any(|label| label.band_letter() == 'T'));
    assert!(labels.iter().all(|label| label.text().len() == 2));
}

#[test]
fn norway_seam() {
    init();

    // 3°E between 31V and 32V
    let tile = Bounds::new(2.0, 59.0, 4.0, 61.0);
    let labels = labels_in(&tile, GridType::HundredKilometer, DEFAULT_BUFFER);

    assert!(labels.iter().any(|label| label.zone_number() == 31));
    assert!(labels
        .iter()
        .filter(|label| label.zone_number() == 32)
        .all(|label| label.bounds().west() >= 3.0));
}

#[test]
fn svalbard_seam() {
    init();

    // 9°E between 31X and 33X
    let tile = Bounds::new(8.0, 78.0, 10.0, 79.0);
    let labels = labels_in(&tile, GridType::TenKilometer, DEFAULT_BUFFER);

    assert!(labels.iter().any(|label| label.zone_number() == 31));
    assert!(labels.iter().any(|label| label.zone_number() == 33));
}

#[test]
fn digit_labels_match_identifiers() {
    init();

    let tile = Bounds::new(-77.05, 38.88, -77.02, 38.90);
    let labels = labels_in(&tile, GridType::Kilometer, DEFAULT_BUFFER);
    assert!(!labels.is_empty());

    for label in labels {
        let mgrs = Mgrs::from_latlon(label.center(), 5).unwrap();
        assert_eq!(mgrs.easting_and_northing(GridType::Kilometer), label.text());
    }

    let zone = GridZone::new(18, 'S').unwrap();
    let hundred_meter = grid_labels(&tile, GridType::HundredMeter, &zone, DEFAULT_BUFFER);
    let coord = LatLon::create(38.88950422, -77.03519133).unwrap();
    let containing: Vec<_> = hundred_meter
        .iter()
        .filter(|label| label.bounds().contains(&coord))
        .collect();

    assert_eq!(containing.len(), 1);
    assert_eq!(containing[0].text(), "234064");
}
