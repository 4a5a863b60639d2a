use mgrs_grid::{Error, GridZone, Hemisphere, LatLon, Mgrs, Utm};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Points spread over the MGRS area, off the zone and band seams
fn sample_points() -> impl Iterator<Item = LatLon> {
    (0..45).flat_map(|i| {
        let lat = -79.9 + 3.71 * f64::from(i);
        (0..72).map(move |j| {
            let lon = -179.7 + 4.99 * f64::from(j);
            LatLon::create(lat, lon).unwrap()
        })
    })
}

#[test]
fn utm_round_trip_accuracy() {
    init();

    let errors: Vec<f64> = sample_points()
        .map(|coord| {
            let back = coord.to_utm().unwrap().to_latlon();
            (back.latitude() - coord.latitude()).abs().max((back.longitude() - coord.longitude()).abs())
        })
        .collect();

    let worst = errors.iter().copied().fold(0.0, f64::max);
    println!("Worst round trip error: {worst:e} degrees over {} points", errors.len());

    assert!(worst < 1e-9);
}

#[test]
fn mgrs_decode_truncates_exactly() {
    init();

    for coord in sample_points() {
        let utm = coord.to_utm().unwrap();

        for precision in 0..=5_u8 {
            let unit = 10_f64.powi(5 - i32::from(precision));
            let mgrs = Mgrs::from_utm(&utm, precision).unwrap();
            let back = mgrs.to_utm().unwrap();

            assert_eq!(back.zone(), utm.zone(), "{mgrs}");
            assert_eq!(back.hemisphere(), utm.hemisphere(), "{mgrs}");
            assert_eq!(back.easting(), (utm.easting() / unit).floor() * unit, "{mgrs}");
            assert_eq!(back.northing(), (utm.northing() / unit).floor() * unit, "{mgrs}");

            // Re-encoding the decoded corner gives the same identifier
            let again = Mgrs::encode(&back, mgrs.band(), precision).unwrap();
            assert_eq!(again, mgrs);
        }
    }
}

#[test]
fn zone_for_every_whole_degree() {
    init();

    for lat in -80..=84 {
        for lon in -180..=180 {
            let coord = LatLon::create(f64::from(lat), f64::from(lon)).unwrap();
            let zone = GridZone::from_latlon(&coord).unwrap();

            // 180° wraps to zone 1
            if lon < 180 {
                assert!(zone.bounds().contains(&coord), "{coord} not in {zone}");
            }

            let utm = coord.to_utm().unwrap();
            assert_eq!(utm.zone(), zone.number());
            assert_eq!(utm.hemisphere(), zone.hemisphere());
        }
    }
}

#[test]
fn washington_monument() {
    init();

    let coord = LatLon::create(38.88950422, -77.03519133).unwrap();
    let mgrs = coord.to_mgrs(5).unwrap();
    assert_eq!(format!("{mgrs:#}"), "18S UJ 23487 06483");

    let decoded = Mgrs::parse_str("18S UJ 23487 06483").unwrap().to_latlon().unwrap();
    // Southwest corner of the 1m square
    assert!(decoded.haversine(&coord) < 1.0);
}

#[test]
fn lon_lat_minus_77_38_9() {
    init();

    let coord = LatLon::create(38.9, -77.0).unwrap();
    let mgrs = coord.to_mgrs(5).unwrap();
    assert_eq!(mgrs.to_string(), "18SUJ2656507580");

    let decoded = mgrs.to_latlon().unwrap();
    assert!(decoded.haversine(&coord) < 1.5);
}

#[test]
fn norway_and_svalbard_exceptions() {
    init();

    let bergen_west = LatLon::create(61.0, 5.0).unwrap();
    assert_eq!(bergen_west.to_utm().unwrap().zone(), 32);
    assert!(bergen_west.to_mgrs(0).unwrap().to_string().starts_with("32V"));

    let svalbard = LatLon::create(78.0, 20.0).unwrap();
    assert_eq!(svalbard.to_utm().unwrap().zone(), 33);
    assert!(svalbard.to_mgrs(0).unwrap().to_string().starts_with("33X"));
}

#[test]
fn southern_hemisphere() {
    init();

    let sydney = LatLon::create(-33.8688, 151.2093).unwrap();
    let utm = sydney.to_utm().unwrap();

    assert_eq!(utm.zone(), 56);
    assert_eq!(utm.hemisphere(), Hemisphere::South);
    assert!((utm.easting() - 334_368.634).abs() < 1e-3);
    assert!((utm.northing() - 6_250_948.345).abs() < 1e-3);

    assert_eq!(utm.to_mgrs(5).unwrap().to_string(), "56HLH3436850948");
}

#[test]
fn parse_ignores_whitespace_and_case() {
    let compact = Mgrs::parse_str("18SUJ2348706483").unwrap();

    assert_eq!(Mgrs::parse_str(" 18s uj 23487\t06483 ").unwrap(), compact);
    assert_eq!(Mgrs::parse_str("18S UJ").unwrap().precision(), 0);
    assert_eq!(Mgrs::parse_str("4QFJ1234567890").unwrap().zone(), 4);
}

#[test]
fn parse_rejects_malformed_identifiers() {
    let invalid = [
        "",
        "SUJ2348706483",
        "118SUJ2348706483",
        "61SUJ2348706483",
        "18IUJ2348706483",
        "18S",
        "18SU",
        "18SUJ234870648",
        "18SUJ234870648X",
        "18SUJ234567890123",
        // Column not in zone 18's letter set
        "18SAJ2348706483",
        "34X",
        // Square not inside band S
        "18SUR2348706483",
        // Squares east of 31V, which ends at 3°E
        "31VGG0000",
        "31VGG",
        // Square west of 78°W, outside zone 18
        "18SSJ0000000000",
    ];

    for value in invalid {
        assert!(
            matches!(Mgrs::parse_str(value), Err(Error::InvalidIdentifier(_))),
            "{value} parsed"
        );
    }
}

#[test]
fn squares_straddling_zone_seam_decode() {
    // 18ST squares cross 78°W; their southwest corners lie in zone 17
    let corner = Mgrs::parse_str("18STJ").unwrap().to_latlon().unwrap();
    assert!(corner.longitude() < -78.0);

    let inside = Mgrs::parse_str("18STJ9000090000").unwrap().to_latlon().unwrap();
    assert!(inside.longitude() > -78.0);

    // Only the 31V part west of 3°E exists
    assert!(Mgrs::parse_str("31VDG").is_ok());
    assert!(Mgrs::parse_str("31VFG").is_err());
}

#[test]
fn out_of_range_coordinates() {
    assert!(matches!(LatLon::create(-80.5, 0.0), Err(Error::InvalidCoordinate(_))));
    assert!(matches!(LatLon::create(84.5, 0.0), Err(Error::InvalidCoordinate(_))));
    assert!(matches!(Utm::create(18, Hemisphere::North, 500_000.0, -10.0), Err(Error::InvalidCoordinate(_))));

    let coord = LatLon::create(38.9, -77.0).unwrap();
    assert!(matches!(coord.to_mgrs(6), Err(Error::InvalidIdentifier(_))));
}
