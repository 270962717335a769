use float_eq::assert_float_eq;
use osgrid::prelude::*;

// ----- U S E R   P R O V I D E D   G R I D ------------------------------------------

/// A national grid defined outside of the library: UTM zone 32, with the
/// 100 km squares designated by their easting index (one digit) and
/// northing index (three digits), e.g. "6060" for the square with its
/// south-west corner at (600 km, 6000 km).
///
/// Since the integration tests in the "tests" directory are compiled as
/// independent crates, this shows that user defined grids work exactly
/// like the built in ones.
struct Utm32 {
    tmerc: TransverseMercator,
}

impl Utm32 {
    fn new() -> Result<Utm32, Error> {
        let params = TmercParameters {
            ellps: Ellipsoid::named("GRS80")?,
            k_0: 0.9996,
            lon_0: 9_f64.to_radians(),
            x_0: 500_000.,
            ..Default::default()
        };
        Ok(Utm32 {
            tmerc: TransverseMercator::new(params),
        })
    }
}

impl NationalGrid for Utm32 {
    fn projection(&self) -> &TransverseMercator {
        &self.tmerc
    }

    fn grid_square_to_offset(&self, letters: &str) -> Point {
        let index = |s: Option<&str>| s.and_then(|s| s.parse::<f64>().ok()).unwrap_or(0.);
        let x = index(letters.get(0..1));
        let y = index(letters.get(1..4));
        Point::raw(x * 100_000., y * 100_000.)
    }

    fn grid_to_grid_square(&self, grid: impl Into<Point>) -> String {
        let grid = grid.into();
        let x = (grid.x() / 100_000.).floor() as i64;
        let y = (grid.y() / 100_000.).floor() as i64;
        format!("{x}{y:03}")
    }
}

// ----- T E S T S ---------------------------------------------------------------------

#[test]
fn user_defined_grid() -> Result<(), Error> {
    let utm = Utm32::new()?;
    let copenhagen = Point::gis(12., 55.);
    let grid = utm.lonlat_to_grid(copenhagen);
    let (square, within) = utm.to_grid_reference(grid);
    assert_eq!(square, "6060");
    assert_float_eq!(within.x(), 91_875.632, abs <= 1e-3);
    assert_float_eq!(within.y(), 98_907.825, abs <= 2e-2);

    let back = utm.grid_to_lonlat(utm.from_grid_reference(&square, within))?;
    assert_float_eq!(back.x(), copenhagen.x(), abs <= 1e-10);
    assert_float_eq!(back.y(), copenhagen.y(), abs <= 1e-10);
    Ok(())
}

#[test]
fn caister_water_tower() -> Result<(), Error> {
    let osgb = Osgb::new();
    let grid = osgb.from_grid_reference("TG", (51_409.903, 13_177.271));
    assert!(grid.distance_from(&Point::raw(651_409.903, 313_177.271)) < 1e-9);

    // 52°39'27.2531"N, 1°43'4.5177"E
    let geo = osgb.grid_to_lonlat(grid)?;
    let expected = Point::dms((1, 43, 4.5177), (52, 39, 27.2531));
    let tol = (0.01_f64 / 3600.).to_radians();
    assert_float_eq!(geo.x(), expected.x(), abs <= tol);
    assert_float_eq!(geo.y(), expected.y(), abs <= tol);
    assert!(osgb.lonlat_to_grid(geo).distance_from(&grid) < 0.01);
    Ok(())
}

#[test]
fn batch_conversion() {
    let osgb = Osgb::new();
    let mut data = [
        Point::raw(651_409.903, 313_177.271),
        Point::raw(0., f64::NAN),
        Point::raw(326_000., 674_000.),
    ];
    let original = data;

    let tm = osgb.projection();
    assert_eq!(tm.apply(&mut data, Inv), 2);
    assert!(data[1].is_nan());
    assert_eq!(tm.apply(&mut data, Fwd), 3);
    for i in [0, 2] {
        assert!(data[i].distance_from(&original[i]) < 0.01);
    }
}

#[test]
fn osni_to_osgb() -> Result<(), Error> {
    let osni = Osni::new();
    let osgb = Osgb::new();

    // Slieve Donard, given as a grid reference
    let donard = osni.from_grid_reference("J", (35_788.01, 27_685.85));
    let p = osgrid::transfer(&osni, &osgb, donard)?;
    assert_float_eq!(p.x(), 144_245.972, abs <= 1e-3);
    assert_float_eq!(p.y(), 483_150.178, abs <= 1e-3);
    assert_eq!(osgb.grid_to_grid_square(p), "SB");

    // ... and back again
    let back = osgrid::transfer(&osgb, &osni, p)?;
    assert!(back.distance_from(&donard) < 0.01);
    Ok(())
}

#[test]
fn geodesic_across_the_irish_sea() -> Result<(), Error> {
    let osni = Osni::new();
    let osgb = Osgb::new();
    let donard = osni.grid_to_lonlat((335_788.01, 327_685.85))?;
    let caister = osgb.grid_to_lonlat((651_409.903, 313_177.271))?;

    // No datum shift is involved: Treat both as positions on Airy 1830
    let airy = Ellipsoid::named("airy")?;
    let mut arc = EllipsoidalArc::new(airy)?;
    arc.set_position_a(donard.x(), donard.y());
    arc.set_position_b(caister.x(), caister.y());
    let distance = arc.calculate_distance()?;

    // The grid distance is a decent approximation of the ellipsoidal distance
    let a = osgrid::transfer(&osni, &osgb, (335_788.01, 327_685.85))?;
    let b = osgb.lonlat_to_grid(caister);
    let grid_distance = a.distance_from(&b);
    assert!((distance - grid_distance).abs() / distance < 0.01);

    // Walking the distance from Slieve Donard brings us to Caister
    let reached = arc.calculate_position()?;
    assert!(airy.distance(&reached, &caister)? < 0.01);

    // ... and the reverse direction gives the same distance
    let reverse = airy.geodesic_inv(&caister, &donard)?;
    assert_float_eq!(reverse.distance, distance, abs <= 1e-3);
    Ok(())
}

#[test]
fn shareable() {
    fn is_send_and_sync<T: Send + Sync>() {}
    is_send_and_sync::<Osgb>();
    is_send_and_sync::<Osni>();
    is_send_and_sync::<Ellipsoid>();
    is_send_and_sync::<EllipsoidalArc>();
}
