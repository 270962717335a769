mod geodesics;
pub use geodesics::DirectSolution;
pub use geodesics::InverseSolution;

use crate::internal::*;

/// Representation of a biaxial ellipsoid of revolution.
///
/// The length unit of the semimajor axis is arbitrary, but all lengths
/// derived from, or computed by means of, the ellipsoid share that unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    a: f64,
    f: f64,
}

/// GRS80 is the default ellipsoid.
impl Default for Ellipsoid {
    fn default() -> Ellipsoid {
        Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)
    }
}

impl Ellipsoid {
    /// User defined ellipsoid
    #[must_use]
    pub fn new(semimajor_axis: f64, flattening: f64) -> Ellipsoid {
        Ellipsoid {
            a: semimajor_axis,
            f: flattening,
        }
    }

    /// User defined ellipsoid, given by its semimajor and semiminor axes
    #[must_use]
    pub fn from_axes(semimajor_axis: f64, semiminor_axis: f64) -> Ellipsoid {
        let f = (semimajor_axis - semiminor_axis) / semimajor_axis;
        Ellipsoid::new(semimajor_axis, f)
    }

    /// Predefined ellipsoid
    pub fn named(name: &str) -> Result<Ellipsoid, Error> {
        match name {
            "GRS80" => Ok(Ellipsoid::new(6_378_137.0, 1. / 298.257_222_100_882_7)),
            "WGS84" => Ok(Ellipsoid::new(6_378_137.0, 1. / 298.257_223_563)),
            "intl" => Ok(Ellipsoid::new(6_378_388.0, 1. / 297.0)),
            "bessel" => Ok(Ellipsoid::new(6_377_397.155, 1. / 299.152_812_8)),
            "clrk66" => Ok(Ellipsoid::new(6_378_206.4, 1. / 294.978_698_2)),
            // Airy 1830, as used by the Ordnance Survey of Great Britain
            "airy" => Ok(Ellipsoid::from_axes(6_377_563.396, 6_356_256.910)),
            // Airy modified, as used by the Irish Grid
            "mod_airy" => Ok(Ellipsoid::from_axes(6_377_340.189, 6_356_034.448)),
            _ => Err(Error::NotFound(name.to_string(), String::default())),
        }
    }

    /// Check that the defining parameters describe an actual ellipsoid,
    /// i.e. a positive, finite semimajor axis and a flattening in [0, 1)
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.a.is_finite() && self.a > 0.) {
            error!("Ellipsoid: Bad semimajor axis: {}", self.a);
            return Err(Error::BadParam("a".to_string(), self.a.to_string()));
        }
        if !(0.0..1.0).contains(&self.f) {
            error!("Ellipsoid: Bad flattening: {}", self.f);
            return Err(Error::BadParam("f".to_string(), self.f.to_string()));
        }
        Ok(())
    }

    // ----- Eccentricities --------------------------------------------------------

    /// The squared eccentricity *e² = (a² - b²) / a²*.
    #[must_use]
    pub fn eccentricity_squared(&self) -> f64 {
        self.f * (2_f64 - self.f)
    }

    /// The eccentricity *e*
    #[must_use]
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity_squared().sqrt()
    }

    /// The squared second eccentricity *e'² = (a² - b²) / b² = e² / (1 - e²)*
    #[must_use]
    pub fn second_eccentricity_squared(&self) -> f64 {
        let es = self.eccentricity_squared();
        es / (1.0 - es)
    }

    // ----- Axes ------------------------------------------------------------------

    /// The semimajor axis, *a*
    #[must_use]
    pub fn semimajor_axis(&self) -> f64 {
        self.a
    }

    /// The semiminor axis, *b*
    #[must_use]
    pub fn semiminor_axis(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    // ----- Flattenings -----------------------------------------------------------

    /// The flattening, *f = (a - b)/a*
    #[must_use]
    pub fn flattening(&self) -> f64 {
        self.f
    }

    /// The third flattening, *n = (a - b) / (a + b) = f / (2 - f)*
    #[must_use]
    pub fn third_flattening(&self) -> f64 {
        self.f / (2.0 - self.f)
    }

    // ----- Curvatures ------------------------------------------------------------

    /// The radius of curvature in the prime vertical, *ν*
    #[must_use]
    pub fn prime_vertical_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        self.a / (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).sqrt()
    }

    /// The meridian radius of curvature, *ρ*
    #[must_use]
    pub fn meridian_radius_of_curvature(&self, latitude: f64) -> f64 {
        if self.f == 0.0 {
            return self.a;
        }
        let num = self.a * (1.0 - self.eccentricity_squared());
        let denom = (1.0 - latitude.sin().powi(2) * self.eccentricity_squared()).powf(1.5);
        num / denom
    }

    /// The latitude of the auxiliary sphere, *atan((1 - f) tan φ)*
    #[must_use]
    pub fn reduced_latitude(&self, latitude: f64) -> f64 {
        ((1.0 - self.f) * latitude.tan()).atan()
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsoid() -> Result<(), Error> {
        // Constructors
        let ellps = Ellipsoid::named("intl")?;
        assert_eq!(ellps.flattening(), 1. / 297.);

        let ellps = Ellipsoid::named("GRS80")?;
        assert_eq!(ellps.semimajor_axis(), 6378137.0);
        assert_eq!(ellps.flattening(), 1. / 298.25722_21008_82711_24316);
        assert_eq!(ellps, Ellipsoid::default());

        assert!(matches!(
            Ellipsoid::named("pancake"),
            Err(Error::NotFound(_, _))
        ));
        Ok(())
    }

    #[test]
    fn shape_and_size() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;

        // Additional shape descriptors
        assert!((ellps.eccentricity() - 0.081819191).abs() < 1.0e-10);
        assert!((ellps.eccentricity_squared() - 0.00669_43800_22903_41574).abs() < 1.0e-10);
        assert!((ellps.third_flattening() - 0.001679220394629).abs() < 1e-14);

        // Additional size descriptors
        assert!((ellps.semiminor_axis() - 6_356_752.31414_0347).abs() < 1e-9);
        assert!((ellps.semimajor_axis() - 6_378_137.0).abs() < 1e-9);

        // Airy 1830, given by its axes
        let airy = Ellipsoid::named("airy")?;
        assert!((airy.semiminor_axis() - 6_356_256.910).abs() < 1e-8);
        assert!((1. / airy.flattening() - 299.324975315).abs() < 1e-8);
        assert!((airy.eccentricity_squared() - 0.006670539761597).abs() < 1e-14);
        Ok(())
    }

    #[test]
    fn curvatures() -> Result<(), Error> {
        let ellps = Ellipsoid::named("GRS80")?;
        // The curvatures at the North Pole
        let pole = 90_f64.to_radians();
        assert!((ellps.meridian_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);
        assert!((ellps.prime_vertical_radius_of_curvature(pole) - 6_399_593.6259).abs() < 1e-4);

        // The curvatures at the Equator
        assert!((ellps.meridian_radius_of_curvature(0.0) - 6_335_439.3271).abs() < 1.0e-4);
        assert!(
            (ellps.prime_vertical_radius_of_curvature(0.0) - ellps.semimajor_axis()).abs() < 1.0e-4
        );

        // No flattening, no variation
        let sphere = Ellipsoid::new(6_371_000., 0.);
        assert_eq!(sphere.meridian_radius_of_curvature(1.), 6_371_000.);
        assert!((sphere.reduced_latitude(0.5) - 0.5).abs() < 1e-15);
        Ok(())
    }

    #[test]
    fn validation() {
        assert!(Ellipsoid::default().validate().is_ok());
        assert!(Ellipsoid::new(1., 0.).validate().is_ok());
        assert!(matches!(
            Ellipsoid::new(-1., 0.003).validate(),
            Err(Error::BadParam(_, _))
        ));
        assert!(Ellipsoid::new(f64::NAN, 0.003).validate().is_err());
        assert!(Ellipsoid::new(6e6, 1.).validate().is_err());
        assert!(Ellipsoid::new(6e6, -0.1).validate().is_err());
    }
}
