//! A geodesic problem on an ellipsoid, posed incrementally
use crate::internal::*;

/// An `EllipsoidalArc` holds the five quantities involved in the
/// geodesic problems on an ellipsoid: The positions of the two end
/// points, A and B, as (longitude, latitude) in radians, the forward
/// azimuth at A, the reverse azimuth at B, and the length of the arc.
///
/// Each quantity is either given by the caller, computed by one of the
/// solvers, or still undefined. Reading an undefined quantity is an
/// error.
///
/// Having computed the length of an arc by
/// [`calculate_distance`](EllipsoidalArc::calculate_distance), intermediate
/// points along the arc may be found by repeatedly setting a shorter
/// distance and calling [`calculate_position`](EllipsoidalArc::calculate_position).
///
/// For one-shot computations, the stateless
/// [`Ellipsoid::geodesic_inv`](crate::Ellipsoid::geodesic_inv) and
/// [`Ellipsoid::geodesic_fwd`](crate::Ellipsoid::geodesic_fwd) are
/// more convenient.
#[derive(Clone, Debug, PartialEq)]
pub struct EllipsoidalArc {
    ellps: Ellipsoid,
    position_a: Option<Point>,
    position_b: Option<Point>,
    azimuth_a: Option<f64>,
    azimuth_b: Option<f64>,
    distance: Option<f64>,
}

impl EllipsoidalArc {
    /// A new, blank, arc on `ellps`. Fails if `ellps` does not describe
    /// an actual ellipsoid
    pub fn new(ellps: Ellipsoid) -> Result<EllipsoidalArc, Error> {
        ellps.validate()?;
        Ok(EllipsoidalArc {
            ellps,
            position_a: None,
            position_b: None,
            azimuth_a: None,
            azimuth_b: None,
            distance: None,
        })
    }

    /// The underlying ellipsoid
    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellps
    }

    /// Forget everything but the ellipsoid
    pub fn clear(&mut self) {
        *self = EllipsoidalArc {
            ellps: self.ellps,
            position_a: None,
            position_b: None,
            azimuth_a: None,
            azimuth_b: None,
            distance: None,
        };
    }

    // ----- Setters -----------------------------------------------------------

    pub fn set_position_a(&mut self, longitude: f64, latitude: f64) {
        self.position_a = Some(Point::raw(longitude, latitude));
    }

    pub fn set_position_b(&mut self, longitude: f64, latitude: f64) {
        self.position_b = Some(Point::raw(longitude, latitude));
    }

    pub fn set_azimuth_a(&mut self, azimuth: f64) {
        self.azimuth_a = Some(azimuth);
    }

    pub fn set_azimuth_b(&mut self, azimuth: f64) {
        self.azimuth_b = Some(azimuth);
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.distance = Some(distance);
    }

    // ----- Getters -----------------------------------------------------------

    pub fn position_a(&self) -> Result<Point, Error> {
        self.position_a.ok_or(Error::Undefined("position A"))
    }

    pub fn position_b(&self) -> Result<Point, Error> {
        self.position_b.ok_or(Error::Undefined("position B"))
    }

    pub fn longitude_a(&self) -> Result<f64, Error> {
        Ok(self.position_a()?.x())
    }

    pub fn latitude_a(&self) -> Result<f64, Error> {
        Ok(self.position_a()?.y())
    }

    pub fn longitude_b(&self) -> Result<f64, Error> {
        Ok(self.position_b()?.x())
    }

    pub fn latitude_b(&self) -> Result<f64, Error> {
        Ok(self.position_b()?.y())
    }

    /// The forward azimuth at A
    pub fn azimuth_a(&self) -> Result<f64, Error> {
        self.azimuth_a.ok_or(Error::Undefined("azimuth A"))
    }

    /// The reverse azimuth at B, i.e. the direction from B towards A
    pub fn azimuth_b(&self) -> Result<f64, Error> {
        self.azimuth_b.ok_or(Error::Undefined("azimuth B"))
    }

    pub fn distance(&self) -> Result<f64, Error> {
        self.distance.ok_or(Error::Undefined("distance"))
    }

    // ----- Solvers -----------------------------------------------------------

    /// Solve the inverse problem: Given positions A and B, compute
    /// (and record) the distance and the two azimuths.
    /// Returns the distance.
    pub fn calculate_distance(&mut self) -> Result<f64, Error> {
        let a = self.position_a()?;
        let b = self.position_b()?;
        let solution = self.ellps.geodesic_inv(&a, &b)?;
        self.azimuth_a = Some(solution.azimuth_a);
        self.azimuth_b = Some(solution.azimuth_b);
        self.distance = Some(solution.distance);
        Ok(solution.distance)
    }

    /// Solve the direct problem: Given position A, the azimuth at A, and
    /// the distance, compute (and record) position B and the reverse
    /// azimuth at B. Returns position B.
    pub fn calculate_position(&mut self) -> Result<Point, Error> {
        let a = self.position_a()?;
        let azimuth = self.azimuth_a()?;
        let distance = self.distance()?;
        let solution = self.ellps.geodesic_fwd(&a, azimuth, distance)?;
        self.position_b = Some(solution.position_b);
        self.azimuth_b = Some(solution.azimuth_b);
        Ok(solution.position_b)
    }
}

// ----- Tests ---------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;

    #[test]
    fn construction() {
        assert!(EllipsoidalArc::new(Ellipsoid::default()).is_ok());
        assert!(matches!(
            EllipsoidalArc::new(Ellipsoid::new(0., 0.003)),
            Err(Error::BadParam(_, _))
        ));
    }

    #[test]
    fn undefined() -> Result<(), Error> {
        let mut arc = EllipsoidalArc::new(Ellipsoid::default())?;
        assert_eq!(arc.azimuth_a(), Err(Error::Undefined("azimuth A")));
        assert_eq!(arc.latitude_b(), Err(Error::Undefined("position B")));
        assert_eq!(arc.distance(), Err(Error::Undefined("distance")));

        // Missing position B
        arc.set_position_a(0., 0.);
        assert_eq!(
            arc.calculate_distance(),
            Err(Error::Undefined("position B"))
        );

        // Missing azimuth and distance
        assert_eq!(
            arc.calculate_position(),
            Err(Error::Undefined("azimuth A"))
        );
        arc.set_azimuth_a(1.);
        assert_eq!(arc.calculate_position(), Err(Error::Undefined("distance")));
        Ok(())
    }

    #[test]
    fn position_without_convergence() -> Result<(), Error> {
        let mut arc = EllipsoidalArc::new(Ellipsoid::named("GRS80")?)?;
        arc.set_position_a(0., 0.);
        arc.set_azimuth_a(0.3);
        arc.set_distance(f64::NAN);
        assert_eq!(
            arc.calculate_position(),
            Err(Error::NonConvergence("geodesic_fwd", 10))
        );
        // Nothing is stored on failure
        assert_eq!(arc.position_b(), Err(Error::Undefined("position B")));
        assert_eq!(arc.azimuth_b(), Err(Error::Undefined("azimuth B")));
        Ok(())
    }

    #[test]
    fn distance_then_positions() -> Result<(), Error> {
        // In kilometres: Any length unit will do
        let ellps = Ellipsoid::new(6378.137, 1. / 298.257222101);
        let mut arc = EllipsoidalArc::new(ellps)?;

        // London--Paris
        arc.set_position_a((-0.1_f64).to_radians(), 51.5_f64.to_radians());
        arc.set_position_b(2.35_f64.to_radians(), 48.85_f64.to_radians());
        let s = arc.calculate_distance()?;
        assert_float_eq!(s, 342.762, abs <= 1e-3);
        assert_eq!(arc.distance()?, s);
        assert_float_eq!(arc.azimuth_a()?.to_degrees(), 148.35332, abs <= 1e-5);

        // The far end, as seen from A, reproduces B
        let b = arc.position_b()?;
        let azimuth_b = arc.azimuth_b()?;
        let p = arc.calculate_position()?;
        assert_float_eq!(p.x(), b.x(), abs <= 1e-9);
        assert_float_eq!(p.y(), b.y(), abs <= 1e-9);
        assert_float_eq!(arc.azimuth_b()?, azimuth_b, abs <= 1e-8);

        // Walk along the arc: every intermediate point is on the way
        let mut ss = 0.;
        while ss < s {
            arc.set_distance(ss);
            let p = arc.calculate_position()?;
            let a = arc.position_a()?;
            let to_p = ellps.distance(&a, &p)?;
            let p_to_b = ellps.distance(&p, &b)?;
            assert_float_eq!(to_p + p_to_b, s, abs <= 1e-6);
            ss += 50.;
        }

        arc.clear();
        assert!(arc.position_a().is_err());
        assert_eq!(arc.ellipsoid(), &ellps);
        Ok(())
    }
}
