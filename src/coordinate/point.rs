use crate::internal::*;
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// Generic 2D coordinate tuple, with no fixed interpretation of the elements.
///
/// Depending on context, a `Point` represents either (longitude, latitude)
/// in radians, or (easting, northing) in the length unit of the ellipsoid
/// at hand. The type does not track which: Combining points of different
/// interpretations is a caller error.
#[derive(Debug, Default, PartialEq, Copy, Clone)]
pub struct Point(pub [f64; 2]);

impl Index<usize> for Point {
    type Output = f64;
    fn index(&self, i: usize) -> &Self::Output {
        &self.0[i]
    }
}

impl IndexMut<usize> for Point {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.0[i]
    }
}

impl From<(f64, f64)> for Point {
    fn from(xy: (f64, f64)) -> Self {
        Point([xy.0, xy.1])
    }
}

impl From<[f64; 2]> for Point {
    fn from(xy: [f64; 2]) -> Self {
        Point(xy)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.0[0], p.0[1])
    }
}

// ----- C O N S T R U C T O R S ---------------------------------------------

/// Constructors
impl Point {
    /// A `Point` from latitude/longitude, with the angular input in degrees
    #[must_use]
    pub fn geo(latitude: f64, longitude: f64) -> Point {
        Point([longitude.to_radians(), latitude.to_radians()])
    }

    /// A `Point` from longitude/latitude, with the angular input in degrees
    #[must_use]
    pub fn gis(longitude: f64, latitude: f64) -> Point {
        Point([longitude.to_radians(), latitude.to_radians()])
    }

    /// A `Point` from longitude/latitude, with the angular input in degrees,
    /// minutes and seconds
    #[must_use]
    pub fn dms(longitude: (i32, u16, f64), latitude: (i32, u16, f64)) -> Point {
        let lon = angular::dms_to_dd(longitude.0, longitude.1, longitude.2);
        let lat = angular::dms_to_dd(latitude.0, latitude.1, latitude.2);
        Point::gis(lon, lat)
    }

    /// A `Point` with no unit conversion: (easting, northing), or
    /// (longitude, latitude) in radians
    #[must_use]
    pub fn raw(first: f64, second: f64) -> Point {
        Point([first, second])
    }

    /// A `Point` consisting of 2 `NaN`s
    #[must_use]
    pub fn nan() -> Point {
        Point([f64::NAN, f64::NAN])
    }

    /// A `Point` consisting of 2 `0`s
    #[must_use]
    pub fn origin() -> Point {
        Point([0., 0.])
    }
}

// ----- A C C E S S O R S ---------------------------------------------------

impl Point {
    /// The first element: longitude, or easting
    #[must_use]
    pub fn x(&self) -> f64 {
        self.0[0]
    }

    /// The second element: latitude, or northing
    #[must_use]
    pub fn y(&self) -> f64 {
        self.0[1]
    }

    /// Transform both elements from degrees to radians
    #[must_use]
    pub fn to_radians(self) -> Point {
        Point([self.0[0].to_radians(), self.0[1].to_radians()])
    }

    /// Transform both elements from radians to degrees
    #[must_use]
    pub fn to_degrees(self) -> Point {
        Point([self.0[0].to_degrees(), self.0[1].to_degrees()])
    }

    /// True if any element is `NaN`
    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.0[0].is_nan() || self.0[1].is_nan()
    }
}

// ----- A R I T H M E T I C -------------------------------------------------

impl Point {
    /// Translate by the vector `v`
    pub fn offset_by(&mut self, v: Point) {
        self.0[0] += v.0[0];
        self.0[1] += v.0[1];
    }

    /// The vector leading from `other` to `self`
    #[must_use]
    pub fn offset_from(&self, other: &Point) -> Point {
        Point([self.0[0] - other.0[0], self.0[1] - other.0[1]])
    }

    /// Multiply both elements by `factor`
    pub fn scale_by(&mut self, factor: f64) {
        self.0[0] *= factor;
        self.0[1] *= factor;
    }

    /// Multiply by a scalar, returning a new `Point`
    #[must_use]
    pub fn scale(&self, factor: f64) -> Point {
        Point([self.0[0] * factor, self.0[1] * factor])
    }

    /// Euclidean distance between two points in the plane.
    ///
    /// Primarily used to compute the distance between two projected points
    /// in their projected plane. For the distance along the surface of the
    /// ellipsoid, see [`Ellipsoid::distance`](crate::Ellipsoid::distance)
    #[must_use]
    pub fn distance_from(&self, other: &Point) -> f64 {
        (self.0[0] - other.0[0]).hypot(self.0[1] - other.0[1])
    }
}

impl Add for Point {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Point([self.0[0] + other.0[0], self.0[1] + other.0[1]])
    }
}

impl Sub for Point {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Point([self.0[0] - other.0[0], self.0[1] - other.0[1]])
    }
}

impl Mul<f64> for Point {
    type Output = Self;
    fn mul(self, factor: f64) -> Self {
        self.scale(factor)
    }
}

// ----- T E S T S ---------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point() {
        let c = Point::raw(12., 55.).to_radians();
        let d = Point::gis(12., 55.);
        assert_eq!(c, d);
        assert_eq!(d.x(), 12f64.to_radians());
        assert_eq!(d.x().to_degrees(), c.x().to_degrees());
        assert_eq!(Point::geo(55., 12.), d);

        let e = Point::from((1., 2.));
        assert_eq!(e, Point::from([1., 2.]));
        let (x, y) = e.into();
        assert_eq!((x, y), (1., 2.));
        assert!(Point::nan().is_nan());
    }

    #[test]
    fn dms() {
        let p = Point::dms((1, 43, 4.5177), (52, 39, 27.2531)).to_degrees();
        assert!((p.x() - 1.717921583).abs() < 1e-9);
        assert!((p.y() - 52.657570306).abs() < 1e-9);

        let w = Point::dms((-2, 30, 0.), (49, 0, 0.)).to_degrees();
        assert!((w.x() + 2.5).abs() < 1e-14);
    }

    #[test]
    fn arithmetic() {
        let mut a = Point::raw(1., 2.);
        let b = Point::raw(4., 6.);
        assert_eq!(b.distance_from(&a), 5.);
        assert_eq!(b.offset_from(&a), Point::raw(3., 4.));
        assert_eq!(a + b, Point::raw(5., 8.));
        assert_eq!(b - a, Point::raw(3., 4.));
        assert_eq!(a * 2., Point::raw(2., 4.));

        a.offset_by(b);
        assert_eq!(a, Point::raw(5., 8.));
        a.scale_by(0.5);
        assert_eq!(a, Point::raw(2.5, 4.));
        assert_eq!(a.scale(2.), Point::raw(5., 8.));
        assert_eq!(Point::origin(), Point::default());
    }
}
