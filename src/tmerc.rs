//! Transverse Mercator, following the Ordnance Survey formulae
//! ([OS, 1998](crate::Bibliography::Os98))
use crate::internal::*;

/// The defining parameters of a Transverse Mercator projection.
///
/// Angles in radians, lengths in the unit of the ellipsoid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TmercParameters {
    pub ellps: Ellipsoid,
    /// Scale factor on the central meridian, *F0*
    pub k_0: f64,
    /// Longitude of the central meridian, *λ0*
    pub lon_0: f64,
    /// Latitude of the true origin, *φ0*
    pub lat_0: f64,
    /// False easting, *E0*
    pub x_0: f64,
    /// False northing, *N0*
    pub y_0: f64,
}

impl Default for TmercParameters {
    fn default() -> Self {
        TmercParameters {
            ellps: Ellipsoid::default(),
            k_0: 1.,
            lon_0: 0.,
            lat_0: 0.,
            x_0: 0.,
            y_0: 0.,
        }
    }
}

/// Default tolerance of the iterative grid-to-geographical conversion,
/// in the length unit of the ellipsoid
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// Upper limit for the number of iterations of the grid-to-geographical
/// conversion. A handful is typically sufficient.
pub const MAX_ITERATIONS: usize = 100;

/// A generic Transverse Mercator projection.
///
/// Geographical coordinates are (longitude, latitude) in radians, positive
/// towards east and north. Grid coordinates are (easting, northing) in the
/// length unit of the ellipsoid.
#[derive(Clone, Debug, PartialEq)]
pub struct TransverseMercator {
    params: TmercParameters,
    tolerance: f64,

    // Precomputed quantities
    a: f64,
    b: f64,
    n: f64,
    es: f64,
    a_k0: f64,
    b_k0: f64,
}

impl TransverseMercator {
    #[must_use]
    pub fn new(params: TmercParameters) -> TransverseMercator {
        let a = params.ellps.semimajor_axis();
        let b = params.ellps.semiminor_axis();
        Self::with_axes(params, a, b)
    }

    /// Construct from the ellipsoid axes directly, for grids where the
    /// semiminor axis is the defining parameter
    #[must_use]
    pub fn from_axes(
        semimajor_axis: f64,
        semiminor_axis: f64,
        k_0: f64,
        lon_0: f64,
        lat_0: f64,
        x_0: f64,
        y_0: f64,
    ) -> TransverseMercator {
        let ellps = Ellipsoid::from_axes(semimajor_axis, semiminor_axis);
        let params = TmercParameters {
            ellps,
            k_0,
            lon_0,
            lat_0,
            x_0,
            y_0,
        };
        Self::with_axes(params, semimajor_axis, semiminor_axis)
    }

    fn with_axes(params: TmercParameters, a: f64, b: f64) -> TransverseMercator {
        TransverseMercator {
            params,
            tolerance: DEFAULT_TOLERANCE,
            a,
            b,
            n: (a - b) / (a + b),
            es: (a - b) * (a + b) / (a * a),
            a_k0: a * params.k_0,
            b_k0: b * params.k_0,
        }
    }

    /// The defining parameters
    #[must_use]
    pub fn params(&self) -> &TmercParameters {
        &self.params
    }

    /// The semimajor and semiminor axes, as used by the projection
    #[must_use]
    pub fn axes(&self) -> (f64, f64) {
        (self.a, self.b)
    }

    /// Set the tolerance (in units of northing) of the iterative
    /// grid-to-geographical conversion. The sign is ignored.
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tolerance = tolerance.abs();
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    // The developed meridional arc from the latitude of origin, lat_0, to `lat`
    #[allow(non_snake_case)]
    fn meridional_arc(&self, lat: f64) -> f64 {
        let n = self.n;
        let n2 = n * n;
        let n3 = n2 * n;
        let lat_0 = self.params.lat_0;
        let d = lat - lat_0;
        let s = lat + lat_0;

        let M = (1. + n + 1.25 * n2 * (1. + n)) * d
            - 3. * n * (1. + n + 1.125 * n2) * d.sin() * s.cos()
            + 15. * n2 * (1. + n) / 8. * (2. * d).sin() * (2. * s).cos()
            - 35. * n3 / 24. * (3. * d).sin() * (3. * s).cos();
        M * self.b_k0
    }

    // The radii of curvature in the prime vertical, ν, and the meridian, ρ,
    // both scaled by k_0, and η² = ν/ρ - 1
    fn curvatures(&self, sinlat: f64) -> (f64, f64, f64) {
        let x = 1. - self.es * sinlat * sinlat;
        let nu = self.a_k0 / x.sqrt();
        let rho = nu * (1. - self.es) / x;
        (nu, rho, nu / rho - 1.)
    }

    /// Convert grid coordinates, (easting, northing), to geographical
    /// coordinates, (longitude, latitude).
    ///
    /// The latitude is found by iterating until the northing reproduced from
    /// the developed meridional arc is within [`tolerance`](Self::tolerance)
    /// of the input. Fails with `Error::NonConvergence` if that takes more
    /// than `MAX_ITERATIONS` iterations (which only happens for input far
    /// outside of the domain of the projection).
    #[allow(non_snake_case)]
    pub fn grid_to_lonlat(&self, grid: impl Into<Point>) -> Result<Point, Error> {
        let grid = grid.into();
        let (E, N) = (grid[0], grid[1]);
        let p = &self.params;

        // Initial estimate of the latitude
        let mut lat = (N - p.y_0) / self.a_k0 + p.lat_0;

        let mut i = 0_usize;
        loop {
            let x = N - p.y_0 - self.meridional_arc(lat);
            lat += x / self.a_k0;
            i += 1;
            if x.abs() <= self.tolerance {
                break;
            }
            // Also catches NaN input, which never meets the tolerance
            if i >= MAX_ITERATIONS {
                return Err(Error::NonConvergence("grid_to_lonlat", MAX_ITERATIONS));
            }
        }
        trace!("grid_to_lonlat: converged after {i} iterations");

        let (nu, rho, etasq) = self.curvatures(lat.sin());

        // Powers of tan φ and ν
        let t = lat.tan();
        let t2 = t * t;
        let t4 = t2 * t2;
        let t6 = t4 * t2;
        let nu3 = nu * nu * nu;
        let nu5 = nu3 * nu * nu;
        let nu7 = nu5 * nu * nu;
        let sec = 1. / lat.cos();

        let VII = t / (2. * rho * nu);
        let VIII = t * (5. + 3. * t2 + etasq * (1. - 9. * t2)) / (24. * rho * nu3);
        let IX = t * (61. + 90. * t2 + 45. * t4) / (720. * rho * nu5);
        let X = sec / nu;
        let XI = sec * (nu / rho + 2. * t2) / (6. * nu3);
        let XII = sec * (5. + 28. * t2 + 24. * t4) / (120. * nu5);
        let XIIA = sec * (61. + 662. * t2 + 1320. * t4 + 720. * t6) / (5040. * nu7);

        let y = E - p.x_0;
        let y2 = y * y;

        let lon = p.lon_0 + y * (X + y2 * (-XI + y2 * (XII - y2 * XIIA)));
        let lat = lat + y2 * (-VII + y2 * (VIII - y2 * IX));
        Ok(Point::raw(lon, lat))
    }

    /// Convert geographical coordinates, (longitude, latitude), to grid
    /// coordinates, (easting, northing). Non-iterative.
    #[allow(non_snake_case)]
    #[must_use]
    pub fn lonlat_to_grid(&self, geo: impl Into<Point>) -> Point {
        let geo = geo.into();
        let (lon, lat) = (geo[0], geo[1]);
        let p = &self.params;

        let (sinlat, coslat) = lat.sin_cos();
        let cos3 = coslat * coslat * coslat;
        let cos5 = cos3 * coslat * coslat;
        let t2 = lat.tan().powi(2);

        // Powers of the longitude relative to the central meridian
        let P = lon - p.lon_0;
        let P3 = P * P * P;
        let P5 = P3 * P * P;

        let (nu, rho, etasq) = self.curvatures(sinlat);

        let I = self.meridional_arc(lat) + p.y_0;
        let II = nu / 2. * sinlat * coslat;
        let III = nu / 24. * sinlat * cos3 * (5. - t2 + 9. * etasq);
        let IIIA = nu / 720. * sinlat * cos5 * (61. - 58. * t2 + t2 * t2);
        let IV = nu * coslat;
        let V = nu / 6. * cos3 * (nu / rho - t2);
        let VI = nu / 120. * cos5 * (5. - 18. * t2 + t2 * t2 + 14. * etasq - 58. * etasq * t2);

        let E = p.x_0 + P * IV + P3 * V + P5 * VI;
        let N = I + P * (P * II + P3 * III + P5 * IIIA);
        Point::raw(E, N)
    }

    /// Convert a batch of coordinates in place: `Fwd` projects geographical
    /// coordinates to the grid, `Inv` converts grid coordinates to geographical.
    /// Elements that fail to convert are set to NaN. Returns the number of
    /// successful conversions.
    pub fn apply(&self, operands: &mut [Point], direction: Direction) -> usize {
        let mut successes = 0_usize;
        for coord in operands.iter_mut() {
            if direction == Fwd {
                *coord = self.lonlat_to_grid(*coord);
                successes += 1;
                continue;
            }
            match self.grid_to_lonlat(*coord) {
                Ok(geo) => {
                    *coord = geo;
                    successes += 1;
                }
                Err(e) => {
                    warn!("tmerc: {e} for {coord:?}");
                    *coord = Point::nan();
                }
            }
        }
        successes
    }
}

// ----- T E S T S ---------------------------------------------------------------------
