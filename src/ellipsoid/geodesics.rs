use super::*;

/// Stop criterion for the iterations of the Vincenty algorithms
const EPSILON: f64 = 1e-8;
/// Vincenty's iterations converge in a handful of steps, except for
/// nearly antipodal points, where they may not converge at all
const MAX_ITERATIONS: usize = 10;

/// The solution of the inverse geodesic problem
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InverseSolution {
    /// Length of the geodesic, in the length unit of the ellipsoid
    pub distance: f64,
    /// The forward azimuth at the point of origin, A
    pub azimuth_a: f64,
    /// The reverse azimuth at the destination, B, i.e. the
    /// direction from B back towards A
    pub azimuth_b: f64,
}

/// The solution of the direct geodesic problem
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DirectSolution {
    /// The destination, B, as (longitude, latitude)
    pub position_b: Point,
    /// The reverse azimuth at B, i.e. the direction from B back towards A
    pub azimuth_b: f64,
}

// Vincenty's (1976) updated series for the coefficients A and B.
#[allow(non_snake_case)]
fn vincenty_a_b(u_squared: f64) -> (f64, f64) {
    let u = u_squared;
    let A = 1. + u / 16384. * (4096. + u * (-768. + u * (320. - 175. * u)));
    let B = u / 1024. * (256. + u * (-128. + u * (74. - 47. * u)));
    (A, B)
}

// The difference, Δσ, between the angular distance on the auxiliary
// sphere, and the scaled distance along the ellipsoid
#[allow(non_snake_case)]
fn delta_sigma(B: f64, sssin: f64, sscos: f64, ssmx2cos: f64) -> f64 {
    let t1 = -1. + 2. * ssmx2cos * ssmx2cos;
    let t2 = -3. + 4. * sssin * sssin;
    let t3 = -3. + 4. * ssmx2cos * ssmx2cos;
    B * sssin * (ssmx2cos + B / 4. * (sscos * t1 - B / 6. * ssmx2cos * t2 * t3))
}

// ----- Geodesics -------------------------------------------------------------
impl Ellipsoid {
    /// For general geodesics, we use the algorithm by Vincenty
    /// ([1975](crate::Bibliography::Vin75)).
    /// The Vincenty algorithm is relatively simple to implement, but for near-antipodal
    /// cases, it suffers from lack of convergence: After `MAX_ITERATIONS`
    /// (10) iterations without convergence, `Error::NonConvergence` is returned.
    ///
    /// Karney ([2013](crate::Bibliography::Kar13)) presented an algorithm which
    /// is exact to machine precision, and converges everywhere.
    ///
    /// The direct problem: Given a point of origin, `from`, as (longitude,
    /// latitude) in radians, a forward `azimuth` (radians, clockwise from
    /// north), and a `distance`, find the destination and the reverse azimuth.
    /// The longitude of the destination is reduced to [-π, π).
    #[allow(non_snake_case)]
    pub fn geodesic_fwd(
        &self,
        from: &Point,
        azimuth: f64,
        distance: f64,
    ) -> Result<DirectSolution, Error> {
        let f = self.f;
        let b = self.semiminor_axis();

        // Coordinates of the point of origin, P1
        let B1 = from[1];
        let L1 = from[0];

        // The latitude of P1 projected onto the auxiliary sphere
        let U1tan = (1. - f) * B1.tan();
        let U1 = U1tan.atan();
        let U1cos = U1.cos();
        let U1sin = U1.sin();

        // σ_1, here ss1, is the angular distance on the aux sphere from P1 to equator
        let (azisin, azicos) = azimuth.sin_cos();
        let ss1 = U1tan.atan2(azicos);

        // α, the azimuth of the geodesic at the equator
        let aasin = U1cos * azisin;
        let aacos2 = 1. - aasin * aasin;

        let (A, B) = vincenty_a_b(aacos2 * self.second_eccentricity_squared());

        // Initial estimate for σ, the angular distance on the aux sphere
        let mut ss = distance / (b * A);
        let mut dss = 0.;
        let mut i = 0_usize;

        loop {
            let prev_dss = dss;

            // 2σ_m, where σ_m is the latitude of the midpoint on the aux sphere
            let ssmx2cos = (2. * ss1 + ss).cos();
            dss = delta_sigma(B, ss.sin(), ss.cos(), ssmx2cos);
            ss = distance / (b * A) + dss;

            i += 1;
            if i > MAX_ITERATIONS {
                return Err(Error::NonConvergence("geodesic_fwd", MAX_ITERATIONS));
            }
            // Stop criterion: Last update of Δσ made little difference
            if (dss - prev_dss).abs() <= EPSILON {
                break;
            }
        }
        trace!("geodesic_fwd: converged after {i} iterations");

        let ssmx2cos = (2. * ss1 + ss).cos();
        let (sssin, sscos) = ss.sin_cos();

        // B2: Latitude of destination
        let t = U1sin * sssin - U1cos * sscos * azicos;
        let B2 = (U1sin * sscos + U1cos * sssin * azicos).atan2((1. - f) * aasin.hypot(t));

        // L2: Longitude of destination
        let ll = (sssin * azisin).atan2(U1cos * sscos - U1sin * sssin * azicos);
        let C = f / 16. * aacos2 * (4. + f * (4. - 3. * aacos2));
        let L = ll
            - (1. - C)
                * f
                * aasin
                * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));
        let L2 = angular::normalize_symmetric(L1 + L);

        // Reverse azimuth: The forward azimuth at P2, turned half a circle
        let aa2 = (-aasin).atan2(U1sin * sssin - U1cos * sscos * azicos);

        Ok(DirectSolution {
            position_b: Point::raw(L2, B2),
            azimuth_b: aa2,
        })
    }

    /// The inverse problem: Given two points, `from` and `to`, as (longitude,
    /// latitude) in radians, find the length of the geodesic between them,
    /// the forward azimuth at `from`, and the reverse azimuth at `to`.
    ///
    /// See [`geodesic_fwd`](crate::Ellipsoid::geodesic_fwd)
    #[allow(non_snake_case)] // allow math-like notation
    pub fn geodesic_inv(&self, from: &Point, to: &Point) -> Result<InverseSolution, Error> {
        let f = self.f;
        let b = self.semiminor_axis();

        let B1 = from[1];
        let B2 = to[1];

        // The longitude difference, reduced to [-π, π)
        let L = angular::normalize_symmetric(to[0] - from[0]);

        // Coincident points: No distance, and no well defined directions
        if L.hypot(B2 - B1) < 1e-15 {
            return Ok(InverseSolution::default());
        }

        let U1 = self.reduced_latitude(B1);
        let U2 = self.reduced_latitude(B2);
        let (U1sin, U1cos) = U1.sin_cos();
        let (U2sin, U2cos) = U2.sin_cos();

        // Initial estimate for λ, the longitude on the auxiliary sphere
        let mut ll = L;
        let mut dll = 0.;

        let mut aacos2 = 0.;
        let mut ssmx2cos = 0.;
        let mut sscos = 0.;
        let mut sssin = 0.;
        let mut ss = 0.;

        let mut i = 0_usize;
        loop {
            let prev_dll = dll;

            // σ, the angular separation between the points
            let (llsin, llcos) = ll.sin_cos();
            let t1 = U2cos * llsin;
            let t2 = U1cos * U2sin - U1sin * U2cos * llcos;
            sssin = t1.hypot(t2);
            sscos = U1sin * U2sin + U1cos * U2cos * llcos;
            ss = sssin.atan2(sscos);

            // α, the azimuth of the geodesic at the equator
            let aasin = U1cos * U2cos * llsin / sssin;
            aacos2 = 1. - aasin * aasin;

            // cosine of 2 times σ_m, the angular separation from the midpoint to the equator.
            // Along the equator, where cos²α vanishes, σ_m is zero
            ssmx2cos = if aacos2 == 0. {
                0.
            } else {
                sscos - 2. * U1sin * U2sin / aacos2
            };
            let C = f / 16. * aacos2 * (4. + f * (4. - 3. * aacos2));
            dll = (1. - C)
                * f
                * aasin
                * (ss + C * sssin * (ssmx2cos + C * sscos * (-1. + 2. * ssmx2cos * ssmx2cos)));
            ll = L + dll;

            i += 1;
            if i > MAX_ITERATIONS {
                return Err(Error::NonConvergence("geodesic_inv", MAX_ITERATIONS));
            }
            if (dll - prev_dll).abs() <= EPSILON {
                break;
            }
        }
        trace!("geodesic_inv: converged after {i} iterations");

        let (A, B) = vincenty_a_b(aacos2 * self.second_eccentricity_squared());
        let dss = delta_sigma(B, sssin, sscos, ssmx2cos);

        // Distance, forward azimuth, reverse azimuth
        let (llsin, llcos) = ll.sin_cos();
        let s = b * A * (ss - dss);
        let a1 = (U2cos * llsin).atan2(U1cos * U2sin - U1sin * U2cos * llcos);
        let a2 = (-U1cos * llsin).atan2(U2cos * U1sin - U2sin * U1cos * llcos);

        Ok(InverseSolution {
            distance: s,
            azimuth_a: a1,
            azimuth_b: a2,
        })
    }

    /// Geodesic distance between two points. Assumes the first coordinate
    /// is longitude, second is latitude.
    ///
    /// # See also:
    ///
    /// [`distance_from`](crate::Point::distance_from)
    ///
    /// # Examples
    ///
    /// ```rust
    /// // Compute the distance between Copenhagen and Paris
    /// use osgrid::prelude::*;
    /// let ellps = Ellipsoid::named("GRS80")?;
    /// let p0 = Point::geo(55., 12.);
    /// let p1 = Point::geo(49., 2.);
    /// let d = ellps.distance(&p0, &p1)?;
    /// assert!((d - 956_066.231_959).abs() < 1e-2);
    /// # Ok::<(), osgrid::Error>(())
    /// ```
    pub fn distance(&self, from: &Point, to: &Point) -> Result<f64, Error> {
        Ok(self.geodesic_inv(from, to)?.distance)
    }
}

// ----- Tests ---------------------------------------------------------------------
