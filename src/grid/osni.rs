use super::*;

// Airy modified, given by its semimajor axis and squared eccentricity
const SEMIMAJOR_AXIS: f64 = 6_377_340.189;
const ECCENTRICITY_SQUARED: f64 = 0.006_670_540;

const SCALE_FACTOR: f64 = 1.000_035;
const TRUE_ORIGIN: (f64, f64) = (-8., 53.5);
const FALSE_ORIGIN: (f64, f64) = (200_000., 250_000.);

/// The Irish Grid, as used by the Ordnance Survey of Northern Ireland.
///
/// Grid squares are designated by a single letter, with `V` at the false
/// origin.
#[derive(Clone, Debug, PartialEq)]
pub struct Osni {
    tmerc: TransverseMercator,
}

impl Osni {
    #[must_use]
    pub fn new() -> Osni {
        let semiminor_axis = SEMIMAJOR_AXIS * (1. - ECCENTRICITY_SQUARED).sqrt();
        let tmerc = TransverseMercator::from_axes(
            SEMIMAJOR_AXIS,
            semiminor_axis,
            SCALE_FACTOR,
            TRUE_ORIGIN.0.to_radians(),
            TRUE_ORIGIN.1.to_radians(),
            FALSE_ORIGIN.0,
            FALSE_ORIGIN.1,
        );
        Osni { tmerc }
    }

    /// See [`TransverseMercator::set_tolerance`]
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tmerc.set_tolerance(tolerance);
    }
}

impl Default for Osni {
    fn default() -> Self {
        Self::new()
    }
}

impl NationalGrid for Osni {
    fn projection(&self) -> &TransverseMercator {
        &self.tmerc
    }

    fn grid_square_to_offset(&self, letters: &str) -> Point {
        letter_offset(letters.chars().next()).map_or(Point::origin(), |p| p * SQUARE)
    }

    fn grid_to_grid_square(&self, grid: impl Into<Point>) -> String {
        square_indices(grid.into()).map_or(String::new(), |(x, y)| letter_at(y, x).to_string())
    }
}

// ----- T E S T S ---------------------------------------------------------------------
