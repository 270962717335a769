use super::*;

// Airy 1830
const SEMIMAJOR_AXIS: f64 = 6_377_563.396;
const SEMIMINOR_AXIS: f64 = 6_356_256.910;

const SCALE_FACTOR: f64 = 0.999_601_271_7;
const TRUE_ORIGIN: (f64, f64) = (-2., 49.);
const FALSE_ORIGIN: (f64, f64) = (400_000., -100_000.);

/// The National Grid of Great Britain (OSGB36).
///
/// Grid squares are designated by two letters: The first selects a
/// 500 km block, with `S` at the false origin, the second a 100 km square
/// within that block.
///
/// ```rust
/// use osgrid::prelude::*;
/// let osgb = Osgb::new();
/// assert_eq!(osgb.grid_to_grid_square((530_000., 180_000.)), "TQ");
/// assert_eq!(osgb.grid_square_to_offset("nn"), Point::raw(200_000., 700_000.));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Osgb {
    tmerc: TransverseMercator,
}

impl Osgb {
    #[must_use]
    pub fn new() -> Osgb {
        let tmerc = TransverseMercator::from_axes(
            SEMIMAJOR_AXIS,
            SEMIMINOR_AXIS,
            SCALE_FACTOR,
            TRUE_ORIGIN.0.to_radians(),
            TRUE_ORIGIN.1.to_radians(),
            FALSE_ORIGIN.0,
            FALSE_ORIGIN.1,
        );
        Osgb { tmerc }
    }

    /// See [`TransverseMercator::set_tolerance`]
    pub fn set_tolerance(&mut self, tolerance: f64) {
        self.tmerc.set_tolerance(tolerance);
    }
}

impl Default for Osgb {
    fn default() -> Self {
        Self::new()
    }
}

impl NationalGrid for Osgb {
    fn projection(&self) -> &TransverseMercator {
        &self.tmerc
    }

    fn grid_square_to_offset(&self, letters: &str) -> Point {
        let mut letters = letters.chars();

        // The block letter S is at the origin
        let block = letter_offset(letters.next())
            .map_or(Point::origin(), |p| (p - Point::raw(2., 1.)) * BLOCK);
        let square = letter_offset(letters.next()).map_or(Point::origin(), |p| p * SQUARE);
        block + square
    }

    fn grid_to_grid_square(&self, grid: impl Into<Point>) -> String {
        let Some((x, y)) = square_indices(grid.into()) else {
            return String::new();
        };
        let block = letter_at(1 + y.div_euclid(5), 2 + x.div_euclid(5));
        let square = letter_at(y, x);
        [block, square].iter().collect()
    }
}

// ----- T E S T S ---------------------------------------------------------------------
