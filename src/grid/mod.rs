//! National grids: Transverse Mercator projections with a system of
//! lettered 100 km grid squares.

mod osgb;
mod osni;

pub use osgb::Osgb;
pub use osni::Osni;

use crate::internal::*;
use crate::TransverseMercator;
use once_cell::sync::Lazy;

/// Side length of a grid square
pub const SQUARE: f64 = 100_000.;

/// Side length of a block of 5×5 grid squares
pub const BLOCK: f64 = 5. * SQUARE;

/// The grid square letters, in rows from south to north. `I` is not used
#[rustfmt::skip]
pub const LETTERS: [[char; 5]; 5] = [
    ['V', 'W', 'X', 'Y', 'Z'],
    ['Q', 'R', 'S', 'T', 'U'],
    ['L', 'M', 'N', 'O', 'P'],
    ['F', 'G', 'H', 'J', 'K'],
    ['A', 'B', 'C', 'D', 'E'],
];

// Letter -> (row, column), indexed by the letter's offset from 'A'
static POSITIONS: Lazy<[Option<(usize, usize)>; 26]> = Lazy::new(|| {
    let mut positions = [None; 26];
    for (row, letters) in LETTERS.iter().enumerate() {
        for (col, letter) in letters.iter().enumerate() {
            positions[*letter as usize - 'A' as usize] = Some((row, col));
        }
    }
    positions
});

/// The (row, column) of `letter` in [`LETTERS`]. Case insensitive.
/// `None` for anything outside of the table.
#[must_use]
pub fn position_of(letter: char) -> Option<(usize, usize)> {
    let letter = letter.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    POSITIONS[letter as usize - 'A' as usize]
}

/// The letter at `(row, col)`, with indices taken modulo 5
#[must_use]
pub fn letter_at(row: i64, col: i64) -> char {
    LETTERS[row.rem_euclid(5) as usize][col.rem_euclid(5) as usize]
}

// The (column, row) indices of the 100 km square containing `grid`.
// `None` unless both coordinates are finite
fn square_indices(grid: Point) -> Option<(i64, i64)> {
    if !(grid[0].is_finite() && grid[1].is_finite()) {
        return None;
    }
    Some(((grid[0] / SQUARE).floor() as i64, (grid[1] / SQUARE).floor() as i64))
}

// The (column, row) of a single letter, as a point. Unknown letters give `None`
fn letter_offset(letter: Option<char>) -> Option<Point> {
    let letter = letter?;
    let Some((row, col)) = position_of(letter) else {
        debug!("Ignoring unknown grid square letter '{letter}'");
        return None;
    };
    Some(Point::raw(col as f64, row as f64))
}

/// A national grid: A [`TransverseMercator`] projection, with the grid area
/// split into 100 km squares, designated by letters.
pub trait NationalGrid {
    /// The underlying projection
    fn projection(&self) -> &TransverseMercator;

    /// The grid coordinates of the south-west corner of the square given by
    /// `letters`. Decoding is case insensitive and lenient: A missing or
    /// unknown letter contributes nothing.
    fn grid_square_to_offset(&self, letters: &str) -> Point;

    /// The letters designating the square containing `grid`. Positions
    /// outside of the lettered area are wrapped around, so the result is
    /// unique only within the period of the lettering system.
    /// Empty if `grid` is not finite.
    fn grid_to_grid_square(&self, grid: impl Into<Point>) -> String;

    /// Grid coordinates to (longitude, latitude) in radians
    fn grid_to_lonlat(&self, grid: impl Into<Point>) -> Result<Point, Error> {
        self.projection().grid_to_lonlat(grid)
    }

    /// (longitude, latitude) in radians to grid coordinates
    fn lonlat_to_grid(&self, geo: impl Into<Point>) -> Point {
        self.projection().lonlat_to_grid(geo)
    }

    /// The absolute grid position of a grid reference given as square
    /// letters and a position `within` that square
    fn from_grid_reference(&self, letters: &str, within: impl Into<Point>) -> Point {
        self.grid_square_to_offset(letters) + within.into()
    }

    /// Split an absolute grid position into square letters and the
    /// position within that square
    fn to_grid_reference(&self, grid: impl Into<Point>) -> (String, Point) {
        let grid = grid.into();
        let letters = self.grid_to_grid_square(grid);
        let within = grid - self.grid_square_to_offset(&letters);
        (letters, within)
    }
}

/// Map grid coordinates from one national grid to another, by way of
/// geographical coordinates. No datum shift is involved: Both grids are
/// assumed to refer to the same datum.
pub fn transfer(
    from: &impl NationalGrid,
    to: &impl NationalGrid,
    grid: impl Into<Point>,
) -> Result<Point, Error> {
    let geo = from.grid_to_lonlat(grid)?;
    Ok(to.lonlat_to_grid(geo))
}

// ----- T E S T S ---------------------------------------------------------------------
