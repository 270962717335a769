//! *Transverse Mercator projections, the British and Irish national grids,
//! and ellipsoidal geodesics*.
//!
//! Conversions between geographical coordinates (longitude/latitude, in
//! radians) and grid coordinates (easting/northing, in the length unit of
//! the ellipsoid), following the formulae of the Ordnance Survey, plus the
//! 100 km grid square lettering of the
//! [OSGB](crate::Osgb) and [OSNI](crate::Osni) national grids.
//!
//! Independently of any projection, the direct and inverse geodesic
//! problems are solved on the ellipsoid, using the algorithm by
//! [Vincenty (1975)](crate::Bibliography::Vin75).
//!
//! ```rust
//! use osgrid::prelude::*;
//! let osgb = Osgb::new();
//! // Caister Water Tower
//! let geo = osgb.grid_to_lonlat((651409.903, 313177.271))?;
//! assert!((geo.x().to_degrees() - 1.717921582).abs() < 1e-8);
//! assert!((geo.y().to_degrees() - 52.657570308).abs() < 1e-8);
//! assert_eq!(osgb.grid_to_grid_square((651409.903, 313177.271)), "TG");
//! # Ok::<(), osgrid::Error>(())
//! ```

mod arc;
mod coordinate;
mod ellipsoid;
mod grid;
mod tmerc;

pub mod math;

use thiserror::Error;

pub use arc::EllipsoidalArc;
pub use coordinate::Point;
pub use ellipsoid::DirectSolution;
pub use ellipsoid::Ellipsoid;
pub use ellipsoid::InverseSolution;
pub use grid::transfer;
pub use grid::NationalGrid;
pub use grid::Osgb;
pub use grid::Osni;
pub use tmerc::TmercParameters;
pub use tmerc::TransverseMercator;

/// Everything needed for typical use of the crate
pub mod prelude {
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Direction::Inv;
    pub use crate::EllipsoidalArc;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::NationalGrid;
    pub use crate::Osgb;
    pub use crate::Osni;
    pub use crate::Point;
    pub use crate::TmercParameters;
    pub use crate::TransverseMercator;
}

/// Preamble for crate-internal modules
pub(crate) mod internal {
    pub use crate::math::angular;
    pub use crate::Direction;
    pub use crate::Direction::Fwd;
    pub use crate::Ellipsoid;
    pub use crate::Error;
    pub use crate::Point;
    pub use log::{debug, error, trace, warn};
}

/// The crate-wide error type
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("malformed value for parameter {0}: {1}")]
    BadParam(String, String),

    #[error("{0} not found{1}")]
    NotFound(String, String),

    /// A value was read from, or required by, a geodesic problem
    /// before it was set or computed
    #[error("{0} is not defined")]
    Undefined(&'static str),

    /// An iterative computation exceeded its iteration limit
    #[error("{0}: exceeded iteration limit ({1})")]
    NonConvergence(&'static str, usize),
}

/// `Fwd`: Indicate that a two-way operator, function, or method,
/// should run in the *forward* direction, i.e. from geographical
/// to projected coordinates.
/// `Inv`: Indicate that a two-way operator, function, or method,
/// should run in the *inverse* direction, i.e. from projected
/// to geographical coordinates.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Direction {
    Fwd,
    Inv,
}

/// Literature, that has been useful in designing and implementing this library.
pub enum Bibliography {
    /// Ordnance Survey (1998, rev. 2020): *A guide to coordinate systems in
    /// Great Britain*. Appendix C: The Transverse Mercator projection.
    /// (Formerly *Geodetic Information Paper No 1: The Ellipsoid and the
    /// Transverse Mercator Projection*).
    Os98,

    /// Ordnance Survey of Northern Ireland: *The Irish Grid*.
    /// Parameters of the Airy modified ellipsoid and the Irish Grid
    /// Transverse Mercator projection.
    Osni,

    /// T. Vincenty (1975) Direct and Inverse Solutions of Geodesics on the Ellipsoid
    /// with application of nested equations.
    /// Survey Review, 23(176): 88-93.
    /// [pdf](https://www.ngs.noaa.gov/PUBS_LIB/inverse.pdf)
    /// (See also Wikipedia: [Vincenty's formulae](https://en.wikipedia.org/wiki/Vincenty's_formulae)).
    Vin75,

    /// Charles F.F. Karney (2013) Algorithms for geodesics. Journal of Geodesy 87, 43–55.
    /// [DOI](https://doi.org/10.1007/s00190-012-0578-z)
    Kar13,
}
