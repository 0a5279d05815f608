//! Core data types for catalog cross-matching.
//!
//! - [`Catalog`]: An ordered set of points stored as three parallel coordinate columns
//! - [`Point`]: One point of a catalog, used as a search query
//! - [`Frame`]: How the first two coordinates are interpreted
//! - [`Thresholds`]: The on-sky and line-of-sight distance limits
//!
//! ## Coordinates
//!
//! | Frame     | coord1      | coord2       | coord3                |
//! |-----------|-------------|--------------|-----------------------|
//! | cartesian | x           | y            | z                     |
//! | spherical | ra or l (°) | dec or b (°) | velocity or redshift  |

pub mod catalog;
pub mod types;

pub use catalog::{Catalog, CatalogError, Point};
pub use types::{ConfigError, Frame, Thresholds};
