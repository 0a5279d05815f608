//! # xmatch
//!
//! A library for cross-matching two catalogs of points in a 3-coordinate space.
//!
//! Each point has two on-sky coordinates and one line-of-sight coordinate:
//! either Cartesian `x/y/z`, or `ra/dec` (or galactic `l/b`) in degrees plus a
//! redshift or velocity. For every point of catalog A, `xmatch` finds the
//! single closest point of catalog B that lies within two independent limits.
//!
//! ## Features
//!
//! - **Dual limits**: on-sky and line-of-sight distances are filtered separately
//! - **Two frames**: planar Euclidean or great-circle on-sky distance
//! - **Nearest wins**: the smallest on-sky distance is chosen among candidates,
//!   with ties resolved by catalog order
//! - **Stable great-circle distance**: falls back to the Vincenty formula where
//!   the law of cosines loses precision
//! - **Parallel matching**: optional, with output identical to the serial scan
//!
//! ## Example
//!
//! ```rust
//! use xmatch::{cross_match, Catalog};
//!
//! let a = Catalog::from_points([(0.0, 0.0, 0.0)]);
//! let b = Catalog::from_points([(0.0, 0.0, 0.0), (10.0, 10.0, 0.0)]);
//!
//! let result = cross_match(&a, &b, 1.0, 1.0, "cartesian").unwrap();
//!
//! assert_eq!(result.matched_a, vec![0]);
//! assert_eq!(result.matched_b, vec![0]);
//! assert_eq!(result.unmatched_b, vec![1]);
//!
//! // Unknown frames are rejected before anything is scanned
//! assert!(cross_match(&a, &b, 1.0, 1.0, "equatorial").is_err());
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Catalogs, points, frames and thresholds
//! - [`matching`]: Distance primitives, point search and catalog cross-matching
//! - [`parsing`]: Catalog loading from TSV/CSV files
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::catalog::{Catalog, CatalogError, Point};
pub use crate::core::types::{ConfigError, Frame, Thresholds};
pub use crate::matching::engine::{cross_match, CrossMatchResult, CrossMatcher, MatchingConfig};
pub use crate::matching::search::{search_around_point, PointMatch};
