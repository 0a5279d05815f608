//! Catalog cross-matching.
//!
//! This module provides the matching functionality in three layers:
//!
//! - [`distance`]: Planar, great-circle and line-of-sight distance primitives
//! - [`search`]: Best counterpart of one point in a target catalog
//! - [`engine`]: [`CrossMatcher`], which runs the search for every point of a catalog
//!
//! ## Matching Algorithm
//!
//! For each point of catalog A, every point of catalog B is measured twice:
//!
//! 1. **On-sky distance**: planar (cartesian frame) or great-circle in degrees
//!    (spherical frame), over the first two coordinates
//! 2. **Line-of-sight distance**: absolute difference of the third coordinate
//!
//! A point of B is a candidate only if both distances are strictly below their
//! limits. Among candidates the smallest on-sky distance wins; exact ties go
//! to the lower B index. A point of B may be matched by several points of A.
//!
//! ## Example
//!
//! ```rust
//! use xmatch::{Catalog, CrossMatcher, Frame, MatchingConfig};
//!
//! let a = Catalog::from_points([(0.0, 0.0, 0.0)]);
//! let b = Catalog::from_points([(0.5, 0.0, 0.0), (0.3, 0.0, 0.0)]);
//!
//! let matcher = CrossMatcher::new(&b, MatchingConfig::new(1.0, 1.0, Frame::Cartesian)).unwrap();
//! let result = matcher.cross_match(&a);
//!
//! assert_eq!(result.matched_a, vec![0]);
//! assert_eq!(result.matched_b, vec![1]);
//! assert_eq!(result.unmatched_b, vec![0]);
//! ```

pub mod distance;
pub mod engine;
pub mod search;

pub use engine::{cross_match, CrossMatchResult, CrossMatcher, MatchedPair, MatchingConfig};
pub use search::{search_around_point, PointMatch};
