//! Point-to-catalog search.
//!
//! [`search_around_point`] finds the single best counterpart of one query
//! point in a target catalog:
//!
//! 1. Measure the on-sky distance to every target point with the frame's metric
//! 2. Measure the line-of-sight distance to every target point
//! 3. Keep the targets passing both limits (each limit is exclusive)
//! 4. Pick the candidate with the smallest on-sky distance; exact ties go to
//!    the candidate that comes first in the target catalog
//!
//! The scan is linear in the size of the target catalog. No spatial index is
//! built; the limits are expected to keep candidate sets small.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::catalog::{Catalog, Point};
use crate::core::types::Thresholds;
use crate::matching::distance::{line_of_sight_distances, OnSkyDistances};

/// The counterpart found for a query point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMatch {
    /// Index of the matched point in the target catalog
    pub index: usize,

    /// On-sky distance to the matched point (planar units or degrees)
    pub on_sky_distance: f64,

    /// Line-of-sight distance to the matched point
    pub line_of_sight_distance: f64,

    /// Number of target points that passed both limits
    pub candidates: usize,
}

/// Find the closest point of `target` within both limits of `point`.
///
/// Returns `None` when no target point passes both limits.
#[must_use]
pub fn search_around_point(
    point: &Point,
    target: &Catalog,
    thresholds: &Thresholds,
    on_sky: OnSkyDistances,
) -> Option<PointMatch> {
    let os_distances = on_sky(point.coord1, point.coord2, target.coord1(), target.coord2());
    let los_distances = line_of_sight_distances(point.coord3, target.coord3());

    let candidates: Vec<usize> = (0..target.len())
        .filter(|&i| thresholds.accepts(os_distances[i], los_distances[i]))
        .collect();

    let best = match candidates.as_slice() {
        [] => {
            trace!(query = point.index, "No matches found");
            return None;
        }
        [only] => *only,
        many => {
            debug!(
                query = point.index,
                candidates = many.len(),
                "{} possible matches",
                many.len()
            );
            nearest_on_sky(many, &os_distances)
        }
    };

    Some(PointMatch {
        index: best,
        on_sky_distance: os_distances[best],
        line_of_sight_distance: los_distances[best],
        candidates: candidates.len(),
    })
}

/// Candidate with the minimum on-sky distance; the first one wins exact ties.
/// `candidates` must be non-empty and in ascending index order.
fn nearest_on_sky(candidates: &[usize], os_distances: &[f64]) -> usize {
    let mut best = candidates[0];
    for &i in &candidates[1..] {
        // Strict comparison keeps the earlier index on ties
        if os_distances[i] < os_distances[best] {
            best = i;
        }
    }
    best
}
