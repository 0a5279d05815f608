use std::path::Path;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::core::catalog::{Catalog, Point};
use crate::core::types::{ConfigError, Frame, Thresholds};
use crate::matching::distance::{on_sky_metric, OnSkyDistances};
use crate::matching::search::{search_around_point, PointMatch};

#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Configuration for a cross-match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// On-sky distance limit (exclusive)
    pub xy_lim: f64,
    /// Line-of-sight distance limit (exclusive)
    pub z_lim: f64,
    /// Interpretation of the first two coordinates
    #[serde(default)]
    pub frame: Frame,
    /// Run the per-point searches on the rayon thread pool
    #[serde(default)]
    pub parallel: bool,
}

impl MatchingConfig {
    pub fn new(xy_lim: f64, z_lim: f64, frame: Frame) -> Self {
        Self {
            xy_lim,
            z_lim,
            frame,
            parallel: false,
        }
    }

    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn thresholds(&self) -> Thresholds {
        Thresholds::new(self.xy_lim, self.z_lim)
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if either limit is NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds().validate()
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigLoadError::Io` if the file cannot be read,
    /// `ConfigLoadError::Json` if it is malformed or names an unsupported
    /// frame, or `ConfigLoadError::Invalid` if a limit is NaN.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigLoadError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Matched and unmatched indices of a cross-match between catalogs A and B.
///
/// `matched_a`, `matched_b`, `on_sky_distances` and `line_of_sight_distances`
/// are aligned: entry `k` of each describes the same pair. Matched entries
/// follow ascending A index. `matched_b` may repeat an index when several A
/// points share a counterpart. The unmatched lists are sorted and unique.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossMatchResult {
    pub matched_a: Vec<usize>,
    pub matched_b: Vec<usize>,
    pub unmatched_a: Vec<usize>,
    pub unmatched_b: Vec<usize>,
    /// On-sky distance of each pair (d2d)
    pub on_sky_distances: Vec<f64>,
    /// Line-of-sight distance of each pair (d3d)
    pub line_of_sight_distances: Vec<f64>,
}

/// One row of a [`CrossMatchResult`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchedPair {
    pub index_a: usize,
    pub index_b: usize,
    pub on_sky_distance: f64,
    pub line_of_sight_distance: f64,
}

impl CrossMatchResult {
    /// Assemble a result from per-point outcomes given in ascending A order
    fn from_outcomes(outcomes: Vec<Option<PointMatch>>, len_b: usize) -> Self {
        let len_a = outcomes.len();
        let mut result = Self::default();

        for (i, outcome) in outcomes.into_iter().enumerate() {
            if let Some(m) = outcome {
                result.matched_a.push(i);
                result.matched_b.push(m.index);
                result.on_sky_distances.push(m.on_sky_distance);
                result.line_of_sight_distances.push(m.line_of_sight_distance);
            }
        }

        result.unmatched_a = complement(len_a, &result.matched_a);
        result.unmatched_b = complement(len_b, &result.matched_b);
        result
    }

    /// Number of matched pairs
    #[must_use]
    pub fn len(&self) -> usize {
        self.matched_a.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matched_a.is_empty()
    }

    /// Matched pairs in ascending A order
    pub fn pairs(&self) -> impl Iterator<Item = MatchedPair> + '_ {
        (0..self.len()).map(move |k| MatchedPair {
            index_a: self.matched_a[k],
            index_b: self.matched_b[k],
            on_sky_distance: self.on_sky_distances[k],
            line_of_sight_distance: self.line_of_sight_distances[k],
        })
    }
}

/// Indices in `0..len` absent from `present`, ascending
fn complement(len: usize, present: &[usize]) -> Vec<usize> {
    let mut seen = vec![false; len];
    for &i in present {
        if let Some(slot) = seen.get_mut(i) {
            *slot = true;
        }
    }
    seen.iter()
        .enumerate()
        .filter_map(|(i, &s)| (!s).then_some(i))
        .collect()
}

/// Matches query points against a target catalog
pub struct CrossMatcher<'a> {
    target: &'a Catalog,
    config: MatchingConfig,
    thresholds: Thresholds,
    on_sky: OnSkyDistances,
}

impl<'a> CrossMatcher<'a> {
    /// Create a matcher for `target`, resolving the frame's metric once.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidThreshold` if either limit is NaN.
    pub fn new(target: &'a Catalog, config: MatchingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            target,
            thresholds: config.thresholds(),
            on_sky: on_sky_metric(config.frame),
            config,
        })
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Best counterpart of a single point in the target catalog
    pub fn find_match(&self, point: &Point) -> Option<PointMatch> {
        search_around_point(point, self.target, &self.thresholds, self.on_sky)
    }

    /// Cross-match every point of `query` (catalog A) against the target (catalog B)
    pub fn cross_match(&self, query: &Catalog) -> CrossMatchResult {
        let outcomes: Vec<Option<PointMatch>> = if self.config.parallel {
            (0..query.len())
                .into_par_iter()
                .map(|i| query.point(i).and_then(|p| self.find_match(&p)))
                .collect()
        } else {
            query.points().map(|p| self.find_match(&p)).collect()
        };

        let result = CrossMatchResult::from_outcomes(outcomes, self.target.len());

        info!(
            frame = %self.config.frame,
            query_points = query.len(),
            target_points = self.target.len(),
            matched = result.len(),
            unmatched_a = result.unmatched_a.len(),
            unmatched_b = result.unmatched_b.len(),
            "Cross-match complete"
        );

        result
    }
}

/// Cross-match catalog A against catalog B with the frame given by name.
///
/// # Errors
///
/// Returns `ConfigError::UnsupportedFrame` if `frame` is neither
/// `"cartesian"` nor `"spherical"`, or `ConfigError::InvalidThreshold` if a
/// limit is NaN. Nothing is scanned in either case.
pub fn cross_match(
    catalog_a: &Catalog,
    catalog_b: &Catalog,
    xy_lim: f64,
    z_lim: f64,
    frame: &str,
) -> Result<CrossMatchResult, ConfigError> {
    let frame: Frame = frame.parse()?;
    let matcher = CrossMatcher::new(catalog_b, MatchingConfig::new(xy_lim, z_lim, frame))?;
    Ok(matcher.cross_match(catalog_a))
}
