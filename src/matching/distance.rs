//! Distance primitives.
//!
//! Scalar functions for the three metrics used by the matcher, plus
//! elementwise variants that measure one point against a whole catalog
//! column.

use crate::core::types::Frame;

const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;
const RAD_TO_DEG: f64 = 180.0 / std::f64::consts::PI;

/// Above this magnitude of the law-of-cosines argument, `acos` loses
/// precision (separations within ~0.8 degrees of 0 or 180) and rounding can
/// push the argument outside [-1, 1].
pub const UNSTABLE_COSINE: f64 = 0.9999;

/// Elementwise on-sky distance from one `(coord1, coord2)` position to every
/// position of a catalog
pub type OnSkyDistances = fn(f64, f64, &[f64], &[f64]) -> Vec<f64>;

/// Euclidean distance between `(x1, y1)` and `(x2, y2)`
#[inline]
#[must_use]
pub fn planar_distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}

/// Absolute difference of two line-of-sight coordinates
#[inline]
#[must_use]
pub fn line_of_sight_distance(z1: f64, z2: f64) -> f64 {
    (z1 - z2).abs()
}

/// Great-circle separation between two positions, all angles in degrees.
///
/// Arguments are two (longitude, latitude) pairs: `(ra1, dec1)` then
/// `(ra2, dec2)`, not the `(ra1, ra2, dec1, dec2)` order.
///
/// Uses the spherical law of cosines. Near 0 and 180 degrees that formula is
/// numerically unstable, so the argument is checked first and the Vincenty
/// formula is used instead.
#[must_use]
pub fn angular_separation(ra1: f64, dec1: f64, ra2: f64, dec2: f64) -> f64 {
    let (sin_d1, cos_d1) = (dec1 * DEG_TO_RAD).sin_cos();
    let (sin_d2, cos_d2) = (dec2 * DEG_TO_RAD).sin_cos();
    let delta_ra = (ra2 - ra1) * DEG_TO_RAD;

    let cos_sep = sin_d1 * sin_d2 + cos_d1 * cos_d2 * delta_ra.cos();

    let sep_rad = if cos_sep.is_finite() && cos_sep.abs() < UNSTABLE_COSINE {
        cos_sep.acos()
    } else {
        vincenty_separation(sin_d1, cos_d1, sin_d2, cos_d2, delta_ra)
    };

    sep_rad * RAD_TO_DEG
}

/// Vincenty great-circle separation in radians; well-conditioned at every
/// separation.
#[inline]
fn vincenty_separation(sin_d1: f64, cos_d1: f64, sin_d2: f64, cos_d2: f64, delta_ra: f64) -> f64 {
    let (sin_dra, cos_dra) = delta_ra.sin_cos();

    let num = ((cos_d2 * sin_dra).powi(2) + (cos_d1 * sin_d2 - sin_d1 * cos_d2 * cos_dra).powi(2))
        .sqrt();
    let den = sin_d1 * sin_d2 + cos_d1 * cos_d2 * cos_dra;

    num.atan2(den)
}

/// [`planar_distance`] from `(x, y)` to every `(xs[i], ys[i])`
#[must_use]
pub fn planar_distances(x: f64, y: f64, xs: &[f64], ys: &[f64]) -> Vec<f64> {
    xs.iter()
        .zip(ys)
        .map(|(&x2, &y2)| planar_distance(x, y, x2, y2))
        .collect()
}

/// [`angular_separation`] from `(ra, dec)` to every `(ras[i], decs[i])`
#[must_use]
pub fn angular_separations(ra: f64, dec: f64, ras: &[f64], decs: &[f64]) -> Vec<f64> {
    ras.iter()
        .zip(decs)
        .map(|(&ra2, &dec2)| angular_separation(ra, dec, ra2, dec2))
        .collect()
}

/// [`line_of_sight_distance`] from `z` to every `zs[i]`
#[must_use]
pub fn line_of_sight_distances(z: f64, zs: &[f64]) -> Vec<f64> {
    zs.iter().map(|&z2| line_of_sight_distance(z, z2)).collect()
}

/// The elementwise on-sky metric for a frame.
///
/// Resolved once per cross-match rather than once per query point.
#[must_use]
pub fn on_sky_metric(frame: Frame) -> OnSkyDistances {
    match frame {
        Frame::Cartesian => planar_distances,
        Frame::Spherical => angular_separations,
    }
}
