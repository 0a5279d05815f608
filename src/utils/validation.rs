//! Centralized input limits and field helpers.

/// Maximum number of points allowed in a single catalog file (DOS protection)
pub const MAX_CATALOG_POINTS: usize = 5_000_000;

/// Check if adding another point would exceed `limit`, normally
/// [`MAX_CATALOG_POINTS`].
///
/// Call this with the current count BEFORE adding a new point.
/// Returns an error message if adding would exceed the limit, None if safe to add.
///
/// # Example
/// ```ignore
/// if check_point_limit(points.len(), MAX_CATALOG_POINTS).is_some() {
///     return Err(...);
/// }
/// points.push(new_point); // Safe to add
/// ```
#[must_use]
pub fn check_point_limit(count: usize, limit: usize) -> Option<String> {
    if count >= limit {
        Some(format!(
            "Too many points: adding another would exceed maximum of {limit}"
        ))
    } else {
        None
    }
}

/// Parse a coordinate field, accepting only finite numbers.
///
/// # Examples
///
/// ```
/// use xmatch::utils::validation::parse_coordinate;
///
/// assert_eq!(parse_coordinate(" 12.5 "), Some(12.5));
/// assert_eq!(parse_coordinate("-3e2"), Some(-300.0));
/// assert_eq!(parse_coordinate("nan"), None);
/// assert_eq!(parse_coordinate("inf"), None);
/// assert_eq!(parse_coordinate("ra"), None);
/// ```
#[must_use]
pub fn parse_coordinate(field: &str) -> Option<f64> {
    field
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Parse a `c1,c2,c3` triple, as given to `--point`.
///
/// # Errors
///
/// Returns a message naming the problem if there are not exactly three
/// comma-separated finite numbers.
pub fn parse_point_triple(text: &str) -> Result<(f64, f64, f64), String> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != 3 {
        return Err(format!(
            "expected three comma-separated coordinates, got {}",
            fields.len()
        ));
    }

    let mut coords = [0.0; 3];
    for (slot, field) in coords.iter_mut().zip(&fields) {
        *slot = parse_coordinate(field).ok_or_else(|| format!("invalid coordinate '{field}'"))?;
    }

    Ok((coords[0], coords[1], coords[2]))
}
