use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::debug;

use crate::core::catalog::Catalog;
use crate::utils::validation::{check_point_limit, parse_coordinate, MAX_CATALOG_POINTS};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid catalog format: {0}")]
    InvalidFormat(String),

    #[error("Too many points: {count} exceeds maximum allowed ({limit})")]
    TooManyPoints { count: usize, limit: usize },
}

/// Field separator of a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Tab,
    Comma,
    /// Any run of spaces or tabs
    Whitespace,
}

impl Delimiter {
    /// Pick the delimiter from a file name: `.tsv`, `.csv`, optionally
    /// followed by `.gz`. Anything else is whitespace-delimited.
    pub fn from_path(path: &Path) -> Self {
        let name = path.to_string_lossy().to_lowercase();
        let name = name.strip_suffix(".gz").unwrap_or(&name);

        if name.ends_with(".csv") {
            Self::Comma
        } else if name.ends_with(".tsv") || name.ends_with(".tab") {
            Self::Tab
        } else {
            Self::Whitespace
        }
    }

    fn split(self, line: &str) -> Vec<&str> {
        match self {
            Self::Tab => line.split('\t').collect(),
            Self::Comma => line.split(',').collect(),
            Self::Whitespace => line.split_whitespace().collect(),
        }
    }
}

/// Check if the path names a gzip-compressed file
pub fn is_gzipped(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gz"))
}

/// Parse a catalog file with columns: coord1, coord2, coord3, [ignored...]
///
/// The delimiter is chosen from the file extension and `.gz` files are
/// decompressed on the fly.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_catalog_file(path: &Path) -> Result<Catalog, ParseError> {
    let delimiter = Delimiter::from_path(path);
    let file = std::fs::File::open(path)?;

    let catalog = if is_gzipped(path) {
        parse_catalog_reader(BufReader::new(GzDecoder::new(file)), delimiter)?
    } else {
        parse_catalog_reader(BufReader::new(file), delimiter)?
    };

    debug!(
        path = %path.display(),
        points = catalog.len(),
        "Loaded catalog"
    );
    Ok(catalog)
}

/// Parse catalog text from any reader
///
/// # Errors
///
/// Returns `ParseError::Io` if reading fails, or other parse errors if the
/// content is invalid.
pub fn parse_catalog_reader<R: Read>(
    mut reader: R,
    delimiter: Delimiter,
) -> Result<Catalog, ParseError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_catalog_text(&content, delimiter)
}

/// Parse catalog text with columns: coord1, coord2, coord3, [ignored...]
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if lines have fewer than 3 fields,
/// contain non-numeric or non-finite coordinates, or no points are found, or
/// `ParseError::TooManyPoints` if the limit is exceeded.
pub fn parse_catalog_text(text: &str, delimiter: Delimiter) -> Result<Catalog, ParseError> {
    parse_catalog_text_with_limit(text, delimiter, MAX_CATALOG_POINTS)
}

/// [`parse_catalog_text`] with an explicit cap on the number of points
pub(crate) fn parse_catalog_text_with_limit(
    text: &str,
    delimiter: Delimiter,
    limit: usize,
) -> Result<Catalog, ParseError> {
    let mut coord1 = Vec::new();
    let mut coord2 = Vec::new();
    let mut coord3 = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = delimiter.split(line);

        // A leading non-numeric field marks a column header
        if first_data_line {
            first_data_line = false;
            let first = fields.first().map_or("", |s| s.trim());
            if first.parse::<f64>().is_err() {
                continue;
            }
        }

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() < 3 {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has fewer than 3 fields"
            )));
        }

        let mut coords = [0.0; 3];
        for (col, (slot, field)) in coords.iter_mut().zip(&fields).enumerate() {
            *slot = parse_coordinate(field).ok_or_else(|| {
                ParseError::InvalidFormat(format!(
                    "Invalid coordinate in column {} on line {}: '{}'",
                    col + 1,
                    line_num,
                    field.trim()
                ))
            })?;
        }

        // Check point limit for DOS protection
        if check_point_limit(coord1.len(), limit).is_some() {
            return Err(ParseError::TooManyPoints {
                count: coord1.len() + 1,
                limit,
            });
        }

        coord1.push(coords[0]);
        coord2.push(coords[1]);
        coord3.push(coords[2]);
    }

    if coord1.is_empty() {
        return Err(ParseError::InvalidFormat(
            "No points found in catalog".to_string(),
        ));
    }

    // Columns are filled together, so their lengths always agree
    Catalog::new(coord1, coord2, coord3).map_err(|e| ParseError::InvalidFormat(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_tsv_text() {
        let tsv = "ra\tdec\tvel\n150.1\t2.2\t1200\n150.3\t2.1\t1350.5\n";

        let catalog = parse_catalog_text(tsv, Delimiter::Tab).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.coord1(), &[150.1, 150.3]);
        assert_eq!(catalog.coord3(), &[1200.0, 1350.5]);
    }

    #[test]
    fn test_parse_csv_text_extra_columns() {
        let csv = "x,y,z,name\n1,2,3,first\n4,5,6,second\n";

        let catalog = parse_catalog_text(csv, Delimiter::Comma).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.coord2(), &[2.0, 5.0]);
    }

    #[test]
    fn test_parse_no_header() {
        let text = "1 2 3\n  4\t5   6\n";
        let catalog = parse_catalog_text(text, Delimiter::Whitespace).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.coord3(), &[3.0, 6.0]);
    }

    #[test]
    fn test_parse_comments_before_header() {
        let tsv = "# Survey A\n# epoch J2000\n\nra\tdec\tz\n10\t20\t0.1\n";
        let catalog = parse_catalog_text(tsv, Delimiter::Tab).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.coord1(), &[10.0]);
    }

    #[test]
    fn test_parse_too_few_fields() {
        let err = parse_catalog_text("1,2,3\n4,5\n", Delimiter::Comma).unwrap_err();
        assert!(err.to_string().contains("Line 2"));
    }

    #[test]
    fn test_parse_invalid_coordinate() {
        let err = parse_catalog_text("x,y,z\n1,2,3\n4,abc,6\n", Delimiter::Comma).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("column 2"), "{msg}");
        assert!(msg.contains("line 3"), "{msg}");
    }

    #[test]
    fn test_parse_rejects_non_finite() {
        assert!(parse_catalog_text("1,2,3\n4,5,nan\n", Delimiter::Comma).is_err());
        assert!(parse_catalog_text("1,inf,3\n", Delimiter::Comma).is_err());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            parse_catalog_text("# nothing here\n\nx,y,z\n", Delimiter::Comma),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_point_limit() {
        let text = "x\ty\tz\n0\t0\t0\n1\t1\t1\n";
        let catalog = parse_catalog_text_with_limit(text, Delimiter::Tab, 2).unwrap();
        assert_eq!(catalog.len(), 2);

        let text = "x\ty\tz\n0\t0\t0\n1\t1\t1\n2\t2\t2\n";
        let err = parse_catalog_text_with_limit(text, Delimiter::Tab, 2).unwrap_err();
        assert!(matches!(
            err,
            ParseError::TooManyPoints { count: 3, limit: 2 }
        ));
        assert_eq!(
            err.to_string(),
            "Too many points: 3 exceeds maximum allowed (2)"
        );
    }

    #[test]
    fn test_delimiter_from_path() {
        assert_eq!(Delimiter::from_path(Path::new("a.csv")), Delimiter::Comma);
        assert_eq!(Delimiter::from_path(Path::new("a.CSV.gz")), Delimiter::Comma);
        assert_eq!(Delimiter::from_path(Path::new("a.tsv")), Delimiter::Tab);
        assert_eq!(Delimiter::from_path(Path::new("a.tsv.gz")), Delimiter::Tab);
        assert_eq!(Delimiter::from_path(Path::new("a.txt")), Delimiter::Whitespace);
    }

    #[test]
    fn test_parse_catalog_file() {
        let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
        temp.write_all(b"x,y,z\n0,0,0\n10,10,0\n").unwrap();
        temp.flush().unwrap();

        let catalog = parse_catalog_file(temp.path()).unwrap();
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn test_parse_gzipped_catalog_file() {
        let temp = NamedTempFile::with_suffix(".tsv.gz").unwrap();
        let mut encoder = GzEncoder::new(temp.reopen().unwrap(), Compression::default());
        encoder.write_all(b"x\ty\tz\n1\t2\t3\n").unwrap();
        encoder.finish().unwrap();

        assert!(is_gzipped(temp.path()));
        let catalog = parse_catalog_file(temp.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.coord2(), &[2.0]);
    }

    #[test]
    fn test_parse_missing_file() {
        let err = parse_catalog_file(Path::new("/nonexistent/catalog.tsv")).unwrap_err();
        assert!(matches!(err, ParseError::Io(_)));
    }
}
