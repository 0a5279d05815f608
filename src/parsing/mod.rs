//! Parsers for loading catalogs from delimited text files.
//!
//! Each row holds one point; the first three fields are its coordinates and
//! any further fields are ignored. Row order becomes catalog order.
//!
//! ## Example
//!
//! ```rust,no_run
//! use xmatch::parsing::tsv::{parse_catalog_file, parse_catalog_text, Delimiter};
//! use std::path::Path;
//!
//! // Delimiter and compression come from the extension (.tsv, .csv, .gz)
//! let catalog = parse_catalog_file(Path::new("galaxies.csv.gz")).unwrap();
//!
//! // Or parse text directly
//! let catalog = parse_catalog_text("ra,dec,vel\n150.1,2.2,1200\n", Delimiter::Comma).unwrap();
//! ```
//!
//! ## Accepted Layout
//!
//! | Rule | Behavior |
//! |------|----------|
//! | Blank lines, `#` lines | Skipped |
//! | First row with a non-numeric first field | Treated as a header |
//! | Fewer than 3 fields | Error with line number |
//! | Non-numeric, NaN or infinite coordinate | Error with line number |
//! | No data rows | Error |

pub mod tsv;
