//! Command-line interface for xmatch.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Cross-match every point of one catalog against another
//! - **search**: Find the counterpart of a single point in a catalog
//!
//! ## Usage
//!
//! ```text
//! # Cartesian catalogs
//! xmatch match a.tsv b.tsv --xy-lim 1.0 --z-lim 0.5
//!
//! # ra/dec/velocity catalogs (limits in degrees and km/s)
//! xmatch match a.csv b.csv --frame spherical --xy-lim 0.01 --z-lim 300
//!
//! # Settings from a config file, JSON output
//! xmatch match a.tsv b.tsv --config match.json --format json
//!
//! # Single point lookup
//! xmatch search b.tsv --point 150.1,2.2,1200 --frame spherical --xy-lim 0.1 --z-lim 500
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};

use crate::core::catalog::Catalog;
use crate::core::types::Frame;
use crate::matching::engine::MatchingConfig;
use crate::parsing::tsv::{self, Delimiter};

pub mod crossmatch;
pub mod search;

#[derive(Parser)]
#[command(name = "xmatch")]
#[command(version)]
#[command(about = "Cross-match two point catalogs with on-sky and line-of-sight limits")]
#[command(
    long_about = "xmatch pairs every point of catalog A with its closest counterpart in catalog B.\n\nA point of B is a candidate when both hold:\n- its on-sky distance (planar, or great-circle in degrees) is below --xy-lim\n- its line-of-sight distance is below --z-lim\n\nThe candidate with the smallest on-sky distance wins; ties go to the earlier row of B."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Cross-match catalog A against catalog B
    Match(crossmatch::MatchArgs),

    /// Find the best counterpart of one point in a catalog
    Search(search::SearchArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Matching options shared by every command
#[derive(clap::Args)]
pub struct MatchOptions {
    /// On-sky distance limit (planar units, or degrees for the spherical frame)
    #[arg(long)]
    pub xy_lim: Option<f64>,

    /// Line-of-sight distance limit
    #[arg(long)]
    pub z_lim: Option<f64>,

    /// Coordinate frame: cartesian or spherical [default: cartesian]
    #[arg(long)]
    pub frame: Option<Frame>,

    /// JSON config file; command-line flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search points in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl MatchOptions {
    /// Merge the config file (if any) with command-line overrides
    pub fn resolve(&self) -> anyhow::Result<MatchingConfig> {
        let base = match &self.config {
            Some(path) => Some(
                MatchingConfig::load_from_file(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
            ),
            None => None,
        };

        let xy_lim = self
            .xy_lim
            .or(base.as_ref().map(|c| c.xy_lim))
            .context("--xy-lim is required (or set xy_lim in --config)")?;
        let z_lim = self
            .z_lim
            .or(base.as_ref().map(|c| c.z_lim))
            .context("--z-lim is required (or set z_lim in --config)")?;
        let frame = self
            .frame
            .or(base.as_ref().map(|c| c.frame))
            .unwrap_or_default();
        let parallel = self.parallel || base.as_ref().is_some_and(|c| c.parallel);

        let config = MatchingConfig::new(xy_lim, z_lim, frame).with_parallel(parallel);
        config.validate()?;
        Ok(config)
    }
}

/// Load a catalog from a file, or tab-delimited text from stdin for `-`
fn parse_input(path: &Path) -> anyhow::Result<Catalog> {
    let catalog = if path == Path::new("-") {
        tsv::parse_catalog_reader(BufReader::new(std::io::stdin().lock()), Delimiter::Tab)?
    } else {
        tsv::parse_catalog_file(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?
    };
    Ok(catalog)
}
