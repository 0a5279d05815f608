use std::path::PathBuf;

use clap::Args;

use crate::cli::{parse_input, MatchOptions, OutputFormat};
use crate::core::catalog::Point;
use crate::matching::engine::CrossMatcher;
use crate::matching::search::PointMatch;
use crate::utils::validation::parse_point_triple;

#[derive(Args)]
pub struct SearchArgs {
    /// Catalog to search ('-' for stdin)
    #[arg(required = true)]
    pub catalog: PathBuf,

    /// Query point as coord1,coord2,coord3
    #[arg(long, required = true, allow_hyphen_values = true, value_parser = parse_point_triple)]
    pub point: (f64, f64, f64),

    #[command(flatten)]
    pub options: MatchOptions,
}

pub fn run(args: SearchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.options.resolve()?;
    let catalog = parse_input(&args.catalog)?;

    if verbose {
        eprintln!(
            "Catalog: {} points ({} frame, xy_lim={}, z_lim={})",
            catalog.len(),
            config.frame,
            config.xy_lim,
            config.z_lim
        );
    }

    let (c1, c2, c3) = args.point;
    let point = Point::new(c1, c2, c3);

    let matcher = CrossMatcher::new(&catalog, config)?;
    let found = matcher.find_match(&point);

    match format {
        OutputFormat::Text => print_text_match(&point, found.as_ref()),
        OutputFormat::Json => print_json_match(&point, found.as_ref())?,
        OutputFormat::Tsv => print_tsv_match(found.as_ref()),
    }

    Ok(())
}

fn print_text_match(point: &Point, found: Option<&PointMatch>) {
    println!(
        "Query point: ({}, {}, {})",
        point.coord1, point.coord2, point.coord3
    );

    match found {
        Some(m) => {
            println!("  Match: index {}", m.index);
            println!("  On-sky distance: {:.6}", m.on_sky_distance);
            println!("  Line-of-sight distance: {:.6}", m.line_of_sight_distance);
            println!("  Candidates within limits: {}", m.candidates);
        }
        None => println!("  No match within limits"),
    }
}

fn print_json_match(point: &Point, found: Option<&PointMatch>) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "point": [point.coord1, point.coord2, point.coord3],
        "match": found,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_match(found: Option<&PointMatch>) {
    println!("index\td2d\td3d\tcandidates");
    if let Some(m) = found {
        println!(
            "{}\t{}\t{}\t{}",
            m.index, m.on_sky_distance, m.line_of_sight_distance, m.candidates
        );
    }
}
