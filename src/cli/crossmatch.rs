use std::path::PathBuf;

use clap::Args;

use crate::cli::{parse_input, MatchOptions, OutputFormat};
use crate::core::catalog::Catalog;
use crate::matching::engine::{CrossMatchResult, CrossMatcher, MatchingConfig};

#[derive(Args)]
pub struct MatchArgs {
    /// Catalog A: every point is searched for a counterpart ('-' for stdin)
    #[arg(required = true)]
    pub catalog_a: PathBuf,

    /// Catalog B: the catalog searched for counterparts
    #[arg(required = true)]
    pub catalog_b: PathBuf,

    #[command(flatten)]
    pub options: MatchOptions,

    /// Also list unmatched indices in text output
    #[arg(long)]
    pub show_unmatched: bool,
}

pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    // Configuration errors are reported before any catalog is read
    let config = args.options.resolve()?;

    let catalog_a = parse_input(&args.catalog_a)?;
    let catalog_b = parse_input(&args.catalog_b)?;

    if verbose {
        eprintln!(
            "Catalog A: {} points, catalog B: {} points ({} frame, xy_lim={}, z_lim={})",
            catalog_a.len(),
            catalog_b.len(),
            config.frame,
            config.xy_lim,
            config.z_lim
        );
    }

    let matcher = CrossMatcher::new(&catalog_b, config)?;
    let result = matcher.cross_match(&catalog_a);

    match format {
        OutputFormat::Text => print_text_result(&args, &catalog_a, &catalog_b, &result),
        OutputFormat::Json => print_json_result(&args, matcher.config(), &result)?,
        OutputFormat::Tsv => print_tsv_result(&result),
    }

    Ok(())
}

fn print_text_result(
    args: &MatchArgs,
    catalog_a: &Catalog,
    catalog_b: &Catalog,
    result: &CrossMatchResult,
) {
    println!("Cross-match Results");
    println!("{}", "=".repeat(60));

    println!("\nCatalog A: {}", args.catalog_a.display());
    println!("  Points: {}", catalog_a.len());
    println!("  Matched: {}", result.len());
    println!("  Unmatched: {}", result.unmatched_a.len());

    println!("\nCatalog B: {}", args.catalog_b.display());
    println!("  Points: {}", catalog_b.len());
    println!(
        "  Matched: {}",
        catalog_b.len().saturating_sub(result.unmatched_b.len())
    );
    println!("  Unmatched: {}", result.unmatched_b.len());

    if result.is_empty() {
        println!("\nNo matches found.");
    } else {
        println!("\nMatches:");
        println!(
            "  {:>8}  {:>8}  {:>14}  {:>14}",
            "idx_a", "idx_b", "on_sky", "line_of_sight"
        );
        for pair in result.pairs() {
            println!(
                "  {:>8}  {:>8}  {:>14.6}  {:>14.6}",
                pair.index_a, pair.index_b, pair.on_sky_distance, pair.line_of_sight_distance
            );
        }
    }

    if args.show_unmatched {
        println!("\nUnmatched in A: {}", join_indices(&result.unmatched_a));
        println!("Unmatched in B: {}", join_indices(&result.unmatched_b));
    }
}

fn join_indices(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "(none)".to_string();
    }
    indices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn print_json_result(
    args: &MatchArgs,
    config: &MatchingConfig,
    result: &CrossMatchResult,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "catalog_a": args.catalog_a.display().to_string(),
        "catalog_b": args.catalog_b.display().to_string(),
        "config": config,
        "result": result,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_result(result: &CrossMatchResult) {
    println!("idx_a\tidx_b\td2d\td3d");
    for pair in result.pairs() {
        println!(
            "{}\t{}\t{}\t{}",
            pair.index_a, pair.index_b, pair.on_sky_distance, pair.line_of_sight_distance
        );
    }
}
