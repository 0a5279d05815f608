use clap::Parser;
use tracing_subscriber::EnvFilter;
use xmatch::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("xmatch=debug,info")
    } else {
        EnvFilter::new("xmatch=warn")
    };

    // Logs go to stderr so JSON and TSV output stay parseable
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Match(args) => {
            cli::crossmatch::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Search(args) => {
            cli::search::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}
