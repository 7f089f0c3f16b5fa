use anyhow::Context;
use clap::Parser;
use course_roster::utils::{logger, validation::Validate};
use course_roster::{PaginatedFetcher, RosterConfig, TermCatalogBuilder};

#[derive(Parser)]
#[command(name = "term-catalog")]
#[command(about = "Lists the campus academic terms grouped by year")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "roster-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let config = RosterConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;
    config.validate().context("Configuration validation failed")?;

    let fetcher = PaginatedFetcher::new(&config);
    let catalog = TermCatalogBuilder::new(&fetcher, &config.catalog.campus_marker)
        .build()
        .await
        .context("Failed to build the term catalog")?;

    let Some((min_year, max_year)) = catalog.year_range() else {
        println!("No academic terms found.");
        return Ok(());
    };

    println!("Academic periods span {} to {}", min_year, max_year);
    for (year, terms) in catalog.years() {
        println!("\n{} ({} term(s))", year, terms.len());
        for term in terms {
            println!("  {}", term);
        }
    }

    Ok(())
}
