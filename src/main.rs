use clap::Parser;
use course_roster::core::{Pipeline, TermToken};
use course_roster::utils::error::ErrorSeverity;
use course_roster::utils::{logger, validation::Validate};
use course_roster::{
    CliArgs, EtlEngine, LocalStorage, PaginatedFetcher, RosterConfig, RosterError,
    RosterPipeline, RunMode, SectionPipeline, TermCatalog, TermCatalogBuilder,
};
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting course-roster");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    let config = match RosterConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => exit_on_startup_failure(&e),
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_on_startup_failure(&e);
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());

    let fetcher = PaginatedFetcher::new(&config);
    let catalog = match TermCatalogBuilder::new(&fetcher, &config.catalog.campus_marker)
        .build()
        .await
    {
        Ok(catalog) => catalog,
        Err(e) => exit_on_startup_failure(&e),
    };

    if catalog.is_empty() {
        println!("No academic terms found.");
        return Ok(());
    }

    let storage = LocalStorage::from_config(&config);
    match args.mode {
        RunMode::Roster => {
            let Some((year, terms)) = select_year(&catalog)? else {
                return Ok(());
            };
            let pipeline = RosterPipeline::new(storage, config, year, terms);
            run_pipeline(pipeline, monitor_enabled).await;
        }
        RunMode::Sections => {
            let selected = select_term(&catalog)?;
            let pipeline = SectionPipeline::new(storage, config, &catalog, selected);
            run_pipeline(pipeline, monitor_enabled).await;
        }
    }

    Ok(())
}

fn exit_on_startup_failure(e: &RosterError) -> ! {
    tracing::error!("❌ Startup failed: {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    std::process::exit(1);
}

fn read_line(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
    }
    Ok(line.trim().to_string())
}

fn select_year(catalog: &TermCatalog) -> io::Result<Option<(String, Vec<TermToken>)>> {
    let (min_year, max_year) = catalog.year_range().unwrap_or_default();
    let year = read_line(&format!("Enter a year [{}, {}]: ", min_year, max_year))?;

    match catalog.terms_for_year(&year) {
        Ok(terms) => {
            println!("\nFound {} term(s). Please see the list below.", terms.len());
            for term in &terms {
                println!("- {}", term.name);
            }
            Ok(Some((year, terms)))
        }
        Err(e) => {
            tracing::info!("{}", e);
            println!("{} term does not exist. Please try again.", year);
            Ok(None)
        }
    }
}

fn select_term(catalog: &TermCatalog) -> io::Result<TermToken> {
    let terms = catalog.all_terms();

    println!("Please select the session number you would like to retrieve course information from:");
    for (option, term) in terms.iter().enumerate() {
        println!("[{}] - {}", option, term.name);
    }

    loop {
        let input = read_line("Session number: ")?;
        match input.parse::<usize>().ok().and_then(|index| terms.get(index)) {
            Some(term) => {
                println!("Fetching for data on courses, please wait...");
                return Ok(term.clone());
            }
            None => println!("This session does not exist, please try again."),
        }
    }
}

async fn run_pipeline<P: Pipeline>(pipeline: P, monitor_enabled: bool) {
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);
    match engine.run().await {
        Ok(paths) => {
            for path in &paths {
                println!("📁 Data on courses saved as CSV: {}", path);
            }
            println!("✅ Done, {} file(s) written.", paths.len());
        }
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}
