use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use digitstore::{Pattern, open_store};
use pisearch::cli::{Cli, Command, OutputFormat};
use pisearch::config::Config;
use pisearch::{PatternSearcher, SearchReport};

fn setup_logging(level: Option<&str>) -> Result<()> {
    let level = match level.map(|s| s.to_uppercase()) {
        None => tracing::Level::INFO,
        Some(s) => match s.as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .try_init()
        .map_err(|e| eyre::eyre!("{}", e))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging level may come from the config file, so load events are logged once the subscriber exists
    let (mut config, load_events) = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    cli.apply_overrides(&mut config);

    setup_logging(config.log_level.as_deref()).context("Failed to setup logging")?;
    for event in &load_events {
        event.log();
    }
    debug!(?config, "main: resolved config");

    config.validate()?;

    let store = open_store(&config.digits.path, config.digits.encoding)
        .context(format!("Failed to open digit file {}", config.digits.path.display()))?;

    info!("pisearch ready");

    match cli.command {
        Command::Search { pattern, start, format } => {
            let pattern = Pattern::parse(&pattern)?;
            let searcher = PatternSearcher::new(store, config.search.search_strategy());
            let report = SearchReport::run(&searcher, &pattern, start, config.search.context_radius)?;

            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                OutputFormat::Text => match (&report.position, &report.context) {
                    (Some(position), Some(ctx)) => {
                        println!(
                            "{} {} found at position {}",
                            "✓".green(),
                            report.pattern.cyan(),
                            position.to_string().yellow()
                        );
                        println!(
                            "  {}{}{}  (from position {})",
                            ctx.before().dimmed(),
                            ctx.matched().green().bold(),
                            ctx.after().dimmed(),
                            ctx.start_position
                        );
                        println!("  {:.3}s", report.search_time_seconds);
                    }
                    _ => {
                        println!(
                            "{} {} not found after position {}",
                            "✗".red(),
                            report.pattern.cyan(),
                            report.start_position
                        );
                    }
                },
            }
        }
        Command::Digits { start, count } => {
            let digits = store.digits_in_range(start, count)?;
            println!("{}", digitstore::render(&digits));
        }
        Command::Stats { format } => match format {
            OutputFormat::Json => {
                let stats = serde_json::json!({
                    "path": config.digits.path,
                    "encoding": config.digits.encoding,
                    "digit_count": store.digit_count(),
                });
                println!("{}", serde_json::to_string_pretty(&stats)?);
            }
            OutputFormat::Text => {
                println!("Digits: {}", config.digits.path.display().to_string().cyan());
                println!("  Encoding: {}", config.digits.encoding);
                println!("  Digit count: {}", store.digit_count());
            }
        },
    }

    Ok(())
}
