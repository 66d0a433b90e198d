use anyhow::Context;
use chrono::{Datelike, Local, Timelike};
use clap::Parser;
use vibe_dash::config::{cli::Command, LogFormat, OutputFormat};
use vibe_dash::core::{dashboard, stylesheet};
use vibe_dash::utils::{logger, validation::Validate};
use vibe_dash::{CliArgs, Dashboard, DashboardFeeds, DashConfig, DashError, FeedLoader, LocalStorage, SceneInputs};

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = match &args.config {
        Some(path) => match DashConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path.display(), e);
                eprintln!("💡 {}", e.recovery_suggestion());
                std::process::exit(1);
            }
        },
        None => DashConfig::default(),
    };
    args.apply_overrides(&mut config);

    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(args.verbose),
        LogFormat::Json => logger::init_json_logger(args.verbose),
    }

    tracing::info!("Starting vibe-dash");
    if args.verbose {
        tracing::debug!("Configuration: {:?}", config);
    }

    if let Err(e) = config.validate() {
        report(&e);
        std::process::exit(1);
    }

    if let Err(e) = run(&args.command, &config) {
        match e.downcast_ref::<DashError>() {
            Some(dash_error) => report(dash_error),
            None => eprintln!("❌ {:#}", e),
        }
        std::process::exit(1);
    }

    Ok(())
}

fn run(command: &Command, config: &DashConfig) -> anyhow::Result<()> {
    let deriver = dashboard::theme_deriver(config)?;

    match command {
        Command::Theme {
            hour,
            month,
            day_of_year,
            temperature,
            condition,
            format,
        } => {
            let now = Local::now();
            let inputs = SceneInputs::new(
                hour.unwrap_or(now.hour() as i32),
                month.unwrap_or(now.month() as i32),
                day_of_year.unwrap_or(now.ordinal() as i32),
                temperature.as_str(),
                condition.as_str(),
            );
            let bundle = deriver.derive(&inputs);
            tracing::info!("Theme '{}' ({})", bundle.theme.resolved_key, bundle.theme.vibe);

            match format {
                OutputFormat::Css => print!("{}", stylesheet::render(&bundle)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&bundle).context("serializing style bundle")?
                ),
            }
        }
        Command::Feeds => {
            let loader = FeedLoader::new(LocalStorage::new(config.base_dir()));
            let feeds = DashboardFeeds::load(&loader, config);
            for entry in feeds.provenance() {
                let location = entry
                    .path
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{} {:<14} {:<9} {}",
                    if entry.ok { "✅" } else { "⚠️ " },
                    entry.name,
                    entry.source,
                    location
                );
            }
            let status = feeds.automation_status();
            println!(
                "Automation: {}/{} runs succeeded ({}%)",
                status.succeeded, status.total, status.success_rate
            );
        }
        Command::Bundle { format } => {
            let loader = FeedLoader::new(LocalStorage::new(config.base_dir()));
            let feeds = DashboardFeeds::load(&loader, config);
            let dashboard = Dashboard::compose(feeds, &deriver, &Local::now());

            match format {
                OutputFormat::Css => print!("{}", stylesheet::render(&dashboard.style)),
                OutputFormat::Json => println!(
                    "{}",
                    serde_json::to_string_pretty(&dashboard).context("serializing dashboard")?
                ),
            }
        }
    }

    Ok(())
}

fn report(e: &DashError) {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
}
