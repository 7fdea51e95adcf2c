use clap::Parser;
use steam_freebies::utils::{logger, validation::Validate};
use steam_freebies::{
    render_report, CliConfig, FreeGamesFinder, FreebiesError, RunSettings, SteamWebClient,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting steam-freebies");

    let settings = match cli.load_settings().and_then(|settings| {
        settings.validate()?;
        Ok(settings)
    }) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&settings).await {
        tracing::error!(
            "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

async fn run(settings: &RunSettings) -> Result<(), FreebiesError> {
    tracing::debug!(
        "Checking {} accounts against {}",
        settings.steam_ids.len(),
        settings.endpoints.store_query
    );

    let client = SteamWebClient::new(
        settings.api_key.clone(),
        settings.endpoints.clone(),
        settings.request_timeout,
    )?;
    let finder = FreeGamesFinder::new(client, settings.finder);
    let report = finder.all_new_free_games(&settings.steam_ids).await?;

    tracing::info!(
        "✅ Found {} new free games across {} accounts",
        report.total_games(),
        report.len()
    );

    let rendered = render_report(&report, settings.format, chrono::Utc::now())?;
    match &settings.output_path {
        Some(path) => {
            if let Some(parent) = std::path::Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }
            tokio::fs::write(path, rendered).await?;
            tracing::info!("📁 Report saved to: {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
