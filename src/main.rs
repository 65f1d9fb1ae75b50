use anyhow::Context;
use clap::Parser;
use off_brand_corrector::domain::ports::ConfigProvider;
use off_brand_corrector::utils::logger;
use off_brand_corrector::config::cli::{FINISHED_LINE, USAGE_LINES};
use off_brand_corrector::{BrandMapping, CliConfig, CorrectorEngine, FixedDelay, OpenFoodFactsClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    let Some((username, password)) = cli.credentials() else {
        for line in USAGE_LINES {
            println!("{}", line);
        }
        return Ok(());
    };

    let config = match cli.service_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };
    tracing::debug!(
        "Catalog {} (timeout {:?}, delay {:?})",
        config.base_url(),
        config.timeout(),
        config.update_delay()
    );

    let client = OpenFoodFactsClient::new(&config).context("failed to build the HTTP client")?;
    let mut engine = CorrectorEngine::new(
        client,
        FixedDelay(config.update_delay()),
        BrandMapping::builtin(),
        config.base_url(),
        cli.debug_enabled(),
    );

    match engine.run(username, password).await {
        Ok(_) => {
            println!("{}", FINISHED_LINE);
            Ok(())
        }
        Err(e) => {
            tracing::error!("❌ Run aborted in state {:?}: {}", engine.state(), e);
            eprintln!("❌ {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    }
}
