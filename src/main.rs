use anyhow::Context;
use clap::Parser;
use dopc::core::ConfigProvider;
use dopc::utils::{logger, validation::Validate};
use dopc::{CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = CliConfig::parse();

    match cli.config.as_deref() {
        Some(path) => {
            let config = TomlConfig::from_file(path)
                .with_context(|| format!("failed to load config file '{}'", path))?;
            start(&config).await
        }
        None => start(&cli).await,
    }
}

async fn start<C: ConfigProvider + Validate + std::fmt::Debug>(config: &C) -> anyhow::Result<()> {
    logger::init_logger(config.verbose(), config.json_logs());

    tracing::info!("Starting dopc service");
    if config.verbose() {
        tracing::debug!("Config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    dopc::app::run(config).await.context("server terminated with an error")?;
    Ok(())
}
