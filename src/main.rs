use clap::Parser;
use account_lifecycle::cli::{self, Cli, Command};
use account_lifecycle::config::AppConfig;
use account_lifecycle::infrastructure::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load()?;
    logging::init_logging(&config.logging);

    match cli.command {
        Command::Serve => cli::serve::run(config).await,
        Command::Migrate(args) => cli::migrate::run(config, args).await,
    }
}
