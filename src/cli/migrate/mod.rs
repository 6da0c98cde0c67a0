//! Migrate command - applies or reverts the PostgreSQL schema

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::storage::migrations::{account_migrations, Migrator};
use crate::infrastructure::storage::{connect_postgres, PostgresMigrator};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the latest applied migration instead of applying pending ones
    #[arg(long)]
    pub revert: bool,

    /// Overrides `storage.database_url`
    #[arg(long)]
    pub database_url: Option<String>,
}

pub async fn run(mut config: AppConfig, args: MigrateArgs) -> anyhow::Result<()> {
    if let Some(url) = args.database_url {
        config.storage.database_url = Some(url);
    }

    let pool = connect_postgres(&config.storage).await?;
    let migrator = PostgresMigrator::new(pool, account_migrations());

    if args.revert {
        match migrator.revert().await? {
            Some(version) => info!(version, "Reverted migration"),
            None => info!("No migrations to revert"),
        }
    } else {
        let applied = migrator.run().await?;
        info!(applied, version = ?migrator.version().await?, "Migrations complete");
    }

    Ok(())
}
