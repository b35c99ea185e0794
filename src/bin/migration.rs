use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inventory_api::{
    config,
    db::{self, DbConfig},
    migrator::Migrator,
};
use sea_orm_migration::MigratorTrait;
use tracing::info;

#[derive(Parser)]
#[command(name = "migration", about = "Manage the inventory database schema")]
struct Cli {
    /// Overrides the configured database URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply all pending migrations, seed data included
    Up,
    /// Roll back the most recent migrations
    Down {
        #[arg(default_value_t = 1)]
        steps: u32,
    },
    /// Show applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config().context("failed to load application config")?;
    config::init_tracing(cfg.log_level(), cfg.log_json);

    let mut db_cfg = DbConfig::from(&cfg);
    if let Some(url) = cli.database_url {
        db_cfg.url = url;
    }
    let db = db::establish_connection_with_config(&db_cfg)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Commands::Up => {
            Migrator::up(&db, None).await?;
            info!("Migrations applied");
        }
        Commands::Down { steps } => {
            Migrator::down(&db, Some(steps)).await?;
            info!(steps, "Migrations rolled back");
        }
        Commands::Status => Migrator::status(&db).await?,
        Commands::Fresh => {
            Migrator::fresh(&db).await?;
            info!("Database recreated");
        }
    }

    db::close_pool(db).await?;
    Ok(())
}
