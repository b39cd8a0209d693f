use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Args;
use uuid::Uuid;

use crate::cli::commands::open_pool;
use crate::domain::models::Config;

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing configuration
    #[arg(long)]
    pub force: bool,
}

/// Scaffold `.tryst/`: a fresh owner id, the default config, and a
/// migrated database.
pub async fn execute(args: InitArgs, json: bool) -> Result<()> {
    let dir = Path::new(".tryst");
    let config_path = dir.join("config.yaml");

    if config_path.exists() && !args.force {
        bail!(".tryst/config.yaml already exists (use --force to overwrite)");
    }

    fs::create_dir_all(dir).context("failed to create .tryst directory")?;

    let owner_id = Uuid::new_v4();
    let config = Config {
        profile: crate::domain::models::ProfileConfig {
            owner_id: Some(owner_id),
        },
        ..Config::default()
    };

    let rendered = serde_yaml::to_string(&config).context("failed to render config")?;
    fs::write(&config_path, rendered).context("failed to write config")?;

    let pool = open_pool(&config).await?;
    crate::adapters::sqlite::verify_connection(&pool).await?;
    pool.close().await;

    if json {
        println!(
            "{}",
            serde_json::json!({
                "config": config_path.display().to_string(),
                "database": config.database.path,
                "owner_id": owner_id,
            })
        );
    } else {
        println!("Initialized tryst journal.");
        println!("Config:   {}", config_path.display());
        println!("Database: {}", config.database.path);
        println!("Owner id: {owner_id}");
    }

    Ok(())
}
