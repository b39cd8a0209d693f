use anyhow::Result;
use clap::{Args, Subcommand};
use uuid::Uuid;

use crate::adapters::sqlite::SqlitePartnerRepository;
use crate::cli::commands::{open_pool, require_owner};
use crate::cli::display::{list_table, render_list};
use crate::domain::models::{Config, Partner};
use crate::domain::ports::PartnerRepository;

#[derive(Args)]
pub struct PartnerArgs {
    #[command(subcommand)]
    pub command: PartnerCommands,
}

#[derive(Subcommand)]
pub enum PartnerCommands {
    /// Register a new partner
    Add {
        /// Display alias, unique within your journal
        alias: String,
        #[arg(long)]
        physique: Option<String>,
        #[arg(long)]
        face: Option<String>,
        #[arg(long)]
        age: Option<i64>,
        /// Owner id override
        #[arg(long)]
        owner: Option<Uuid>,
    },
    /// List registered partners
    List {
        /// Owner id override
        #[arg(long)]
        owner: Option<Uuid>,
    },
}

pub async fn execute(args: PartnerArgs, config: &Config, json: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    let repo = SqlitePartnerRepository::new(pool);

    match args.command {
        PartnerCommands::Add {
            alias,
            physique,
            face,
            age,
            owner,
        } => {
            let owner_id = require_owner(config, owner)?;
            let mut partner = Partner::new(owner_id, alias);
            partner.physique = physique;
            partner.face = face;
            partner.age = age;
            partner.validate()?;
            repo.insert(&partner).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&partner)?);
            } else {
                println!("Registered partner \"{}\" ({})", partner.alias, partner.id);
            }
        }
        PartnerCommands::List { owner } => {
            let owner_id = require_owner(config, owner)?;
            let partners = repo.list_for_owner(owner_id).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&partners)?);
            } else {
                let mut table = list_table(&["alias", "age", "registered", "id"]);
                for partner in &partners {
                    table.add_row(vec![
                        partner.alias.clone(),
                        partner.age.map_or_else(|| "-".to_string(), |a| a.to_string()),
                        partner.registered_at.format("%Y-%m-%d").to_string(),
                        partner.id.to_string(),
                    ]);
                }
                println!("{}", render_list("partner", &table, partners.len()));
            }
        }
    }

    Ok(())
}
