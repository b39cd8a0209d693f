use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime, Utc};
use clap::Args;
use uuid::Uuid;

use crate::adapters::sqlite::{SqliteEncounterRepository, SqlitePartnerRepository};
use crate::cli::commands::{open_pool, require_owner, resolve_partner};
use crate::cli::display::{list_table, render_list};
use crate::domain::models::{Config, Encounter, ScoreSet};
use crate::domain::ports::EncounterRepository;

#[derive(Args)]
pub struct LogArgs {
    /// Partner alias or id
    #[arg(long)]
    pub partner: String,

    /// When it happened: RFC 3339 or "YYYY-MM-DD HH:MM" (UTC). Defaults to now
    #[arg(long)]
    pub at: Option<String>,

    #[arg(long, default_value_t = 60)]
    pub duration: i64,

    #[arg(long)]
    pub location: Option<String>,

    /// Comma-separated position tags, e.g. "Misionero, Perrito"
    #[arg(long)]
    pub positions: Option<String>,

    #[arg(long)]
    pub outcome: Option<String>,

    #[arg(long)]
    pub attire: Option<String>,

    /// Overall rating in 0..=10
    #[arg(long, default_value_t = 5.0)]
    pub rating: f64,

    #[arg(long, default_value_t = 5)]
    pub intensity: u8,

    #[arg(long, default_value_t = 5)]
    pub exposure: u8,

    #[arg(long, default_value_t = 5)]
    pub immersion: u8,

    #[arg(long, default_value_t = 5)]
    pub oral_given: u8,

    #[arg(long, default_value_t = 5)]
    pub oral_received: u8,

    #[arg(long)]
    pub notes: Option<String>,

    /// Owner id override
    #[arg(long)]
    pub owner: Option<Uuid>,
}

#[derive(Args)]
pub struct ListArgs {
    /// Restrict to one partner (alias or id)
    #[arg(long)]
    pub partner: Option<String>,

    /// Owner id override
    #[arg(long)]
    pub owner: Option<Uuid>,
}

fn parse_occurred_at(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M")
        .map(|naive| naive.and_utc())
        .with_context(|| format!("unrecognized timestamp {raw:?}"))
}

fn split_cli_positions(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Log a new encounter.
pub async fn execute_log(args: LogArgs, config: &Config, json: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    let partners = SqlitePartnerRepository::new(pool.clone());
    let encounters = SqliteEncounterRepository::new(pool);

    let owner_id = require_owner(config, args.owner)?;
    let partner = resolve_partner(&partners, owner_id, &args.partner).await?;

    let occurred_at = match args.at.as_deref() {
        Some(raw) => parse_occurred_at(raw)?,
        None => Utc::now(),
    };

    let mut encounter = Encounter::new(owner_id, partner.id, occurred_at)
        .with_duration(args.duration)
        .with_positions(split_cli_positions(args.positions.as_deref()))
        .with_scores(ScoreSet {
            intensity: args.intensity,
            exposure: args.exposure,
            immersion: args.immersion,
            oral_given: args.oral_given,
            oral_received: args.oral_received,
        })
        .with_rating(args.rating);
    encounter.location = args.location;
    encounter.outcome = args.outcome;
    encounter.attire = args.attire;
    encounter.notes = args.notes;

    encounter.validate()?;
    encounters.insert(&encounter).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&encounter)?);
    } else {
        println!(
            "Logged encounter with \"{}\" on {} ({})",
            partner.alias,
            occurred_at.format("%Y-%m-%d %H:%M"),
            encounter.id
        );
    }

    Ok(())
}

/// List logged encounters, newest first.
pub async fn execute_list(args: ListArgs, config: &Config, json: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    let partners = SqlitePartnerRepository::new(pool.clone());
    let encounters = SqliteEncounterRepository::new(pool);

    let owner_id = require_owner(config, args.owner)?;
    let listed = match args.partner.as_deref() {
        Some(key) => {
            let partner = resolve_partner(&partners, owner_id, key).await?;
            encounters.list_for_partner(owner_id, partner.id).await?
        }
        None => encounters.list_for_owner(owner_id).await?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&listed)?);
    } else {
        let mut table = list_table(&["date", "partner", "location", "positions", "min", "rating"]);
        for encounter in &listed {
            table.add_row(vec![
                encounter.occurred_at.format("%Y-%m-%d").to_string(),
                encounter
                    .partner_alias
                    .clone()
                    .unwrap_or_else(|| "-".to_string()),
                encounter.location.clone().unwrap_or_else(|| "-".to_string()),
                encounter.positions.join(", "),
                encounter.duration_minutes.to_string(),
                format!("{:.1}", encounter.rating),
            ]);
        }
        println!("{}", render_list("encounter", &table, listed.len()));
    }

    Ok(())
}
