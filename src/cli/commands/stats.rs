use anyhow::Result;
use chrono::Utc;
use clap::Args;
use uuid::Uuid;

use crate::adapters::sqlite::{SqliteEncounterRepository, SqlitePartnerRepository};
use crate::cli::commands::{open_pool, require_owner};
use crate::cli::display::list_table;
use crate::domain::models::Config;
use crate::domain::ports::{EncounterRepository, PartnerRepository};
use crate::services::overview::{self, Overview};

#[derive(Args)]
pub struct StatsArgs {
    /// Owner id override
    #[arg(long)]
    pub owner: Option<Uuid>,
}

pub async fn execute(args: StatsArgs, config: &Config, json: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    let partners_repo = SqlitePartnerRepository::new(pool.clone());
    let encounters_repo = SqliteEncounterRepository::new(pool);

    let owner_id = require_owner(config, args.owner)?;
    let history = encounters_repo.list_for_owner(owner_id).await?;
    let partners = partners_repo.list_for_owner(owner_id).await?;

    let overview = overview::summarize(&history, &partners, Utc::now());

    if json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
    } else {
        render(&overview);
    }

    Ok(())
}

fn render(overview: &Overview) {
    let totals = &overview.totals;
    println!("Journal overview");
    println!("────────────────");
    println!("Encounters:   {}", totals.encounters);
    println!("Partners:     {}", totals.partners);
    println!("This month:   {}", totals.this_month);
    println!("Avg rating:   {:.1}/10", totals.avg_rating);
    println!("Avg duration: {:.0} minutes", totals.avg_duration);

    if !overview.rating_distribution.is_empty() {
        println!("\nRating distribution:");
        let mut table = list_table(&["range", "count"]);
        for bucket in &overview.rating_distribution {
            table.add_row(vec![bucket.range.clone(), bucket.count.to_string()]);
        }
        println!("{table}");
    }

    if !overview.top_partners.is_empty() {
        println!("\nTop partners:");
        let mut table = list_table(&["alias", "encounters", "avg rating"]);
        for partner in &overview.top_partners {
            table.add_row(vec![
                partner.alias.clone(),
                partner.encounters.to_string(),
                format!("{:.1}", partner.avg_rating),
            ]);
        }
        println!("{table}");
    }

    if !overview.monthly_activity.is_empty() {
        println!("\nMonthly activity (last 12 months):");
        let mut table = list_table(&["month", "count"]);
        for month in &overview.monthly_activity {
            table.add_row(vec![month.month.clone(), month.count.to_string()]);
        }
        println!("{table}");
    }

    if let Some(best) = &overview.best_encounter {
        println!(
            "\nBest encounter: {:.1}/10 with {} on {}",
            best.rating,
            best.partner_alias.as_deref().unwrap_or("(unknown)"),
            best.occurred_at.format("%Y-%m-%d")
        );
    }
}
