use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use uuid::Uuid;

use crate::adapters::generative::AnthropicGenerativeClient;
use crate::adapters::sqlite::{SqliteEncounterRepository, SqlitePartnerRepository};
use crate::cli::commands::{open_pool, require_owner, resolve_partner};
use crate::domain::models::{Config, Recommendation, Target};
use crate::services::{GenerativeDelegate, RecommendationService};

#[derive(Args)]
pub struct RecommendArgs {
    /// Partner alias or id; omit for the cross-partner view
    #[arg(long)]
    pub partner: Option<String>,

    /// In-progress form context as a JSON object (enriches the generative
    /// prompt only)
    #[arg(long)]
    pub form: Option<String>,

    /// Owner id override
    #[arg(long)]
    pub owner: Option<Uuid>,
}

pub async fn execute(args: RecommendArgs, config: &Config, json: bool) -> Result<()> {
    let pool = open_pool(config).await?;
    let partners = Arc::new(SqlitePartnerRepository::new(pool.clone()));
    let encounters = Arc::new(SqliteEncounterRepository::new(pool));

    let owner_id = require_owner(config, args.owner)?;
    let target = match args.partner.as_deref() {
        Some(key) => Target::Partner(resolve_partner(partners.as_ref(), owner_id, key).await?.id),
        None => Target::All,
    };

    let form = args
        .form
        .as_deref()
        .map(serde_json::from_str::<serde_json::Value>)
        .transpose()
        .context("--form must be a valid JSON object")?;

    let client = Arc::new(AnthropicGenerativeClient::new(&config.generative)?);
    let delegate = GenerativeDelegate::new(client, &config.generative);
    let service = RecommendationService::new(encounters, partners, delegate);

    let recommendation = service.recommend(owner_id, target, form).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendation)?);
    } else {
        render(&recommendation);
    }

    Ok(())
}

fn render(recommendation: &Recommendation) {
    let suggestion = &recommendation.suggestion;
    println!("{}", suggestion.summary);
    println!();
    println!("Next date:  {}", suggestion.next_date_suggestion.format("%Y-%m-%d %H:%M UTC"));
    println!("Location:   {}", suggestion.location);
    println!("Positions:  {}", suggestion.positions.join(", "));
    if let Some(attire) = &suggestion.attire {
        println!("Attire:     {attire}");
    }
    println!("Duration:   {} minutes", suggestion.duration_minutes);
    println!();
    println!("{}", suggestion.rationale);
    println!();
    println!("Scenario:");
    println!("  Ambience: {}", suggestion.scenario.ambience);
    println!("  Lighting: {}", suggestion.scenario.lighting);
    println!("  Sound:    {}", suggestion.scenario.sound);
    println!("  Detail:   {}", suggestion.scenario.detail);
    println!();
    println!("Tips:");
    for tip in &suggestion.tips {
        println!("  - {tip}");
    }
    println!();
    println!("Insights:");
    for insight in &recommendation.insights {
        println!("  - {insight}");
    }
}
