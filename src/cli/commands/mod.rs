//! CLI command implementations.

pub mod encounter;
pub mod init;
pub mod partner;
pub mod recommend;
pub mod stats;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::adapters::sqlite::initialize_database;
use crate::domain::models::{Config, Partner};
use crate::domain::ports::PartnerRepository;

/// Open the configured database, applying pending migrations.
pub(crate) async fn open_pool(config: &Config) -> Result<SqlitePool> {
    let url = format!("sqlite:{}", config.database.path);
    initialize_database(&url)
        .await
        .with_context(|| format!("failed to open database at {}", config.database.path))
}

/// The owner identity for this invocation: explicit flag first, then the
/// configured profile.
pub(crate) fn require_owner(config: &Config, override_id: Option<Uuid>) -> Result<Uuid> {
    override_id
        .or(config.profile.owner_id)
        .context("no owner id configured; run `tryst init` or pass --owner")
}

/// Resolve a partner by alias or id, ownership-checked.
pub(crate) async fn resolve_partner(
    repo: &dyn PartnerRepository,
    owner_id: Uuid,
    key: &str,
) -> Result<Partner> {
    if let Ok(id) = Uuid::parse_str(key) {
        if let Some(partner) = repo.get_owned(id, owner_id).await? {
            return Ok(partner);
        }
    }
    repo.find_by_alias(owner_id, key)
        .await?
        .with_context(|| format!("no partner named {key:?}"))
}
