use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Partner;

/// Repository trait for partner storage.
#[async_trait]
pub trait PartnerRepository: Send + Sync {
    /// Insert a new partner.
    ///
    /// # Errors
    /// Returns `DomainError::DuplicateAlias` if the owner already has a
    /// partner with the same alias.
    async fn insert(&self, partner: &Partner) -> DomainResult<()>;

    /// Fetch a partner by id, only if owned by `owner_id`.
    async fn get_owned(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Partner>>;

    /// Look a partner up by its per-owner alias (exact match).
    async fn find_by_alias(&self, owner_id: Uuid, alias: &str) -> DomainResult<Option<Partner>>;

    /// All partners registered by the owner, oldest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Partner>>;
}
