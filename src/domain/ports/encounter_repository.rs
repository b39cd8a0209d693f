use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::models::Encounter;

/// Repository trait for encounter storage.
///
/// Every read is scoped by `owner_id`, even where the write path already
/// guarantees ownership. List results come back newest-first with the
/// partner's display alias joined in.
#[async_trait]
pub trait EncounterRepository: Send + Sync {
    /// Insert a new encounter. The caller validates the record first.
    async fn insert(&self, encounter: &Encounter) -> DomainResult<()>;

    /// Fetch a single encounter owned by `owner_id`, or None.
    async fn get(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Encounter>>;

    /// All encounters for the owner, newest first.
    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Encounter>>;

    /// All encounters for one partner of the owner, newest first.
    async fn list_for_partner(
        &self,
        owner_id: Uuid,
        partner_id: Uuid,
    ) -> DomainResult<Vec<Encounter>>;
}
