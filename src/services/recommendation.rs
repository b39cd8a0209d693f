//! Strategy selector: the engine's entry point.
//!
//! Resolves the target record set, computes the aggregates once, tries the
//! generative delegate, and falls back to the heuristic composer on any
//! delegate failure. The result is returned verbatim from whichever
//! strategy produced it; fields are never merged across strategies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Partner, Recommendation, Target};
use crate::domain::ports::{EncounterRepository, PartnerRepository};
use crate::services::delegate::{DelegateContext, DelegateOutcome, GenerativeDelegate};
use crate::services::{heuristic, patterns, stats};

pub struct RecommendationService {
    encounters: Arc<dyn EncounterRepository>,
    partners: Arc<dyn PartnerRepository>,
    delegate: GenerativeDelegate,
}

impl RecommendationService {
    pub fn new(
        encounters: Arc<dyn EncounterRepository>,
        partners: Arc<dyn PartnerRepository>,
        delegate: GenerativeDelegate,
    ) -> Self {
        Self {
            encounters,
            partners,
            delegate,
        }
    }

    /// Produce a recommendation for the target record set.
    ///
    /// # Errors
    /// `DomainError::PartnerNotFound` when the target names a partner the
    /// owner does not own. Delegate failures are not errors; they fall
    /// back to the heuristic.
    pub async fn recommend(
        &self,
        owner_id: Uuid,
        target: Target,
        form: Option<serde_json::Value>,
    ) -> DomainResult<Recommendation> {
        self.recommend_at(owner_id, target, form, Utc::now()).await
    }

    /// Like [`recommend`](Self::recommend), with an explicit `now` so the
    /// heuristic path stays reproducible under test.
    pub async fn recommend_at(
        &self,
        owner_id: Uuid,
        target: Target,
        form: Option<serde_json::Value>,
        now: DateTime<Utc>,
    ) -> DomainResult<Recommendation> {
        let (partner, history) = self.resolve_target(owner_id, target).await?;

        let aggregated = stats::aggregate(&history);
        let extracted = patterns::extract(&history);

        let context = DelegateContext {
            partner: partner.as_ref(),
            stats: &aggregated,
            patterns: &extracted,
            history: &history,
            form: form.as_ref(),
        };

        match self.delegate.generate(&context).await {
            DelegateOutcome::Success(recommendation) => {
                info!(count = aggregated.count, "generative recommendation produced");
                Ok(recommendation)
            }
            DelegateOutcome::Unavailable(reason) => {
                warn!(%reason, "generative service unavailable, composing heuristically");
                Ok(heuristic::compose(&aggregated, &extracted, &history, now))
            }
            DelegateOutcome::Malformed(reason) => {
                warn!(%reason, "generative response malformed, composing heuristically");
                Ok(heuristic::compose(&aggregated, &extracted, &history, now))
            }
        }
    }

    async fn resolve_target(
        &self,
        owner_id: Uuid,
        target: Target,
    ) -> DomainResult<(Option<Partner>, Vec<crate::domain::models::Encounter>)> {
        match target {
            Target::All => {
                let history = self.encounters.list_for_owner(owner_id).await?;
                Ok((None, history))
            }
            Target::Partner(partner_id) => {
                let partner = self
                    .partners
                    .get_owned(partner_id, owner_id)
                    .await?
                    .ok_or(DomainError::PartnerNotFound(partner_id))?;
                let history = self
                    .encounters
                    .list_for_partner(owner_id, partner_id)
                    .await?;
                Ok((Some(partner), history))
            }
        }
    }
}
