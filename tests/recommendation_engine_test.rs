//! End-to-end engine tests over an in-memory SQLite store and a scripted
//! generative client: the five behavioral scenarios of the recommendation
//! contract.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use tryst::adapters::generative::MockGenerativeClient;
use tryst::adapters::sqlite::{
    create_migrated_test_pool, SqliteEncounterRepository, SqlitePartnerRepository,
};
use tryst::domain::models::config::GenerativeConfig;
use tryst::domain::models::{Encounter, Partner, Recommendation, Target};
use tryst::domain::ports::{EncounterRepository, GenerativeError, PartnerRepository};
use tryst::services::{heuristic, patterns, stats};
use tryst::{DomainError, GenerativeDelegate, RecommendationService};

struct Harness {
    service: RecommendationService,
    client: Arc<MockGenerativeClient>,
    encounters: SqliteEncounterRepository,
    partners: SqlitePartnerRepository,
    owner_id: Uuid,
}

async fn harness(client: MockGenerativeClient) -> Harness {
    let pool = create_migrated_test_pool().await.unwrap();
    let encounters = SqliteEncounterRepository::new(pool.clone());
    let partners = SqlitePartnerRepository::new(pool);
    let client = Arc::new(client);

    let delegate = GenerativeDelegate::new(client.clone(), &GenerativeConfig::default());
    let service = RecommendationService::new(
        Arc::new(encounters.clone()),
        Arc::new(partners.clone()),
        delegate,
    );

    Harness {
        service,
        client,
        encounters,
        partners,
        owner_id: Uuid::new_v4(),
    }
}

impl Harness {
    async fn add_partner(&self, alias: &str) -> Partner {
        let partner = Partner::new(self.owner_id, alias);
        self.partners.insert(&partner).await.unwrap();
        partner
    }

    async fn log(
        &self,
        partner: &Partner,
        days_ago: i64,
        rating: f64,
        location: &str,
        positions: &[&str],
    ) {
        let encounter = Encounter::new(
            self.owner_id,
            partner.id,
            Utc::now() - Duration::days(days_ago),
        )
        .with_rating(rating)
        .with_location(location)
        .with_positions(positions.iter().map(ToString::to_string).collect());
        self.encounters.insert(&encounter).await.unwrap();
    }

    /// The heuristic result for the same inputs the service saw.
    async fn expected_heuristic(&self, target: Target, now: DateTime<Utc>) -> Recommendation {
        let history = match target {
            Target::All => self.encounters.list_for_owner(self.owner_id).await.unwrap(),
            Target::Partner(id) => self
                .encounters
                .list_for_partner(self.owner_id, id)
                .await
                .unwrap(),
        };
        heuristic::compose(
            &stats::aggregate(&history),
            &patterns::extract(&history),
            &history,
            now,
        )
    }
}

// Scenario 1: zero history. First-encounter summary, now+3d, default
// scenario and tips.
#[tokio::test]
async fn scenario_1_zero_history_defaults() {
    let h = harness(MockGenerativeClient::unconfigured()).await;
    let now = Utc::now();

    let rec = h
        .service
        .recommend_at(h.owner_id, Target::All, None, now)
        .await
        .unwrap();

    assert!(rec.suggestion.summary.contains("first"));
    assert_eq!(rec.suggestion.next_date_suggestion, now + Duration::days(3));
    assert_eq!(rec.suggestion.scenario, tryst::services::playbook::scenario_for(None));
    assert_eq!(rec.suggestion.tips, tryst::services::playbook::tips_for(None));
    assert_eq!(rec.patterns.stats.count, 0);
    assert_eq!(rec.insights.len(), 1);
}

// Scenario 2: three Hotel records, Misionero twice / Perrito once, ratings
// 6, 8, 9 with the order pinned by occurrence date (newest first from the
// store: 8, 9, 6).
#[tokio::test]
async fn scenario_2_patterns_and_insights() {
    let h = harness(MockGenerativeClient::unconfigured()).await;
    let partner = h.add_partner("Alex").await;

    h.log(&partner, 3, 6.0, "Hotel", &["Misionero"]).await;
    h.log(&partner, 2, 9.0, "Hotel", &["Perrito"]).await;
    h.log(&partner, 1, 8.0, "Hotel", &["Misionero"]).await;

    let rec = h
        .service
        .recommend(h.owner_id, Target::Partner(partner.id), None)
        .await
        .unwrap();

    assert_eq!(rec.patterns.top_locations.len(), 1);
    assert_eq!(rec.patterns.top_locations[0].name, "Hotel");
    assert_eq!(rec.patterns.top_locations[0].count, 3);

    assert_eq!(rec.patterns.top_positions.len(), 2);
    assert_eq!(rec.patterns.top_positions[0].name, "Misionero");
    assert_eq!(rec.patterns.top_positions[0].count, 2);
    assert_eq!(rec.patterns.top_positions[1].name, "Perrito");
    assert_eq!(rec.patterns.top_positions[1].count, 1);

    assert!((rec.patterns.stats.avg_rating - 23.0 / 3.0).abs() < 0.01);

    // 7.67 > 7: the excellent branch, not the neutral one.
    assert!(rec.insights.iter().any(|i| i.contains("excellent")));
    // Newest record (rating 8.0) is the first >= 8 in store order.
    assert!(rec.insights.iter().any(|i| i.contains("rated 8.0/10")));
}

// Scenario 3: 30-day cadence that projects into the past must be clamped
// to now + 7 days.
#[tokio::test]
async fn scenario_3_stale_cadence_clamped() {
    let h = harness(MockGenerativeClient::unconfigured()).await;
    let partner = h.add_partner("Alex").await;

    for days_ago in [120, 90, 60, 30] {
        h.log(&partner, days_ago, 7.0, "Hotel", &["Misionero"]).await;
    }

    let now = Utc::now();
    let rec = h
        .service
        .recommend_at(h.owner_id, Target::Partner(partner.id), None, now)
        .await
        .unwrap();

    assert_eq!(rec.suggestion.next_date_suggestion, now + Duration::days(7));
    assert!(rec.suggestion.next_date_suggestion > now);
}

// Scenario 4: the external call fails outright; the result must be the
// heuristic result for the same inputs, byte for byte.
#[tokio::test]
async fn scenario_4_service_error_falls_back() {
    let client = MockGenerativeClient::new();
    client.push_error(GenerativeError::Service {
        status: 500,
        body: "overloaded".to_string(),
    });
    let h = harness(client).await;
    let partner = h.add_partner("Alex").await;
    h.log(&partner, 5, 8.0, "Motel", &["Perrito"]).await;

    let now = Utc::now();
    let rec = h
        .service
        .recommend_at(h.owner_id, Target::Partner(partner.id), None, now)
        .await
        .unwrap();

    let expected = h.expected_heuristic(Target::Partner(partner.id), now).await;
    assert_eq!(
        serde_json::to_string(&rec).unwrap(),
        serde_json::to_string(&expected).unwrap()
    );
}

// Scenario 5: the service responds, but with prose containing no JSON
// object. Identical fallback behavior.
#[tokio::test]
async fn scenario_5_braceless_response_falls_back() {
    let client = MockGenerativeClient::new();
    client.push_completion("I am terribly sorry, I cannot produce structured output today.");
    let h = harness(client).await;
    let partner = h.add_partner("Alex").await;
    h.log(&partner, 5, 8.0, "Motel", &["Perrito"]).await;

    let now = Utc::now();
    let rec = h
        .service
        .recommend_at(h.owner_id, Target::Partner(partner.id), None, now)
        .await
        .unwrap();

    let expected = h.expected_heuristic(Target::Partner(partner.id), now).await;
    assert_eq!(
        serde_json::to_string(&rec).unwrap(),
        serde_json::to_string(&expected).unwrap()
    );
}

// A well-formed generative response is returned verbatim, never merged
// with heuristic fields.
#[tokio::test]
async fn generative_success_returned_verbatim() {
    let client = MockGenerativeClient::new();
    let h = {
        // Script a response that is valid but obviously not the heuristic's.
        let now = Utc::now();
        let mut canned = heuristic::compose(
            &stats::aggregate(&[]),
            &patterns::extract(&[]),
            &[],
            now,
        );
        canned.suggestion.summary = "Delegated summary marker".to_string();
        client.push_completion(serde_json::to_string(&canned).unwrap());
        harness(client).await
    };

    let rec = h
        .service
        .recommend(h.owner_id, Target::All, None)
        .await
        .unwrap();

    assert_eq!(rec.suggestion.summary, "Delegated summary marker");
}

// Both strategies emit the same schema shape.
#[tokio::test]
async fn both_strategies_share_schema_shape() {
    let client = MockGenerativeClient::new();
    let now = Utc::now();
    let canned = heuristic::compose(&stats::aggregate(&[]), &patterns::extract(&[]), &[], now);
    client.push_completion(serde_json::to_string(&canned).unwrap());
    let h = harness(client).await;

    let generative = h
        .service
        .recommend(h.owner_id, Target::All, None)
        .await
        .unwrap();
    // Second call has no scripted response: heuristic path.
    let fallback = h
        .service
        .recommend(h.owner_id, Target::All, None)
        .await
        .unwrap();

    let a = serde_json::to_value(&generative).unwrap();
    let b = serde_json::to_value(&fallback).unwrap();
    let keys = |v: &serde_json::Value| {
        v.as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect::<Vec<_>>()
    };
    assert_eq!(keys(&a), keys(&b));
    assert_eq!(keys(&a["suggestion"]), keys(&b["suggestion"]));
    assert_eq!(keys(&a["patterns"]), keys(&b["patterns"]));
}

// Ownership: a partner the owner does not own is indistinguishable from a
// missing one.
#[tokio::test]
async fn unowned_partner_is_not_found() {
    let h = harness(MockGenerativeClient::unconfigured()).await;

    let stranger_partner = Partner::new(Uuid::new_v4(), "NotYours");
    h.partners.insert(&stranger_partner).await.unwrap();

    let err = h
        .service
        .recommend(h.owner_id, Target::Partner(stranger_partner.id), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PartnerNotFound(_)));

    let err = h
        .service
        .recommend(h.owner_id, Target::Partner(Uuid::new_v4()), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::PartnerNotFound(_)));
}

// The form context reaches the generative prompt but is never required.
#[tokio::test]
async fn form_context_enriches_prompt_only() {
    let client = MockGenerativeClient::new();
    let h = harness(client).await;

    let form = serde_json::json!({"mood": "celebratory"});
    let _ = h
        .service
        .recommend(h.owner_id, Target::All, Some(form))
        .await
        .unwrap();

    let prompt = h.client.last_request().unwrap().prompt;
    assert!(prompt.contains("celebratory"));
}
