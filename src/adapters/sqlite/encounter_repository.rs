//! SQLite implementation of the EncounterRepository.
//!
//! The positions tag list is stored as a single comma-delimited column.
//! Splitting and joining happen only here; the domain model always carries
//! a proper `Vec<String>`.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{Encounter, ScoreSet};
use crate::domain::ports::EncounterRepository;

const POSITIONS_DELIMITER: char = ',';

/// Join a tag list into the delimited storage form.
fn join_positions(positions: &[String]) -> Option<String> {
    if positions.is_empty() {
        return None;
    }
    Some(positions.join(", "))
}

/// Split the delimited storage form back into a tag list, trimming each
/// token and dropping empties.
fn split_positions(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(POSITIONS_DELIMITER)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(ToString::to_string)
            .collect()
    })
    .unwrap_or_default()
}

#[derive(Clone)]
pub struct SqliteEncounterRepository {
    pool: SqlitePool,
}

impl SqliteEncounterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const SELECT_WITH_ALIAS: &str = r#"SELECT e.*, p.alias AS partner_alias
   FROM encounters e
   JOIN partners p ON e.partner_id = p.id"#;

#[async_trait]
impl EncounterRepository for SqliteEncounterRepository {
    async fn insert(&self, encounter: &Encounter) -> DomainResult<()> {
        sqlx::query(
            r#"INSERT INTO encounters (
                   id, owner_id, partner_id, occurred_at, duration_minutes,
                   location, positions, outcome, attire,
                   intensity_score, exposure_score, immersion_score,
                   oral_given_score, oral_received_score, rating, notes
               )
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(encounter.id.to_string())
        .bind(encounter.owner_id.to_string())
        .bind(encounter.partner_id.to_string())
        .bind(encounter.occurred_at.to_rfc3339())
        .bind(encounter.duration_minutes)
        .bind(&encounter.location)
        .bind(join_positions(&encounter.positions))
        .bind(&encounter.outcome)
        .bind(&encounter.attire)
        .bind(i64::from(encounter.scores.intensity))
        .bind(i64::from(encounter.scores.exposure))
        .bind(i64::from(encounter.scores.immersion))
        .bind(i64::from(encounter.scores.oral_given))
        .bind(i64::from(encounter.scores.oral_received))
        .bind(encounter.rating)
        .bind(&encounter.notes)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Encounter>> {
        let sql = format!("{SELECT_WITH_ALIAS} WHERE e.id = ? AND e.owner_id = ?");
        let row: Option<EncounterRow> = sqlx::query_as(&sql)
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Encounter>> {
        let sql = format!("{SELECT_WITH_ALIAS} WHERE e.owner_id = ? ORDER BY e.occurred_at DESC");
        let rows: Vec<EncounterRow> = sqlx::query_as(&sql)
            .bind(owner_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn list_for_partner(
        &self,
        owner_id: Uuid,
        partner_id: Uuid,
    ) -> DomainResult<Vec<Encounter>> {
        let sql = format!(
            "{SELECT_WITH_ALIAS} WHERE e.owner_id = ? AND e.partner_id = ? ORDER BY e.occurred_at DESC"
        );
        let rows: Vec<EncounterRow> = sqlx::query_as(&sql)
            .bind(owner_id.to_string())
            .bind(partner_id.to_string())
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct EncounterRow {
    id: String,
    owner_id: String,
    partner_id: String,
    partner_alias: Option<String>,
    occurred_at: String,
    duration_minutes: i64,
    location: Option<String>,
    positions: Option<String>,
    outcome: Option<String>,
    attire: Option<String>,
    intensity_score: i64,
    exposure_score: i64,
    immersion_score: i64,
    oral_given_score: i64,
    oral_received_score: i64,
    rating: f64,
    notes: Option<String>,
}

fn score_from_column(name: &str, value: i64) -> DomainResult<u8> {
    u8::try_from(value)
        .map_err(|_| DomainError::SerializationError(format!("{name} out of range: {value}")))
}

impl TryFrom<EncounterRow> for Encounter {
    type Error = DomainError;

    fn try_from(row: EncounterRow) -> Result<Self, Self::Error> {
        Ok(Encounter {
            id: super::parse_uuid(&row.id)?,
            owner_id: super::parse_uuid(&row.owner_id)?,
            partner_id: super::parse_uuid(&row.partner_id)?,
            partner_alias: row.partner_alias,
            occurred_at: super::parse_datetime(&row.occurred_at)?,
            duration_minutes: row.duration_minutes,
            location: row.location,
            positions: split_positions(row.positions.as_deref()),
            outcome: row.outcome,
            attire: row.attire,
            scores: ScoreSet {
                intensity: score_from_column("intensity_score", row.intensity_score)?,
                exposure: score_from_column("exposure_score", row.exposure_score)?,
                immersion: score_from_column("immersion_score", row.immersion_score)?,
                oral_given: score_from_column("oral_given_score", row.oral_given_score)?,
                oral_received: score_from_column("oral_received_score", row.oral_received_score)?,
            },
            rating: row.rating,
            notes: row.notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::create_migrated_test_pool;
    use crate::domain::models::Partner;
    use crate::domain::ports::PartnerRepository;
    use chrono::{Duration, Utc};

    async fn setup() -> (SqliteEncounterRepository, Uuid, Uuid) {
        let pool = create_migrated_test_pool().await.unwrap();
        let owner = Uuid::new_v4();
        let partner = Partner::new(owner, "Alex");
        crate::adapters::sqlite::SqlitePartnerRepository::new(pool.clone())
            .insert(&partner)
            .await
            .unwrap();
        (SqliteEncounterRepository::new(pool), owner, partner.id)
    }

    #[test]
    fn test_split_positions_trims_tokens() {
        assert_eq!(
            split_positions(Some("Misionero, Perrito ,  Cowgirl")),
            vec!["Misionero", "Perrito", "Cowgirl"]
        );
        assert!(split_positions(Some(" , ,")).is_empty());
        assert!(split_positions(None).is_empty());
    }

    #[test]
    fn test_join_positions_empty_is_null() {
        assert_eq!(join_positions(&[]), None);
        assert_eq!(
            join_positions(&["A".to_string(), "B".to_string()]).as_deref(),
            Some("A, B")
        );
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trips_positions() {
        let (repo, owner, partner_id) = setup().await;

        let encounter = Encounter::new(owner, partner_id, Utc::now())
            .with_location("Hotel")
            .with_positions(vec!["Misionero".to_string(), "Perrito".to_string()])
            .with_rating(8.0);
        repo.insert(&encounter).await.unwrap();

        let fetched = repo.get(encounter.id, owner).await.unwrap().unwrap();
        assert_eq!(fetched.positions, vec!["Misionero", "Perrito"]);
        assert_eq!(fetched.location.as_deref(), Some("Hotel"));
        assert_eq!(fetched.partner_alias.as_deref(), Some("Alex"));
    }

    #[tokio::test]
    async fn test_list_for_owner_newest_first() {
        let (repo, owner, partner_id) = setup().await;
        let now = Utc::now();

        for days_ago in [10, 2, 5] {
            let e = Encounter::new(owner, partner_id, now - Duration::days(days_ago));
            repo.insert(&e).await.unwrap();
        }

        let listed = repo.list_for_owner(owner).await.unwrap();
        assert_eq!(listed.len(), 3);
        assert!(listed[0].occurred_at > listed[1].occurred_at);
        assert!(listed[1].occurred_at > listed[2].occurred_at);
    }

    #[tokio::test]
    async fn test_reads_are_owner_scoped() {
        let (repo, owner, partner_id) = setup().await;

        let encounter = Encounter::new(owner, partner_id, Utc::now());
        repo.insert(&encounter).await.unwrap();

        let stranger = Uuid::new_v4();
        assert!(repo.get(encounter.id, stranger).await.unwrap().is_none());
        assert!(repo.list_for_owner(stranger).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_for_partner_filters() {
        let (repo, owner, partner_id) = setup().await;
        let pool = repo.pool.clone();

        let other = Partner::new(owner, "Sam");
        crate::adapters::sqlite::SqlitePartnerRepository::new(pool)
            .insert(&other)
            .await
            .unwrap();

        repo.insert(&Encounter::new(owner, partner_id, Utc::now()))
            .await
            .unwrap();
        repo.insert(&Encounter::new(owner, other.id, Utc::now()))
            .await
            .unwrap();

        let listed = repo.list_for_partner(owner, partner_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].partner_id, partner_id);
    }
}
