//! SQLite implementation of the PartnerRepository.

use async_trait::async_trait;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Partner;
use crate::domain::ports::PartnerRepository;

#[derive(Clone)]
pub struct SqlitePartnerRepository {
    pool: SqlitePool,
}

impl SqlitePartnerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PartnerRepository for SqlitePartnerRepository {
    async fn insert(&self, partner: &Partner) -> DomainResult<()> {
        let result = sqlx::query(
            r#"INSERT INTO partners (id, owner_id, alias, physique, face, age, registered_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(partner.id.to_string())
        .bind(partner.owner_id.to_string())
        .bind(&partner.alias)
        .bind(&partner.physique)
        .bind(&partner.face)
        .bind(partner.age)
        .bind(partner.registered_at.to_rfc3339())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(DomainError::DuplicateAlias(partner.alias.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn get_owned(&self, id: Uuid, owner_id: Uuid) -> DomainResult<Option<Partner>> {
        let row: Option<PartnerRow> =
            sqlx::query_as("SELECT * FROM partners WHERE id = ? AND owner_id = ?")
                .bind(id.to_string())
                .bind(owner_id.to_string())
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn find_by_alias(&self, owner_id: Uuid, alias: &str) -> DomainResult<Option<Partner>> {
        let row: Option<PartnerRow> =
            sqlx::query_as("SELECT * FROM partners WHERE owner_id = ? AND alias = ?")
                .bind(owner_id.to_string())
                .bind(alias)
                .fetch_optional(&self.pool)
                .await?;

        row.map(TryInto::try_into).transpose()
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Partner>> {
        let rows: Vec<PartnerRow> =
            sqlx::query_as("SELECT * FROM partners WHERE owner_id = ? ORDER BY registered_at ASC")
                .bind(owner_id.to_string())
                .fetch_all(&self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }
}

#[derive(sqlx::FromRow)]
struct PartnerRow {
    id: String,
    owner_id: String,
    alias: String,
    physique: Option<String>,
    face: Option<String>,
    age: Option<i64>,
    registered_at: String,
}

impl TryFrom<PartnerRow> for Partner {
    type Error = DomainError;

    fn try_from(row: PartnerRow) -> Result<Self, Self::Error> {
        Ok(Partner {
            id: super::parse_uuid(&row.id)?,
            owner_id: super::parse_uuid(&row.owner_id)?,
            alias: row.alias,
            physique: row.physique,
            face: row.face,
            age: row.age,
            registered_at: super::parse_datetime(&row.registered_at)?,
        })
    }
}
