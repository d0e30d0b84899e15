/// Committee lookups shared by messaging, resolutions and admin
use crate::error::{AppError, Result};
use crate::models::{Committee, Identity, Participant, Role};
use sqlx::PgPool;

pub struct CommitteeService {
    pool: PgPool,
}

impl CommitteeService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Committee the caller belongs to; admins have none
    pub async fn committee_for(&self, identity: &Identity) -> Result<Option<Committee>> {
        let sql = match identity.role {
            Role::Delegate => {
                r#"
                SELECT c.committee_id, c.name, c.abbreviation
                FROM delegations d
                JOIN committees c ON c.committee_id = d.committee_id
                WHERE d.delegate_id = $1
                "#
            }
            Role::Chair => {
                r#"
                SELECT c.committee_id, c.name, c.abbreviation
                FROM committee_chairs cc
                JOIN committees c ON c.committee_id = cc.committee_id
                WHERE cc.chair_id = $1
                "#
            }
            Role::Admin => return Ok(None),
        };

        let committee = sqlx::query_as::<_, Committee>(sql)
            .bind(&identity.id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(committee)
    }

    pub async fn require_committee(&self, identity: &Identity) -> Result<Committee> {
        self.committee_for(identity)
            .await?
            .ok_or_else(|| AppError::NotFound("User committee not found".into()))
    }

    /// Delegates then chairs of `committee_id`, excluding `exclude_id`
    pub async fn partners(&self, committee_id: &str, exclude_id: &str) -> Result<Vec<Participant>> {
        let rows = sqlx::query_as::<_, (String, String, String)>(
            r#"
            SELECT id, name, role FROM (
                SELECT d.delegate_id AS id,
                       d.firstname || ' ' || d.lastname AS name,
                       'delegate' AS role,
                       0 AS rank
                FROM delegations dn
                JOIN delegates d ON d.delegate_id = dn.delegate_id
                WHERE dn.committee_id = $1 AND d.delegate_id <> $2
                UNION ALL
                SELECT ch.chair_id,
                       ch.firstname || ' ' || ch.lastname,
                       'chair',
                       1
                FROM committee_chairs cc
                JOIN chairs ch ON ch.chair_id = cc.chair_id
                WHERE cc.committee_id = $1 AND ch.chair_id <> $2
            ) members
            ORDER BY rank, name
            "#,
        )
        .bind(committee_id)
        .bind(exclude_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|(id, name, role)| {
                Ok(Participant {
                    id,
                    name,
                    role: role.parse()?,
                })
            })
            .collect()
    }

    pub async fn delegate_in_committee(&self, delegate_id: &str, committee_id: &str) -> Result<bool> {
        let found: Option<(String,)> = sqlx::query_as(
            "SELECT delegate_id FROM delegations WHERE delegate_id = $1 AND committee_id = $2",
        )
        .bind(delegate_id)
        .bind(committee_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(found.is_some())
    }

    pub async fn list(&self) -> Result<Vec<Committee>> {
        let committees = sqlx::query_as::<_, Committee>(
            "SELECT committee_id, name, abbreviation FROM committees ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(committees)
    }

    pub async fn exists(&self, committee_id: &str) -> Result<bool> {
        let found: Option<(String,)> =
            sqlx::query_as("SELECT committee_id FROM committees WHERE committee_id = $1")
                .bind(committee_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(found.is_some())
    }
}
