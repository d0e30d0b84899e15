/// Speech service - personal speech repository with tags
use crate::error::{AppError, Result};
use crate::metrics::SPEECHES_SAVED_TOTAL;
use crate::models::{next_speech_id, Identity, Role, SaveSpeechRequest, Speech};
use sqlx::{PgPool, Postgres, Transaction};

/// Ownership link table and owner column for a role
fn owner_link(role: Role) -> Option<(&'static str, &'static str)> {
    match role {
        Role::Delegate => Some(("delegate_speeches", "delegate_id")),
        Role::Chair => Some(("chair_speeches", "chair_id")),
        Role::Admin => None,
    }
}

pub struct SpeechService {
    pool: PgPool,
}

impl SpeechService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The caller's speeches, newest first
    pub async fn list(&self, identity: &Identity) -> Result<Vec<Speech>> {
        let Some((link, owner)) = owner_link(identity.role) else {
            return Ok(Vec::new());
        };

        let speeches = sqlx::query_as::<_, Speech>(&format!(
            r#"
            SELECT s.speech_id, s.title, s.content, s.date,
                   COALESCE(array_agg(t.tag ORDER BY t.tag) FILTER (WHERE t.tag IS NOT NULL),
                            ARRAY[]::TEXT[]) AS tags
            FROM speeches s
            JOIN {link} l ON l.speech_id = s.speech_id
            LEFT JOIN speech_tags t ON t.speech_id = s.speech_id
            WHERE l.{owner} = $1
            GROUP BY s.speech_id
            ORDER BY s.date DESC
            "#
        ))
        .bind(&identity.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(speeches)
    }

    async fn replace_tags(
        tx: &mut Transaction<'_, Postgres>,
        speech_id: &str,
        tags: &[String],
    ) -> Result<()> {
        sqlx::query("DELETE FROM speech_tags WHERE speech_id = $1")
            .bind(speech_id)
            .execute(&mut **tx)
            .await?;

        if !tags.is_empty() {
            sqlx::query(
                "INSERT INTO speech_tags (speech_id, tag) SELECT $1, UNNEST($2::TEXT[])",
            )
            .bind(speech_id)
            .bind(tags)
            .execute(&mut **tx)
            .await?;
        }

        Ok(())
    }

    /// Store a new speech under the next sequential id and link it to the caller
    pub async fn create(&self, identity: &Identity, req: &SaveSpeechRequest) -> Result<Speech> {
        let (link, owner) = owner_link(identity.role).ok_or_else(|| {
            AppError::Forbidden("Only delegates and chairs can save speeches".into())
        })?;
        req.check()?;
        let tags = req.normalized_tags();

        let mut tx = self.pool.begin().await?;

        // Serialize id allocation between concurrent creates
        sqlx::query("LOCK TABLE speeches IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let ids: Vec<(String,)> = sqlx::query_as("SELECT speech_id FROM speeches")
            .fetch_all(&mut *tx)
            .await?;
        let speech_id = next_speech_id(ids.iter().map(|(id,)| id.as_str()))?;

        let (date,): (chrono::DateTime<chrono::Utc>,) = sqlx::query_as(
            "INSERT INTO speeches (speech_id, title, content, date) VALUES ($1, $2, $3, NOW()) RETURNING date",
        )
        .bind(&speech_id)
        .bind(req.title.trim())
        .bind(&req.content)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(&format!(
            "INSERT INTO {link} (speech_id, {owner}) VALUES ($1, $2)"
        ))
        .bind(&speech_id)
        .bind(&identity.id)
        .execute(&mut *tx)
        .await?;

        Self::replace_tags(&mut tx, &speech_id, &tags).await?;
        tx.commit().await?;

        SPEECHES_SAVED_TOTAL.with_label_values(&["created"]).inc();
        tracing::info!(%speech_id, owner = %identity.id, "speech created");

        Ok(Speech {
            speech_id,
            title: req.title.trim().to_string(),
            content: req.content.clone(),
            date,
            tags,
        })
    }

    /// Overwrite title, content and tags of one of the caller's speeches
    pub async fn update(
        &self,
        identity: &Identity,
        speech_id: &str,
        req: &SaveSpeechRequest,
    ) -> Result<Speech> {
        let (link, owner) = owner_link(identity.role).ok_or_else(|| {
            AppError::Forbidden("Only delegates and chairs can save speeches".into())
        })?;
        req.check()?;
        let tags = req.normalized_tags();

        let owned: Option<(String,)> = sqlx::query_as(&format!(
            "SELECT speech_id FROM {link} WHERE speech_id = $1 AND {owner} = $2"
        ))
        .bind(speech_id)
        .bind(&identity.id)
        .fetch_optional(&self.pool)
        .await?;

        if owned.is_none() {
            let exists: Option<(String,)> =
                sqlx::query_as("SELECT speech_id FROM speeches WHERE speech_id = $1")
                    .bind(speech_id)
                    .fetch_optional(&self.pool)
                    .await?;
            return Err(match exists {
                Some(_) => AppError::Forbidden("You can only edit your own speeches".into()),
                None => AppError::NotFound("Speech not found".into()),
            });
        }

        let mut tx = self.pool.begin().await?;

        let (date,): (chrono::DateTime<chrono::Utc>,) = sqlx::query_as(
            "UPDATE speeches SET title = $2, content = $3, date = NOW() WHERE speech_id = $1 RETURNING date",
        )
        .bind(speech_id)
        .bind(req.title.trim())
        .bind(&req.content)
        .fetch_one(&mut *tx)
        .await?;

        Self::replace_tags(&mut tx, speech_id, &tags).await?;
        tx.commit().await?;

        SPEECHES_SAVED_TOTAL.with_label_values(&["updated"]).inc();
        tracing::info!(%speech_id, owner = %identity.id, "speech updated");

        Ok(Speech {
            speech_id: speech_id.to_string(),
            title: req.title.trim().to_string(),
            content: req.content.clone(),
            date,
            tags,
        })
    }
}
