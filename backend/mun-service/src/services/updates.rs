/// Update service - live crisis bulletins
use crate::error::{AppError, Result};
use crate::models::{CreateUpdateRequest, Identity, Role, Update};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

pub struct UpdateService {
    pool: PgPool,
}

impl UpdateService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// All bulletins, newest first
    pub async fn list(&self) -> Result<Vec<Update>> {
        let updates = sqlx::query_as::<_, Update>(
            "SELECT update_id, title, content, time, href FROM updates ORDER BY time DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        for update in updates.iter().filter(|u| u.href.is_none()) {
            tracing::warn!(update_id = %update.update_id, "update has no image link");
        }

        Ok(updates)
    }

    pub async fn create(&self, identity: &Identity, req: &CreateUpdateRequest) -> Result<Update> {
        identity.require_role(
            &[Role::Admin, Role::Chair],
            "Only chairs and administrators can post updates",
        )?;
        req.validate()?;

        let title = req.title.trim();
        let content = req.content.trim();
        if title.is_empty() || content.is_empty() {
            return Err(AppError::BadRequest(
                "Updates need a title and content".into(),
            ));
        }

        let update = sqlx::query_as::<_, Update>(
            r#"
            INSERT INTO updates (update_id, title, content, time, href)
            VALUES ($1, $2, $3, NOW(), $4)
            RETURNING update_id, title, content, time, href
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(content)
        .bind(req.href.as_deref().map(str::trim).filter(|h| !h.is_empty()))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(update_id = %update.update_id, author = %identity.id, "update posted");
        Ok(update)
    }

    pub async fn delete(&self, identity: &Identity, update_id: Uuid) -> Result<()> {
        identity.require_role(&[Role::Admin], "Only administrators can delete updates")?;

        let result = sqlx::query("DELETE FROM updates WHERE update_id = $1")
            .bind(update_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Update not found".into()));
        }

        tracing::info!(%update_id, "update deleted");
        Ok(())
    }
}
