/// Resolution service - listing, saving, and chair-managed edit permissions
use crate::error::{AppError, Result};
use crate::metrics::RESOS_SAVED_TOTAL;
use crate::models::{
    authorize_reso_write, DelegateWithPerms, EditorToggleResponse, Identity, Reso, ResoPerms,
    ResoTarget, Role, SaveResoRequest,
};
use crate::services::{AccountService, CommitteeService};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const MANAGE_FORBIDDEN: &str = "Only delegates and chairs can manage resolutions";
const CHAIR_ONLY: &str = "Only chairs can manage delegate permissions";
const RESO_COLUMNS: &str =
    "reso_id, title, content, delegate_id, committee_id, created_at, updated_at";

pub struct ResoService {
    pool: PgPool,
    committees: CommitteeService,
    accounts: AccountService,
}

/// Outcome of a save
#[derive(Debug)]
pub struct SavedReso {
    pub reso: Reso,
    pub created: bool,
}

impl ResoService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            committees: CommitteeService::new(pool.clone()),
            accounts: AccountService::new(pool.clone()),
            pool,
        }
    }

    /// Resolutions visible to the caller
    pub async fn list(&self, identity: &Identity) -> Result<Vec<Reso>> {
        let see_committee = match identity.role {
            Role::Admin => return Err(AppError::Forbidden(MANAGE_FORBIDDEN.into())),
            Role::Chair => true,
            Role::Delegate => {
                let perms = self.accounts.reso_perms(&identity.id).await?;
                perms.require_access()?;
                perms.view_all
            }
        };

        let resos = if see_committee {
            let committee = self.committees.require_committee(identity).await?;
            sqlx::query_as::<_, Reso>(&format!(
                "SELECT {RESO_COLUMNS} FROM resos WHERE committee_id = $1 ORDER BY updated_at DESC"
            ))
            .bind(&committee.committee_id)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Reso>(&format!(
                "SELECT {RESO_COLUMNS} FROM resos WHERE delegate_id = $1 ORDER BY updated_at DESC"
            ))
            .bind(&identity.id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(resos)
    }

    async fn find_target(&self, reso_id: &str) -> Result<(ResoTarget, String)> {
        let row: Option<(String, String, String)> = sqlx::query_as(
            "SELECT reso_id, delegate_id, committee_id FROM resos WHERE reso_id = $1",
        )
        .bind(reso_id)
        .fetch_optional(&self.pool)
        .await?;

        let (reso_id, delegate_id, committee_id) =
            row.ok_or_else(|| AppError::NotFound("Resolution not found".into()))?;

        Ok((
            ResoTarget {
                reso_id,
                delegate_id,
            },
            committee_id,
        ))
    }

    /// Create or update a resolution after checking the caller's current permissions
    pub async fn save(&self, identity: &Identity, req: &SaveResoRequest) -> Result<SavedReso> {
        if identity.is_admin() {
            return Err(AppError::Forbidden(MANAGE_FORBIDDEN.into()));
        }

        let target = match req.reso_id.as_deref().filter(|id| !id.is_empty()) {
            Some(id) => Some(self.find_target(id).await?),
            None => None,
        };

        let (perms, owned) = if identity.role == Role::Delegate {
            let perms = self.accounts.reso_perms(&identity.id).await?;
            perms.require_access()?;
            let (owned,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM resos WHERE delegate_id = $1")
                    .bind(&identity.id)
                    .fetch_one(&self.pool)
                    .await?;
            (Some(perms), owned)
        } else {
            (None, 0)
        };

        authorize_reso_write(
            identity,
            perms.as_ref(),
            target.as_ref().map(|(t, _)| t),
            &req.title,
            &req.content,
            owned,
        )?;

        match target {
            Some((target, committee_id)) => {
                if identity.role == Role::Chair {
                    let committee = self.committees.require_committee(identity).await?;
                    if committee.committee_id != committee_id {
                        return Err(AppError::Forbidden(
                            "You can only manage resolutions in your committee".into(),
                        ));
                    }
                }

                let reso = sqlx::query_as::<_, Reso>(&format!(
                    r#"
                    UPDATE resos SET title = $2, content = $3, updated_at = NOW()
                    WHERE reso_id = $1
                    RETURNING {RESO_COLUMNS}
                    "#
                ))
                .bind(&target.reso_id)
                .bind(req.title.trim())
                .bind(&req.content)
                .fetch_one(&self.pool)
                .await?;

                RESOS_SAVED_TOTAL.with_label_values(&["updated"]).inc();
                tracing::info!(reso_id = %reso.reso_id, editor = %identity.id, "resolution updated");
                Ok(SavedReso {
                    reso,
                    created: false,
                })
            }
            None => {
                let committee = self.committees.require_committee(identity).await?;
                let reso = sqlx::query_as::<_, Reso>(&format!(
                    r#"
                    INSERT INTO resos (reso_id, title, content, delegate_id, committee_id)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING {RESO_COLUMNS}
                    "#
                ))
                .bind(Uuid::new_v4().to_string())
                .bind(req.title.trim())
                .bind(&req.content)
                .bind(&identity.id)
                .bind(&committee.committee_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| match AppError::from(e) {
                    // unique index on delegate_id: a concurrent first post won
                    AppError::Conflict(_) => AppError::Conflict(
                        "You can only post one resolution as a delegate.".into(),
                    ),
                    other => other,
                })?;

                RESOS_SAVED_TOTAL.with_label_values(&["created"]).inc();
                tracing::info!(reso_id = %reso.reso_id, owner = %identity.id, "resolution posted");
                Ok(SavedReso {
                    reso,
                    created: true,
                })
            }
        }
    }

    /// Delegates of the chair's committee with their permissions
    pub async fn committee_delegates(&self, identity: &Identity) -> Result<Vec<DelegateWithPerms>> {
        identity.require_role(&[Role::Chair], CHAIR_ONLY)?;
        let committee = self.committees.require_committee(identity).await?;

        let delegates = sqlx::query_as::<_, DelegateWithPerms>(
            r#"
            SELECT d.delegate_id, d.firstname, d.lastname, d.country, d.reso_perms
            FROM delegations dn
            JOIN delegates d ON d.delegate_id = dn.delegate_id
            WHERE dn.committee_id = $1
            ORDER BY d.lastname, d.firstname
            "#,
        )
        .bind(&committee.committee_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(delegates)
    }

    async fn chair_committee_delegate(&self, identity: &Identity, delegate_id: &str) -> Result<String> {
        identity.require_role(&[Role::Chair], CHAIR_ONLY)?;
        let committee = self.committees.require_committee(identity).await?;
        if !self
            .committees
            .delegate_in_committee(delegate_id, &committee.committee_id)
            .await?
        {
            return Err(AppError::NotFound("Delegate not found in your committee".into()));
        }
        Ok(committee.committee_id)
    }

    /// Grant or revoke `delegate_id`'s right to edit `reso_id`
    pub async fn toggle_editor(
        &self,
        identity: &Identity,
        reso_id: &str,
        delegate_id: &str,
    ) -> Result<EditorToggleResponse> {
        let committee_id = self.chair_committee_delegate(identity, delegate_id).await?;
        let (_, reso_committee) = self.find_target(reso_id).await?;
        if reso_committee != committee_id {
            return Err(AppError::Forbidden(
                "You can only manage resolutions in your committee".into(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        let (firstname, Json(mut perms)): (String, Json<ResoPerms>) = sqlx::query_as(
            "SELECT firstname, reso_perms FROM delegates WHERE delegate_id = $1 FOR UPDATE",
        )
        .bind(delegate_id)
        .fetch_one(&mut *tx)
        .await?;

        let granted = perms.toggle_editor(reso_id);

        sqlx::query("UPDATE delegates SET reso_perms = $2 WHERE delegate_id = $1")
            .bind(delegate_id)
            .bind(Json(&perms))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(%reso_id, %delegate_id, granted, chair = %identity.id, "resolution editor toggled");

        let message = if granted {
            format!("Permission granted to {firstname}")
        } else {
            format!("Permission removed from {firstname}")
        };

        Ok(EditorToggleResponse {
            granted,
            message,
            reso_perms: perms,
        })
    }

    /// Replace a committee delegate's permissions
    pub async fn set_perms(
        &self,
        identity: &Identity,
        delegate_id: &str,
        perms: &ResoPerms,
    ) -> Result<DelegateWithPerms> {
        self.chair_committee_delegate(identity, delegate_id).await?;

        let delegate = sqlx::query_as::<_, DelegateWithPerms>(
            r#"
            UPDATE delegates SET reso_perms = $2
            WHERE delegate_id = $1
            RETURNING delegate_id, firstname, lastname, country, reso_perms
            "#,
        )
        .bind(delegate_id)
        .bind(Json(perms))
        .fetch_one(&self.pool)
        .await?;

        tracing::info!(%delegate_id, chair = %identity.id, "delegate permissions replaced");
        Ok(delegate)
    }
}
