/// Account service - login lookups, delegate permissions, admin-created accounts
use crate::error::{AppError, Result};
use crate::models::{
    AccountCredentials, CreateAccountRequest, CreatedAccount, Identity, ResoPerms, Role,
};
use crate::security::{hash_password, verify_password};
use crate::services::CommitteeService;
use sqlx::types::Json;
use sqlx::PgPool;

const INVALID_CREDENTIALS: &str = "Invalid email or password";

pub struct AccountService {
    pool: PgPool,
}

impl AccountService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an account by email, searching delegates, then chairs, then admins
    pub async fn find_by_email(&self, email: &str) -> Result<Option<(Role, AccountCredentials)>> {
        let lookups = [
            (
                Role::Delegate,
                "SELECT delegate_id AS id, firstname, lastname, password_hash FROM delegates WHERE lower(email) = lower($1)",
            ),
            (
                Role::Chair,
                "SELECT chair_id AS id, firstname, lastname, password_hash FROM chairs WHERE lower(email) = lower($1)",
            ),
            (
                Role::Admin,
                "SELECT admin_id AS id, firstname, lastname, password_hash FROM admins WHERE lower(email) = lower($1)",
            ),
        ];

        for (role, sql) in lookups {
            let account = sqlx::query_as::<_, AccountCredentials>(sql)
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
            if let Some(account) = account {
                return Ok(Some((role, account)));
            }
        }

        Ok(None)
    }

    /// Check credentials. Unknown email and wrong password fail identically.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<Identity> {
        let Some((role, account)) = self.find_by_email(email.trim()).await? else {
            tracing::info!("login rejected: unknown email");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        };

        if !verify_password(password, &account.password_hash)? {
            tracing::info!(account_id = %account.id, "login rejected: wrong password");
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()));
        }

        Ok(Identity {
            name: account.display_name(),
            id: account.id,
            role,
        })
    }

    pub async fn reso_perms(&self, delegate_id: &str) -> Result<ResoPerms> {
        let row: Option<(Json<ResoPerms>,)> =
            sqlx::query_as("SELECT reso_perms FROM delegates WHERE delegate_id = $1")
                .bind(delegate_id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(perms,)| perms.0)
            .ok_or_else(|| AppError::NotFound("Delegate not found".into()))
    }

    pub async fn id_taken(&self, id: &str) -> Result<bool> {
        let (taken,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM delegates WHERE delegate_id = $1
                UNION ALL
                SELECT 1 FROM chairs WHERE chair_id = $1
                UNION ALL
                SELECT 1 FROM admins WHERE admin_id = $1
            )
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    /// Create a delegate or chair and assign them to a committee
    pub async fn create_account(&self, req: &CreateAccountRequest) -> Result<CreatedAccount> {
        if !CommitteeService::new(self.pool.clone())
            .exists(&req.committee_id)
            .await?
        {
            return Err(AppError::NotFound("Committee not found".into()));
        }

        if self.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::Conflict("Email already in use".into()));
        }

        // Conversation keys assume one participant per id across all roles
        if self.id_taken(&req.id).await? {
            return Err(AppError::Conflict("Account id already in use".into()));
        }

        let password_hash = hash_password(&req.password)?;
        let mut tx = self.pool.begin().await?;

        match req.role {
            Role::Delegate => {
                sqlx::query(
                    r#"
                    INSERT INTO delegates (delegate_id, firstname, lastname, email, country, password_hash, reso_perms)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(&req.id)
                .bind(&req.firstname)
                .bind(&req.lastname)
                .bind(&req.email)
                .bind(req.country.as_deref().unwrap_or(""))
                .bind(&password_hash)
                .bind(Json(ResoPerms::default()))
                .execute(&mut *tx)
                .await?;

                sqlx::query("INSERT INTO delegations (delegate_id, committee_id) VALUES ($1, $2)")
                    .bind(&req.id)
                    .bind(&req.committee_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Chair => {
                sqlx::query(
                    r#"
                    INSERT INTO chairs (chair_id, firstname, lastname, email, password_hash)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(&req.id)
                .bind(&req.firstname)
                .bind(&req.lastname)
                .bind(&req.email)
                .bind(&password_hash)
                .execute(&mut *tx)
                .await?;

                sqlx::query("INSERT INTO committee_chairs (chair_id, committee_id) VALUES ($1, $2)")
                    .bind(&req.id)
                    .bind(&req.committee_id)
                    .execute(&mut *tx)
                    .await?;
            }
            Role::Admin => {
                return Err(AppError::BadRequest(
                    "Only delegate and chair accounts can be created".into(),
                ))
            }
        }

        tx.commit().await?;

        tracing::info!(account_id = %req.id, role = %req.role, committee_id = %req.committee_id, "account created");

        Ok(CreatedAccount {
            id: req.id.clone(),
            role: req.role,
            name: format!("{} {}", req.firstname, req.lastname),
            committee_id: req.committee_id.clone(),
        })
    }
}
