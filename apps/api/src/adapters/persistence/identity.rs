use async_trait::async_trait;
use chrono::NaiveDateTime;
use codegate_types::Role;

use crate::{
    adapters::persistence::PostgresPersistence,
    app_error::{AppError, AppResult},
    domain::entities::identity::Identity,
    use_cases::user::IdentityRepo,
};

// Identity row as stored in the db.
#[derive(sqlx::FromRow, Debug)]
pub struct IdentityDb {
    pub id: i64,
    pub email: Option<String>,
    pub role: String,
    pub created_at: Option<NaiveDateTime>,
}

impl TryFrom<IdentityDb> for Identity {
    type Error = AppError;

    fn try_from(row: IdentityDb) -> AppResult<Self> {
        let role: Role = row.role.parse().map_err(|_| {
            tracing::error!(identity_id = row.id, role = %row.role, "Unknown role in identities table");
            AppError::DependencyUnavailable("Corrupt identity row".into())
        })?;
        Ok(Identity {
            id: row.id,
            email: row.email,
            role,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl IdentityRepo for PostgresPersistence {
    async fn create_identity(&self, email: Option<&str>, role: Role) -> AppResult<Identity> {
        // The no-op update makes RETURNING yield the existing row on conflict.
        let row = sqlx::query_as::<_, IdentityDb>(
            r#"
                INSERT INTO identities (email, role)
                VALUES ($1, $2)
                ON CONFLICT (email) DO UPDATE
                SET email = EXCLUDED.email
                RETURNING id, email, role, created_at
            "#,
        )
        .bind(email)
        .bind(role.as_str())
        .fetch_one(self.pool())
        .await?;

        row.try_into()
    }

    async fn get_identity(&self, id: i64) -> AppResult<Option<Identity>> {
        let row = sqlx::query_as::<_, IdentityDb>(
            "SELECT id, email, role, created_at FROM identities WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool())
        .await?;

        row.map(Identity::try_from).transpose()
    }

    async fn get_requests_count(&self, id: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT requests_count FROM identities WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?
            .ok_or(AppError::IdentityNotFound)
    }

    async fn increment_requests_count(&self, id: i64) -> AppResult<()> {
        sqlx::query("UPDATE identities SET requests_count = requests_count + 1 WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;
        Ok(())
    }
}
