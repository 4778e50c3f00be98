use crate::adapters::UserStore;
use crate::adapters::database::DbPool;
use crate::adapters::database::records::{UserLogRow, UserRecord};
use crate::domain::exercise::Exercise;
use crate::domain::user::{User, UserLog};
use crate::error::{AppError, Result};
use async_trait::async_trait;
use uuid::Uuid;

/// Postgres-backed user store. Exercises live in their own table and are
/// ordered by an insertion sequence.
#[derive(Clone, Debug)]
pub struct PgUserStore {
    pool: DbPool,
}

impl PgUserStore {
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    #[tracing::instrument(level = "debug", skip(self, username), err)]
    async fn create_user(&self, username: &str) -> Result<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username
            "#,
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AppError::UserExists,
            other => AppError::Database(other),
        })?;

        Ok(record.into())
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn list_users(&self) -> Result<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>("SELECT id, username FROM users ORDER BY seq")
            .fetch_all(&self.pool)
            .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// The insert only happens if the user exists, so there is no read-modify-write window.
    #[tracing::instrument(level = "debug", skip(self, exercise), err)]
    async fn append_exercise(&self, user_id: Uuid, exercise: &Exercise) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO exercises (user_id, description, duration, date)
                SELECT id, $2, $3, $4 FROM users WHERE id = $1
                RETURNING user_id
            )
            SELECT u.id, u.username
            FROM users u
            JOIN inserted i ON i.user_id = u.id
            "#,
        )
        .bind(user_id)
        .bind(&exercise.description)
        .bind(exercise.duration)
        .bind(exercise.date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record.map(Into::into))
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn find_log(&self, user_id: Uuid) -> Result<Option<UserLog>> {
        let rows = sqlx::query_as::<_, UserLogRow>(
            r#"
            SELECT u.id, u.username, e.description, e.duration, e.date
            FROM users u
            LEFT JOIN exercises e ON e.user_id = u.id
            WHERE u.id = $1
            ORDER BY e.seq
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(UserLogRow::fold(rows))
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
