use crate::adapters::UserStore;
use crate::domain::exercise::{DateRange, Exercise};
use crate::domain::user::{ExerciseLog, User};
use crate::error::{AppError, Result};
use opentelemetry::{KeyValue, global, metrics::Counter};
use std::sync::Arc;
use time::Date;
use uuid::Uuid;

#[derive(Clone)]
struct ExerciseMetrics {
    users_created_total: Counter<u64>,
    records_added_total: Counter<u64>,
    log_queries_total: Counter<u64>,
}

impl ExerciseMetrics {
    fn new() -> Self {
        let meter = global::meter("exercise-tracker");
        Self {
            users_created_total: meter
                .u64_counter("exercise_users_created_total")
                .with_description("Total number of users created")
                .build(),
            records_added_total: meter
                .u64_counter("exercise_records_added_total")
                .with_description("Total number of exercise records appended")
                .build(),
            log_queries_total: meter
                .u64_counter("exercise_log_queries_total")
                .with_description("Total number of exercise log queries")
                .build(),
        }
    }
}

/// A validated request to append one exercise.
#[derive(Debug, Clone)]
pub struct NewExercise {
    pub user_id: Uuid,
    pub description: String,
    pub duration: i64,
    /// Defaults to today when absent.
    pub date: Option<Date>,
}

#[derive(Clone)]
pub struct ExerciseService {
    store: Arc<dyn UserStore>,
    metrics: ExerciseMetrics,
}

impl std::fmt::Debug for ExerciseService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExerciseService").field("store", &self.store).finish_non_exhaustive()
    }
}

impl ExerciseService {
    #[must_use]
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store, metrics: ExerciseMetrics::new() }
    }

    /// Creates a user with an empty exercise log.
    ///
    /// # Errors
    /// Returns `AppError::UserExists` if the username is already taken.
    #[tracing::instrument(skip(self), fields(user.id = tracing::field::Empty), err(level = "warn"))]
    pub async fn create_user(&self, username: &str) -> Result<User> {
        let user = self.store.create_user(username).await?;

        tracing::Span::current().record("user.id", tracing::field::display(user.id));
        tracing::info!("User created");
        self.metrics.users_created_total.add(1, &[]);

        Ok(user)
    }

    /// # Errors
    /// Returns `AppError::Database` if the store query fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.store.list_users().await
    }

    /// Appends an exercise to a user's log and returns the owning user with the stored record.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    #[tracing::instrument(skip(self, params), fields(user.id = %params.user_id), err(level = "warn"))]
    pub async fn add_exercise(&self, params: NewExercise) -> Result<(User, Exercise)> {
        let exercise = Exercise {
            description: params.description,
            duration: params.duration,
            date: params.date.unwrap_or_else(crate::domain::calendar::today),
        };

        let user = self.store.append_exercise(params.user_id, &exercise).await?.ok_or(AppError::NotFound)?;

        tracing::debug!(date = %exercise.date, duration = exercise.duration, "Exercise appended");
        self.metrics.records_added_total.add(1, &[]);

        Ok((user, exercise))
    }

    /// Fetches a user's log, filtered to `range` and cut to `limit` entries.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    #[tracing::instrument(skip(self), fields(user.id = %user_id), err(level = "warn"))]
    pub async fn exercise_log(&self, user_id: Uuid, range: DateRange, limit: Option<usize>) -> Result<ExerciseLog> {
        let log = self.store.find_log(user_id).await?.ok_or(AppError::NotFound)?;

        let filtered = range.from.is_some() || range.to.is_some();
        self.metrics.log_queries_total.add(1, &[KeyValue::new("filtered", filtered)]);

        Ok(log.query(range, limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryUserStore;
    use time::macros::date;

    fn service() -> ExerciseService {
        ExerciseService::new(Arc::new(MemoryUserStore::new()))
    }

    #[tokio::test]
    async fn test_add_exercise_defaults_to_today() {
        let service = service();
        let user = service.create_user("ada").await.unwrap();

        let params = NewExercise { user_id: user.id, description: "run".into(), duration: 30, date: None };
        let (_, exercise) = service.add_exercise(params).await.unwrap();

        assert_eq!(exercise.date, crate::domain::calendar::today());
    }

    #[tokio::test]
    async fn test_add_exercise_unknown_user() {
        let service = service();
        let params = NewExercise {
            user_id: Uuid::new_v4(),
            description: "run".into(),
            duration: 30,
            date: Some(date!(2023 - 05 - 04)),
        };

        let err = service.add_exercise(params).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }

    #[tokio::test]
    async fn test_exercise_log_unknown_user() {
        let err = service().exercise_log(Uuid::new_v4(), DateRange::default(), None).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound));
    }
}
