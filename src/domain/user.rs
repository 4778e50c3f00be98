use crate::domain::exercise::{DateRange, Exercise};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

/// A user together with every exercise they have logged, in append order.
#[derive(Debug, Clone)]
pub struct UserLog {
    pub user: User,
    pub exercises: Vec<Exercise>,
}

/// The answer to a log query.
#[derive(Debug, Clone)]
pub struct ExerciseLog {
    pub user: User,
    /// Size of the whole log, before any filtering or limit.
    pub count: usize,
    pub entries: Vec<Exercise>,
}

impl UserLog {
    /// Keeps the exercises dated within `range`, then the first `limit` of those.
    #[must_use]
    pub fn query(self, range: DateRange, limit: Option<usize>) -> ExerciseLog {
        let count = self.exercises.len();
        let entries = self
            .exercises
            .into_iter()
            .filter(|exercise| range.contains(exercise.date))
            .take(limit.unwrap_or(usize::MAX))
            .collect();

        ExerciseLog { user: self.user, count, entries }
    }
}
