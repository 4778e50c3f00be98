use crate::domain::exercise::Exercise;
use crate::domain::user::{User, UserLog};
use time::Date;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub(crate) struct UserRecord {
    pub id: Uuid,
    pub username: String,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self { id: record.id, username: record.username }
    }
}

/// One row of `users LEFT JOIN exercises`. Exercise columns are null for a user with an empty log.
#[derive(sqlx::FromRow)]
pub(crate) struct UserLogRow {
    pub id: Uuid,
    pub username: String,
    pub description: Option<String>,
    pub duration: Option<i64>,
    pub date: Option<Date>,
}

impl UserLogRow {
    /// Folds joined rows back into a single user log. Returns `None` for an empty row set.
    pub(crate) fn fold(rows: Vec<Self>) -> Option<UserLog> {
        let mut rows = rows.into_iter().peekable();
        let first = rows.peek()?;
        let user = User { id: first.id, username: first.username.clone() };

        let exercises = rows
            .filter_map(|row| match (row.description, row.duration, row.date) {
                (Some(description), Some(duration), Some(date)) => Some(Exercise { description, duration, date }),
                _ => None,
            })
            .collect();

        Some(UserLog { user, exercises })
    }
}
