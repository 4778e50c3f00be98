use crate::api::schemas::{parse_user_id, present, required};
use crate::domain::calendar::{parse_date, serialize_calendar};
use crate::domain::exercise::{DateRange, Exercise, coerce_duration, parse_limit};
use crate::domain::user::{ExerciseLog, User};
use crate::services::exercise_service::NewExercise;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExerciseForm {
    pub user_id: Option<String>,
    pub description: Option<String>,
    pub duration: Option<String>,
    pub date: Option<String>,
}

impl TryFrom<NewExerciseForm> for NewExercise {
    type Error = String;

    fn try_from(form: NewExerciseForm) -> Result<Self, Self::Error> {
        let user_id = parse_user_id(&required(form.user_id, "userId")?)?;
        let description = required(form.description, "description")?;
        let duration = coerce_duration(&required(form.duration, "duration")?)?;
        let date = present(form.date).as_deref().map(parse_date).transpose()?;

        Ok(Self { user_id, description, duration, date })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogQuery {
    pub user_id: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub limit: Option<String>,
}

/// A log query with every parameter parsed.
#[derive(Debug)]
pub struct LogRequest {
    pub user_id: Uuid,
    pub range: DateRange,
    pub limit: Option<usize>,
}

impl TryFrom<LogQuery> for LogRequest {
    type Error = String;

    fn try_from(query: LogQuery) -> Result<Self, Self::Error> {
        let user_id = parse_user_id(&required(query.user_id, "userId")?)?;
        let from = present(query.from).as_deref().map(parse_date).transpose()?;
        let to = present(query.to).as_deref().map(parse_date).transpose()?;
        let limit = parse_limit(query.limit.as_deref());

        Ok(Self { user_id, range: DateRange::new(from, to), limit })
    }
}

#[derive(Debug, Serialize)]
pub struct AddedExercise {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    #[serde(serialize_with = "serialize_calendar")]
    pub date: Date,
    pub duration: i64,
    pub description: String,
}

impl From<(User, Exercise)> for AddedExercise {
    fn from((user, exercise): (User, Exercise)) -> Self {
        Self {
            id: user.id,
            username: user.username,
            date: exercise.date,
            duration: exercise.duration,
            description: exercise.description,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub description: String,
    pub duration: i64,
    #[serde(serialize_with = "serialize_calendar")]
    pub date: Date,
}

impl From<Exercise> for LogEntry {
    fn from(exercise: Exercise) -> Self {
        Self { description: exercise.description, duration: exercise.duration, date: exercise.date }
    }
}

#[derive(Debug, Serialize)]
pub struct ExerciseLogResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub count: usize,
    pub log: Vec<LogEntry>,
}

impl From<ExerciseLog> for ExerciseLogResponse {
    fn from(log: ExerciseLog) -> Self {
        Self {
            id: log.user.id,
            username: log.user.username,
            count: log.count,
            log: log.entries.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    fn form(date: Option<&str>) -> NewExerciseForm {
        NewExerciseForm {
            user_id: Some(Uuid::nil().to_string()),
            description: Some("run".to_string()),
            duration: Some("30".to_string()),
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_form_with_date() {
        let parsed = NewExercise::try_from(form(Some("2023-5-4"))).unwrap();
        assert_eq!(parsed.date, Some(date!(2023 - 05 - 04)));
        assert_eq!(parsed.duration, 30);
    }

    #[test]
    fn test_form_blank_date_is_absent() {
        assert_eq!(NewExercise::try_from(form(Some(""))).unwrap().date, None);
        assert_eq!(NewExercise::try_from(form(None)).unwrap().date, None);
    }

    #[test]
    fn test_form_rejects_bad_input() {
        let mut bad = form(None);
        bad.duration = Some("soon".to_string());
        assert!(NewExercise::try_from(bad).is_err());

        let mut bad = form(None);
        bad.user_id = Some("not-an-id".to_string());
        assert!(NewExercise::try_from(bad).is_err());

        let mut bad = form(None);
        bad.description = None;
        assert_eq!(NewExercise::try_from(bad).unwrap_err(), "description is required");

        assert!(NewExercise::try_from(form(Some("May 4th"))).is_err());
    }

    #[test]
    fn test_log_query_parsing() {
        let query = LogQuery {
            user_id: Some(Uuid::nil().to_string()),
            from: Some("2023-1-1".to_string()),
            to: Some(String::new()),
            limit: Some("abc".to_string()),
        };
        let request = LogRequest::try_from(query).unwrap();

        assert_eq!(request.range, DateRange::new(Some(date!(2023 - 01 - 01)), None));
        assert_eq!(request.limit, None);
    }

    #[test]
    fn test_log_query_requires_user() {
        let query = LogQuery { user_id: None, from: None, to: None, limit: None };
        assert_eq!(LogRequest::try_from(query).unwrap_err(), "userId is required");
    }

    #[test]
    fn test_added_exercise_shape() {
        let user = User { id: Uuid::nil(), username: "ada".to_string() };
        let exercise = Exercise { description: "run".to_string(), duration: 30, date: date!(2023 - 05 - 04) };
        let json = serde_json::to_value(AddedExercise::from((user, exercise))).unwrap();

        assert_eq!(
            json,
            json!({
                "_id": Uuid::nil().to_string(),
                "username": "ada",
                "date": "Thu May 04 2023",
                "duration": 30,
                "description": "run",
            })
        );
    }
}
