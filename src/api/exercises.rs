use crate::api::AppState;
use crate::api::schemas::exercises::{AddedExercise, ExerciseLogResponse, LogQuery, LogRequest, NewExerciseForm};
use crate::error::{AppError, Result};
use crate::services::exercise_service::NewExercise;
use axum::{
    Form, Json,
    extract::{Query, State},
    response::IntoResponse,
};

pub async fn add_exercise(
    State(state): State<AppState>,
    Form(payload): Form<NewExerciseForm>,
) -> Result<impl IntoResponse> {
    let params: NewExercise = payload.try_into().map_err(AppError::BadRequest)?;
    let added = state.exercise_service.add_exercise(params).await?;
    Ok(Json(AddedExercise::from(added)))
}

pub async fn exercise_log(State(state): State<AppState>, Query(query): Query<LogQuery>) -> Result<impl IntoResponse> {
    let request: LogRequest = query.try_into().map_err(AppError::BadRequest)?;
    let log = state.exercise_service.exercise_log(request.user_id, request.range, request.limit).await?;
    Ok(Json(ExerciseLogResponse::from(log)))
}
