use crate::api::AppState;
use crate::api::schemas::required;
use crate::api::schemas::users::{NewUser, UserSummary};
use crate::error::{AppError, Result};
use axum::{Form, Json, extract::State, response::IntoResponse};

pub async fn create_user(State(state): State<AppState>, Form(payload): Form<NewUser>) -> Result<impl IntoResponse> {
    let username = required(payload.username, "username").map_err(AppError::BadRequest)?;
    let user = state.exercise_service.create_user(&username).await?;
    Ok(Json(UserSummary::from(user)))
}

pub async fn list_users(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let users = state.exercise_service.list_users().await?;
    Ok(Json(users.into_iter().map(UserSummary::from).collect::<Vec<_>>()))
}
