use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::{
    dto::{CreateFoodLogRequest, CreatedFoodLogResponse, DayQuery, FoodLogResponse},
    repo_types::NewFoodLog,
    services,
};
use crate::{
    dates::parse_day,
    errors::{bad_request, internal, HandlerError},
    state::AppState,
    summaries::DaySnapshot,
};

pub fn food_log_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/users/:user_id/food-logs",
            get(list_food_logs).post(create_food_log),
        )
        .route("/users/:user_id/food-logs/:id", delete(delete_food_log))
}

#[instrument(skip(state, payload))]
pub async fn create_food_log(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateFoodLogRequest>,
) -> Result<(StatusCode, Json<CreatedFoodLogResponse>), HandlerError> {
    let new = NewFoodLog::try_from(payload).map_err(bad_request)?;
    let (entry, day) = services::log_food(&state, user_id, &new)
        .await
        .map_err(internal)?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedFoodLogResponse {
            entry: entry.into(),
            day,
        }),
    ))
}

#[instrument(skip(state))]
pub async fn list_food_logs(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(q): Query<DayQuery>,
) -> Result<Json<Vec<FoodLogResponse>>, HandlerError> {
    let date = parse_day(&q.date).map_err(bad_request)?;
    let rows = services::entries_for_day(&state, user_id, date)
        .await
        .map_err(internal)?;
    Ok(Json(rows.into_iter().map(FoodLogResponse::from).collect()))
}

#[instrument(skip(state))]
pub async fn delete_food_log(
    State(state): State<AppState>,
    Path((user_id, id)): Path<(Uuid, Uuid)>,
) -> Result<Json<DaySnapshot>, HandlerError> {
    match services::remove_food(&state, user_id, id).await {
        Ok(Some(day)) => Ok(Json(day)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Food log not found".into())),
        Err(e) => Err(internal(e)),
    }
}
