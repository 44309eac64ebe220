use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use super::{dto::PutGoalsRequest, repo};
use crate::{
    errors::{bad_request, internal, HandlerError},
    nutrition::NutritionGoals,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct GoalsResponse {
    pub daily_calorie_goal: i32,
    pub daily_protein_goal: i32,
    pub daily_carbs_goal: i32,
    pub daily_fats_goal: i32,
    pub daily_water_goal: i32,
    /// True when the user has no profile yet and defaults are shown.
    pub is_default: bool,
}

impl GoalsResponse {
    fn new(goals: NutritionGoals, is_default: bool) -> Self {
        Self {
            daily_calorie_goal: goals.calorie_goal,
            daily_protein_goal: goals.protein_goal,
            daily_carbs_goal: goals.carbs_goal,
            daily_fats_goal: goals.fats_goal,
            daily_water_goal: goals.water_goal,
            is_default,
        }
    }
}

pub fn goals_routes() -> Router<AppState> {
    Router::new().route("/users/:user_id/goals", get(get_goals).put(put_goals))
}

#[instrument(skip(state))]
pub async fn get_goals(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<GoalsResponse>, HandlerError> {
    let stored = repo::find_goals(&state.db, user_id).await.map_err(internal)?;
    let response = match stored {
        Some(goals) => GoalsResponse::new(goals, false),
        None => GoalsResponse::new(NutritionGoals::default(), true),
    };
    Ok(Json(response))
}

#[instrument(skip(state))]
pub async fn put_goals(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<PutGoalsRequest>,
) -> Result<Json<GoalsResponse>, HandlerError> {
    let goals = NutritionGoals::try_from(payload).map_err(bad_request)?;
    let saved = repo::upsert_goals(&state.db, user_id, &goals)
        .await
        .map_err(internal)?;
    info!(%user_id, "goals updated");
    Ok(Json(GoalsResponse::new(saved, false)))
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::{app::build_app, state::AppState};

    #[tokio::test]
    async fn non_positive_goal_is_rejected() {
        let user = uuid::Uuid::new_v4();
        let req = Request::put(format!("/api/v1/users/{user}/goals"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"daily_calorie_goal":0,"daily_protein_goal":120,
                    "daily_carbs_goal":180,"daily_fats_goal":60}"#,
            ))
            .unwrap();
        let res = build_app(AppState::fake()).oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
