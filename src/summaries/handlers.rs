use axum::{
    extract::{Path, Query, State},
    routing::{get, put},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{DayView, ListQuery, SummaryPage},
    query::{ListFilter, MetricSet, PageInfo, PageRequest, Period},
    repo_types::CheckIn,
    services::{check_in, day_view, validate_check_in},
};
use crate::{
    dates::{parse_day, today_utc},
    errors::{bad_request, internal, HandlerError},
    state::AppState,
};

pub fn summary_routes() -> Router<AppState> {
    Router::new()
        .route("/users/:user_id/daily-summaries", get(list_summaries))
        .route("/users/:user_id/daily-summaries/:date", get(get_day))
        .route(
            "/users/:user_id/daily-summaries/:date/check-in",
            put(put_check_in),
        )
}

#[instrument(skip(state))]
pub async fn list_summaries(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(q): Query<ListQuery>,
) -> Result<Json<SummaryPage>, HandlerError> {
    let period: Period = q
        .filter
        .as_deref()
        .unwrap_or("all")
        .parse::<Period>()
        .map_err(bad_request)?;
    let page = PageRequest::new(q.page, q.limit);
    let metrics = MetricSet::parse(q.metrics.as_deref());
    let filter = ListFilter {
        user_id,
        since: period.start(today_utc()),
        search: q
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    };

    let listing = state
        .store
        .list_page(&filter, page)
        .await
        .map_err(internal)?;
    let pagination = PageInfo::new(page, listing.total);
    info!(%user_id, filter = period.as_str(), page = page.page, total = listing.total, returned = listing.rows.len(), "summaries listed");

    Ok(Json(SummaryPage {
        data: listing.rows.iter().map(|r| metrics.project(r)).collect(),
        pagination,
        averages: listing.averages,
        filter: period.as_str(),
    }))
}

#[instrument(skip(state))]
pub async fn get_day(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(Uuid, String)>,
) -> Result<Json<DayView>, HandlerError> {
    let date = parse_day(&date).map_err(bad_request)?;
    let view = day_view(state.store.as_ref(), user_id, date)
        .await
        .map_err(internal)?;
    Ok(Json(view))
}

#[instrument(skip(state))]
pub async fn put_check_in(
    State(state): State<AppState>,
    Path((user_id, date)): Path<(Uuid, String)>,
    Json(payload): Json<CheckIn>,
) -> Result<Json<DayView>, HandlerError> {
    let date = parse_day(&date).map_err(bad_request)?;
    validate_check_in(&payload).map_err(bad_request)?;

    let view = check_in(state.store.as_ref(), user_id, date, &payload)
        .await
        .map_err(internal)?;
    info!(%user_id, %date, "daily check-in saved");
    Ok(Json(view))
}
