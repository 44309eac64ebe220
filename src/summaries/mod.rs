mod dto;
pub mod handlers;
mod query;
pub mod repo;
mod repo_types;
pub mod services;
pub mod store;

pub use dto::DaySnapshot;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::summary_routes())
}
