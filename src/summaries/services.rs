use time::Date;
use tracing::{debug, warn};
use uuid::Uuid;

use super::dto::{DaySnapshot, DayView, MacroProgressSet, NegativeMetric};
use super::repo_types::CheckIn;
use super::store::SummaryStore;
use crate::nutrition::{
    aggregate,
    progress::{progress, MacroKind},
    score, trend, FoodLogEntry, NutritionGoals,
};

/// Sums the day's entries and scores the totals against `goals`.
pub fn rescore(entries: &[FoodLogEntry], goals: &NutritionGoals, date: Date) -> DaySnapshot {
    let totals = aggregate(entries, date);
    let score = score(&totals, goals);
    debug!(%date, entries = entries.len(), grade = %score.grade, "day rescored");
    DaySnapshot {
        date,
        totals,
        score,
    }
}

/// The day as the dashboard shows it. A day with no summary row reads as
/// zero totals; the score is always computed against the current goals.
pub async fn day_view(store: &dyn SummaryStore, user_id: Uuid, date: Date) -> anyhow::Result<DayView> {
    let goals = store.goals(user_id).await?;
    let row = store.find_day(user_id, date).await?;
    let totals = row.as_ref().map(|r| r.totals()).unwrap_or_default();
    let score = score(&totals, &goals);

    let previous = store.previous_scored_day(user_id, date).await?;
    let trend = match previous.as_ref().map(|p| p.grade()) {
        Some(Ok(Some(prev))) => trend(score.grade, prev),
        Some(Err(e)) => {
            warn!(error = %e, %user_id, %date, "stored grade not recognised; trend omitted");
            None
        }
        Some(Ok(None)) | None => None,
    };

    let water_intake = row.as_ref().and_then(|r| r.water_intake);
    let progress = MacroProgressSet {
        calories: progress(
            MacroKind::Calories,
            totals.calories as f64,
            f64::from(goals.calorie_goal),
        ),
        protein: progress(MacroKind::Protein, totals.protein, f64::from(goals.protein_goal)),
        carbs: progress(MacroKind::Carbs, totals.carbs, f64::from(goals.carbs_goal)),
        fats: progress(MacroKind::Fats, totals.fats, f64::from(goals.fats_goal)),
        water: progress(
            MacroKind::Water,
            water_intake.unwrap_or(0.0),
            f64::from(goals.water_goal),
        ),
    };

    Ok(DayView {
        date,
        totals,
        goals,
        score,
        progress,
        trend,
        water_intake,
        steps: row.as_ref().and_then(|r| r.steps),
        sleep_hours: row.as_ref().and_then(|r| r.sleep_hours),
        weight: row.as_ref().and_then(|r| r.weight),
    })
}

pub fn validate_check_in(c: &CheckIn) -> Result<(), NegativeMetric> {
    let fields = [
        ("weight", c.weight),
        ("sleep_hours", c.sleep_hours),
        ("water_intake", c.water_intake),
        ("steps", c.steps.map(f64::from)),
    ];
    match fields.iter().find(|(_, v)| v.is_some_and(|v| v < 0.0)) {
        Some(&(field, _)) => Err(NegativeMetric(field)),
        None => Ok(()),
    }
}

/// Saves a validated check-in and returns the refreshed day.
pub async fn check_in(
    store: &dyn SummaryStore,
    user_id: Uuid,
    date: Date,
    payload: &CheckIn,
) -> anyhow::Result<DayView> {
    store.save_check_in(user_id, date, payload).await?;
    day_view(store, user_id, date).await
}
