use time::Date;
use tracing::info;
use uuid::Uuid;

use super::repo;
use super::repo_types::{FoodLog, MealType, NewFoodLog};
use crate::state::AppState;
use crate::summaries::DaySnapshot;

/// Stores the entry and rescores its day in one step.
pub async fn log_food(
    state: &AppState,
    user_id: Uuid,
    new: &NewFoodLog,
) -> anyhow::Result<(FoodLog, DaySnapshot)> {
    let (entry, day) = state.store.insert_entry(user_id, new).await?;
    info!(%user_id, id = %entry.id, date = %entry.log_date, grade = %day.score.grade, "food logged");
    Ok((entry, day))
}

/// Removes the entry and rescores the day it belonged to. `None` when the
/// user has no such entry.
pub async fn remove_food(
    state: &AppState,
    user_id: Uuid,
    id: Uuid,
) -> anyhow::Result<Option<DaySnapshot>> {
    let day = state.store.delete_entry(user_id, id).await?;
    if let Some(day) = &day {
        info!(%user_id, %id, date = %day.date, grade = %day.score.grade, "food log removed");
    }
    Ok(day)
}

/// Entries of one day grouped by meal, in logging order within a meal.
pub async fn entries_for_day(
    state: &AppState,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Vec<FoodLog>> {
    let mut rows = repo::list_for_day(&state.db, user_id, date).await?;
    sort_by_meal(&mut rows);
    Ok(rows)
}

fn sort_by_meal(rows: &mut [FoodLog]) {
    rows.sort_by_key(|r| {
        let meal = r.meal_type.parse::<MealType>().ok();
        // unknown meal types sort last
        (meal.is_none(), meal, r.created_at)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::{macros::datetime, OffsetDateTime};

    fn row(name: &str, meal: &str, at: OffsetDateTime) -> FoodLog {
        FoodLog {
            id: Uuid::new_v4(),
            user_id: Uuid::nil(),
            name: name.into(),
            meal_type: meal.into(),
            log_date: at.date(),
            calories: 100,
            protein: 1.0,
            carbs: 1.0,
            fats: 1.0,
            created_at: at,
        }
    }

    #[test]
    fn sorts_by_meal_then_time() {
        let mut rows = vec![
            row("cake", "snack", datetime!(2025-03-14 15:00 UTC)),
            row("soup", "lunch", datetime!(2025-03-14 12:30 UTC)),
            row("toast", "breakfast", datetime!(2025-03-14 08:10 UTC)),
            row("bread", "lunch", datetime!(2025-03-14 12:00 UTC)),
            row("eggs", "breakfast", datetime!(2025-03-14 08:00 UTC)),
        ];
        sort_by_meal(&mut rows);
        let names: Vec<_> = rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["eggs", "toast", "bread", "soup", "cake"]);
    }
}
