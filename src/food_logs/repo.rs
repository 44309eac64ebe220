use anyhow::Context;
use sqlx::PgExecutor;
use time::Date;
use uuid::Uuid;

use super::repo_types::{FoodLog, NewFoodLog};

pub async fn insert<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
    new: &NewFoodLog,
) -> anyhow::Result<FoodLog> {
    let row = sqlx::query_as::<_, FoodLog>(
        r#"
        INSERT INTO food_logs (id, user_id, name, meal_type, log_date, calories, protein, carbs, fats)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING id, user_id, name, meal_type, log_date, calories, protein, carbs, fats, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&new.name)
    .bind(new.meal_type.as_str())
    .bind(new.log_date)
    .bind(new.calories)
    .bind(new.protein)
    .bind(new.carbs)
    .bind(new.fats)
    .fetch_one(db)
    .await
    .context("insert food log")?;

    Ok(row)
}

/// Every entry the user logged on `date`, oldest first.
pub async fn list_for_day<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<Vec<FoodLog>> {
    let rows = sqlx::query_as::<_, FoodLog>(
        r#"
        SELECT id, user_id, name, meal_type, log_date, calories, protein, carbs, fats, created_at
          FROM food_logs
         WHERE user_id = $1 AND log_date = $2
         ORDER BY created_at ASC
        "#,
    )
    .bind(user_id)
    .bind(date)
    .fetch_all(db)
    .await
    .context("list food logs for day")?;

    Ok(rows)
}

/// Deletes one entry and returns the day it was logged on, or `None` when
/// the user has no such entry.
pub async fn delete<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
    id: Uuid,
) -> anyhow::Result<Option<Date>> {
    let day = sqlx::query_scalar::<_, Date>(
        r#"
        DELETE FROM food_logs
         WHERE id = $1 AND user_id = $2
        RETURNING log_date
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("delete food log")?;

    Ok(day)
}
