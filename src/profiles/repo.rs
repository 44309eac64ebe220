use anyhow::Context;
use sqlx::{FromRow, PgExecutor, PgPool};
use uuid::Uuid;

use crate::nutrition::NutritionGoals;

#[derive(Debug, FromRow)]
struct GoalsRow {
    daily_calorie_goal: i32,
    daily_protein_goal: i32,
    daily_carbs_goal: i32,
    daily_fats_goal: i32,
    daily_water_goal: i32,
}

impl From<GoalsRow> for NutritionGoals {
    fn from(r: GoalsRow) -> Self {
        Self {
            calorie_goal: r.daily_calorie_goal,
            protein_goal: r.daily_protein_goal,
            carbs_goal: r.daily_carbs_goal,
            fats_goal: r.daily_fats_goal,
            water_goal: r.daily_water_goal,
        }
    }
}

/// Goals stored on the user's profile, if the profile exists.
pub async fn find_goals<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
) -> anyhow::Result<Option<NutritionGoals>> {
    let row = sqlx::query_as::<_, GoalsRow>(
        r#"
        SELECT daily_calorie_goal, daily_protein_goal, daily_carbs_goal,
               daily_fats_goal, daily_water_goal
          FROM profiles
         WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("select profile goals")?;

    Ok(row.map(Into::into))
}

pub async fn upsert_goals(
    db: &PgPool,
    user_id: Uuid,
    goals: &NutritionGoals,
) -> anyhow::Result<NutritionGoals> {
    let row = sqlx::query_as::<_, GoalsRow>(
        r#"
        INSERT INTO profiles (id, daily_calorie_goal, daily_protein_goal,
                              daily_carbs_goal, daily_fats_goal, daily_water_goal)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE
           SET daily_calorie_goal = EXCLUDED.daily_calorie_goal,
               daily_protein_goal = EXCLUDED.daily_protein_goal,
               daily_carbs_goal   = EXCLUDED.daily_carbs_goal,
               daily_fats_goal    = EXCLUDED.daily_fats_goal,
               daily_water_goal   = EXCLUDED.daily_water_goal,
               updated_at         = now()
        RETURNING daily_calorie_goal, daily_protein_goal, daily_carbs_goal,
                  daily_fats_goal, daily_water_goal
        "#,
    )
    .bind(user_id)
    .bind(goals.calorie_goal)
    .bind(goals.protein_goal)
    .bind(goals.carbs_goal)
    .bind(goals.fats_goal)
    .bind(goals.water_goal)
    .fetch_one(db)
    .await
    .context("upsert profile goals")?;

    Ok(row.into())
}
