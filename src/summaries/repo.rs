use anyhow::Context;
use sqlx::{PgConnection, PgExecutor, PgPool, Postgres, QueryBuilder};
use time::Date;
use uuid::Uuid;

use super::query::{escape_like, Averages, ListFilter, PageRequest};
use super::repo_types::{CheckIn, DailySummary, SummaryListing, SUMMARY_COLUMNS};
use crate::nutrition::{DietScore, NutritionTotals};

pub async fn find_day(db: &PgPool, user_id: Uuid, date: Date) -> anyhow::Result<Option<DailySummary>> {
    let sql = format!(
        "SELECT {SUMMARY_COLUMNS} FROM daily_summaries WHERE user_id = $1 AND date = $2"
    );
    let row = sqlx::query_as::<_, DailySummary>(&sql)
        .bind(user_id)
        .bind(date)
        .fetch_optional(db)
        .await
        .context("select daily summary")?;
    Ok(row)
}

/// The latest scored day strictly before `before`.
pub async fn previous_scored_day(
    db: &PgPool,
    user_id: Uuid,
    before: Date,
) -> anyhow::Result<Option<DailySummary>> {
    let sql = format!(
        r#"
        SELECT {SUMMARY_COLUMNS}
          FROM daily_summaries
         WHERE user_id = $1 AND date < $2 AND diet_quality_score IS NOT NULL
         ORDER BY date DESC
         LIMIT 1
        "#
    );
    let row = sqlx::query_as::<_, DailySummary>(&sql)
        .bind(user_id)
        .bind(before)
        .fetch_optional(db)
        .await
        .context("select previous scored day")?;
    Ok(row)
}

/// Serialises writers of one user's day until the surrounding transaction
/// ends.
pub async fn lock_day(conn: &mut PgConnection, user_id: Uuid, date: Date) -> anyhow::Result<()> {
    sqlx::query("SELECT pg_advisory_xact_lock(hashtextextended($1::text || '/' || $2::text, 0))")
        .bind(user_id)
        .bind(date)
        .execute(conn)
        .await
        .context("lock day")?;
    Ok(())
}

/// Writes recomputed totals and score, creating the day's row if needed.
pub async fn upsert_totals<'e>(
    db: impl PgExecutor<'e>,
    user_id: Uuid,
    date: Date,
    totals: &NutritionTotals,
    score: &DietScore,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO daily_summaries (id, user_id, date, total_calories, total_protein,
                                     total_carbs, total_fats, diet_quality_score,
                                     diet_quality_explanation)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (user_id, date) DO UPDATE
           SET total_calories           = EXCLUDED.total_calories,
               total_protein            = EXCLUDED.total_protein,
               total_carbs              = EXCLUDED.total_carbs,
               total_fats               = EXCLUDED.total_fats,
               diet_quality_score       = EXCLUDED.diet_quality_score,
               diet_quality_explanation = EXCLUDED.diet_quality_explanation,
               updated_at               = now()
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(date)
    .bind(totals.calories)
    .bind(totals.protein)
    .bind(totals.carbs)
    .bind(totals.fats)
    .bind(score.grade.as_str())
    .bind(score.explanation)
    .execute(db)
    .await
    .context("upsert daily totals")?;
    Ok(())
}

/// Stores check-in metrics without touching totals or score.
pub async fn upsert_check_in(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    check_in: &CheckIn,
) -> anyhow::Result<DailySummary> {
    let sql = format!(
        r#"
        INSERT INTO daily_summaries (id, user_id, date, weight, steps, sleep_hours, water_intake)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id, date) DO UPDATE
           SET weight       = COALESCE(EXCLUDED.weight, daily_summaries.weight),
               steps        = COALESCE(EXCLUDED.steps, daily_summaries.steps),
               sleep_hours  = COALESCE(EXCLUDED.sleep_hours, daily_summaries.sleep_hours),
               water_intake = COALESCE(EXCLUDED.water_intake, daily_summaries.water_intake),
               updated_at   = now()
        RETURNING {SUMMARY_COLUMNS}
        "#
    );
    let row = sqlx::query_as::<_, DailySummary>(&sql)
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(date)
        .bind(check_in.weight)
        .bind(check_in.steps)
        .bind(check_in.sleep_hours)
        .bind(check_in.water_intake)
        .fetch_one(db)
        .await
        .context("upsert daily check-in")?;
    Ok(row)
}

fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, f: &ListFilter) {
    qb.push(" WHERE user_id = ").push_bind(f.user_id);
    if let Some(since) = f.since {
        qb.push(" AND date >= ").push_bind(since);
    }
    if let Some(term) = f.search.as_deref() {
        let pattern = format!("%{}%", escape_like(term));
        qb.push(" AND (diet_quality_score ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR diet_quality_explanation ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// One page of summaries, newest first, with the match count and averages.
pub async fn list_page(
    db: &PgPool,
    filter: &ListFilter,
    page: PageRequest,
) -> anyhow::Result<SummaryListing> {
    let mut stats = QueryBuilder::<Postgres>::new(
        "SELECT COUNT(*), AVG(total_calories::float8), AVG(total_protein), \
         AVG(total_carbs), AVG(COALESCE(water_intake, 0)) FROM daily_summaries",
    );
    push_filter(&mut stats, filter);
    let (total, calories, protein, carbs, water): (
        i64,
        Option<f64>,
        Option<f64>,
        Option<f64>,
        Option<f64>,
    ) = stats
        .build_query_as()
        .fetch_one(db)
        .await
        .context("summarise daily summaries")?;

    let mut rows = QueryBuilder::<Postgres>::new(format!(
        "SELECT {SUMMARY_COLUMNS} FROM daily_summaries"
    ));
    push_filter(&mut rows, filter);
    rows.push(" ORDER BY date DESC LIMIT ")
        .push_bind(page.limit)
        .push(" OFFSET ")
        .push_bind(page.offset());
    let rows = rows
        .build_query_as::<DailySummary>()
        .fetch_all(db)
        .await
        .context("list daily summaries")?;

    Ok(SummaryListing {
        rows,
        total,
        averages: Averages::from_means(calories, protein, carbs, water),
    })
}
