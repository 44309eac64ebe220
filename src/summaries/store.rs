use anyhow::Context;
use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use time::Date;
use uuid::Uuid;

use super::dto::DaySnapshot;
use super::query::{ListFilter, PageRequest};
use super::repo;
use super::repo_types::{CheckIn, DailySummary, SummaryListing};
use super::services::rescore;
use crate::{
    food_logs::{repo as food_repo, FoodLog, NewFoodLog},
    nutrition::{FoodLogEntry, NutritionGoals},
    profiles::repo as profile_repo,
};

/// Storage behind food logging, the day view, check-ins and listings.
///
/// Writes that change a day's entries rescore that day in the same unit of
/// work, so a stored summary always matches the entries it was summed from.
#[async_trait]
pub trait SummaryStore: Send + Sync {
    async fn insert_entry(
        &self,
        user_id: Uuid,
        new: &NewFoodLog,
    ) -> anyhow::Result<(FoodLog, DaySnapshot)>;
    /// `None` when the user has no such entry.
    async fn delete_entry(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<DaySnapshot>>;
    /// Profile goals, or the defaults when the user has no profile.
    async fn goals(&self, user_id: Uuid) -> anyhow::Result<NutritionGoals>;
    async fn find_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Option<DailySummary>>;
    async fn previous_scored_day(
        &self,
        user_id: Uuid,
        before: Date,
    ) -> anyhow::Result<Option<DailySummary>>;
    /// Stores the given metrics; absent ones keep their value. Totals and
    /// score are left alone.
    async fn save_check_in(
        &self,
        user_id: Uuid,
        date: Date,
        check_in: &CheckIn,
    ) -> anyhow::Result<DailySummary>;
    async fn list_page(
        &self,
        filter: &ListFilter,
        page: PageRequest,
    ) -> anyhow::Result<SummaryListing>;
}

#[derive(Clone)]
pub struct PgSummaryStore {
    db: PgPool,
}

impl PgSummaryStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Re-sums the day and stores the new totals. The caller holds the day lock.
async fn rescore_locked(
    conn: &mut PgConnection,
    user_id: Uuid,
    date: Date,
) -> anyhow::Result<DaySnapshot> {
    let rows = food_repo::list_for_day(&mut *conn, user_id, date).await?;
    let entries: Vec<FoodLogEntry> = rows.iter().map(FoodLogEntry::from).collect();
    let goals = profile_repo::find_goals(&mut *conn, user_id)
        .await?
        .unwrap_or_default();
    let day = rescore(&entries, &goals, date);
    repo::upsert_totals(&mut *conn, user_id, date, &day.totals, &day.score).await?;
    Ok(day)
}

#[async_trait]
impl SummaryStore for PgSummaryStore {
    async fn insert_entry(
        &self,
        user_id: Uuid,
        new: &NewFoodLog,
    ) -> anyhow::Result<(FoodLog, DaySnapshot)> {
        let mut tx = self.db.begin().await.context("begin food log insert")?;
        repo::lock_day(&mut tx, user_id, new.log_date).await?;
        let entry = food_repo::insert(&mut *tx, user_id, new).await?;
        let day = rescore_locked(&mut tx, user_id, entry.log_date).await?;
        tx.commit().await.context("commit food log insert")?;
        Ok((entry, day))
    }

    async fn delete_entry(&self, user_id: Uuid, id: Uuid) -> anyhow::Result<Option<DaySnapshot>> {
        let mut tx = self.db.begin().await.context("begin food log delete")?;
        let Some(date) = food_repo::delete(&mut *tx, user_id, id).await? else {
            return Ok(None);
        };
        repo::lock_day(&mut tx, user_id, date).await?;
        let day = rescore_locked(&mut tx, user_id, date).await?;
        tx.commit().await.context("commit food log delete")?;
        Ok(Some(day))
    }

    async fn goals(&self, user_id: Uuid) -> anyhow::Result<NutritionGoals> {
        Ok(profile_repo::find_goals(&self.db, user_id)
            .await?
            .unwrap_or_default())
    }

    async fn find_day(&self, user_id: Uuid, date: Date) -> anyhow::Result<Option<DailySummary>> {
        repo::find_day(&self.db, user_id, date).await
    }

    async fn previous_scored_day(
        &self,
        user_id: Uuid,
        before: Date,
    ) -> anyhow::Result<Option<DailySummary>> {
        repo::previous_scored_day(&self.db, user_id, before).await
    }

    async fn save_check_in(
        &self,
        user_id: Uuid,
        date: Date,
        check_in: &CheckIn,
    ) -> anyhow::Result<DailySummary> {
        repo::upsert_check_in(&self.db, user_id, date, check_in).await
    }

    async fn list_page(
        &self,
        filter: &ListFilter,
        page: PageRequest,
    ) -> anyhow::Result<SummaryListing> {
        repo::list_page(&self.db, filter, page).await
    }
}
