use serde::Deserialize;
use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::query::Averages;
use crate::nutrition::{Grade, NutritionTotals, UnknownGrade};

pub const SUMMARY_COLUMNS: &str = "id, user_id, date, total_calories, total_protein, \
    total_carbs, total_fats, water_intake, steps, sleep_hours, weight, \
    diet_quality_score, diet_quality_explanation, created_at, updated_at";

/// Row of the `daily_summaries` table, one per user and day.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DailySummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: Date,
    pub total_calories: i64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    pub water_intake: Option<f64>,
    pub steps: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub weight: Option<f64>,
    pub diet_quality_score: Option<String>,
    pub diet_quality_explanation: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl DailySummary {
    pub fn totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: self.total_calories,
            protein: self.total_protein,
            carbs: self.total_carbs,
            fats: self.total_fats,
        }
    }

    /// Stored grade; `Ok(None)` when the day was never scored.
    pub fn grade(&self) -> Result<Option<Grade>, UnknownGrade> {
        self.diet_quality_score
            .as_deref()
            .map(str::parse)
            .transpose()
    }
}

/// Daily metrics from the check-in form. Absent fields keep their stored
/// value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CheckIn {
    pub weight: Option<f64>,
    pub steps: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub water_intake: Option<f64>,
}

/// One page of a listing plus figures over the whole filtered set.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryListing {
    pub rows: Vec<DailySummary>,
    pub total: i64,
    pub averages: Averages,
}
