use serde::{Deserialize, Serialize};
use time::Date;

use super::query::{Averages, PageInfo};
use crate::nutrition::{
    progress::MacroProgress, DietScore, NutritionGoals, NutritionTotals, Trend,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub filter: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub metrics: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SummaryPage {
    pub data: Vec<serde_json::Value>,
    pub pagination: PageInfo,
    /// Over every matching day, not just this page.
    pub averages: Averages,
    pub filter: &'static str,
}

/// Totals and score of a day right after they were recomputed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DaySnapshot {
    pub date: Date,
    pub totals: NutritionTotals,
    pub score: DietScore,
}

#[derive(Debug, Serialize)]
pub struct MacroProgressSet {
    pub calories: MacroProgress,
    pub protein: MacroProgress,
    pub carbs: MacroProgress,
    pub fats: MacroProgress,
    pub water: MacroProgress,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: Date,
    pub totals: NutritionTotals,
    pub goals: NutritionGoals,
    pub score: DietScore,
    pub progress: MacroProgressSet,
    /// Against the closest earlier scored day; absent when unchanged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<Trend>,
    pub water_intake: Option<f64>,
    pub steps: Option<i32>,
    pub sleep_hours: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("{0} cannot be negative")]
pub struct NegativeMetric(pub &'static str);
