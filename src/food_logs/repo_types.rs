use std::str::FromStr;

use sqlx::FromRow;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::FoodLogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealType {
    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "breakfast",
            MealType::Lunch => "lunch",
            MealType::Dinner => "dinner",
            MealType::Snack => "snack",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown meal type {0:?}")]
pub struct UnknownMealType(pub String);

impl FromStr for MealType {
    type Err = UnknownMealType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breakfast" => Ok(MealType::Breakfast),
            "lunch" => Ok(MealType::Lunch),
            "dinner" => Ok(MealType::Dinner),
            "snack" => Ok(MealType::Snack),
            other => Err(UnknownMealType(other.to_string())),
        }
    }
}

/// Row of the `food_logs` table.
#[derive(Debug, Clone, FromRow)]
pub struct FoodLog {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub meal_type: String,      // breakfast | lunch | dinner | snack
    pub log_date: Date,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub created_at: OffsetDateTime,
}

impl From<&FoodLog> for FoodLogEntry {
    fn from(r: &FoodLog) -> Self {
        Self {
            user_id: r.user_id,
            date: r.log_date,
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fats: r.fats,
        }
    }
}

/// Validated input for a new row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodLog {
    pub name: String,
    pub meal_type: MealType,
    pub log_date: Date,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}
