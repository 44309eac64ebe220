use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::{FoodLog, MealType, NewFoodLog};
use crate::dates::parse_day;
use crate::summaries::DaySnapshot;

#[derive(Debug, Deserialize)]
pub struct CreateFoodLogRequest {
    pub name: String,
    pub meal_type: String,
    pub date: String,
    pub calories: i32,
    #[serde(default)]
    pub protein: f64,
    #[serde(default)]
    pub carbs: f64,
    #[serde(default)]
    pub fats: f64,
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum InvalidFoodLog {
    #[error("name must not be empty")]
    EmptyName,
    #[error(transparent)]
    MealType(#[from] super::repo_types::UnknownMealType),
    #[error(transparent)]
    Date(#[from] crate::dates::InvalidDate),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
}

impl TryFrom<CreateFoodLogRequest> for NewFoodLog {
    type Error = InvalidFoodLog;

    fn try_from(r: CreateFoodLogRequest) -> Result<Self, Self::Error> {
        let name = r.name.trim();
        if name.is_empty() {
            return Err(InvalidFoodLog::EmptyName);
        }
        let meal_type: MealType = r.meal_type.trim().to_lowercase().parse()?;
        let log_date = parse_day(&r.date)?;

        let amounts = [
            ("calories", f64::from(r.calories)),
            ("protein", r.protein),
            ("carbs", r.carbs),
            ("fats", r.fats),
        ];
        if let Some(&(field, _)) = amounts.iter().find(|(_, v)| v.is_nan() || *v < 0.0) {
            return Err(InvalidFoodLog::Negative(field));
        }

        Ok(Self {
            name: name.to_string(),
            meal_type,
            log_date,
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fats: r.fats,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: String,
}

#[derive(Debug, Serialize)]
pub struct FoodLogResponse {
    pub id: Uuid,
    pub name: String,
    pub meal_type: String,
    pub date: Date,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<FoodLog> for FoodLogResponse {
    fn from(r: FoodLog) -> Self {
        Self {
            id: r.id,
            name: r.name,
            meal_type: r.meal_type,
            date: r.log_date,
            calories: r.calories,
            protein: r.protein,
            carbs: r.carbs,
            fats: r.fats,
            created_at: r.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CreatedFoodLogResponse {
    pub entry: FoodLogResponse,
    /// The entry's day after it was recomputed.
    pub day: DaySnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn request() -> CreateFoodLogRequest {
        CreateFoodLogRequest {
            name: "  Oatmeal ".into(),
            meal_type: "Breakfast".into(),
            date: "2025-03-14".into(),
            calories: 350,
            protein: 12.0,
            carbs: 60.0,
            fats: 6.5,
        }
    }

    #[test]
    fn valid_request_is_normalised() {
        let new = NewFoodLog::try_from(request()).unwrap();
        assert_eq!(new.name, "Oatmeal");
        assert_eq!(new.meal_type, MealType::Breakfast);
        assert_eq!(new.log_date, date!(2025 - 03 - 14));
        assert_eq!(new.calories, 350);
    }

    #[test]
    fn macros_default_to_zero() {
        let req: CreateFoodLogRequest = serde_json::from_str(
            r#"{"name":"Black coffee","meal_type":"snack","date":"2025-03-14","calories":2}"#,
        )
        .unwrap();
        let new = NewFoodLog::try_from(req).unwrap();
        assert_eq!((new.protein, new.carbs, new.fats), (0.0, 0.0, 0.0));
    }

    #[test]
    fn rejects_bad_input() {
        let mut r = request();
        r.name = "   ".into();
        assert_eq!(NewFoodLog::try_from(r), Err(InvalidFoodLog::EmptyName));

        let mut r = request();
        r.meal_type = "brunch".into();
        assert!(matches!(
            NewFoodLog::try_from(r),
            Err(InvalidFoodLog::MealType(_))
        ));

        let mut r = request();
        r.date = "2025-02-30".into();
        assert!(matches!(NewFoodLog::try_from(r), Err(InvalidFoodLog::Date(_))));

        let mut r = request();
        r.fats = -1.0;
        assert_eq!(NewFoodLog::try_from(r), Err(InvalidFoodLog::Negative("fats")));

        let mut r = request();
        r.calories = -10;
        assert_eq!(
            NewFoodLog::try_from(r),
            Err(InvalidFoodLog::Negative("calories"))
        );

        let mut r = request();
        r.protein = f64::NAN;
        assert_eq!(
            NewFoodLog::try_from(r),
            Err(InvalidFoodLog::Negative("protein"))
        );
    }
}
