use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

/// The macro values of a single logged food, as seen by the aggregator.
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLogEntry {
    pub user_id: Uuid,
    pub date: Date,
    pub calories: i32,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Consumed macros for one user on one calendar date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: i64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

impl NutritionTotals {
    fn add(&mut self, entry: &FoodLogEntry) {
        self.calories += i64::from(entry.calories);
        self.protein += entry.protein;
        self.carbs += entry.carbs;
        self.fats += entry.fats;
    }
}

/// Sums every entry logged on `date`. Entries of other days are skipped;
/// no matching entry gives zero totals.
///
/// Ownership is the caller's concern: `entries` is expected to belong to a
/// single user already.
pub fn aggregate(entries: &[FoodLogEntry], date: Date) -> NutritionTotals {
    entries
        .iter()
        .filter(|e| e.date == date)
        .fold(NutritionTotals::default(), |mut totals, e| {
            totals.add(e);
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn entry(date: Date, calories: i32, protein: f64, carbs: f64, fats: f64) -> FoodLogEntry {
        FoodLogEntry {
            user_id: Uuid::nil(),
            date,
            calories,
            protein,
            carbs,
            fats,
        }
    }

    #[test]
    fn empty_input_gives_zero_totals() {
        assert_eq!(aggregate(&[], date!(2025 - 03 - 14)), NutritionTotals::default());
    }

    #[test]
    fn sums_each_macro_independently() {
        let day = date!(2025 - 03 - 14);
        let entries = vec![
            entry(day, 220, 18.0, 4.0, 15.0),
            entry(day, 140, 6.0, 26.0, 2.0),
            entry(day, 480, 42.0, 18.0, 26.0),
        ];

        let totals = aggregate(&entries, day);

        assert_eq!(totals.calories, 840);
        assert_eq!(totals.protein, 66.0);
        assert_eq!(totals.carbs, 48.0);
        assert_eq!(totals.fats, 43.0);
    }

    #[test]
    fn ignores_entries_from_other_days() {
        let day = date!(2025 - 03 - 14);
        let entries = vec![
            entry(date!(2025 - 03 - 13), 900, 50.0, 90.0, 30.0),
            entry(day, 200, 30.0, 15.0, 3.0),
            entry(date!(2025 - 03 - 15), 700, 20.0, 80.0, 25.0),
        ];

        let totals = aggregate(&entries, day);

        assert_eq!(
            totals,
            NutritionTotals {
                calories: 200,
                protein: 30.0,
                carbs: 15.0,
                fats: 3.0,
            }
        );
    }

    #[test]
    fn no_matching_day_is_not_an_error() {
        let entries = vec![entry(date!(2025 - 01 - 01), 500, 10.0, 10.0, 10.0)];
        assert_eq!(
            aggregate(&entries, date!(2025 - 01 - 02)),
            NutritionTotals::default()
        );
    }
}
