//! Daily totals, diet grading and grade trends. Everything here is pure and
//! synchronous; persistence of the results belongs to the callers.

pub mod aggregate;
pub mod progress;
pub mod score;
pub mod trend;

pub use aggregate::{aggregate, FoodLogEntry, NutritionTotals};
pub use score::{score, DietScore, Grade, NutritionGoals, UnknownGrade};
pub use trend::{trend, Trend};
