use serde::Deserialize;

use crate::nutrition::NutritionGoals;

#[derive(Debug, Deserialize)]
pub struct PutGoalsRequest {
    pub daily_calorie_goal: i32,
    pub daily_protein_goal: i32,
    pub daily_carbs_goal: i32,
    pub daily_fats_goal: i32,
    #[serde(default = "default_water_goal")]
    pub daily_water_goal: i32,
}

fn default_water_goal() -> i32 {
    8
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0} must be greater than zero")]
pub struct InvalidGoal(pub &'static str);

impl TryFrom<PutGoalsRequest> for NutritionGoals {
    type Error = InvalidGoal;

    fn try_from(r: PutGoalsRequest) -> Result<Self, Self::Error> {
        let checks = [
            ("daily_calorie_goal", r.daily_calorie_goal),
            ("daily_protein_goal", r.daily_protein_goal),
            ("daily_carbs_goal", r.daily_carbs_goal),
            ("daily_fats_goal", r.daily_fats_goal),
            ("daily_water_goal", r.daily_water_goal),
        ];
        if let Some(&(field, _)) = checks.iter().find(|(_, v)| *v <= 0) {
            return Err(InvalidGoal(field));
        }
        Ok(Self {
            calorie_goal: r.daily_calorie_goal,
            protein_goal: r.daily_protein_goal,
            carbs_goal: r.daily_carbs_goal,
            fats_goal: r.daily_fats_goal,
            water_goal: r.daily_water_goal,
        })
    }
}
