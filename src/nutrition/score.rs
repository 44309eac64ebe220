use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::aggregate::NutritionTotals;

pub const CALORIES_WEIGHT: f64 = 0.30;
pub const PROTEIN_WEIGHT: f64 = 0.35;
pub const CARBS_WEIGHT: f64 = 0.20;
pub const FATS_WEIGHT: f64 = 0.15;

/// Lower bound of each grade, checked top-down. Anything below the last
/// bound is a `D`.
pub const GRADE_THRESHOLDS: [(f64, Grade); 6] = [
    (95.0, Grade::APlus),
    (90.0, Grade::A),
    (85.0, Grade::BPlus),
    (80.0, Grade::B),
    (70.0, Grade::CPlus),
    (60.0, Grade::C),
];

/// Daily targets from the user's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionGoals {
    pub calorie_goal: i32,
    pub protein_goal: i32,
    pub carbs_goal: i32,
    pub fats_goal: i32,
    /// Glasses of water; not part of the diet score.
    pub water_goal: i32,
}

impl Default for NutritionGoals {
    fn default() -> Self {
        Self {
            calorie_goal: 2000,
            protein_goal: 150,
            carbs_goal: 200,
            fats_goal: 65,
            water_goal: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "D")]
    D,
}

impl Grade {
    pub const ALL: [Grade; 7] = [
        Grade::APlus,
        Grade::A,
        Grade::BPlus,
        Grade::B,
        Grade::CPlus,
        Grade::C,
        Grade::D,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::D => "D",
        }
    }

    pub fn explanation(self) -> &'static str {
        match self {
            Grade::APlus => "Excellent! Your intake matches your goals almost exactly.",
            Grade::A => "Great job! You stayed very close to all of your targets.",
            Grade::BPlus => "Very good. A few macros drifted slightly from their targets.",
            Grade::B => "Good. Your intake is reasonably balanced against your goals.",
            Grade::CPlus => "Fair. Some macros are noticeably off target.",
            Grade::C => "Needs work. Several macros are well away from your goals.",
            Grade::D => "Poor. Your intake is far from your daily goals.",
        }
    }

    /// Grade for a weighted total in `0..=100`.
    pub fn from_total(total: f64) -> Grade {
        GRADE_THRESHOLDS
            .iter()
            .find(|(min, _)| total >= *min)
            .map(|(_, grade)| *grade)
            .unwrap_or(Grade::D)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown diet grade {0:?}")]
pub struct UnknownGrade(pub String);

impl FromStr for Grade {
    type Err = UnknownGrade;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Grade::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| UnknownGrade(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DietScore {
    pub grade: Grade,
    pub explanation: &'static str,
}

impl From<Grade> for DietScore {
    fn from(grade: Grade) -> Self {
        Self {
            grade,
            explanation: grade.explanation(),
        }
    }
}

/// Per-macro component scores and their weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub total: f64,
}

/// 0..=100, peaking when `total` is exactly the goal and falling off by one
/// point per percent of deviation in either direction. A goal of zero (or
/// below) scores 0.
pub fn component_score(total: f64, goal: f64) -> f64 {
    if goal <= 0.0 {
        return 0.0;
    }
    let percent = total / goal * 100.0;
    (100.0 - (percent - 100.0).abs()).max(0.0)
}

pub fn breakdown(totals: &NutritionTotals, goals: &NutritionGoals) -> ScoreBreakdown {
    let calories = component_score(totals.calories as f64, f64::from(goals.calorie_goal));
    let protein = component_score(totals.protein, f64::from(goals.protein_goal));
    let carbs = component_score(totals.carbs, f64::from(goals.carbs_goal));
    let fats = component_score(totals.fats, f64::from(goals.fats_goal));

    ScoreBreakdown {
        calories,
        protein,
        carbs,
        fats,
        total: CALORIES_WEIGHT * calories
            + PROTEIN_WEIGHT * protein
            + CARBS_WEIGHT * carbs
            + FATS_WEIGHT * fats,
    }
}

pub fn score(totals: &NutritionTotals, goals: &NutritionGoals) -> DietScore {
    Grade::from_total(breakdown(totals, goals).total).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals(calories: i32, protein: i32, carbs: i32, fats: i32) -> NutritionGoals {
        NutritionGoals {
            calorie_goal: calories,
            protein_goal: protein,
            carbs_goal: carbs,
            fats_goal: fats,
            water_goal: 8,
        }
    }

    fn totals(calories: i64, protein: f64, carbs: f64, fats: f64) -> NutritionTotals {
        NutritionTotals {
            calories,
            protein,
            carbs,
            fats,
        }
    }

    #[test]
    fn weights_sum_to_one() {
        let sum = CALORIES_WEIGHT + PROTEIN_WEIGHT + CARBS_WEIGHT + FATS_WEIGHT;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn totals_on_goal_score_a_plus() {
        for g in [goals(2000, 150, 200, 65), goals(1, 1, 1, 1), goals(3500, 220, 410, 120)] {
            let t = totals(
                i64::from(g.calorie_goal),
                f64::from(g.protein_goal),
                f64::from(g.carbs_goal),
                f64::from(g.fats_goal),
            );
            let b = breakdown(&t, &g);
            assert!((b.total - 100.0).abs() < 1e-9);
            assert_eq!(score(&t, &g).grade, Grade::APlus);
        }
    }

    #[test]
    fn nothing_eaten_scores_d() {
        let g = goals(2000, 150, 200, 65);
        let b = breakdown(&NutritionTotals::default(), &g);
        assert_eq!(b.total, 0.0);
        assert_eq!(score(&NutritionTotals::default(), &g).grade, Grade::D);
    }

    #[test]
    fn deviation_is_symmetric() {
        let g = goals(2000, 150, 200, 65);
        let over = breakdown(&totals(2000, 225.0, 200.0, 65.0), &g);
        let under = breakdown(&totals(2000, 75.0, 200.0, 65.0), &g);
        assert!((over.protein - 50.0).abs() < 1e-9);
        assert!((over.protein - under.protein).abs() < 1e-9);
    }

    #[test]
    fn zero_goal_scores_zero_without_nan() {
        assert_eq!(component_score(0.0, 0.0), 0.0);
        assert_eq!(component_score(120.0, 0.0), 0.0);

        let b = breakdown(&totals(2000, 150.0, 200.0, 65.0), &goals(2000, 0, 200, 65));
        assert_eq!(b.protein, 0.0);
        assert!(b.total.is_finite());
        assert!((b.total - 65.0).abs() < 1e-9);
        assert_eq!(Grade::from_total(b.total), Grade::C);
    }

    #[test]
    fn far_overshoot_floors_at_zero() {
        assert_eq!(component_score(450.0, 150.0), 0.0);
    }

    #[test]
    fn negative_totals_use_the_same_formula() {
        // -10% of goal is 110 points off target
        assert_eq!(component_score(-15.0, 150.0), 0.0);

        let s = score(&totals(-200, -5.0, 0.0, -1.0), &goals(2000, 150, 200, 65));
        assert_eq!(s.grade, Grade::D);
    }

    #[test]
    fn typical_day_grades_a() {
        let g = goals(2000, 150, 200, 65);
        let t = totals(1800, 140.0, 210.0, 70.0);
        let b = breakdown(&t, &g);

        assert!((b.calories - 90.0).abs() < 1e-9);
        assert!((b.protein - 93.333).abs() < 1e-3);
        assert!((b.carbs - 95.0).abs() < 1e-9);
        assert!((b.fats - 92.308).abs() < 1e-3);
        assert!((b.total - 92.51).abs() < 0.01);

        let s = score(&t, &g);
        assert_eq!(s.grade, Grade::A);
        assert_eq!(s.explanation, Grade::A.explanation());
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        assert_eq!(Grade::from_total(100.0), Grade::APlus);
        assert_eq!(Grade::from_total(95.0), Grade::APlus);
        assert_eq!(Grade::from_total(94.99), Grade::A);
        assert_eq!(Grade::from_total(90.0), Grade::A);
        assert_eq!(Grade::from_total(85.0), Grade::BPlus);
        assert_eq!(Grade::from_total(80.0), Grade::B);
        assert_eq!(Grade::from_total(79.99), Grade::CPlus);
        assert_eq!(Grade::from_total(70.0), Grade::CPlus);
        assert_eq!(Grade::from_total(60.0), Grade::C);
        assert_eq!(Grade::from_total(59.99), Grade::D);
        assert_eq!(Grade::from_total(0.0), Grade::D);
    }

    #[test]
    fn same_inputs_same_score() {
        let g = goals(2100, 160, 230, 70);
        let t = totals(1650, 120.5, 260.0, 81.0);
        assert_eq!(score(&t, &g), score(&t, &g));
    }

    #[test]
    fn grade_strings_round_trip_and_reject_unknown() {
        for g in Grade::ALL {
            assert_eq!(g.as_str().parse::<Grade>(), Ok(g));
            assert_eq!(g.to_string(), g.as_str());
        }
        assert_eq!("F".parse::<Grade>(), Err(UnknownGrade("F".into())));
        assert!("a+".parse::<Grade>().is_err());
    }

    #[test]
    fn diet_score_serializes_grade_as_letter() {
        let json = serde_json::to_value(DietScore::from(Grade::BPlus)).unwrap();
        assert_eq!(json["grade"], "B+");
        assert_eq!(json["explanation"], Grade::BPlus.explanation());
    }
}
