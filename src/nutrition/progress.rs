use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MacroKind {
    Calories,
    Protein,
    Carbs,
    Fats,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressLevel {
    Good,
    Caution,
    Alert,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacroProgress {
    pub kind: MacroKind,
    pub consumed: f64,
    pub goal: f64,
    pub percent: f64,
    pub level: ProgressLevel,
    pub message: String,
}

/// Calories, carbs and fats are limits: staying under the goal is the aim.
/// Protein is a target with a comfortable band above it. Water counts up.
pub fn progress(kind: MacroKind, consumed: f64, goal: f64) -> MacroProgress {
    if goal <= 0.0 {
        return MacroProgress {
            kind,
            consumed,
            goal,
            percent: 0.0,
            level: ProgressLevel::Neutral,
            message: "No goal set".to_string(),
        };
    }

    let percent = consumed / goal * 100.0;
    let remaining = (goal - consumed).max(0.0).round() as i64;

    let (level, message) = match kind {
        MacroKind::Calories | MacroKind::Carbs | MacroKind::Fats => {
            let level = if consumed > goal {
                ProgressLevel::Alert
            } else if percent >= 95.0 {
                ProgressLevel::Caution
            } else if percent >= 70.0 {
                ProgressLevel::Good
            } else {
                ProgressLevel::Neutral
            };
            let message = if consumed > goal {
                format!("{} over goal", (consumed - goal).round() as i64)
            } else {
                format!("{remaining} remaining")
            };
            (level, message)
        }
        MacroKind::Protein => {
            let level = if percent < 50.0 {
                ProgressLevel::Alert
            } else if percent < 70.0 {
                ProgressLevel::Caution
            } else if percent < 90.0 {
                ProgressLevel::Neutral
            } else if percent <= 120.0 {
                ProgressLevel::Good
            } else if percent <= 150.0 {
                ProgressLevel::Caution
            } else {
                ProgressLevel::Alert
            };
            let message = if (90.0..=120.0).contains(&percent) {
                "Optimal intake!".to_string()
            } else if percent > 120.0 {
                "Above recommended".to_string()
            } else if percent < 70.0 {
                "Below target".to_string()
            } else {
                format!("{remaining}g to goal")
            };
            (level, message)
        }
        MacroKind::Water => {
            let level = if percent >= 100.0 {
                ProgressLevel::Good
            } else if percent >= 75.0 {
                ProgressLevel::Neutral
            } else if percent >= 50.0 {
                ProgressLevel::Caution
            } else {
                ProgressLevel::Alert
            };
            let message = if percent >= 100.0 {
                "Goal reached!".to_string()
            } else {
                format!("{remaining} glasses left")
            };
            (level, message)
        }
    };

    MacroProgress {
        kind,
        consumed,
        goal,
        percent: (percent * 10.0).round() / 10.0,
        level,
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_nutrients() {
        let p = progress(MacroKind::Calories, 1500.0, 2000.0);
        assert_eq!(p.level, ProgressLevel::Good);
        assert_eq!(p.message, "500 remaining");
        assert_eq!(p.percent, 75.0);

        let p = progress(MacroKind::Fats, 63.0, 65.0);
        assert_eq!(p.level, ProgressLevel::Caution);

        let p = progress(MacroKind::Carbs, 230.0, 200.0);
        assert_eq!(p.level, ProgressLevel::Alert);
        assert_eq!(p.message, "30 over goal");

        assert_eq!(progress(MacroKind::Calories, 300.0, 2000.0).level, ProgressLevel::Neutral);
    }

    #[test]
    fn protein_band() {
        let p = progress(MacroKind::Protein, 150.0, 150.0);
        assert_eq!(p.level, ProgressLevel::Good);
        assert_eq!(p.message, "Optimal intake!");

        let p = progress(MacroKind::Protein, 120.0, 150.0);
        assert_eq!(p.level, ProgressLevel::Neutral);
        assert_eq!(p.message, "30g to goal");

        assert_eq!(progress(MacroKind::Protein, 90.0, 150.0).message, "Below target");
        assert_eq!(progress(MacroKind::Protein, 60.0, 150.0).level, ProgressLevel::Alert);

        let p = progress(MacroKind::Protein, 200.0, 150.0);
        assert_eq!(p.level, ProgressLevel::Caution);
        assert_eq!(p.message, "Above recommended");
        assert_eq!(progress(MacroKind::Protein, 240.0, 150.0).level, ProgressLevel::Alert);
    }

    #[test]
    fn water() {
        let p = progress(MacroKind::Water, 8.0, 8.0);
        assert_eq!(p.level, ProgressLevel::Good);
        assert_eq!(p.message, "Goal reached!");

        let p = progress(MacroKind::Water, 3.0, 8.0);
        assert_eq!(p.level, ProgressLevel::Alert);
        assert_eq!(p.message, "5 glasses left");
    }

    #[test]
    fn zero_goal() {
        let p = progress(MacroKind::Protein, 40.0, 0.0);
        assert_eq!(p.level, ProgressLevel::Neutral);
        assert_eq!(p.percent, 0.0);
        assert_eq!(p.message, "No goal set");
    }
}
