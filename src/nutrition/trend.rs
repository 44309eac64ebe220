use serde::Serialize;

use super::score::Grade;

/// Change between two grades, for the up/down arrow next to a day's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Trend {
    pub magnitude: u32,
    pub is_improvement: bool,
}

fn grade_value(grade: Grade) -> i32 {
    match grade {
        Grade::APlus => 100,
        Grade::A => 95,
        Grade::BPlus => 90,
        Grade::B => 85,
        Grade::CPlus => 75,
        Grade::C => 65,
        Grade::D => 50,
    }
}

/// `None` when both grades carry the same value, so the caller can leave the
/// indicator out entirely.
pub fn trend(current: Grade, previous: Grade) -> Option<Trend> {
    let diff = grade_value(current) - grade_value(previous);
    if diff == 0 {
        return None;
    }
    Some(Trend {
        magnitude: diff.unsigned_abs(),
        is_improvement: diff > 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_grades_have_no_trend() {
        for g in Grade::ALL {
            assert_eq!(trend(g, g), None);
        }
    }

    #[test]
    fn improvement_and_decline() {
        assert_eq!(
            trend(Grade::A, Grade::C),
            Some(Trend {
                magnitude: 30,
                is_improvement: true,
            })
        );
        assert_eq!(
            trend(Grade::CPlus, Grade::APlus),
            Some(Trend {
                magnitude: 25,
                is_improvement: false,
            })
        );
        assert_eq!(trend(Grade::C, Grade::D).map(|t| t.magnitude), Some(15));
    }

    #[test]
    fn better_grades_never_lower_value() {
        for pair in Grade::ALL.windows(2) {
            assert!(grade_value(pair[0]) > grade_value(pair[1]));
        }
    }
}
