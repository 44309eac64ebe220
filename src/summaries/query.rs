use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Map, Value};
use time::{format_description::well_known::Rfc3339, Date, Duration, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::DailySummary;

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown filter {0:?}, expected week, month or all")]
pub struct UnknownPeriod(pub String);

/// How far back a summary listing reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    Month,
    All,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::All => "all",
        }
    }

    /// First day included, counting weeks from Sunday.
    pub fn start(self, today: Date) -> Option<Date> {
        match self {
            Period::Week => {
                let back = today.weekday().number_days_from_sunday();
                Some(today - Duration::days(i64::from(back)))
            }
            Period::Month => Some(today - Duration::days(i64::from(today.day()) - 1)),
            Period::All => None,
        }
    }
}

impl FromStr for Period {
    type Err = UnknownPeriod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            "all" | "" => Ok(Period::All),
            other => Err(UnknownPeriod(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
}

impl PageRequest {
    /// Page is 1-based; out-of-range values are clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Saturates for absurd page numbers; such a page is simply empty.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_more: bool,
}

impl PageInfo {
    pub fn new(req: PageRequest, total: i64) -> Self {
        let total_pages = (total + req.limit - 1) / req.limit;
        Self {
            page: req.page,
            limit: req.limit,
            total,
            total_pages,
            has_more: req.page < total_pages,
        }
    }
}

/// Filters shared by the rows, count and averages of a listing.
#[derive(Debug, Clone)]
pub struct ListFilter {
    pub user_id: Uuid,
    pub since: Option<Date>,
    pub search: Option<String>,
}

/// Per-day means over every row a listing matches, rounded half up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Averages {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    /// Days without a water check-in count as zero glasses.
    pub water: i64,
}

impl Averages {
    /// `None` means stand for an empty set.
    pub fn from_means(
        calories: Option<f64>,
        protein: Option<f64>,
        carbs: Option<f64>,
        water: Option<f64>,
    ) -> Self {
        Self {
            calories: round_mean(calories),
            protein: round_mean(protein),
            carbs: round_mean(carbs),
            water: round_mean(water),
        }
    }
}

fn round_mean(mean: Option<f64>) -> i64 {
    mean.map_or(0, |m| (m + 0.5).floor() as i64)
}

/// Optional columns of a summary listing. Unrecognised names are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSet {
    pub calories: bool,
    pub protein: bool,
    pub carbs: bool,
    pub fats: bool,
    pub water: bool,
    pub steps: bool,
    pub sleep: bool,
    pub weight: bool,
}

impl MetricSet {
    pub fn all() -> Self {
        Self {
            calories: true,
            protein: true,
            carbs: true,
            fats: true,
            water: true,
            steps: true,
            sleep: true,
            weight: true,
        }
    }

    fn none() -> Self {
        Self {
            calories: false,
            protein: false,
            carbs: false,
            fats: false,
            water: false,
            steps: false,
            sleep: false,
            weight: false,
        }
    }

    pub fn parse(raw: Option<&str>) -> Self {
        let raw = match raw.map(str::trim) {
            None | Some("") | Some("all") => return Self::all(),
            Some(r) => r,
        };
        let mut set = Self::none();
        for name in raw.split(',').map(str::trim) {
            match name {
                "calories" => set.calories = true,
                "protein" => set.protein = true,
                "carbs" => set.carbs = true,
                "fats" => set.fats = true,
                "water" => set.water = true,
                "steps" => set.steps = true,
                "sleep" => set.sleep = true,
                "weight" => set.weight = true,
                _ => {}
            }
        }
        set
    }

    /// JSON view of a row with only the requested metrics. Identity,
    /// timestamps and the diet score are always included.
    pub fn project(&self, row: &DailySummary) -> Value {
        let mut out = Map::new();
        out.insert("id".into(), json!(row.id));
        out.insert("user_id".into(), json!(row.user_id));
        out.insert("date".into(), json!(row.date));
        out.insert("created_at".into(), rfc3339(row.created_at));
        out.insert("updated_at".into(), rfc3339(row.updated_at));
        out.insert("diet_quality_score".into(), json!(row.diet_quality_score));
        out.insert(
            "diet_quality_explanation".into(),
            json!(row.diet_quality_explanation),
        );

        let optional = [
            (self.calories, "total_calories", json!(row.total_calories)),
            (self.protein, "total_protein", json!(row.total_protein)),
            (self.carbs, "total_carbs", json!(row.total_carbs)),
            (self.fats, "total_fats", json!(row.total_fats)),
            (self.water, "water_intake", json!(row.water_intake)),
            (self.steps, "steps", json!(row.steps)),
            (self.sleep, "sleep_hours", json!(row.sleep_hours)),
            (self.weight, "weight", json!(row.weight)),
        ];
        for (wanted, key, value) in optional {
            if wanted {
                out.insert(key.into(), value);
            }
        }
        Value::Object(out)
    }
}

fn rfc3339(at: OffsetDateTime) -> Value {
    at.format(&Rfc3339).map(Value::String).unwrap_or(Value::Null)
}

/// Escapes `%`, `_` and `\` so a user term matches literally inside ILIKE.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
