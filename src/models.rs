use crate::catalog::{Exercise, NutritionLevel};
use crate::goals::{DailyGoalStatus, LevelStatus};
use crate::timers::TimerSnapshot;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct HealthData {
    #[serde(default, deserialize_with = "lenient::exercises")]
    pub exercises: BTreeMap<String, BTreeMap<String, bool>>,
    #[serde(default, deserialize_with = "lenient::or_default")]
    pub sport: SportData,
    #[serde(default, deserialize_with = "lenient::nutrition")]
    pub nutrition: BTreeMap<String, BTreeMap<String, u32>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SportData {
    #[serde(default, deserialize_with = "lenient::running")]
    pub running: BTreeMap<String, f64>,
    #[serde(default, deserialize_with = "lenient::strength")]
    pub strength: BTreeMap<String, Vec<StrengthEntry>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrengthEntry {
    pub exercise: String,
    pub weight: Option<f64>,
    pub reps: u32,
    pub sets: u32,
}

impl HealthData {
    pub fn exercises_for(&self, date: &str) -> Option<&BTreeMap<String, bool>> {
        self.exercises.get(date)
    }

    pub fn running_for(&self, date: &str) -> Option<f64> {
        self.sport.running.get(date).copied()
    }

    pub fn strength_for(&self, date: &str) -> &[StrengthEntry] {
        self.sport.strength.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn nutrition_count(&self, date: &str, level_id: &str) -> u32 {
        self.nutrition
            .get(date)
            .and_then(|day| day.get(level_id))
            .copied()
            .unwrap_or(0)
    }
}

/// Coercions applied while reading a stored or imported document. Bad leaves
/// fall back to safe values instead of failing the whole document.
mod lenient {
    use super::*;

    pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: serde::de::DeserializeOwned + Default,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or_default())
    }

    pub fn exercises<'de, D>(deserializer: D) -> Result<BTreeMap<String, BTreeMap<String, bool>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(date_map(deserializer)?
            .into_iter()
            .filter_map(|(date, day)| match day {
                Value::Object(flags) => Some((
                    date,
                    flags
                        .into_iter()
                        .map(|(id, flag)| (id, truthy(&flag)))
                        .collect(),
                )),
                _ => None,
            })
            .collect())
    }

    pub fn running<'de, D>(deserializer: D) -> Result<BTreeMap<String, f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(date_map(deserializer)?
            .into_iter()
            .filter_map(|(date, km)| {
                km.as_f64()
                    .filter(|km| km.is_finite())
                    .map(|km| (date, km))
            })
            .collect())
    }

    pub fn strength<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<StrengthEntry>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(date_map(deserializer)?
            .into_iter()
            .filter_map(|(date, entries)| match entries {
                Value::Array(items) => Some((date, items.iter().filter_map(strength_entry).collect())),
                _ => None,
            })
            .collect())
    }

    pub fn nutrition<'de, D>(deserializer: D) -> Result<BTreeMap<String, BTreeMap<String, u32>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(date_map(deserializer)?
            .into_iter()
            .filter_map(|(date, day)| match day {
                Value::Object(levels) => Some((
                    date,
                    levels
                        .into_iter()
                        .map(|(id, count)| (id, count_value(&count)))
                        .collect(),
                )),
                _ => None,
            })
            .collect())
    }

    fn date_map<'de, D>(deserializer: D) -> Result<serde_json::Map<String, Value>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            Some(Value::Object(map)) => Ok(map),
            _ => Ok(serde_json::Map::new()),
        }
    }

    fn strength_entry(value: &Value) -> Option<StrengthEntry> {
        let entry = value.as_object()?;
        let exercise = match entry.get("exercise") {
            Some(Value::String(name)) => name.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        let weight = entry
            .get("weight")
            .and_then(Value::as_f64)
            .filter(|weight| weight.is_finite() && *weight >= 0.0);

        Some(StrengthEntry {
            exercise,
            weight,
            reps: entry.get("reps").map(count_value).unwrap_or(0),
            sets: entry.get("sets").map(count_value).unwrap_or(0),
        })
    }

    fn truthy(value: &Value) -> bool {
        match value {
            Value::Bool(flag) => *flag,
            Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
            Value::String(text) => !text.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
            Value::Null => false,
        }
    }

    fn count_value(value: &Value) -> u32 {
        let raw = match value {
            Value::Number(number) => number.as_f64().unwrap_or(0.0),
            Value::String(text) => text.trim().parse::<f64>().unwrap_or(0.0),
            Value::Bool(true) => 1.0,
            _ => 0.0,
        };
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        raw.floor().min(f64::from(u32::MAX)) as u32
    }
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub daily_goal_percent: u8,
    pub exercises: &'static [Exercise],
    pub nutrition_levels: &'static [NutritionLevel],
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub id: String,
    pub title: String,
    pub detail: String,
    pub done: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseDayResponse {
    pub date: String,
    pub done_count: usize,
    pub total: usize,
    pub items: Vec<ExerciseItem>,
}

#[derive(Debug, Deserialize)]
pub struct ExerciseToggleRequest {
    pub done: bool,
}

#[derive(Debug, Serialize)]
pub struct NutritionDayResponse {
    pub date: String,
    pub levels: Vec<LevelStatus>,
}

#[derive(Debug, Deserialize)]
pub struct CubeClickRequest {
    pub cube: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SportDayResponse {
    pub date: String,
    pub running_km: Option<f64>,
    pub strength: Vec<StrengthEntry>,
}

#[derive(Debug, Deserialize)]
pub struct RunningRequest {
    #[serde(default)]
    pub distance: String,
}

#[derive(Debug, Deserialize)]
pub struct StrengthRequest {
    #[serde(default)]
    pub exercise: String,
    #[serde(default)]
    pub weight: Option<Value>,
    #[serde(default)]
    pub reps: Option<Value>,
    #[serde(default)]
    pub sets: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseHistoryPoint {
    pub date: String,
    pub done_count: usize,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GoalHistoryPoint {
    pub date: String,
    pub exercises_percent: u8,
    pub nutrition_percent: u8,
    pub sport_percent: u8,
    pub overall_percent: u8,
    pub goal_reached: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week: String,
    pub start_date: String,
    pub end_date: String,
    pub active_days: u8,
    pub running_km: f64,
    pub strength_sets: usize,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub status: DailyGoalStatus,
    pub note: String,
}

#[derive(Debug, Serialize)]
pub struct TimersResponse {
    pub timers: Vec<TimerSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported_days: usize,
}
