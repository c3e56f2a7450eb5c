use crate::catalog::{find_exercise, find_level, EXERCISES};
use crate::models::{HealthData, StrengthEntry};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EntryError {
    #[error("unknown exercise '{0}'")]
    UnknownExercise(String),
    #[error("unknown nutrition level '{0}'")]
    UnknownLevel(String),
    #[error("cube {cube} is outside level '{level}' (max {max_units} units)")]
    CubeOutOfRange {
        level: String,
        cube: u32,
        max_units: u32,
    },
    #[error("please enter a valid distance in km (e.g. 5 or 5,5)")]
    InvalidDistance,
    #[error("please enter a valid weight or leave the field empty")]
    InvalidWeight,
    #[error("exercise, repetitions and sets are required; weight is optional")]
    IncompleteStrength,
    #[error("no strength entry #{index} on {date}")]
    UnknownStrengthEntry { date: String, index: usize },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunningUpdate {
    Saved(f64),
    Cleared,
}

fn parse_decimal(raw: &str) -> Option<f64> {
    raw.trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

pub fn parse_distance(raw: &str) -> Result<f64, EntryError> {
    parse_decimal(raw)
        .filter(|km| *km >= 0.0)
        .ok_or(EntryError::InvalidDistance)
}

pub fn parse_weight(raw: Option<&str>) -> Result<Option<f64>, EntryError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_decimal(text)
            .filter(|kg| *kg >= 0.0)
            .map(Some)
            .ok_or(EntryError::InvalidWeight),
    }
}

pub fn set_exercise_done(
    data: &mut HealthData,
    date: &str,
    exercise_id: &str,
    done: bool,
) -> Result<(), EntryError> {
    let exercise =
        find_exercise(exercise_id).ok_or_else(|| EntryError::UnknownExercise(exercise_id.to_string()))?;
    data.exercises
        .entry(date.to_string())
        .or_default()
        .insert(exercise.id.to_string(), done);
    Ok(())
}

pub fn reset_exercises(data: &mut HealthData, date: &str) {
    let day = data.exercises.entry(date.to_string()).or_default();
    for exercise in EXERCISES {
        day.insert(exercise.id.to_string(), false);
    }
}

pub fn save_running(data: &mut HealthData, date: &str, raw: &str) -> Result<RunningUpdate, EntryError> {
    if raw.trim().is_empty() {
        clear_running(data, date);
        return Ok(RunningUpdate::Cleared);
    }
    let km = parse_distance(raw)?;
    data.sport.running.insert(date.to_string(), km);
    Ok(RunningUpdate::Saved(km))
}

pub fn clear_running(data: &mut HealthData, date: &str) -> bool {
    data.sport.running.remove(date).is_some()
}

pub fn loose_count(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|n| n.fract() == 0.0).map(|n| n as i64)),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn loose_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

pub fn add_strength(
    data: &mut HealthData,
    date: &str,
    exercise: &str,
    weight: Option<&str>,
    reps: Option<i64>,
    sets: Option<i64>,
) -> Result<StrengthEntry, EntryError> {
    let weight = parse_weight(weight)?;
    let exercise = exercise.trim();
    let reps = positive_count(reps);
    let sets = positive_count(sets);

    let (Some(reps), Some(sets)) = (reps, sets) else {
        return Err(EntryError::IncompleteStrength);
    };
    if exercise.is_empty() {
        return Err(EntryError::IncompleteStrength);
    }

    let entry = StrengthEntry {
        exercise: exercise.to_string(),
        weight,
        reps,
        sets,
    };
    data.sport
        .strength
        .entry(date.to_string())
        .or_default()
        .push(entry.clone());
    Ok(entry)
}

fn positive_count(value: Option<i64>) -> Option<u32> {
    value
        .filter(|count| *count > 0)
        .and_then(|count| u32::try_from(count).ok())
}

pub fn remove_strength(data: &mut HealthData, date: &str, index: usize) -> Result<StrengthEntry, EntryError> {
    let missing = || EntryError::UnknownStrengthEntry {
        date: date.to_string(),
        index,
    };
    let entries = data.sport.strength.get_mut(date).ok_or_else(missing)?;
    if index >= entries.len() {
        return Err(missing());
    }
    Ok(entries.remove(index))
}

/// Applies a click on cube `cube` (0-based) of a pyramid level and returns
/// the new count. Clicking the topmost filled cube steps back by one.
pub fn click_nutrition_cube(
    data: &mut HealthData,
    date: &str,
    level_id: &str,
    cube: u32,
) -> Result<u32, EntryError> {
    let level = find_level(level_id).ok_or_else(|| EntryError::UnknownLevel(level_id.to_string()))?;
    if cube >= level.max_units {
        return Err(EntryError::CubeOutOfRange {
            level: level.id.to_string(),
            cube,
            max_units: level.max_units,
        });
    }

    let current = data.nutrition_count(date, level.id);
    let next = if cube + 1 == current { cube } else { cube + 1 };
    let next = next.min(level.max_units);

    data.nutrition
        .entry(date.to_string())
        .or_default()
        .insert(level.id.to_string(), next);
    Ok(next)
}
