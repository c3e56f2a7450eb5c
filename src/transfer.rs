use crate::models::HealthData;
use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;

const REQUIRED_KEYS: [&str; 3] = ["exercises", "sport", "nutrition"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("import file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("import file must contain a JSON object")]
    NotAnObject,
    #[error("import file does not look like an export (missing '{0}')")]
    MissingKey(&'static str),
}

pub fn export_file_name(today: NaiveDate) -> String {
    format!("health-data-{}.json", today.format("%Y-%m-%d"))
}

pub fn export_json(data: &HealthData) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(data)
}

pub fn parse_import(bytes: &[u8]) -> Result<HealthData, ImportError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Object(fields) = &value else {
        return Err(ImportError::NotAnObject);
    };
    if let Some(missing) = REQUIRED_KEYS.into_iter().find(|key| !fields.contains_key(*key)) {
        return Err(ImportError::MissingKey(missing));
    }
    Ok(serde_json::from_value(value)?)
}

pub fn day_count(data: &HealthData) -> usize {
    let mut days: Vec<&String> = data
        .exercises
        .keys()
        .chain(data.sport.running.keys())
        .chain(data.sport.strength.keys())
        .chain(data.nutrition.keys())
        .collect();
    days.sort();
    days.dedup();
    days.len()
}
