use crate::catalog::EXERCISES;
use crate::goals::{completed_exercises, daily_goal_status};
use crate::models::{ExerciseHistoryPoint, GoalHistoryPoint, HealthData, WeeklySummary};
use chrono::{Datelike, Duration, Local, NaiveDate};

const EXERCISE_HISTORY_LIMIT: usize = 10;
const GOAL_HISTORY_DAYS: i64 = 7;

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn build_weekly_summary(data: &HealthData) -> WeeklySummary {
    build_weekly_summary_at(today(), data)
}

pub fn build_weekly_summary_at(today: NaiveDate, data: &HealthData) -> WeeklySummary {
    let start = week_start(today);
    let end = start + Duration::days(6);

    let mut active_days = 0u8;
    let mut running_km = 0.0;
    let mut strength_sets = 0usize;

    for day_offset in 0..7 {
        let key = date_key(start + Duration::days(day_offset));

        let has_exercises = data
            .exercises_for(&key)
            .is_some_and(|day| day.values().any(|done| *done));
        let running = data.running_for(&key).filter(|km| *km > 0.0);
        let strength = data.strength_for(&key);

        if has_exercises || running.is_some() || !strength.is_empty() {
            active_days += 1;
        }
        running_km += running.unwrap_or(0.0);
        strength_sets += strength.len();
    }

    let note = if active_days == 0 {
        "No activity recorded this week yet."
    } else {
        "Values are based on your entries for this week."
    };

    WeeklySummary {
        week: week_label(start),
        start_date: start.to_string(),
        end_date: end.to_string(),
        active_days,
        running_km,
        strength_sets,
        note: note.to_string(),
    }
}

pub fn build_exercise_history(data: &HealthData) -> Vec<ExerciseHistoryPoint> {
    data.exercises
        .keys()
        .rev()
        .filter_map(|date| {
            let done_count = completed_exercises(data, date);
            (done_count > 0).then(|| ExerciseHistoryPoint {
                date: date.clone(),
                done_count,
                total: EXERCISES.len(),
            })
        })
        .take(EXERCISE_HISTORY_LIMIT)
        .collect()
}

pub fn build_goal_history(data: &HealthData) -> Vec<GoalHistoryPoint> {
    build_goal_history_at(today(), data)
}

pub fn build_goal_history_at(today: NaiveDate, data: &HealthData) -> Vec<GoalHistoryPoint> {
    (0..GOAL_HISTORY_DAYS)
        .rev()
        .map(|offset| {
            let status = daily_goal_status(data, &date_key(today - Duration::days(offset)));
            GoalHistoryPoint {
                date: status.date,
                exercises_percent: status.exercises_percent,
                nutrition_percent: status.nutrition_percent,
                sport_percent: status.sport_percent,
                overall_percent: status.overall_percent,
                goal_reached: status.goal_reached,
            }
        })
        .collect()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

fn week_label(date: NaiveDate) -> String {
    let iso = date.iso_week();
    format!("{}-W{:02}", iso.year(), iso.week())
}
