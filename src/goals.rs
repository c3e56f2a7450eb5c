use crate::catalog::{
    DAILY_GOAL_PERCENT, EXERCISES, NUTRITION_LEVELS, STRENGTH_MIN_EXERCISES_FOR_GOAL,
    STRENGTH_MIN_SETS_PER_EXERCISE_FOR_GOAL,
};
use crate::models::HealthData;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalCategory {
    Exercises,
    Nutrition,
    Sport,
}

impl GoalCategory {
    pub fn label(self) -> &'static str {
        match self {
            GoalCategory::Exercises => "Exercises",
            GoalCategory::Nutrition => "Nutrition",
            GoalCategory::Sport => "Sport",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SportBasis {
    Running,
    Strength,
    None,
}

impl SportBasis {
    pub fn label(self) -> &'static str {
        match self {
            SportBasis::Running => "running",
            SportBasis::Strength => "strength training",
            SportBasis::None => "nothing yet",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LevelStatus {
    pub id: &'static str,
    pub label: &'static str,
    pub count: u32,
    pub max_units: u32,
    pub required_units: u32,
    pub percent: u8,
    pub met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct NutritionStatus {
    /// Bottleneck: the lowest level percent, not the average.
    pub percent: u8,
    pub all_levels_met: bool,
    pub levels: Vec<LevelStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SportStatus {
    pub percent: u8,
    pub met: bool,
    pub based_on: SportBasis,
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyGoalStatus {
    pub date: String,
    pub exercises_percent: u8,
    pub nutrition_percent: u8,
    pub sport_percent: u8,
    pub overall_percent: u8,
    pub goal_reached: bool,
    pub exercises_met: bool,
    pub nutrition_met: bool,
    pub sport_met: bool,
    pub sport_based_on: SportBasis,
    pub missing: Vec<GoalCategory>,
}

pub fn clamp_percent(value: f64) -> u8 {
    if !value.is_finite() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

pub fn completed_exercises(data: &HealthData, date: &str) -> usize {
    data.exercises_for(date)
        .map(|day| {
            EXERCISES
                .iter()
                .filter(|exercise| day.get(exercise.id).copied().unwrap_or(false))
                .count()
        })
        .unwrap_or(0)
}

pub fn exercises_percent(data: &HealthData, date: &str) -> u8 {
    let total = EXERCISES.len();
    if total == 0 {
        return 0;
    }
    let done = completed_exercises(data, date);
    clamp_percent(done as f64 / total as f64 * 100.0)
}

pub fn nutrition_status(data: &HealthData, date: &str) -> NutritionStatus {
    let levels: Vec<LevelStatus> = NUTRITION_LEVELS
        .iter()
        .map(|level| {
            let count = data.nutrition_count(date, level.id);
            let required_units = level.required_units();
            LevelStatus {
                id: level.id,
                label: level.label,
                count,
                max_units: level.max_units,
                required_units,
                percent: clamp_percent(f64::from(count) / f64::from(level.max_units) * 100.0),
                met: count >= required_units,
            }
        })
        .collect();

    NutritionStatus {
        percent: levels.iter().map(|level| level.percent).min().unwrap_or(0),
        all_levels_met: levels.iter().all(|level| level.met),
        levels,
    }
}

pub fn sport_status(data: &HealthData, date: &str) -> SportStatus {
    let running_met = data.running_for(date).is_some_and(|km| km.is_finite() && km > 0.0);

    let strength = data.strength_for(date);
    let strength_met = strength.len() >= STRENGTH_MIN_EXERCISES_FOR_GOAL
        && strength
            .iter()
            .all(|entry| entry.sets >= STRENGTH_MIN_SETS_PER_EXERCISE_FOR_GOAL);

    let based_on = if running_met {
        SportBasis::Running
    } else if strength_met {
        SportBasis::Strength
    } else {
        SportBasis::None
    };
    let met = running_met || strength_met;

    SportStatus {
        percent: if met { 100 } else { 0 },
        met,
        based_on,
    }
}

pub fn daily_goal_status(data: &HealthData, date: &str) -> DailyGoalStatus {
    let exercises_percent = exercises_percent(data, date);
    let nutrition = nutrition_status(data, date);
    let sport = sport_status(data, date);

    let exercises_met = exercises_percent >= DAILY_GOAL_PERCENT;
    let nutrition_met = nutrition.all_levels_met;
    let sport_met = sport.met;

    let sum = u32::from(exercises_percent) + u32::from(nutrition.percent) + u32::from(sport.percent);
    let overall_percent = clamp_percent(f64::from(sum) / 3.0);

    let missing = [
        (GoalCategory::Exercises, exercises_met),
        (GoalCategory::Nutrition, nutrition_met),
        (GoalCategory::Sport, sport_met),
    ]
    .into_iter()
    .filter_map(|(category, met)| (!met).then_some(category))
    .collect();

    DailyGoalStatus {
        date: date.to_string(),
        exercises_percent,
        nutrition_percent: nutrition.percent,
        sport_percent: sport.percent,
        overall_percent,
        goal_reached: exercises_met && nutrition_met && sport_met,
        exercises_met,
        nutrition_met,
        sport_met,
        sport_based_on: sport.based_on,
        missing,
    }
}

pub fn status_note(status: &DailyGoalStatus) -> String {
    if status.goal_reached {
        return format!(
            "Daily goal reached (sport today based on: {})",
            status.sport_based_on.label()
        );
    }

    let missing: Vec<&str> = status.missing.iter().map(|category| category.label()).collect();
    format!(
        "Daily goal not reached yet. Open: {}. (sport today based on: {})",
        missing.join(", "),
        status.sport_based_on.label()
    )
}

pub fn goal_description() -> String {
    format!(
        "Exercises >= {DAILY_GOAL_PERCENT}%, nutrition: every level >= {DAILY_GOAL_PERCENT}%, sport: running or strength met."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StrengthEntry;

    const DAY: &str = "2026-01-05";

    fn with_exercises(done: usize) -> HealthData {
        let mut data = HealthData::default();
        let day = data.exercises.entry(DAY.to_string()).or_default();
        for exercise in EXERCISES.iter().take(done) {
            day.insert(exercise.id.to_string(), true);
        }
        data
    }

    fn set_nutrition(data: &mut HealthData, counts: [u32; 6]) {
        let day = data.nutrition.entry(DAY.to_string()).or_default();
        for (level, count) in NUTRITION_LEVELS.iter().zip(counts) {
            day.insert(level.id.to_string(), count);
        }
    }

    fn strength(sets: &[u32]) -> Vec<StrengthEntry> {
        sets.iter()
            .enumerate()
            .map(|(i, sets)| StrengthEntry {
                exercise: format!("exercise {i}"),
                weight: None,
                reps: 10,
                sets: *sets,
            })
            .collect()
    }

    #[test]
    fn exercises_percent_per_count() {
        for done in 0..=6 {
            let data = with_exercises(done);
            let expected = (done as f64 / 6.0 * 100.0).round() as u8;
            assert_eq!(exercises_percent(&data, DAY), expected, "done = {done}");
        }
        assert_eq!(exercises_percent(&with_exercises(5), DAY), 83);
    }

    #[test]
    fn exercises_ignore_unknown_and_false_flags() {
        let mut data = with_exercises(2);
        let day = data.exercises.get_mut(DAY).unwrap();
        day.insert("cold_icebath_head".to_string(), false);
        day.insert("handstand".to_string(), true);
        assert_eq!(completed_exercises(&data, DAY), 2);
        assert_eq!(exercises_percent(&data, "2026-01-06"), 0);
    }

    #[test]
    fn nutrition_level_needs_its_own_threshold() {
        let mut data = HealthData::default();
        set_nutrition(&mut data, [6, 5, 3, 4, 2, 1]);
        let status = nutrition_status(&data, DAY);
        let carbs = status.levels.iter().find(|level| level.id == "carbs").unwrap();
        assert_eq!(carbs.required_units, 4);
        assert!(!carbs.met);
        assert!(!status.all_levels_met);

        set_nutrition(&mut data, [6, 5, 4, 4, 2, 1]);
        assert!(nutrition_status(&data, DAY).all_levels_met);
    }

    #[test]
    fn nutrition_percent_is_bottleneck() {
        let mut data = HealthData::default();
        set_nutrition(&mut data, [6, 5, 4, 4, 1, 1]);
        let status = nutrition_status(&data, DAY);
        let percents: Vec<u8> = status.levels.iter().map(|level| level.percent).collect();
        assert_eq!(percents, vec![100, 100, 100, 100, 50, 100]);
        assert_eq!(status.percent, 50);
    }

    #[test]
    fn nutrition_counts_above_max_clamp_percent() {
        let mut data = HealthData::default();
        set_nutrition(&mut data, [12, 5, 4, 4, 2, 3]);
        let status = nutrition_status(&data, DAY);
        assert!(status.levels.iter().all(|level| level.percent <= 100));
        assert_eq!(status.percent, 100);
    }

    #[test]
    fn sport_running_must_be_positive() {
        let mut data = HealthData::default();
        data.sport.running.insert(DAY.to_string(), 0.0);
        assert!(!sport_status(&data, DAY).met);

        data.sport.running.insert(DAY.to_string(), 0.5);
        let status = sport_status(&data, DAY);
        assert!(status.met);
        assert_eq!(status.percent, 100);
        assert_eq!(status.based_on, SportBasis::Running);
    }

    #[test]
    fn sport_strength_rule() {
        let mut data = HealthData::default();
        data.sport.strength.insert(DAY.to_string(), strength(&[3, 3]));
        let status = sport_status(&data, DAY);
        assert!(status.met);
        assert_eq!(status.based_on, SportBasis::Strength);

        data.sport.strength.insert(DAY.to_string(), strength(&[3, 2]));
        let status = sport_status(&data, DAY);
        assert!(!status.met);
        assert_eq!(status.percent, 0);
        assert_eq!(status.based_on, SportBasis::None);

        data.sport.strength.insert(DAY.to_string(), strength(&[5]));
        assert!(!sport_status(&data, DAY).met);
    }

    #[test]
    fn running_wins_basis_when_both_met() {
        let mut data = HealthData::default();
        data.sport.running.insert(DAY.to_string(), 3.0);
        data.sport.strength.insert(DAY.to_string(), strength(&[4, 4]));
        assert_eq!(sport_status(&data, DAY).based_on, SportBasis::Running);
    }

    #[test]
    fn goal_requires_every_category() {
        // 5/6 exercises (83%), nutrition at 100%, sport met: reached.
        let mut data = with_exercises(5);
        set_nutrition(&mut data, [6, 5, 4, 4, 2, 1]);
        data.sport.running.insert(DAY.to_string(), 5.0);
        let status = daily_goal_status(&data, DAY);
        assert!(status.goal_reached);
        assert!(status.missing.is_empty());

        // Exercises at 67% keep the average at 89% but the goal is missed.
        let mut data = with_exercises(4);
        set_nutrition(&mut data, [6, 5, 4, 4, 2, 1]);
        data.sport.running.insert(DAY.to_string(), 5.0);
        let status = daily_goal_status(&data, DAY);
        assert_eq!(status.exercises_percent, 67);
        assert_eq!(status.overall_percent, 89);
        assert!(!status.goal_reached);
        assert_eq!(status.missing, vec![GoalCategory::Exercises]);
    }

    #[test]
    fn goal_missed_despite_high_average() {
        // Every level but drinks full; drinks at 4/6 fails its 5-unit threshold.
        let mut data = with_exercises(6);
        set_nutrition(&mut data, [4, 5, 4, 4, 2, 1]);
        data.sport.strength.insert(DAY.to_string(), strength(&[3, 3]));
        let status = daily_goal_status(&data, DAY);
        assert_eq!(status.nutrition_percent, 67);
        assert_eq!(status.overall_percent, 89);
        assert!(!status.nutrition_met);
        assert!(!status.goal_reached);
    }

    #[test]
    fn empty_day_is_all_zero() {
        let status = daily_goal_status(&HealthData::default(), DAY);
        assert_eq!(status.exercises_percent, 0);
        assert_eq!(status.nutrition_percent, 0);
        assert_eq!(status.sport_percent, 0);
        assert_eq!(status.overall_percent, 0);
        assert!(!status.goal_reached);
        assert_eq!(status.missing.len(), 3);
        assert_eq!(status.sport_based_on, SportBasis::None);
    }

    #[test]
    fn clamp_percent_edges() {
        assert_eq!(clamp_percent(f64::NAN), 0);
        assert_eq!(clamp_percent(f64::INFINITY), 0);
        assert_eq!(clamp_percent(-12.0), 0);
        assert_eq!(clamp_percent(140.0), 100);
        assert_eq!(clamp_percent(66.5), 67);
        assert_eq!(clamp_percent(16.666), 17);
    }

    #[test]
    fn note_lists_open_categories() {
        let mut data = with_exercises(6);
        data.sport.running.insert(DAY.to_string(), 1.0);
        let note = status_note(&daily_goal_status(&data, DAY));
        assert!(note.contains("Open: Nutrition."));
        assert!(note.contains("running"));
    }
}
