use serde::Serialize;

pub const DAILY_GOAL_PERCENT: u8 = 80;

pub const STRENGTH_MIN_EXERCISES_FOR_GOAL: usize = 2;
pub const STRENGTH_MIN_SETS_PER_EXERCISE_FOR_GOAL: u32 = 3;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Exercise {
    pub id: &'static str,
    pub title: &'static str,
    pub detail: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct NutritionLevel {
    pub id: &'static str,
    pub label: &'static str,
    pub max_units: u32,
}

impl NutritionLevel {
    /// Units needed before this level counts as met. Levels never compensate
    /// for each other.
    pub fn required_units(&self) -> u32 {
        (f64::from(self.max_units) * f64::from(DAILY_GOAL_PERCENT) / 100.0).ceil() as u32
    }
}

pub const EXERCISES: &[Exercise] = &[
    Exercise {
        id: "neck_mobility_all",
        title: "Neck stretch left/right and up/down",
        detail: "25 repetitions each.",
    },
    Exercise {
        id: "neck_overstretch",
        title: "Neck stretch left/right (overstretched)",
        detail: "Hold 20 seconds each.",
    },
    Exercise {
        id: "double_chin_exercise",
        title: "Double chin exercise",
        detail: "20 repetitions, slow and controlled.",
    },
    Exercise {
        id: "serving_exercise",
        title: "Serving exercise left/right",
        detail: "15 repetitions, slow and controlled.",
    },
    Exercise {
        id: "heat_pad",
        title: "Heat pad",
        detail: "10 minutes of treatment.",
    },
    Exercise {
        id: "cold_icebath_head",
        title: "Ice bath (head)",
        detail: "1 minute under water.",
    },
];

pub const NUTRITION_LEVELS: &[NutritionLevel] = &[
    NutritionLevel { id: "drinks", label: "Drinks", max_units: 6 },
    NutritionLevel { id: "veg_fruit", label: "Vegetables & fruit", max_units: 5 },
    NutritionLevel { id: "carbs", label: "Grains & potatoes", max_units: 4 },
    NutritionLevel { id: "milk_meat", label: "Dairy, meat & fish", max_units: 4 },
    NutritionLevel { id: "fats", label: "Fats & oils", max_units: 2 },
    NutritionLevel { id: "extras", label: "Sweets & extras", max_units: 1 },
];

pub fn find_exercise(id: &str) -> Option<&'static Exercise> {
    EXERCISES.iter().find(|exercise| exercise.id == id)
}

pub fn find_level(id: &str) -> Option<&'static NutritionLevel> {
    NUTRITION_LEVELS.iter().find(|level| level.id == id)
}
