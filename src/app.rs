use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/catalog", get(handlers::get_catalog))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .route("/api/goals/:date", get(handlers::get_goals))
        .route("/api/history/goals", get(handlers::get_goal_history))
        .route("/api/history/exercises", get(handlers::get_exercise_history))
        .route("/api/weekly", get(handlers::get_weekly))
        .route("/api/exercises/:date", get(handlers::get_exercises))
        .route("/api/exercises/:date/reset", post(handlers::reset_exercises))
        .route("/api/exercises/:date/:exercise_id", put(handlers::set_exercise))
        .route("/api/nutrition/:date", get(handlers::get_nutrition))
        .route("/api/nutrition/:date/:level_id", post(handlers::click_nutrition))
        .route("/api/sport/:date", get(handlers::get_sport))
        .route(
            "/api/sport/:date/running",
            put(handlers::save_running).delete(handlers::delete_running),
        )
        .route("/api/sport/:date/strength", post(handlers::add_strength))
        .route("/api/sport/:date/strength/:index", delete(handlers::delete_strength))
        .route("/api/export", get(handlers::export_data))
        .route("/api/import", post(handlers::import_data))
        .route("/api/timers", get(handlers::get_timers))
        .route("/api/timers/:timer_id/:action", post(handlers::timer_action))
        .with_state(state)
}
