use crate::catalog::{DAILY_GOAL_PERCENT, EXERCISES, NUTRITION_LEVELS};
use crate::entries::{self, RunningUpdate};
use crate::errors::AppError;
use crate::goals::{completed_exercises, daily_goal_status, nutrition_status, status_note, DailyGoalStatus};
use crate::models::{
    CatalogResponse, ConfirmParams, CubeClickRequest, DashboardResponse, ExerciseDayResponse,
    ExerciseHistoryPoint, ExerciseItem, ExerciseToggleRequest, GoalHistoryPoint, HealthData,
    ImportResponse, NutritionDayResponse, RunningRequest, SportDayResponse, StrengthEntry,
    StrengthRequest, TimersResponse, WeeklySummary,
};
use crate::state::AppState;
use crate::stats::{build_exercise_history, build_goal_history, build_weekly_summary, date_key, today};
use crate::storage::HealthStore;
use crate::timers::{TimerAction, TimerKind};
use crate::transfer::{day_count, export_file_name, export_json, parse_import};
use crate::ui::render_index;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::NaiveDate;
use std::time::Instant;
use tracing::{info, warn};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let date = date_key(today());
    let store = state.store.lock().await;
    let status = daily_goal_status(store.data(), &date);
    let weekly = build_weekly_summary(store.data());
    Html(render_index(&date, &status, &weekly))
}

pub async fn get_catalog() -> Json<CatalogResponse> {
    Json(CatalogResponse {
        daily_goal_percent: DAILY_GOAL_PERCENT,
        exercises: EXERCISES,
        nutrition_levels: NUTRITION_LEVELS,
    })
}

pub async fn get_dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let date = date_key(today());
    let store = state.store.lock().await;
    let status = daily_goal_status(store.data(), &date);
    let note = status_note(&status);
    Json(DashboardResponse { status, note })
}

pub async fn get_goals(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<DailyGoalStatus>, AppError> {
    let date = resolve_date(&date)?;
    let store = state.store.lock().await;
    Ok(Json(daily_goal_status(store.data(), &date)))
}

pub async fn get_goal_history(State(state): State<AppState>) -> Json<Vec<GoalHistoryPoint>> {
    let store = state.store.lock().await;
    Json(build_goal_history(store.data()))
}

pub async fn get_exercise_history(State(state): State<AppState>) -> Json<Vec<ExerciseHistoryPoint>> {
    let store = state.store.lock().await;
    Json(build_exercise_history(store.data()))
}

pub async fn get_weekly(State(state): State<AppState>) -> Json<WeeklySummary> {
    let store = state.store.lock().await;
    Json(build_weekly_summary(store.data()))
}

pub async fn get_exercises(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<ExerciseDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let store = state.store.lock().await;
    Ok(Json(exercise_day(store.data(), date)))
}

pub async fn set_exercise(
    State(state): State<AppState>,
    Path((date, exercise_id)): Path<(String, String)>,
    Json(payload): Json<ExerciseToggleRequest>,
) -> Result<Json<ExerciseDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let mut store = state.store.lock().await;
    entries::set_exercise_done(store.data_mut(), &date, &exercise_id, payload.done)?;
    store.save().await;

    info!(%date, %exercise_id, done = payload.done, "exercise updated");
    Ok(Json(exercise_day(store.data(), date)))
}

pub async fn reset_exercises(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<ExerciseDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    require_confirmation(&params, "reset the exercises of this date")?;

    let mut store = state.store.lock().await;
    entries::reset_exercises(store.data_mut(), &date);
    store.save().await;

    info!(%date, "exercises reset");
    Ok(Json(exercise_day(store.data(), date)))
}

pub async fn get_nutrition(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<NutritionDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let store = state.store.lock().await;
    Ok(Json(nutrition_day(store.data(), date)))
}

pub async fn click_nutrition(
    State(state): State<AppState>,
    Path((date, level_id)): Path<(String, String)>,
    Json(payload): Json<CubeClickRequest>,
) -> Result<Json<NutritionDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let mut store = state.store.lock().await;
    let count = entries::click_nutrition_cube(store.data_mut(), &date, &level_id, payload.cube)?;
    store.save().await;

    info!(%date, %level_id, count, "nutrition updated");
    Ok(Json(nutrition_day(store.data(), date)))
}

pub async fn get_sport(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<Json<SportDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let store = state.store.lock().await;
    Ok(Json(sport_day(store.data(), date)))
}

pub async fn save_running(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<RunningRequest>,
) -> Result<Json<SportDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let mut store = state.store.lock().await;
    let update = entries::save_running(store.data_mut(), &date, &payload.distance).inspect_err(|err| {
        warn!(%date, input = %payload.distance, "rejected running entry: {err}");
    })?;
    store.save().await;

    match update {
        RunningUpdate::Saved(km) => info!(%date, km, "running saved"),
        RunningUpdate::Cleared => info!(%date, "running cleared"),
    }
    Ok(Json(sport_day(store.data(), date)))
}

pub async fn delete_running(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<SportDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    require_confirmation(&params, "delete the running entry")?;

    let mut store = state.store.lock().await;
    if entries::clear_running(store.data_mut(), &date) {
        store.save().await;
        info!(%date, "running entry deleted");
    }
    Ok(Json(sport_day(store.data(), date)))
}

pub async fn add_strength(
    State(state): State<AppState>,
    Path(date): Path<String>,
    Json(payload): Json<StrengthRequest>,
) -> Result<Json<SportDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    let weight = entries::loose_text(payload.weight.as_ref());
    let mut store = state.store.lock().await;
    let entry = entries::add_strength(
        store.data_mut(),
        &date,
        &payload.exercise,
        weight.as_deref(),
        entries::loose_count(payload.reps.as_ref()),
        entries::loose_count(payload.sets.as_ref()),
    )
    .inspect_err(|err| warn!(%date, "rejected strength entry: {err}"))?;
    store.save().await;

    info!(%date, exercise = %entry.exercise, sets = entry.sets, reps = entry.reps, "strength entry added");
    Ok(Json(sport_day(store.data(), date)))
}

pub async fn delete_strength(
    State(state): State<AppState>,
    Path((date, index)): Path<(String, usize)>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<SportDayResponse>, AppError> {
    let date = resolve_date(&date)?;
    require_confirmation(&params, "delete this strength entry")?;

    let mut store = state.store.lock().await;
    let removed = entries::remove_strength(store.data_mut(), &date, index)?;
    store.save().await;

    info!(%date, index, exercise = %removed.exercise, "strength entry deleted");
    Ok(Json(sport_day(store.data(), date)))
}

pub async fn export_data(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let store = state.store.lock().await;
    let payload = export_json(store.data()).map_err(AppError::internal)?;
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(today()));

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        payload,
    ))
}

pub async fn import_data(State(state): State<AppState>, body: Bytes) -> Result<Json<ImportResponse>, AppError> {
    let data = parse_import(&body).inspect_err(|err| warn!("rejected import: {err}"))?;
    let imported_days = day_count(&data);

    let mut store = state.store.lock().await;
    replace_document(&mut store, data).await;

    info!(imported_days, "health data imported");
    Ok(Json(ImportResponse { imported_days }))
}

pub async fn get_timers(State(state): State<AppState>) -> Json<TimersResponse> {
    let mut timers = state.timers.lock().await;
    Json(TimersResponse {
        timers: timers.snapshots(Instant::now()),
    })
}

pub async fn timer_action(
    State(state): State<AppState>,
    Path((timer_id, action)): Path<(String, String)>,
) -> Result<Json<TimersResponse>, AppError> {
    let kind = TimerKind::parse(&timer_id).ok_or_else(|| AppError::not_found(format!("unknown timer '{timer_id}'")))?;
    let action = TimerAction::parse(&action)
        .ok_or_else(|| AppError::bad_request("action must be 'start', 'pause', 'toggle' or 'reset'"))?;

    let now = Instant::now();
    let mut timers = state.timers.lock().await;
    if let Some(timer) = timers.get_mut(kind) {
        timer.apply(action, now);
        info!(timer = kind.label(), phase = ?timer.phase(), "timer updated");
    }
    Ok(Json(TimersResponse {
        timers: timers.snapshots(now),
    }))
}

async fn replace_document(store: &mut HealthStore, data: HealthData) {
    if !store.replace(data).await {
        warn!("imported data is only kept in memory until the next successful save");
    }
}

fn require_confirmation(params: &ConfirmParams, action: &str) -> Result<(), AppError> {
    if params.confirm {
        Ok(())
    } else {
        Err(AppError::confirmation_required(action))
    }
}

/// Accepts `today` or an ISO date and returns the canonical date key.
fn resolve_date(raw: &str) -> Result<String, AppError> {
    if raw == "today" {
        return Ok(date_key(today()));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(date_key)
        .map_err(|_| AppError::bad_request(format!("'{raw}' is not a date (expected YYYY-MM-DD)")))
}

fn exercise_day(data: &HealthData, date: String) -> ExerciseDayResponse {
    let day = data.exercises_for(&date);
    let items = EXERCISES
        .iter()
        .map(|exercise| ExerciseItem {
            id: exercise.id.to_string(),
            title: exercise.title.to_string(),
            detail: exercise.detail.to_string(),
            done: day.and_then(|day| day.get(exercise.id)).copied().unwrap_or(false),
        })
        .collect();

    ExerciseDayResponse {
        done_count: completed_exercises(data, &date),
        total: EXERCISES.len(),
        date,
        items,
    }
}

fn nutrition_day(data: &HealthData, date: String) -> NutritionDayResponse {
    let levels = nutrition_status(data, &date).levels;
    NutritionDayResponse { date, levels }
}

fn sport_day(data: &HealthData, date: String) -> SportDayResponse {
    let strength: Vec<StrengthEntry> = data.strength_for(&date).to_vec();
    SportDayResponse {
        running_km: data.running_for(&date),
        date,
        strength,
    }
}
