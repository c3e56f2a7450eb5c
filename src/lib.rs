pub mod app;
pub mod catalog;
pub mod config;
pub mod entries;
pub mod errors;
pub mod goals;
pub mod handlers;
pub mod models;
pub mod state;
pub mod stats;
pub mod storage;
pub mod timers;
pub mod transfer;
pub mod ui;

pub use app::router;
pub use config::Config;
pub use state::AppState;
pub use storage::{FileBackend, HealthStore, MemoryBackend, StorageBackend};
