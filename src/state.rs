use crate::storage::HealthStore;
use crate::timers::TimerBoard;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<HealthStore>>,
    pub timers: Arc<Mutex<TimerBoard>>,
}

impl AppState {
    pub fn new(store: HealthStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            timers: Arc::new(Mutex::new(TimerBoard::default())),
        }
    }
}
