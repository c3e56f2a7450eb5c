use crate::models::HealthData;
use async_trait::async_trait;
use std::{
    io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tokio::fs;
use tracing::{error, info, warn};

#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn read(&self) -> io::Result<Option<Vec<u8>>>;
    async fn write(&self, payload: &[u8]) -> io::Result<()>;
    fn describe(&self) -> String;
}

pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl StorageBackend for FileBackend {
    async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn write(&self, payload: &[u8]) -> io::Result<()> {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&self.path, payload).await
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[derive(Default)]
pub struct MemoryBackend {
    slot: Mutex<Option<Vec<u8>>>,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn with_payload(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(Some(payload.into())),
            fail_writes: false,
        }
    }

    pub fn read_only(payload: Option<Vec<u8>>) -> Self {
        Self {
            slot: Mutex::new(payload),
            fail_writes: true,
        }
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.slot.lock().map(|slot| slot.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn read(&self) -> io::Result<Option<Vec<u8>>> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|_| io::Error::other("memory slot poisoned"))
    }

    async fn write(&self, payload: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::PermissionDenied, "memory slot is read-only"));
        }
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| io::Error::other("memory slot poisoned"))?;
        *slot = Some(payload.to_vec());
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

pub struct HealthStore {
    backend: Arc<dyn StorageBackend>,
    cache: HealthData,
}

impl HealthStore {
    pub async fn load(backend: Arc<dyn StorageBackend>) -> Self {
        let cache = read_document(backend.as_ref()).await;
        Self { backend, cache }
    }

    pub fn data(&self) -> &HealthData {
        &self.cache
    }

    pub fn data_mut(&mut self) -> &mut HealthData {
        &mut self.cache
    }

    pub async fn save(&self) -> bool {
        let payload = match serde_json::to_vec_pretty(&self.cache) {
            Ok(payload) => payload,
            Err(err) => {
                error!("failed to serialize health data: {err}");
                return false;
            }
        };
        match self.backend.write(&payload).await {
            Ok(()) => true,
            Err(err) => {
                error!("failed to write health data to {}: {err}", self.backend.describe());
                false
            }
        }
    }

    pub async fn replace(&mut self, data: HealthData) -> bool {
        self.cache = data;
        self.save().await
    }
}

async fn read_document(backend: &dyn StorageBackend) -> HealthData {
    match backend.read().await {
        Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                warn!("stored health data at {} is unreadable, starting empty: {err}", backend.describe());
                HealthData::default()
            }
        },
        Ok(None) => {
            info!("no health data at {} yet, starting empty", backend.describe());
            HealthData::default()
        }
        Err(err) => {
            error!("failed to read health data from {}: {err}", backend.describe());
            HealthData::default()
        }
    }
}
