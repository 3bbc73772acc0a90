use crate::config::Config;
use crate::error::SinkError;
use crate::sink::ObjectSink;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shared service state. Doubles as the in-memory object store for payloads
/// produced in service mode.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    objects: Arc<DashMap<String, StoredObject>>,
}

struct StoredObject {
    body: Vec<u8>,
    inserted_at: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            objects: Arc::new(DashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn get(&self, path: &str) -> Option<Vec<u8>> {
        self.objects.get(path).map(|entry| entry.body.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn evict_expired(&self, ttl: Duration) {
        let now = Instant::now();
        self.objects
            .retain(|_, stored| now.duration_since(stored.inserted_at) < ttl);
        tracing::info!("Cache eviction complete. Current size: {}", self.objects.len());
    }
}

impl ObjectSink for AppState {
    async fn put(&self, path: &str, body: Vec<u8>) -> Result<(), SinkError> {
        self.objects.insert(
            path.to_string(),
            StoredObject {
                body,
                inserted_at: Instant::now(),
            },
        );
        Ok(())
    }
}
