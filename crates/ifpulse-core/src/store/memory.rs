use std::time::{Duration, Instant};

use dashmap::DashMap;

use super::CounterStore;
use crate::error::CoreError;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// In-process `CounterStore` honouring per-key expiry.
///
/// State lives only as long as the value, so it is useful for embedding
/// the checker in a long-running process and for tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, Entry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys, including ones that have expired but not been read.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_ok_and(|v| v.is_some())
    }

    /// Remaining lifetime of a live key.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let entry = self.entries.get(key)?;
        entry.expires_at.checked_duration_since(Instant::now())
    }
}

impl CounterStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        let now = Instant::now();
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(self.entries.get(key).map(|entry| entry.value.clone()))
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CoreError> {
        self.entries.insert(
            key.to_owned(),
            Entry {
                value: value.to_owned(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
