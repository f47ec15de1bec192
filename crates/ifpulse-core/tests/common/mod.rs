//! Test doubles for the collaborator seams.
#![allow(dead_code, clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use ifpulse_api::Oid;
use ifpulse_core::{CoreError, CounterSource, CounterStore, MemoryStore};

pub const HOST: &str = "core-sw1";
pub const IFDESCR: &str = "1.3.6.1.2.1.2.2.1.2";

/// A `CounterSource` answering from a fixed table and recording requests.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    values: HashMap<String, String>,
    failing: HashSet<String>,
    walks: HashMap<String, Vec<(Oid, String)>>,
    pub fetched: Vec<String>,
    pub walked: Vec<String>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `oid` with `value`.
    pub fn with(mut self, oid: &str, value: &str) -> Self {
        self.values.insert(oid.into(), value.into());
        self
    }

    /// Fail `oid` with a transport error.
    pub fn failing(mut self, oid: &str) -> Self {
        self.failing.insert(oid.into());
        self
    }

    /// ifDescr rows as `(ifIndex, descr)`.
    pub fn with_interfaces(mut self, rows: &[(u32, &str)]) -> Self {
        let column: Oid = IFDESCR.parse().unwrap();
        let rows = rows
            .iter()
            .map(|(index, descr)| (column.child(*index), (*descr).to_owned()))
            .collect();
        self.walks.insert(IFDESCR.into(), rows);
        self
    }

    pub fn was_fetched(&self, oid: &str) -> bool {
        self.fetched.iter().any(|o| o == oid)
    }

    pub fn fetch_count(&self, oid: &str) -> usize {
        self.fetched.iter().filter(|o| *o == oid).count()
    }
}

impl CounterSource for ScriptedSource {
    fn fetch(&mut self, oid: &Oid) -> Result<Option<String>, CoreError> {
        let key = oid.to_string();
        self.fetched.push(key.clone());
        if self.failing.contains(&key) {
            return Err(CoreError::Transport {
                reason: format!("timeout fetching {key}"),
            });
        }
        Ok(self.values.get(&key).cloned())
    }

    fn walk(&mut self, column: &Oid) -> Result<Vec<(Oid, String)>, CoreError> {
        let key = column.to_string();
        self.walked.push(key.clone());
        Ok(self.walks.get(&key).cloned().unwrap_or_default())
    }
}

/// A store that reads fine but rejects every write.
#[derive(Debug, Default)]
pub struct ReadOnlyStore {
    pub inner: MemoryStore,
}

impl CounterStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        self.inner.get(key)
    }

    fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CoreError> {
        Err(CoreError::Cache {
            reason: "server out of memory".into(),
        })
    }
}

pub fn seed(store: &MemoryStore, key: &str, value: &str) {
    store.set(key, value, Duration::from_secs(3600)).unwrap();
}

pub fn oid(column: &str, index: u32) -> String {
    format!("{column}.{index}")
}

pub const IF_SPEED: &str = "1.3.6.1.2.1.2.2.1.5";
pub const IF_ADMIN: &str = "1.3.6.1.2.1.2.2.1.7";
pub const IF_OPER: &str = "1.3.6.1.2.1.2.2.1.8";
pub const IF_IN: &str = "1.3.6.1.2.1.2.2.1.10";
pub const IF_OUT: &str = "1.3.6.1.2.1.2.2.1.16";
pub const IF_HC_IN: &str = "1.3.6.1.2.1.31.1.1.1.6";
pub const IF_HC_OUT: &str = "1.3.6.1.2.1.31.1.1.1.10";
pub const IF_HIGH_SPEED: &str = "1.3.6.1.2.1.31.1.1.1.15";
