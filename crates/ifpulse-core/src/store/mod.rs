// ── Counter store ──
//
// The only bridge between invocations. `CounterStore` is the raw
// string-keyed seam; `CounterCache` layers the typed, per-interface view
// on top so string encodings stay in one place.

pub mod counter_cache;
pub mod memory;

use std::time::Duration;

use crate::error::CoreError;

pub use counter_cache::CounterCache;
pub use memory::MemoryStore;

/// Expiring key-value storage for small string values.
///
/// A missing key is `Ok(None)`; `Err` means the store itself failed.
pub trait CounterStore {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError>;

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CoreError>;
}

impl<T: CounterStore + ?Sized> CounterStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, CoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CoreError> {
        (**self).set(key, value, ttl)
    }
}
