// ── ifDescr → ifIndex resolution ──
//
// Operators name interfaces by description; the counters are addressed by
// index. Mappings are cached per host and refreshed in bulk by walking
// ifDescr whenever a lookup misses.

use crate::config::CacheTtl;
use crate::error::CoreError;
use crate::model::IdentityKey;
use crate::oids;
use crate::source::CounterSource;
use crate::store::CounterStore;

/// Resolve `interface` on `host` to its ifIndex.
///
/// `jitter_seed` spreads the expiry of mappings written by a walk.
pub fn resolve_index<S, C>(
    host: &str,
    interface: &str,
    store: &C,
    source: &mut S,
    ttl: &CacheTtl,
    jitter_seed: u32,
) -> Result<u32, CoreError>
where
    S: CounterSource + ?Sized,
    C: CounterStore + ?Sized,
{
    let wanted = IdentityKey::new(host, interface);

    if let Some(raw) = store.get(wanted.as_str())? {
        match raw.trim().parse::<u32>() {
            Ok(index) => {
                tracing::debug!(key = %wanted, index, "ifIndex found in cache");
                return Ok(index);
            }
            Err(_) => tracing::warn!(key = %wanted, value = %raw, "ignoring non-numeric cached ifIndex"),
        }
    }

    tracing::debug!(key = %wanted, "ifIndex not cached, walking ifDescr");
    let column = oids::if_descr();
    let rows = source.walk(&column)?;

    let expiry = ttl.index_with_jitter(jitter_seed);
    let mut found = None;
    for (oid, descr) in &rows {
        let Some(&[index]) = oid.suffix(&column) else {
            continue;
        };
        let key = IdentityKey::new(host, descr);
        if let Err(err) = store.set(key.as_str(), &index.to_string(), expiry) {
            tracing::warn!(%key, error = %err, "could not cache ifIndex");
        }
        // Last row wins, same as the mapping left in the cache.
        if key == wanted {
            found = Some(index);
        }
    }

    found.ok_or_else(|| CoreError::InterfaceNotFound {
        host: host.into(),
        interface: interface.into(),
    })
}
