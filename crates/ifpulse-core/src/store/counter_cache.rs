// ── Typed per-interface view of the counter store ──
//
// Key layout and value encodings match what earlier deployments of the
// check left in memcached, so upgrading does not reset every interface
// to a cold start.

use std::time::Duration;

use super::CounterStore;
use crate::config::CacheTtl;
use crate::convert::{parse_counter, parse_timestamp};
use crate::error::CoreError;
use crate::model::{CounterWidth, IdentityKey, Sample};

const WIDTH: &str = "hc";
const BASELINE: &str = "max";
const SAMPLE_TIME: &str = "last";
const SAMPLE_IN: &str = "inOctet";
const SAMPLE_OUT: &str = "outOctet";

const WIDE_FLAG: &str = "1";
const NARROW_FLAG: &str = "0";

/// Cached state of one interface: counter width, baseline, previous sample.
///
/// Reads propagate store failures. Writes are best-effort: a failed write
/// is logged and reported as `false`, never as an error.
pub struct CounterCache<'a, S: CounterStore + ?Sized> {
    store: &'a S,
    identity: &'a IdentityKey,
    ttl: CacheTtl,
}

impl<'a, S: CounterStore + ?Sized> CounterCache<'a, S> {
    pub fn new(store: &'a S, identity: &'a IdentityKey, ttl: CacheTtl) -> Self {
        Self {
            store,
            identity,
            ttl,
        }
    }

    // ── Counter width ────────────────────────────────────────────────

    pub fn width(&self) -> Result<CounterWidth, CoreError> {
        let raw = self.store.get(&self.identity.key(WIDTH))?;
        Ok(match raw.as_deref().map(str::trim) {
            Some(WIDE_FLAG) => CounterWidth::Wide,
            Some(NARROW_FLAG) => CounterWidth::Narrow,
            Some(other) => {
                tracing::warn!(value = other, "ignoring unrecognised counter width flag");
                CounterWidth::Unknown
            }
            None => CounterWidth::Unknown,
        })
    }

    pub fn store_width(&self, width: CounterWidth) -> bool {
        let flag = match width {
            CounterWidth::Wide => WIDE_FLAG,
            CounterWidth::Narrow => NARROW_FLAG,
            CounterWidth::Unknown => return false,
        };
        self.put(WIDTH, flag, self.ttl.width)
    }

    // ── Baseline ─────────────────────────────────────────────────────

    /// Cached link speed in bits per second, if present and numeric.
    pub fn baseline(&self) -> Result<Option<u64>, CoreError> {
        let raw = self.store.get(&self.identity.key(BASELINE))?;
        Ok(raw.as_deref().and_then(parse_counter))
    }

    pub fn store_baseline(&self, bits_per_second: u64) -> bool {
        self.put(BASELINE, &bits_per_second.to_string(), self.ttl.baseline)
    }

    // ── Samples ──────────────────────────────────────────────────────

    /// The sample left by the previous invocation.
    ///
    /// Present only when timestamp and both counters are cached and parse.
    pub fn previous_sample(&self) -> Result<Option<Sample>, CoreError> {
        let time = self.store.get(&self.identity.key(SAMPLE_TIME))?;
        let in_octets = self.store.get(&self.identity.key(SAMPLE_IN))?;
        let out_octets = self.store.get(&self.identity.key(SAMPLE_OUT))?;

        let sample = match (time, in_octets, out_octets) {
            (Some(t), Some(i), Some(o)) => {
                match (parse_timestamp(&t), parse_counter(&i), parse_counter(&o)) {
                    (Some(t), Some(i), Some(o)) => Some(Sample::new(t, i, o)),
                    _ => {
                        tracing::warn!(identity = %self.identity, "discarding unparseable previous sample");
                        None
                    }
                }
            }
            _ => None,
        };
        Ok(sample)
    }

    /// Persist `sample` as the next invocation's previous sample.
    pub fn store_sample(&self, sample: &Sample) -> bool {
        let ttl = self.ttl.sample;
        let time = self.put(SAMPLE_TIME, &sample.timestamp.to_string(), ttl);
        let in_ok = self.put(SAMPLE_IN, &sample.in_octets.to_string(), ttl);
        let out_ok = self.put(SAMPLE_OUT, &sample.out_octets.to_string(), ttl);
        time && in_ok && out_ok
    }

    fn put(&self, suffix: &str, value: &str, ttl: Duration) -> bool {
        let key = self.identity.key(suffix);
        match self.store.set(&key, value, ttl) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(%key, error = %err, "could not write counter cache");
                false
            }
        }
    }
}
