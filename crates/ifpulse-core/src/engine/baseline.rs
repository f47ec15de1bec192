// ── Bandwidth baseline ──
//
// The denominator of every utilization percentage. Priority: explicit
// override, cached link speed, live link-speed query, fixed default.

use serde::Serialize;
use strum::Display;

use crate::config::Bandwidth;
use crate::convert::parse_counter;
use crate::error::CoreError;
use crate::model::CounterWidth;
use crate::oids;
use crate::source::CounterSource;
use crate::store::{CounterCache, CounterStore};

/// Baseline used when nothing better is known, in bits per second.
pub const DEFAULT_BASELINE_BPS: u64 = 1_000_000_000_000;

/// ifHighSpeed is reported in megabits per second.
const HIGH_SPEED_UNIT: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BaselineSource {
    Explicit,
    Cached,
    /// Link speed read from the agent this run.
    Agent,
    Default,
}

/// Maximum interface bandwidth and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Baseline {
    pub bits_per_second: u64,
    pub source: BaselineSource,
}

impl Baseline {
    fn or_default(bits_per_second: u64, source: BaselineSource) -> Self {
        if bits_per_second == 0 {
            tracing::debug!(?source, "baseline is zero, using default");
            Self {
                bits_per_second: DEFAULT_BASELINE_BPS,
                source: BaselineSource::Default,
            }
        } else {
            Self {
                bits_per_second,
                source,
            }
        }
    }
}

/// Resolve the interface's maximum bandwidth in bits per second.
///
/// A link-speed read that answers without a number counts as zero and
/// falls through to the default; a failed request ends the check.
/// Only non-zero speeds read from the agent are cached.
pub fn resolve_baseline<S, C>(
    explicit: Option<Bandwidth>,
    cache: &CounterCache<'_, C>,
    width: CounterWidth,
    source: &mut S,
    if_index: u32,
) -> Result<Baseline, CoreError>
where
    S: CounterSource + ?Sized,
    C: CounterStore + ?Sized,
{
    if let Some(bandwidth) = explicit {
        tracing::debug!(?bandwidth, "max bandwidth was specified at runtime");
        return Ok(Baseline::or_default(
            bandwidth.bits_per_second(),
            BaselineSource::Explicit,
        ));
    }

    if let Some(cached) = cache.baseline()? {
        tracing::debug!(cached, "max bandwidth found in cache");
        return Ok(Baseline::or_default(cached, BaselineSource::Cached));
    }

    tracing::debug!("max bandwidth not specified or cached, querying link speed");
    let link_speed = if width.is_wide() {
        let oid = oids::if_high_speed().child(if_index);
        source
            .fetch(&oid)?
            .as_deref()
            .and_then(parse_counter)
            .map_or(0, |mbps| mbps.saturating_mul(HIGH_SPEED_UNIT))
    } else {
        let oid = oids::if_speed().child(if_index);
        source
            .fetch(&oid)?
            .as_deref()
            .and_then(parse_counter)
            .unwrap_or(0)
    };

    if link_speed > 0 {
        cache.store_baseline(link_speed);
    }
    Ok(Baseline::or_default(link_speed, BaselineSource::Agent))
}
