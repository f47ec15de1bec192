// ── Counter-width inference ──
//
// Decides once per interface whether to read the 64-bit or the 32-bit
// octet counters, caches that decision, and returns the current counter
// values read along the way.

use ifpulse_api::Oid;

use crate::convert::parse_counter;
use crate::error::CoreError;
use crate::model::CounterWidth;
use crate::oids;
use crate::source::CounterSource;
use crate::store::{CounterCache, CounterStore};

/// The counter width in effect for this run and the counters it read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthResolution {
    pub width: CounterWidth,
    pub in_octets: u64,
    pub out_octets: u64,
    /// `true` when the width was inferred this run rather than cached.
    pub inferred: bool,
}

/// Resolve counter width for `if_index` and read its current counters.
///
/// On a cache miss the wide in-counter is read first. A numeric answer
/// makes the interface wide (and that answer is reused); anything else,
/// including a failed request, makes it narrow. The decision is cached
/// once the counters for it have been read.
pub fn resolve_width<S, C>(
    cache: &CounterCache<'_, C>,
    source: &mut S,
    if_index: u32,
) -> Result<WidthResolution, CoreError>
where
    S: CounterSource + ?Sized,
    C: CounterStore + ?Sized,
{
    match cache.width()? {
        CounterWidth::Wide => {
            tracing::debug!("interface known to support 64-bit counters");
            read_counters(source, CounterWidth::Wide, if_index, false)
        }
        CounterWidth::Narrow => {
            tracing::debug!("interface known to support only 32-bit counters");
            read_counters(source, CounterWidth::Narrow, if_index, false)
        }
        CounterWidth::Unknown => infer(cache, source, if_index),
    }
}

fn infer<S, C>(
    cache: &CounterCache<'_, C>,
    source: &mut S,
    if_index: u32,
) -> Result<WidthResolution, CoreError>
where
    S: CounterSource + ?Sized,
    C: CounterStore + ?Sized,
{
    tracing::debug!("counter width unknown, trying 64-bit counters");
    let in_oid = oids::if_hc_in_octets().child(if_index);
    let wide_in = match source.fetch(&in_oid) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(oid = %in_oid, error = %err, "64-bit counter read failed");
            None
        }
    };

    let resolution = match wide_in.as_deref().and_then(parse_counter) {
        Some(in_octets) => {
            tracing::debug!("64-bit counters enabled");
            let out_oid = oids::if_hc_out_octets().child(if_index);
            let out_octets = fetch_counter(source, &out_oid, "ifHCOutOctets")?;
            WidthResolution {
                width: CounterWidth::Wide,
                in_octets,
                out_octets,
                inferred: true,
            }
        }
        None => {
            tracing::debug!(value = ?wide_in, "64-bit counter did not return a number, presuming 32-bit counters");
            read_counters(source, CounterWidth::Narrow, if_index, true)?
        }
    };

    cache.store_width(resolution.width);
    Ok(resolution)
}

fn read_counters<S>(
    source: &mut S,
    width: CounterWidth,
    if_index: u32,
    inferred: bool,
) -> Result<WidthResolution, CoreError>
where
    S: CounterSource + ?Sized,
{
    let (in_octets, out_octets) = if width.is_wide() {
        (
            fetch_counter(source, &oids::if_hc_in_octets().child(if_index), "ifHCInOctets")?,
            fetch_counter(source, &oids::if_hc_out_octets().child(if_index), "ifHCOutOctets")?,
        )
    } else {
        (
            fetch_counter(source, &oids::if_in_octets().child(if_index), "ifInOctets")?,
            fetch_counter(source, &oids::if_out_octets().child(if_index), "ifOutOctets")?,
        )
    };
    Ok(WidthResolution {
        width,
        in_octets,
        out_octets,
        inferred,
    })
}

/// Fetch a value that must be numeric; anything else ends the check.
pub(crate) fn fetch_counter<S>(
    source: &mut S,
    oid: &Oid,
    counter: &'static str,
) -> Result<u64, CoreError>
where
    S: CounterSource + ?Sized,
{
    let value = source.fetch(oid)?;
    value
        .as_deref()
        .and_then(parse_counter)
        .ok_or_else(|| CoreError::NotNumeric {
            counter,
            oid: oid.to_string(),
            value,
        })
}
