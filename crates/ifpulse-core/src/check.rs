// ── One interface check, end to end ──
//
// START → resolve index → take timestamp → resolve width (reads the
// current counters) → status check → resolve baseline → load previous
// sample → persist current sample → derive rates → classify.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::CheckConfig;
use crate::engine::baseline::{Baseline, resolve_baseline};
use crate::engine::classify::classify;
use crate::engine::index::resolve_index;
use crate::engine::rate::{HumanRate, Utilization, compute_utilization};
use crate::engine::status::{StatusFinding, check_status};
use crate::engine::width::resolve_width;
use crate::error::CoreError;
use crate::model::{CounterWidth, IdentityKey, Sample, Severity};
use crate::source::CounterSource;
use crate::store::{CounterCache, CounterStore};

/// A fully computed utilization reading.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measurement {
    pub width: CounterWidth,
    pub baseline: Baseline,
    pub utilization: Utilization,
    pub in_rate: HumanRate,
    pub out_rate: HumanRate,
    pub percent_in: f64,
    pub percent_out: f64,
    /// Raw counter values read this run.
    pub in_absolute: u64,
    pub out_absolute: u64,
    pub severity: Severity,
}

/// How a check ended. Errors are not outcomes; they are `CoreError`s.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Outcome {
    /// First run for this interface; a sample was stored for next time.
    NoPreviousData,
    /// `check_status` was requested and the interface is not up.
    InterfaceDown { finding: StatusFinding },
    Measured(Measurement),
}

impl Outcome {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoPreviousData => Severity::Ok,
            Self::InterfaceDown { .. } => Severity::Critical,
            Self::Measured(m) => m.severity,
        }
    }
}

/// Runs one point-in-time check of one interface.
#[derive(Debug, Clone)]
pub struct InterfaceCheck {
    config: CheckConfig,
}

impl InterfaceCheck {
    pub fn new(config: CheckConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CheckConfig {
        &self.config
    }

    /// Run the check, timestamping the current sample with the wall clock
    /// once the interface index is known.
    pub fn run<S, C>(&self, source: &mut S, store: &C) -> Result<Outcome, CoreError>
    where
        S: CounterSource + ?Sized,
        C: CounterStore + ?Sized,
    {
        let jitter_seed = Utc::now().timestamp_subsec_nanos();
        let if_index = self.index(source, store, jitter_seed)?;
        self.measure(source, store, if_index, epoch_seconds(Utc::now()))
    }

    /// Run the check with an explicit sample timestamp (epoch seconds) and
    /// index-expiry jitter seed.
    pub fn run_at<S, C>(
        &self,
        source: &mut S,
        store: &C,
        timestamp: f64,
        jitter_seed: u32,
    ) -> Result<Outcome, CoreError>
    where
        S: CounterSource + ?Sized,
        C: CounterStore + ?Sized,
    {
        let if_index = self.index(source, store, jitter_seed)?;
        self.measure(source, store, if_index, timestamp)
    }

    fn index<S, C>(&self, source: &mut S, store: &C, jitter_seed: u32) -> Result<u32, CoreError>
    where
        S: CounterSource + ?Sized,
        C: CounterStore + ?Sized,
    {
        let config = &self.config;
        tracing::debug!(host = %config.host, interface = %config.interface, "starting interface check");

        let if_index = resolve_index(
            &config.host,
            &config.interface,
            store,
            source,
            &config.ttl,
            jitter_seed,
        )?;
        tracing::debug!(interface = %config.interface, if_index, "resolved interface index");
        Ok(if_index)
    }

    fn measure<S, C>(
        &self,
        source: &mut S,
        store: &C,
        if_index: u32,
        timestamp: f64,
    ) -> Result<Outcome, CoreError>
    where
        S: CounterSource + ?Sized,
        C: CounterStore + ?Sized,
    {
        let config = &self.config;
        let identity = IdentityKey::new(&config.host, &config.interface);

        let cache = CounterCache::new(store, &identity, config.ttl);
        let counters = resolve_width(&cache, source, if_index)?;
        tracing::debug!(width = %counters.width, inferred = counters.inferred, "resolved counter width");
        let current = Sample::new(timestamp, counters.in_octets, counters.out_octets);

        if config.check_status {
            if let Some(finding) = check_status(source, if_index)? {
                return Ok(Outcome::InterfaceDown { finding });
            }
        }

        let baseline = resolve_baseline(config.bandwidth, &cache, counters.width, source, if_index)?;
        tracing::debug!(bps = baseline.bits_per_second, source = %baseline.source, "resolved baseline");

        let previous = cache.previous_sample()?;
        if !cache.store_sample(&current) {
            tracing::warn!(%identity, "current sample was not fully persisted");
        }

        let Some(previous) = previous else {
            tracing::debug!(%identity, "no previous sample cached");
            return Ok(Outcome::NoPreviousData);
        };
        tracing::debug!(?previous, ?current, "comparing samples");

        let utilization = compute_utilization(&previous, &current, counters.width.is_wide())?;
        let classification = classify(
            utilization.in_bits_per_sec,
            utilization.out_bits_per_sec,
            baseline.bits_per_second,
            config.thresholds,
        );

        Ok(Outcome::Measured(Measurement {
            width: counters.width,
            baseline,
            utilization,
            in_rate: HumanRate::from_bits_per_sec(utilization.in_bits_per_sec),
            out_rate: HumanRate::from_bits_per_sec(utilization.out_bits_per_sec),
            percent_in: classification.percent_in,
            percent_out: classification.percent_out,
            in_absolute: current.in_octets,
            out_absolute: current.out_octets,
            severity: classification.severity,
        }))
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn epoch_seconds(now: DateTime<Utc>) -> f64 {
    now.timestamp_micros() as f64 / 1_000_000.0
}
