//! Sampling and rate-derivation engine for point-in-time interface checks.
//!
//! Each invocation reads an interface's traffic counters once, compares them
//! with the sample left behind by the previous invocation, and turns the
//! difference into a utilization figure and a plugin severity:
//!
//! - **[`InterfaceCheck`]**: Runs one check end to end: index resolution,
//!   counter-width inference, status check, baseline resolution, previous
//!   sample lookup, rate derivation, classification, and persistence.
//!
//! - **Collaborator seams**: [`CounterSource`] (SNMP-style fetch/walk) and
//!   [`CounterStore`] (expiring key-value get/set). The `ifpulse-api`
//!   clients implement both (see [`convert`]); [`MemoryStore`] is an
//!   in-process store.
//!
//! - **[`engine`]**: The pure pieces: wraparound correction, width
//!   inference, baseline resolution, utilization, and threshold
//!   classification.
//!
//! - **Domain model** ([`model`]): [`Sample`], [`CounterWidth`],
//!   [`Thresholds`], [`Severity`], and the [`IdentityKey`] that namespaces
//!   all cached state for one interface.

pub mod check;
pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod model;
pub mod oids;
pub mod source;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use check::{InterfaceCheck, Measurement, Outcome};
pub use config::{Bandwidth, BandwidthUnit, CacheTtl, CheckConfig};
pub use error::CoreError;
pub use source::CounterSource;
pub use store::{CounterCache, CounterStore, MemoryStore};

pub use engine::baseline::{Baseline, BaselineSource, DEFAULT_BASELINE_BPS};
pub use engine::rate::{HumanRate, Utilization};
pub use engine::status::StatusFinding;
pub use engine::width::WidthResolution;

pub use model::{CounterWidth, IdentityKey, Sample, Severity, Thresholds};
