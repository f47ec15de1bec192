// ── Domain model ──
//
// Canonical types shared by the engine, the store adapter, and the
// binary's renderer.

pub mod counter_width;
pub mod identity;
pub mod sample;
pub mod threshold;

pub use counter_width::CounterWidth;
pub use identity::{IdentityKey, sanitize_descr};
pub use sample::Sample;
pub use threshold::{Severity, Thresholds};
