// ── Sampling and rate-derivation engine ──
//
// Each step of a check as a standalone function over the collaborator
// seams, so `InterfaceCheck` only sequences them.

pub mod baseline;
pub mod classify;
pub mod index;
pub mod rate;
pub mod status;
pub mod width;
pub mod wrap;
