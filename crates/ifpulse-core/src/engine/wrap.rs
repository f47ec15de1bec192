//! Counter wraparound correction.

/// Largest value of a 32-bit counter.
pub const NARROW_CEILING: u64 = 4_294_967_295;

/// Largest value of a 64-bit counter.
pub const WIDE_CEILING: u64 = u64::MAX;

/// The ceiling a counter wrapped at.
///
/// A wide counter whose previous value is still below the 32-bit ceiling
/// is treated as narrow: some agents advertise 64-bit OIDs but serve
/// 32-bit values from them. A genuinely wide counter that is still small
/// is misjudged by this rule.
pub fn wrap_ceiling(previous: u64, wide: bool) -> u64 {
    if wide && previous >= NARROW_CEILING {
        WIDE_CEILING
    } else {
        if wide {
            tracing::debug!(previous, "wide counter below 32-bit ceiling, wrapping at 32 bits");
        }
        NARROW_CEILING
    }
}

/// Octets counted between `previous` and `current`, assuming exactly one
/// wrap happened in between. Multiple wraps cannot be detected.
pub fn wrapped_delta(previous: u64, current: u64, wide: bool) -> u64 {
    let ceiling = wrap_ceiling(previous, wide);
    ceiling.saturating_sub(previous).saturating_add(current)
}

/// Difference between two readings of one counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CounterDelta {
    pub octets: u64,
    pub wrapped: bool,
}

/// Naive difference, or the wrap-corrected one when the counter went backwards.
pub fn counter_delta(previous: u64, current: u64, wide: bool) -> CounterDelta {
    match current.checked_sub(previous) {
        Some(octets) => CounterDelta {
            octets,
            wrapped: false,
        },
        None => CounterDelta {
            octets: wrapped_delta(previous, current, wide),
            wrapped: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn narrow_wrap_scenario() {
        assert_eq!(wrapped_delta(4_294_960_000, 500, false), 7795);
    }

    #[test]
    fn negative_naive_delta_triggers_wrap() {
        let delta = counter_delta(4_294_960_000, 500, false);
        assert_eq!(
            delta,
            CounterDelta {
                octets: 7795,
                wrapped: true
            }
        );
    }

    #[test]
    fn forward_delta_is_untouched() {
        let delta = counter_delta(1_000_000, 1_481_000, true);
        assert_eq!(
            delta,
            CounterDelta {
                octets: 481_000,
                wrapped: false
            }
        );
        assert_eq!(counter_delta(7, 7, false).octets, 0);
    }

    #[test]
    fn wide_wrap_uses_64_bit_ceiling() {
        let previous = u64::MAX - 1_000;
        assert_eq!(wrapped_delta(previous, 250, true), 1_250);
    }

    #[test]
    fn fake_wide_counter_wraps_at_32_bits() {
        // Advertised wide, but the previous value never left 32-bit range.
        assert_eq!(wrap_ceiling(4_294_960_000, true), NARROW_CEILING);
        assert_eq!(wrapped_delta(4_294_960_000, 500, true), 7795);
    }

    #[test]
    fn previous_at_exact_narrow_ceiling_keeps_wide_ceiling() {
        assert_eq!(wrap_ceiling(NARROW_CEILING, true), WIDE_CEILING);
        assert_eq!(wrap_ceiling(NARROW_CEILING, false), NARROW_CEILING);
    }

    #[test]
    fn wrap_result_matches_formula_and_is_positive() {
        let cases = [
            (1_u64, 0_u64, false),
            (3_000_000_000, 2_999_999_999, false),
            (4_294_967_294, 0, true),
            (10_000_000_000, 5, true),
            (u64::MAX - 1, u64::MAX - 2, true),
        ];
        for (previous, current, wide) in cases {
            let ceiling = wrap_ceiling(previous, wide);
            let expected = (ceiling - previous) + current;
            let got = wrapped_delta(previous, current, wide);
            assert_eq!(got, expected, "previous={previous} current={current}");
            assert!(got > 0);
        }
    }
}
