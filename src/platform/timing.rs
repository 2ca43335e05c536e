//=========================================================================
// Delay Timing
//
// Millisecond delay requests → sleepable `Duration`s, shared by the
// backends' `Platform::delay`.
//
//=========================================================================

use std::time::Duration;

/// Converts a delay in milliseconds into a sleep duration.
///
/// `None` for NaN and anything ≤ 0. Requests too large for a `Duration`
/// (including `+inf`) saturate to `Duration::MAX`.
pub(crate) fn delay_duration(time_in_ms: f64) -> Option<Duration> {
    if time_in_ms.is_nan() || time_in_ms <= 0.0 {
        return None;
    }
    Some(Duration::try_from_secs_f64(time_in_ms / 1000.0).unwrap_or(Duration::MAX))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_delays_convert_to_milliseconds() {
        assert_eq!(delay_duration(16.0), Some(Duration::from_millis(16)));
        assert_eq!(delay_duration(0.5), Some(Duration::from_micros(500)));
    }

    #[test]
    fn non_positive_and_nan_delays_are_skipped() {
        assert_eq!(delay_duration(0.0), None);
        assert_eq!(delay_duration(-4.0), None);
        assert_eq!(delay_duration(f64::NEG_INFINITY), None);
        assert_eq!(delay_duration(f64::NAN), None);
    }

    #[test]
    fn oversized_delays_saturate() {
        assert_eq!(delay_duration(f64::INFINITY), Some(Duration::MAX));
        assert_eq!(delay_duration(f64::MAX), Some(Duration::MAX));
    }
}
