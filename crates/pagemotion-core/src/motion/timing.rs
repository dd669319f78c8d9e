//! Time calculation utilities driven by frame timestamps
//!
//! Frame callbacks receive the host's timestamp for the frame being painted,
//! so progress is computed from timestamps rather than from `Instant::now()`.

use std::time::Duration;

/// Calculate animation progress (0.0 to 1.0) between `start` and `now`
///
/// A zero duration is complete immediately.
#[inline]
pub fn progress(start: Duration, now: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_sub(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Wrap `value` into `[0, modulus)`
///
/// Euclidean remainder can round up to exactly `modulus` for tiny negative
/// inputs; that case folds back to zero.
#[inline]
pub fn wrap(value: f64, modulus: f64) -> f64 {
    let wrapped = value.rem_euclid(modulus);
    if wrapped >= modulus || !wrapped.is_finite() {
        0.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress() {
        let start = Duration::from_millis(100);
        let duration = Duration::from_millis(1000);
        assert_eq!(progress(start, start, duration), 0.0);
        assert!((progress(start, Duration::from_millis(600), duration) - 0.5).abs() < 1e-9);
        assert_eq!(progress(start, Duration::from_millis(5000), duration), 1.0);
        // a timestamp before the start never goes negative
        assert_eq!(progress(start, Duration::ZERO, duration), 0.0);
    }

    #[test]
    fn test_progress_zero_duration() {
        assert_eq!(progress(Duration::ZERO, Duration::ZERO, Duration::ZERO), 1.0);
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap(5.0, 10.0), 5.0);
        assert_eq!(wrap(10.0, 10.0), 0.0);
        assert_eq!(wrap(-0.5, 10.0), 9.5);
        assert_eq!(wrap(-25.0, 10.0), 5.0);
        assert_eq!(wrap(-1e-18, 10.0), 0.0);
    }
}
