//! How much of a counter's target is shown at a given point of its run

pub use crate::config::EasingType;

impl EasingType {
    /// Share of the target to display after `t` of the duration has elapsed
    ///
    /// Never leaves [0, 1], so a counter cannot overshoot its final value
    /// or count below zero. NaN counts as not started.
    pub fn share(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            EasingType::Linear => t,
            EasingType::EaseOut => {
                let rest = 1.0 - t;
                1.0 - rest * rest * rest
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_counts_at_constant_rate() {
        let target = 1200.0;
        assert_eq!(target * EasingType::Linear.share(0.25), 300.0);
        assert_eq!(target * EasingType::Linear.share(1.0), target);
    }

    #[test]
    fn test_ease_out_front_loads_the_count() {
        let early = EasingType::EaseOut.share(0.5);
        assert!(early > EasingType::Linear.share(0.5));
        assert!((early - 0.875).abs() < 1e-12);
        assert_eq!(EasingType::EaseOut.share(1.0), 1.0);
    }

    #[test]
    fn test_share_stays_within_target() {
        for easing in [EasingType::Linear, EasingType::EaseOut] {
            assert_eq!(easing.share(-0.4), 0.0);
            assert_eq!(easing.share(3.0), 1.0);
            assert_eq!(easing.share(f64::NAN), 0.0);
        }
    }
}
