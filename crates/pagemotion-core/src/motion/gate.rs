//! Reduced-motion preference

use crate::config::MotionConfig;

/// The accessibility preference that disables time-based animation
///
/// Read once at startup and passed by value into every engine. Engines keep
/// the value they were mounted with; nothing re-evaluates it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MotionGate {
    reduced: bool,
}

impl MotionGate {
    pub fn new(prefers_reduced_motion: bool) -> Self {
        Self {
            reduced: prefers_reduced_motion,
        }
    }

    /// Host preference, unless the configuration forces a value
    pub fn from_config(host_prefers_reduced: bool, config: &MotionConfig) -> Self {
        Self::new(config.reduced_motion.unwrap_or(host_prefers_reduced))
    }

    #[inline]
    pub fn is_reduced(self) -> bool {
        self.reduced
    }

    #[inline]
    pub fn allows_motion(self) -> bool {
        !self.reduced
    }
}
