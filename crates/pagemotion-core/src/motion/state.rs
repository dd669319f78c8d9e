//! Once-only transition flag attached to every animated element

use serde::Serialize;

/// Tri-state flag: `NotStarted -> Started -> Done`, never backwards
///
/// Every trigger path (observer callback, parent reveal, fallback timer)
/// goes through [`AnimationState::try_start`] or [`AnimationState::finish`],
/// so whichever fires first wins and the rest become no-ops. Callbacks run
/// to completion on one thread, which makes the check-and-set atomic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationState {
    #[default]
    NotStarted,
    Started,
    Done,
}

impl AnimationState {
    /// Claim the transition; `true` only for the first caller
    #[inline]
    pub fn try_start(&mut self) -> bool {
        if *self == AnimationState::NotStarted {
            *self = AnimationState::Started;
            true
        } else {
            false
        }
    }

    /// Move to `Done`; `true` if this call made the change
    #[inline]
    pub fn finish(&mut self) -> bool {
        if *self == AnimationState::Done {
            false
        } else {
            *self = AnimationState::Done;
            true
        }
    }

    #[inline]
    pub fn is_started(&self) -> bool {
        *self != AnimationState::NotStarted
    }

    #[inline]
    pub fn is_done(&self) -> bool {
        *self == AnimationState::Done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_caller_wins() {
        let mut state = AnimationState::default();
        assert!(state.try_start());
        assert!(!state.try_start());
        assert!(state.is_started());
        assert!(!state.is_done());
    }

    #[test]
    fn test_done_is_absorbing() {
        let mut state = AnimationState::default();
        assert!(state.finish());
        assert!(!state.finish());
        assert!(!state.try_start());
        assert_eq!(state, AnimationState::Done);
    }
}
