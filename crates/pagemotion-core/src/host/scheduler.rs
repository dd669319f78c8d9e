//! Deterministic scheduler driven by a virtual clock

use std::collections::BTreeMap;
use std::time::Duration;

use super::{
    ElementId, FrameTarget, IntersectionEntry, ObserverId, ObserverOptions, Rect, Scheduler,
    TimerTarget, Viewport,
};

#[derive(Debug, Clone)]
struct PendingTimer {
    deadline: Duration,
    seq: u64,
    target: TimerTarget,
}

/// Records frame, observer and timer requests so a driver can fire them in order
///
/// Frame requests made while a frame is being processed land in the next
/// frame, the same way `requestAnimationFrame` behaves inside a callback.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    now: Duration,
    frames: Vec<FrameTarget>,
    observations: BTreeMap<(ObserverId, ElementId), ObserverOptions>,
    timers: Vec<PendingTimer>,
    seq: u64,
    observation_supported: bool,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            frames: Vec::new(),
            observations: BTreeMap::new(),
            timers: Vec::new(),
            seq: 0,
            observation_supported: true,
        }
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A host without intersection observation
    pub fn without_observation() -> Self {
        Self {
            observation_supported: false,
            ..Self::default()
        }
    }

    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward; it never runs backwards
    pub fn advance_to(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }

    /// Frame callbacks requested so far, leaving the queue empty
    pub fn take_frame_callbacks(&mut self) -> Vec<FrameTarget> {
        std::mem::take(&mut self.frames)
    }

    pub fn pending_frames(&self) -> &[FrameTarget] {
        &self.frames
    }

    pub fn has_pending_frame(&self, target: FrameTarget) -> bool {
        self.frames.contains(&target)
    }

    /// Timers whose deadline has passed, in deadline then registration order
    pub fn take_due_timers(&mut self) -> Vec<TimerTarget> {
        let now = self.now;
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.timers.drain(..).partition(|t| t.deadline <= now);
        self.timers = pending;
        due.sort_by_key(|t| (t.deadline, t.seq));
        due.into_iter().map(|t| t.target).collect()
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_observing(&self, observer: ObserverId, element: ElementId) -> bool {
        self.observations.contains_key(&(observer, element))
    }

    pub fn observed_count(&self) -> usize {
        self.observations.len()
    }

    /// Observed elements that currently match their options
    ///
    /// `rect_of` returns the viewport-relative box of an element. One-shot
    /// observers only care about the first matching entry, so non-matching
    /// elements are not reported.
    pub fn matching_observations<F>(
        &self,
        viewport: &Viewport,
        rect_of: F,
    ) -> Vec<(ObserverId, ElementId, IntersectionEntry)>
    where
        F: Fn(ElementId) -> Rect,
    {
        self.observations
            .iter()
            .filter_map(|(&(observer, element), options)| {
                let ratio = intersection_ratio(&rect_of(element), viewport, options);
                ratio.map(|r| (observer, element, IntersectionEntry::intersecting(r)))
            })
            .collect()
    }
}

/// Visible fraction of `rect` inside the (margin-adjusted) viewport,
/// or `None` when it does not reach the threshold
pub(crate) fn intersection_ratio(
    rect: &Rect,
    viewport: &Viewport,
    options: &ObserverOptions,
) -> Option<f64> {
    let root = Rect::new(
        0.0,
        0.0,
        viewport.width,
        (viewport.height + options.root_margin_bottom).max(0.0),
    );

    let overlap_w = rect.right().min(root.right()) - rect.left().max(root.left());
    let overlap_h = rect.bottom().min(root.bottom()) - rect.top().max(root.top());
    if overlap_w < 0.0 || overlap_h < 0.0 {
        return None;
    }

    let area = rect.area();
    let ratio = if area > 0.0 {
        (overlap_w * overlap_h) / area
    } else {
        1.0
    };

    let matches = if options.threshold <= 0.0 {
        true
    } else {
        ratio >= options.threshold
    };
    matches.then_some(ratio)
}

impl Scheduler for FrameScheduler {
    fn schedule_next_frame(&mut self, target: FrameTarget) {
        if !self.frames.contains(&target) {
            self.frames.push(target);
        }
    }

    fn observe_until_first_match(
        &mut self,
        observer: ObserverId,
        element: ElementId,
        options: ObserverOptions,
    ) {
        if self.observation_supported {
            self.observations.insert((observer, element), options);
        }
    }

    fn unobserve(&mut self, observer: ObserverId, element: ElementId) {
        self.observations.remove(&(observer, element));
    }

    fn set_timeout(&mut self, timer: TimerTarget, delay: Duration) {
        self.seq += 1;
        self.timers.push(PendingTimer {
            deadline: self.now + delay,
            seq: self.seq,
            target: timer,
        });
    }

    fn observation_supported(&self) -> bool {
        self.observation_supported
    }
}
