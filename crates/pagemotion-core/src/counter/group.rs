//! Counter state machine
//!
//! A counter is started by whichever of these arrives first: its own
//! intersection observer, a parent reveal element becoming visible, or the
//! group fallback timer. After that every trigger is ignored.

use std::time::Duration;

use tracing::{debug, trace};

use super::format::format_value;
use super::spec::CounterSpec;
use crate::config::{CounterGroupConfig, EasingType};
use crate::host::{
    ElementId, FrameTarget, GroupId, IntersectionEntry, ObserverId, ObserverOptions, Scheduler,
    Surface, TimerTarget,
};
use crate::motion::timing::progress;
use crate::motion::{AnimationState, MotionGate};

/// How a trigger should bring the counter to its target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// Count up over the spec duration, one step per frame
    Animate,
    /// Write the final value right away
    Snap,
}

#[derive(Debug, Clone)]
struct CounterItem {
    element: ElementId,
    spec: CounterSpec,
    state: AnimationState,
    /// Timestamp of the first frame
    started_at: Option<Duration>,
}

/// Counters sharing one threshold, duration and fallback timer
#[derive(Debug, Clone)]
pub struct CounterGroup {
    id: GroupId,
    class: String,
    options: ObserverOptions,
    easing: EasingType,
    items: Vec<CounterItem>,
}

impl CounterGroup {
    /// Parse every counter's spec and start watching them
    ///
    /// Returns `None` when nothing matched. Under reduced motion, or without
    /// intersection observation, every counter shows its final value on return.
    #[allow(clippy::too_many_arguments)]
    pub fn mount(
        id: GroupId,
        elements: Vec<ElementId>,
        config: &CounterGroupConfig,
        easing: EasingType,
        fallback: Duration,
        gate: MotionGate,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }

        let duration = config.duration();
        let items = elements
            .into_iter()
            .map(|element| CounterItem {
                element,
                spec: CounterSpec::from_element(&*surface, element, duration),
                state: AnimationState::default(),
                started_at: None,
            })
            .collect();

        let mut group = Self {
            id,
            class: config.class.clone(),
            options: ObserverOptions::new(config.threshold),
            easing,
            items,
        };

        if gate.is_reduced() || !scheduler.observation_supported() {
            for index in 0..group.items.len() {
                group.trigger_at(index, TriggerMode::Snap, surface, scheduler);
            }
            debug!(group = id.0, class = %group.class, "Counters snapped to final values");
            return Some(group);
        }

        let observer = group.observer();
        for item in &group.items {
            scheduler.observe_until_first_match(observer, item.element, group.options);
        }
        scheduler.set_timeout(TimerTarget::CounterFallback(id), fallback);

        debug!(
            group = id.0,
            class = %group.class,
            count = group.items.len(),
            duration_ms = duration.as_millis(),
            "Counter group mounted"
        );
        Some(group)
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn observer(&self) -> ObserverId {
        ObserverId::Counter(self.id)
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items.iter().map(|i| i.element)
    }

    pub fn spec(&self, element: ElementId) -> Option<&CounterSpec> {
        self.items
            .iter()
            .find(|i| i.element == element)
            .map(|i| &i.spec)
    }

    pub fn state(&self, element: ElementId) -> Option<AnimationState> {
        self.items
            .iter()
            .find(|i| i.element == element)
            .map(|i| i.state)
    }

    pub fn all_done(&self) -> bool {
        self.items.iter().all(|i| i.state.is_done())
    }

    /// Start one counter; `false` if it was not ours or had already started
    pub fn trigger(
        &mut self,
        element: ElementId,
        mode: TriggerMode,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        match self.index_of(element) {
            Some(index) => self.trigger_at(index, mode, surface, scheduler),
            None => false,
        }
    }

    /// Start every counter inside any of `roots` (a parent became visible)
    pub fn trigger_within(
        &mut self,
        roots: &[ElementId],
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> usize {
        let mut started = 0;
        for index in 0..self.items.len() {
            let element = self.items[index].element;
            if roots.iter().any(|root| surface.contains(*root, element))
                && self.trigger_at(index, TriggerMode::Animate, surface, scheduler)
            {
                started += 1;
            }
        }
        started
    }

    /// Observer callback
    pub fn on_intersection(
        &mut self,
        element: ElementId,
        entry: IntersectionEntry,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        if !entry.is_intersecting {
            return false;
        }
        scheduler.unobserve(self.observer(), element);
        self.trigger(element, TriggerMode::Animate, surface, scheduler)
    }

    /// Timer callback; the fallback starts every counter still waiting
    pub fn on_timeout(
        &mut self,
        timer: TimerTarget,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> usize {
        if timer != TimerTarget::CounterFallback(self.id) {
            return 0;
        }
        let started = (0..self.items.len())
            .filter(|&index| self.trigger_at(index, TriggerMode::Animate, surface, scheduler))
            .count();
        if started > 0 {
            debug!(group = self.id.0, started, "Counter fallback fired");
        }
        started
    }

    /// Frame callback: advance one counter and reschedule until complete
    pub fn on_frame(
        &mut self,
        element: ElementId,
        timestamp: Duration,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        let Some(index) = self.index_of(element) else {
            return;
        };
        let easing = self.easing;
        let item = &mut self.items[index];
        if item.state != AnimationState::Started {
            return;
        }

        let start = *item.started_at.get_or_insert(timestamp);
        let t = progress(start, timestamp, item.spec.duration);

        if t < 1.0 {
            let current = item.spec.target * easing.share(t);
            surface.set_text(element, &format_value(current, &item.spec));
            scheduler.schedule_next_frame(FrameTarget::Counter(self.id, element));
            trace!(element = element.0, progress = t, "Counter tick");
            return;
        }

        // exact target, no interpolation drift
        surface.set_text(element, &format_value(item.spec.target, &item.spec));
        item.state.finish();
        trace!(element = element.0, "Counter finished");
    }

    fn index_of(&self, element: ElementId) -> Option<usize> {
        self.items.iter().position(|i| i.element == element)
    }

    fn trigger_at(
        &mut self,
        index: usize,
        mode: TriggerMode,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> bool {
        let item = &mut self.items[index];
        if !item.state.try_start() {
            return false;
        }

        match mode {
            TriggerMode::Snap => {
                surface.set_text(item.element, &format_value(item.spec.target, &item.spec));
                item.state.finish();
            }
            TriggerMode::Animate => {
                scheduler.schedule_next_frame(FrameTarget::Counter(self.id, item.element));
            }
        }
        true
    }
}
