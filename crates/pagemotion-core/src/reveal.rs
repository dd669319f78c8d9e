//! Reveal-on-scroll
//!
//! Each element moves `pending -> (intersecting) -> delayed -> visible`,
//! exactly once. Three paths can trigger the move: the intersection observer,
//! the per-element delay timer and the group-wide fallback timer. All of them
//! go through [`AnimationState`], so the class swap happens a single time.

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::config::RevealConfig;
use crate::host::{
    ElementId, GroupId, IntersectionEntry, ObserverId, ObserverOptions, Scheduler, Surface,
    TimerTarget,
};
use crate::motion::{AnimationState, MotionGate};

/// Dataset keys holding the per-element delay in milliseconds
const DELAY_KEYS: [&str; 2] = ["revealDelay", "delay"];

#[derive(Debug, Clone)]
struct RevealItem {
    element: ElementId,
    state: AnimationState,
}

/// Elements sharing one observer, threshold and fallback timer
#[derive(Debug, Clone)]
pub struct RevealGroup {
    id: GroupId,
    options: ObserverOptions,
    fallback: Duration,
    pending_class: String,
    visible_class: String,
    items: Vec<RevealItem>,
}

impl RevealGroup {
    /// Tag `elements` as pending and start watching them
    ///
    /// Returns `None` when nothing matched. Under reduced motion, or when the
    /// host cannot observe intersections, every element is visible on return.
    pub fn mount(
        id: GroupId,
        elements: Vec<ElementId>,
        config: &RevealConfig,
        gate: MotionGate,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Self> {
        if elements.is_empty() {
            return None;
        }

        let mut group = Self {
            id,
            options: ObserverOptions::new(config.threshold)
                .with_bottom_margin(config.root_margin_bottom_px),
            fallback: config.fallback(),
            pending_class: config.pending_class.clone(),
            visible_class: config.visible_class.clone(),
            items: elements
                .into_iter()
                .map(|element| RevealItem {
                    element,
                    state: AnimationState::default(),
                })
                .collect(),
        };

        for item in &group.items {
            surface.add_class(item.element, &group.pending_class);
        }

        if gate.is_reduced() || !scheduler.observation_supported() {
            if gate.allows_motion() {
                warn!(group = id.0, "Intersection observation unavailable, revealing immediately");
            }
            let revealed = group.reveal_all(surface);
            debug!(group = id.0, count = revealed.len(), "Reveal group shown without animation");
            return Some(group);
        }

        let observer = group.observer();
        for item in &group.items {
            scheduler.observe_until_first_match(observer, item.element, group.options);
        }
        scheduler.set_timeout(TimerTarget::RevealFallback(id), group.fallback);

        debug!(
            group = id.0,
            count = group.items.len(),
            threshold = group.options.threshold,
            "Reveal group mounted"
        );
        Some(group)
    }

    #[inline]
    pub fn id(&self) -> GroupId {
        self.id
    }

    #[inline]
    pub fn observer(&self) -> ObserverId {
        ObserverId::Reveal(self.id)
    }

    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.items.iter().map(|i| i.element)
    }

    pub fn state(&self, element: ElementId) -> Option<AnimationState> {
        self.items
            .iter()
            .find(|i| i.element == element)
            .map(|i| i.state)
    }

    pub fn is_visible(&self, element: ElementId) -> bool {
        self.state(element).is_some_and(|s| s.is_done())
    }

    pub fn all_visible(&self) -> bool {
        self.items.iter().all(|i| i.state.is_done())
    }

    /// Observer callback; returns the elements that became visible
    pub fn on_intersection(
        &mut self,
        element: ElementId,
        entry: IntersectionEntry,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> Vec<ElementId> {
        if !entry.is_intersecting {
            return Vec::new();
        }
        let observer = self.observer();
        let Some(index) = self.index_of(element) else {
            return Vec::new();
        };

        scheduler.unobserve(observer, element);
        if !self.items[index].state.try_start() {
            return Vec::new();
        }

        let delay = reveal_delay(surface, element);
        trace!(
            group = self.id.0,
            element = element.0,
            delay_ms = delay.as_millis(),
            "Element intersecting"
        );
        if delay.is_zero() {
            return self.reveal(index, surface).into_iter().collect();
        }

        scheduler.set_timeout(TimerTarget::RevealDelay(self.id, element), delay);
        Vec::new()
    }

    /// Timer callback for this group; returns the elements that became visible
    pub fn on_timeout(&mut self, timer: TimerTarget, surface: &mut dyn Surface) -> Vec<ElementId> {
        match timer {
            TimerTarget::RevealDelay(group, element) if group == self.id => self
                .index_of(element)
                .and_then(|index| self.reveal(index, surface))
                .into_iter()
                .collect(),
            TimerTarget::RevealFallback(group) if group == self.id => {
                let revealed = self.reveal_all(surface);
                if !revealed.is_empty() {
                    debug!(group = self.id.0, count = revealed.len(), "Reveal fallback fired");
                }
                revealed
            }
            _ => Vec::new(),
        }
    }

    fn index_of(&self, element: ElementId) -> Option<usize> {
        self.items.iter().position(|i| i.element == element)
    }

    fn reveal_all(&mut self, surface: &mut dyn Surface) -> Vec<ElementId> {
        (0..self.items.len())
            .filter_map(|index| self.reveal(index, surface))
            .collect()
    }

    /// Swap the presentation classes, once
    fn reveal(&mut self, index: usize, surface: &mut dyn Surface) -> Option<ElementId> {
        let item = &mut self.items[index];
        if !item.state.finish() {
            return None;
        }
        surface.remove_class(item.element, &self.pending_class);
        surface.add_class(item.element, &self.visible_class);
        Some(item.element)
    }
}

fn reveal_delay(surface: &dyn Surface, element: ElementId) -> Duration {
    DELAY_KEYS
        .iter()
        .find_map(|key| surface.data(element, key))
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|ms| ms.is_finite() && *ms > 0.0)
        .map(|ms| Duration::from_secs_f64(ms / 1000.0))
        .unwrap_or(Duration::ZERO)
}
