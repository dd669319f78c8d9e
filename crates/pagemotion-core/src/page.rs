//! Wires every engine to one page and routes host events to them

use std::time::Duration;

use tracing::{debug, trace};

use crate::carousel::{Carousel, CarouselSignal};
use crate::config::AppConfig;
use crate::counter::CounterGroup;
use crate::host::{
    ElementId, FrameTarget, GroupId, IntersectionEntry, ObserverId, Scheduler, Surface, TimerTarget,
};
use crate::motion::MotionGate;
use crate::parallax::ParallaxWrap;
use crate::progress::ScrollProgress;
use crate::reveal::RevealGroup;
use crate::scrollspy::ScrollSpy;

/// Everything the host can report back to the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Scroll,
    Resize,
    /// Pointer at viewport coordinates
    PointerMove { x: f64, y: f64 },
    /// Pointer left the window
    PointerLeave,
    Intersection {
        observer: ObserverId,
        element: ElementId,
        entry: IntersectionEntry,
    },
    Frame {
        target: FrameTarget,
        timestamp: Duration,
    },
    Timeout(TimerTarget),
    Carousel(CarouselSignal),
}

/// The mounted features of one page
#[derive(Debug, Clone)]
pub struct Page {
    gate: MotionGate,
    progress: Option<ScrollProgress>,
    navbar: Option<ScrollSpy>,
    parallax: Vec<ParallaxWrap>,
    reveals: Vec<RevealGroup>,
    counters: Vec<CounterGroup>,
    carousel: Option<Carousel>,
    pointer_over_carousel: bool,
}

impl Page {
    /// Mount every feature that finds its elements on the page
    pub fn mount(
        config: &AppConfig,
        gate: MotionGate,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> Self {
        let progress = ScrollProgress::mount(&config.progress, surface);
        let navbar = ScrollSpy::mount(&config.navbar, surface);

        let parallax: Vec<ParallaxWrap> = surface
            .query_class(&config.parallax.wrap_class)
            .into_iter()
            .enumerate()
            .filter_map(|(index, wrap)| {
                ParallaxWrap::mount(index, wrap, &config.parallax, gate, &mut *surface)
            })
            .collect();

        let mut reveals = Vec::new();
        for (index, class) in config.reveal.groups.iter().enumerate() {
            let elements = surface.query_class(class);
            if let Some(group) =
                RevealGroup::mount(
                    GroupId(index),
                    elements,
                    &config.reveal,
                    gate,
                    surface,
                    scheduler,
                )
            {
                reveals.push(group);
            }
        }

        let mut counters = Vec::new();
        for (index, group_config) in config.counters.groups.iter().enumerate() {
            let elements = surface.query_class(&group_config.class);
            if let Some(group) = CounterGroup::mount(
                GroupId(index),
                elements,
                group_config,
                config.counters.easing,
                config.counters.fallback(),
                gate,
                surface,
                scheduler,
            ) {
                counters.push(group);
            }
        }

        let carousel = Carousel::mount(&config.carousel, gate, surface, scheduler);

        let page = Self {
            gate,
            progress,
            navbar,
            parallax,
            reveals,
            counters,
            carousel,
            pointer_over_carousel: false,
        };
        debug!(
            reduced_motion = gate.is_reduced(),
            reveal_groups = page.reveals.len(),
            counter_groups = page.counters.len(),
            parallax_wraps = page.parallax.len(),
            carousel = page.carousel.is_some(),
            progress = page.progress.is_some(),
            navbar = page.navbar.is_some(),
            "Page mounted"
        );
        page
    }

    #[inline]
    pub fn gate(&self) -> MotionGate {
        self.gate
    }

    pub fn progress(&self) -> Option<&ScrollProgress> {
        self.progress.as_ref()
    }

    pub fn navbar(&self) -> Option<&ScrollSpy> {
        self.navbar.as_ref()
    }

    pub fn parallax(&self) -> &[ParallaxWrap] {
        &self.parallax
    }

    pub fn reveals(&self) -> &[RevealGroup] {
        &self.reveals
    }

    pub fn counters(&self) -> &[CounterGroup] {
        &self.counters
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    #[inline]
    pub fn pointer_over_carousel(&self) -> bool {
        self.pointer_over_carousel
    }

    /// Every reveal shown and every counter at its final value
    pub fn is_settled(&self) -> bool {
        self.reveals.iter().all(RevealGroup::all_visible)
            && self.counters.iter().all(CounterGroup::all_done)
    }

    pub fn dispatch(
        &mut self,
        event: PageEvent,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        match event {
            PageEvent::Scroll | PageEvent::Resize => {
                if let Some(progress) = self.progress.as_mut() {
                    progress.update(surface);
                }
                if let Some(navbar) = self.navbar.as_mut() {
                    navbar.update(surface);
                }
                for wrap in &mut self.parallax {
                    wrap.on_scroll(scheduler);
                }
            }
            PageEvent::PointerMove { x, y } => self.pointer_move(x, y, surface, scheduler),
            PageEvent::PointerLeave => {
                for wrap in &mut self.parallax {
                    wrap.pointer_leave(scheduler);
                }
                self.leave_carousel();
            }
            PageEvent::Intersection {
                observer,
                element,
                entry,
            } => self.on_intersection(observer, element, entry, surface, scheduler),
            PageEvent::Frame { target, timestamp } => {
                self.on_frame(target, timestamp, surface, scheduler)
            }
            PageEvent::Timeout(timer) => self.on_timeout(timer, surface, scheduler),
            PageEvent::Carousel(signal) => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.handle(signal);
                }
            }
        }
    }

    fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        for wrap in &mut self.parallax {
            if surface.bounding_rect(wrap.wrap()).contains_point(x, y) {
                wrap.pointer_move(x, y, &*surface, scheduler);
            } else if wrap.pointer() != (0.0, 0.0) {
                wrap.pointer_leave(scheduler);
            }
        }

        let Some(carousel) = self.carousel.as_mut() else {
            return;
        };
        let over = surface.bounding_rect(carousel.track()).contains_point(x, y);
        if over && !self.pointer_over_carousel {
            carousel.handle(CarouselSignal::PointerEnter);
        } else if !over && self.pointer_over_carousel {
            carousel.handle(CarouselSignal::PointerLeave);
        }
        self.pointer_over_carousel = over;
    }

    fn leave_carousel(&mut self) {
        if let Some(carousel) = self.carousel.as_mut() {
            if self.pointer_over_carousel {
                carousel.handle(CarouselSignal::PointerLeave);
            }
        }
        self.pointer_over_carousel = false;
    }

    fn on_intersection(
        &mut self,
        observer: ObserverId,
        element: ElementId,
        entry: IntersectionEntry,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        match observer {
            ObserverId::Reveal(id) => {
                let revealed = match self.reveals.iter_mut().find(|g| g.id() == id) {
                    Some(group) => group.on_intersection(element, entry, surface, scheduler),
                    None => return,
                };
                self.start_nested_counters(&revealed, surface, scheduler);
            }
            ObserverId::Counter(id) => {
                if let Some(group) = self.counters.iter_mut().find(|g| g.id() == id) {
                    group.on_intersection(element, entry, surface, scheduler);
                }
            }
        }
    }

    fn on_frame(
        &mut self,
        target: FrameTarget,
        timestamp: Duration,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        match target {
            FrameTarget::Counter(id, element) => {
                if let Some(group) = self.counters.iter_mut().find(|g| g.id() == id) {
                    group.on_frame(element, timestamp, surface, scheduler);
                }
            }
            FrameTarget::Carousel => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_frame(surface, scheduler);
                }
            }
            FrameTarget::Parallax(index) => {
                if let Some(wrap) = self.parallax.iter_mut().find(|w| w.index() == index) {
                    wrap.on_frame(surface);
                }
            }
        }
    }

    fn on_timeout(
        &mut self,
        timer: TimerTarget,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        match timer {
            TimerTarget::RevealDelay(id, _) | TimerTarget::RevealFallback(id) => {
                let revealed = match self.reveals.iter_mut().find(|g| g.id() == id) {
                    Some(group) => group.on_timeout(timer, surface),
                    None => return,
                };
                self.start_nested_counters(&revealed, surface, scheduler);
            }
            TimerTarget::CounterFallback(id) => {
                if let Some(group) = self.counters.iter_mut().find(|g| g.id() == id) {
                    group.on_timeout(timer, surface, scheduler);
                }
            }
        }
    }

    /// A revealed card starts the counters it contains
    fn start_nested_counters(
        &mut self,
        revealed: &[ElementId],
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        if revealed.is_empty() {
            return;
        }
        let started: usize = self
            .counters
            .iter_mut()
            .map(|group| group.trigger_within(revealed, surface, scheduler))
            .sum();
        if started > 0 {
            trace!(revealed = revealed.len(), started, "Reveal started nested counters");
        }
    }
}
