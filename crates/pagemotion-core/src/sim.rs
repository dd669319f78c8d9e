//! Headless frame-by-frame driver
//!
//! Owns the page, the in-memory document and the scheduler, and plays the
//! host's part: every frame it fires due timers, reports intersections for
//! the scrolled viewport and then runs the frame callbacks that were queued
//! before the frame started.

use std::time::Duration;

use tracing::{debug, trace};

use crate::carousel::CarouselSignal;
use crate::config::AppConfig;
use crate::host::{Document, FrameScheduler, PageFixture, Scheduler, Surface};
use crate::motion::MotionGate;
use crate::page::{Page, PageEvent};
use crate::snapshot::Snapshot;

#[derive(Debug, Clone)]
pub struct Simulation {
    config: AppConfig,
    gate: MotionGate,
    /// Markup as loaded, used by `remount`
    pristine: Document,
    document: Document,
    scheduler: FrameScheduler,
    page: Page,
    frame_interval: Duration,
    frames: u64,
}

impl Simulation {
    pub fn new(document: Document, config: AppConfig, gate: MotionGate) -> Self {
        Self::with_scheduler(document, FrameScheduler::new(), config, gate)
    }

    /// Drive the page with a custom scheduler, e.g. one without observation
    pub fn with_scheduler(
        document: Document,
        mut scheduler: FrameScheduler,
        config: AppConfig,
        gate: MotionGate,
    ) -> Self {
        let pristine = document.clone();
        let mut document = document;
        let page = Page::mount(&config, gate, &mut document, &mut scheduler);
        let frame_interval = config.motion.frame_interval();
        debug!(
            elements = document.len(),
            frame_interval_us = frame_interval.as_micros() as u64,
            "Simulation ready"
        );
        Self {
            config,
            gate,
            pristine,
            document,
            scheduler,
            page,
            frame_interval,
            frames: 0,
        }
    }

    pub fn from_fixture(fixture: &PageFixture, config: AppConfig, gate: MotionGate) -> Self {
        Self::new(Document::from_fixture(fixture), config, gate)
    }

    /// Throw away all state and mount the original markup again
    pub fn remount(&mut self) {
        let scheduler = if self.scheduler.observation_supported() {
            FrameScheduler::new()
        } else {
            FrameScheduler::without_observation()
        };
        let scroll_y = self.document.viewport().scroll_y;
        let mut document = self.pristine.clone();
        document.set_scroll_y(scroll_y);
        *self = Self::with_scheduler(document, scheduler, self.config.clone(), self.gate);
        debug!(scroll_y, "Page remounted");
    }

    /// Run one frame of the host loop
    pub fn advance_frame(&mut self) {
        self.frames += 1;
        let now = self.scheduler.now() + self.frame_interval;
        self.scheduler.advance_to(now);

        for timer in self.scheduler.take_due_timers() {
            self.dispatch(PageEvent::Timeout(timer));
        }

        let viewport = self.document.viewport();
        let document = &self.document;
        let matches = self
            .scheduler
            .matching_observations(&viewport, |el| document.bounding_rect(el));
        for (observer, element, entry) in matches {
            // an earlier callback in this batch may have stopped watching it
            if self.scheduler.is_observing(observer, element) {
                self.dispatch(PageEvent::Intersection {
                    observer,
                    element,
                    entry,
                });
            }
        }

        let targets = self.scheduler.take_frame_callbacks();
        trace!(frame = self.frames, callbacks = targets.len(), "Frame");
        for target in targets {
            self.dispatch(PageEvent::Frame {
                target,
                timestamp: now,
            });
        }
    }

    pub fn advance_frames(&mut self, frames: u64) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Run frames until at least `duration` of virtual time has passed
    pub fn advance_by(&mut self, duration: Duration) {
        let until = self.scheduler.now() + duration;
        while self.scheduler.now() < until {
            self.advance_frame();
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.document.set_scroll_y(scroll_y);
        self.dispatch(PageEvent::Scroll);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        let scroll_y = self.document.viewport().scroll_y + delta;
        self.scroll_to(scroll_y);
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.document.set_viewport_size(width, height);
        self.dispatch(PageEvent::Resize);
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.dispatch(PageEvent::PointerMove { x, y });
    }

    pub fn pointer_leave(&mut self) {
        self.dispatch(PageEvent::PointerLeave);
    }

    pub fn carousel_signal(&mut self, signal: CarouselSignal) {
        self.dispatch(PageEvent::Carousel(signal));
    }

    fn dispatch(&mut self, event: PageEvent) {
        self.page.dispatch(event, &mut self.document, &mut self.scheduler);
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn scheduler(&self) -> &FrameScheduler {
        &self.scheduler
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn gate(&self) -> MotionGate {
        self.gate
    }

    /// Virtual time since mount
    #[inline]
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementId, Rect, Viewport};
    use crate::AnimationState;

    fn page() -> (Document, Vec<ElementId>, ElementId) {
        let mut doc = Document::new(Viewport {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
            scroll_height: 6000.0,
        });
        let mut reveals = Vec::new();
        for i in 0..4 {
            let rect = Rect::new(0.0, 300.0 + 1200.0 * i as f64, 600.0, 300.0);
            let el = doc.create(None, &["js-reveal"], rect);
            reveals.push(el);
        }
        let rect = Rect::new(0.0, 2750.0, 200.0, 60.0);
        let counter = doc.create(Some(reveals[2]), &["js-counter"], rect);
        doc.set_data(counter, "target", "1234.5");
        doc.set_data(counter, "decimals", "1");
        doc.set_data(counter, "prefix", "$");
        doc.set_data(counter, "suffix", "+");

        let track = doc.create(None, &["js-reviews-track"], Rect::new(0.0, 5000.0, 1280.0, 400.0));
        for i in 0..3 {
            let rect = Rect::new(320.0 * i as f64, 5000.0, 320.0, 400.0);
            doc.create(Some(track), &["review-card"], rect);
        }
        (doc, reveals, counter)
    }

    #[test]
    fn test_visible_elements_reveal_on_first_frame() {
        let (doc, reveals, _) = page();
        let mut sim = Simulation::new(doc, AppConfig::default(), MotionGate::default());

        sim.advance_frame();
        assert!(sim.document().has_class(reveals[0], "is-visible"));
        assert!(!sim.document().has_class(reveals[1], "is-visible"));
        assert!(sim.document().has_class(reveals[1], "will-reveal"));
    }

    #[test]
    fn test_fallback_reveals_everything_in_time() {
        let (doc, reveals, counter) = page();
        let mut sim = Simulation::new(doc, AppConfig::default(), MotionGate::default());

        sim.advance_by(Duration::from_millis(1700));
        for el in &reveals {
            assert!(sim.document().has_class(*el, "is-visible"));
            assert!(!sim.document().has_class(*el, "will-reveal"));
        }
        // the fallback reveal started the nested counter
        let group = &sim.page().counters()[0];
        assert!(group.state(counter).is_some_and(|s| s.is_started()));

        sim.advance_by(Duration::from_millis(1100));
        assert_eq!(sim.document().text(counter), "$1,234.5+");
        assert!(sim.page().is_settled());
    }

    #[test]
    fn test_scrolling_reveals_and_counts() {
        let (doc, reveals, counter) = page();
        let mut sim = Simulation::new(doc, AppConfig::default(), MotionGate::default());

        sim.scroll_to(2200.0);
        sim.advance_frame();
        assert!(sim.document().has_class(reveals[2], "is-visible"));
        assert_eq!(
            sim.page().counters()[0].state(counter),
            Some(AnimationState::Started)
        );

        let mut last = 0.0;
        for _ in 0..70 {
            sim.advance_frame();
            let text = sim.document().text(counter).to_string();
            let value: f64 = text
                .trim_start_matches('$')
                .trim_end_matches('+')
                .replace(',', "")
                .parse()
                .unwrap();
            assert!(value >= last, "{} went backwards from {}", value, last);
            last = value;
        }
        assert_eq!(sim.document().text(counter), "$1,234.5+");
    }

    #[test]
    fn test_carousel_runs_every_frame() {
        let (doc, _, _) = page();
        let mut sim = Simulation::new(doc, AppConfig::default(), MotionGate::default());
        let start = sim.page().carousel().map(|c| c.offset()).unwrap();

        sim.advance_frames(10);
        let carousel = sim.page().carousel().unwrap();
        assert_eq!(carousel.offset(), start - 5.0);
        assert_eq!(sim.document().scroll_left(carousel.track()), carousel.offset());

        sim.carousel_signal(CarouselSignal::WindowBlur);
        sim.advance_frames(10);
        assert_eq!(sim.page().carousel().unwrap().offset(), start - 5.0);
    }

    #[test]
    fn test_reduced_motion_is_final_without_frames() {
        let (doc, reveals, counter) = page();
        let mut sim = Simulation::new(doc, AppConfig::default(), MotionGate::new(true));

        assert!(sim.page().is_settled());
        assert_eq!(sim.document().text(counter), "$1,234.5+");
        for el in &reveals {
            assert!(sim.document().has_class(*el, "is-visible"));
        }

        sim.advance_frames(120);
        let carousel = sim.page().carousel().unwrap();
        assert_eq!(carousel.offset(), 0.0);
        assert_eq!(sim.document().scroll_left(carousel.track()), 0.0);
    }

    #[test]
    fn test_without_observation_everything_shows() {
        let (doc, reveals, counter) = page();
        let sim = Simulation::with_scheduler(
            doc,
            FrameScheduler::without_observation(),
            AppConfig::default(),
            MotionGate::default(),
        );
        assert!(reveals.iter().all(|el| sim.document().has_class(*el, "is-visible")));
        assert_eq!(sim.document().text(counter), "$1,234.5+");
    }

    #[test]
    fn test_remount_restores_markup() {
        let (doc, reveals, _) = page();
        let mut sim = Simulation::new(doc, AppConfig::default(), MotionGate::default());
        sim.advance_by(Duration::from_secs(3));
        assert!(sim.page().is_settled());

        sim.remount();
        assert_eq!(sim.frame_count(), 0);
        assert_eq!(sim.now(), Duration::ZERO);
        assert!(!sim.document().has_class(reveals[3], "is-visible"));
        assert!(!sim.page().is_settled());
    }
}
