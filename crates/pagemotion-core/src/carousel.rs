//! Auto-scrolling testimonial carousel
//!
//! The original cards are followed by decorative clones, so the track holds
//! the sequence twice. Scrolling by exactly half the track lands on an
//! identical picture, which turns the linear scroll offset into a ring of
//! size `loop_width`. Every frame the offset moves by `speed * direction` and
//! is wrapped back into `[0, loop_width)`.

use tracing::{debug, trace};

use crate::config::CarouselConfig;
use crate::host::{ElementId, FrameTarget, Scheduler, Surface};
use crate::motion::timing::wrap;
use crate::motion::MotionGate;

/// Host signals that pause or resume the drift
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselSignal {
    PointerEnter,
    PointerLeave,
    FocusIn,
    FocusOut,
    TouchStart,
    TouchEnd,
    WindowBlur,
    WindowFocus,
}

impl CarouselSignal {
    /// Whether the signal pauses (`true`) or resumes (`false`)
    pub fn pauses(self) -> bool {
        matches!(
            self,
            CarouselSignal::PointerEnter
                | CarouselSignal::FocusIn
                | CarouselSignal::TouchStart
                | CarouselSignal::WindowBlur
        )
    }
}

/// Ring-scrolling state for one track
#[derive(Debug, Clone)]
pub struct Carousel {
    track: ElementId,
    original_cards: Vec<ElementId>,
    clones: Vec<ElementId>,
    offset: f64,
    loop_width: f64,
    direction: f64,
    speed: f64,
    paused: bool,
    /// False under reduced motion: no clones, no frame loop
    running: bool,
    gate: MotionGate,
}

impl Carousel {
    /// Find the track and its cards, duplicate them and request the first frame
    ///
    /// Returns `None` without a track or with fewer than two cards. Under
    /// reduced motion the carousel is returned inert and the markup is left
    /// untouched.
    pub fn mount(
        config: &CarouselConfig,
        gate: MotionGate,
        surface: &mut dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) -> Option<Self> {
        let track = surface.query_class(&config.track_class).into_iter().next()?;
        let cards = surface.query_class_within(track, &config.card_class);
        if cards.len() < 2 {
            debug!(cards = cards.len(), "Carousel needs at least two cards, leaving it static");
            return None;
        }

        let viewport = surface.viewport();
        let speed = if viewport.width < config.narrow_breakpoint_px {
            config.speed_narrow
        } else {
            config.speed_wide
        };
        let direction = if config.direction < 0 { -1.0 } else { 1.0 };

        let mut carousel = Self {
            track,
            original_cards: cards,
            clones: Vec::new(),
            offset: 0.0,
            loop_width: 1.0,
            direction,
            speed: speed.abs(),
            paused: false,
            running: false,
            gate,
        };

        if gate.is_reduced() {
            debug!("Reduced motion, carousel stays static");
            return Some(carousel);
        }

        for card in &carousel.original_cards {
            let copy = surface.clone_child(*card, track);
            for class in &config.clone_strip_classes {
                surface.remove_class(copy, class);
            }
            surface.add_class(copy, "is-visible");
            surface.set_attribute(copy, "aria-hidden", "true");
            carousel.clones.push(copy);
        }

        carousel.loop_width = (surface.scroll_width(track) / 2.0).max(1.0);
        carousel.offset = wrap(carousel.loop_width * config.seed_fraction, carousel.loop_width);
        carousel.running = true;
        surface.set_scroll_left(track, carousel.offset);
        scheduler.schedule_next_frame(FrameTarget::Carousel);

        debug!(
            cards = carousel.original_cards.len(),
            loop_width = carousel.loop_width,
            speed = carousel.speed,
            direction = carousel.direction,
            "Carousel mounted"
        );
        Some(carousel)
    }

    #[inline]
    pub fn track(&self) -> ElementId {
        self.track
    }

    pub fn original_cards(&self) -> &[ElementId] {
        &self.original_cards
    }

    pub fn clones(&self) -> &[ElementId] {
        &self.clones
    }

    #[inline]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[inline]
    pub fn loop_width(&self) -> f64 {
        self.loop_width
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed
    }

    #[inline]
    pub fn direction(&self) -> f64 {
        self.direction
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Overwrite speed and direction (sign of `velocity`)
    #[cfg(test)]
    pub fn set_velocity(&mut self, velocity: f64) {
        if velocity.is_finite() {
            self.speed = velocity.abs();
            self.direction = if velocity < 0.0 { -1.0 } else { 1.0 };
        }
    }

    /// Jump to `offset`, wrapped into the ring
    #[cfg(test)]
    pub fn seek(&mut self, offset: f64) {
        if self.running && offset.is_finite() {
            self.offset = wrap(offset, self.loop_width);
        }
    }

    /// Advance the offset by one frame; no-op while paused or inert
    pub fn step(&mut self) {
        if !self.running || self.paused {
            return;
        }
        self.offset = wrap(self.offset + self.speed * self.direction, self.loop_width);
    }

    /// Frame callback: step, write the offset and keep the loop alive
    pub fn on_frame(&mut self, surface: &mut dyn Surface, scheduler: &mut dyn Scheduler) {
        if !self.running {
            return;
        }
        self.step();
        surface.set_scroll_left(self.track, self.offset);
        scheduler.schedule_next_frame(FrameTarget::Carousel);
        trace!(offset = self.offset, paused = self.paused, "Carousel frame");
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.gate.allows_motion() {
            self.paused = false;
        }
    }

    pub fn handle(&mut self, signal: CarouselSignal) {
        if signal.pauses() {
            self.pause();
        } else {
            self.resume();
        }
        trace!(?signal, paused = self.paused, "Carousel signal");
    }
}
