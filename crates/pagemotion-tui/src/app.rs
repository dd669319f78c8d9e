use std::time::Duration;

use pagemotion_core::carousel::CarouselSignal;
use pagemotion_core::{AppConfig, Simulation, Surface};
use tracing::{debug, trace};

use crate::input::Action;
use crate::theme::Theme;

/// Ticks a pointer sweep takes to cross the hero
const SWEEP_STEPS: u32 = 48;

/// Largest chunk of wall time replayed after a stall
const MAX_CATCH_UP: Duration = Duration::from_millis(250);

#[derive(Debug, Clone, Copy)]
struct Sweep {
    step: u32,
}

/// Preview state: the simulated page plus what the viewer is doing to it
pub struct App {
    pub sim: Simulation,
    pub theme: Theme,
    pub scroll_step: f64,
    pub should_quit: bool,
    pub window_blurred: bool,
    pub pointer_on_carousel: bool,
    pub status_message: Option<String>,
    sweep: Option<Sweep>,
    /// Wall time not yet turned into frames
    lag: Duration,
}

impl App {
    pub fn new(sim: Simulation, config: &AppConfig, theme: Theme) -> Self {
        Self {
            sim,
            theme,
            scroll_step: config.ui.scroll_step_px,
            should_quit: false,
            window_blurred: false,
            pointer_on_carousel: false,
            status_message: None,
            sweep: None,
            lag: Duration::ZERO,
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn is_sweeping(&self) -> bool {
        self.sweep.is_some()
    }

    /// Turn elapsed wall time into simulation frames
    pub fn tick(&mut self, elapsed: Duration) {
        self.advance_sweep();

        let interval = self.sim.frame_interval();
        if interval.is_zero() {
            return;
        }
        if elapsed > MAX_CATCH_UP {
            trace!(elapsed_ms = elapsed.as_millis() as u64, "Dropping wall time after a stall");
        }
        self.lag = (self.lag + elapsed).min(MAX_CATCH_UP);
        while self.lag >= interval {
            self.sim.advance_frame();
            self.lag -= interval;
        }
    }

    pub fn handle_action(&mut self, action: Action) {
        if action != Action::None {
            debug!(?action, frame = self.sim.frame_count(), "Preview action");
        }
        match action {
            Action::Quit => self.should_quit = true,
            Action::ScrollDown => self.scroll_by(self.scroll_step),
            Action::ScrollUp => self.scroll_by(-self.scroll_step),
            Action::PageDown => self.scroll_by(self.page_height()),
            Action::PageUp => self.scroll_by(-self.page_height()),
            Action::JumpToTop => self.sim.scroll_to(0.0),
            Action::JumpToBottom => {
                let viewport = self.sim.document().viewport();
                self.sim.scroll_to(viewport.scroll_height);
            }
            Action::ToggleWindowFocus => self.set_window_focus(self.window_blurred),
            Action::TogglePointerOnCarousel => self.toggle_pointer_on_carousel(),
            Action::SweepPointer => self.start_sweep(),
            Action::Remount => {
                self.sim.remount();
                self.window_blurred = false;
                self.pointer_on_carousel = false;
                self.sweep = None;
                self.lag = Duration::ZERO;
                self.set_status("Remounted");
            }
            Action::None => {}
        }
    }

    /// Forward the terminal (or simulated) window focus to the carousel
    pub fn set_window_focus(&mut self, focused: bool) {
        self.window_blurred = !focused;
        let signal = if focused {
            CarouselSignal::WindowFocus
        } else {
            CarouselSignal::WindowBlur
        };
        self.sim.carousel_signal(signal);
        self.set_status(if focused { "Window focused" } else { "Window blurred" });
    }

    fn page_height(&self) -> f64 {
        self.sim.document().viewport().height * 0.9
    }

    fn scroll_by(&mut self, delta: f64) {
        self.sim.scroll_by(delta);
        self.status_message = None;
    }

    fn toggle_pointer_on_carousel(&mut self) {
        if self.pointer_on_carousel {
            self.sim.pointer_leave();
            self.pointer_on_carousel = false;
            self.set_status("Pointer left the carousel");
            return;
        }

        let Some(track) = self.sim.page().carousel().map(|c| c.track()) else {
            self.set_status("No carousel on this page");
            return;
        };
        let rect = self.sim.document().bounding_rect(track);
        self.sweep = None;
        self.sim
            .pointer_move(rect.left() + rect.width / 2.0, rect.top() + rect.height / 2.0);
        self.pointer_on_carousel = true;
        self.set_status("Pointer over the carousel");
    }

    fn start_sweep(&mut self) {
        if self.sim.page().parallax().is_empty() {
            self.set_status("No parallax layers on this page");
            return;
        }
        self.pointer_on_carousel = false;
        self.sweep = Some(Sweep { step: 0 });
        debug!(steps = SWEEP_STEPS, "Starting pointer sweep");
        self.set_status("Sweeping the pointer across the hero");
    }

    fn advance_sweep(&mut self) {
        let Some(sweep) = self.sweep.as_mut() else {
            return;
        };
        let Some(wrap) = self.sim.page().parallax().first().map(|w| w.wrap()) else {
            self.sweep = None;
            return;
        };

        if sweep.step > SWEEP_STEPS {
            self.sweep = None;
            self.sim.pointer_leave();
            return;
        }

        let rect = self.sim.document().bounding_rect(wrap);
        let x = rect.left() + rect.width * f64::from(sweep.step) / f64::from(SWEEP_STEPS);
        let y = rect.top() + rect.height / 2.0;
        sweep.step += 1;
        self.sim.pointer_move(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagemotion_core::host::{Rect, Viewport};
    use pagemotion_core::{Document, MotionGate};

    fn app() -> App {
        let mut doc = Document::new(Viewport {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
            scroll_height: 4000.0,
        });
        let hero = doc.create(None, &["js-parallax-wrap"], Rect::new(0.0, 0.0, 1280.0, 800.0));
        let layer = doc.create(Some(hero), &["layer"], Rect::default());
        doc.set_data(layer, "parallax", "0.4");
        let track = doc.create(None, &["js-reviews-track"], Rect::new(0.0, 1200.0, 1280.0, 400.0));
        for i in 0..3 {
            let rect = Rect::new(320.0 * i as f64, 1200.0, 320.0, 400.0);
            doc.create(Some(track), &["review-card"], rect);
        }
        let config = AppConfig::default();
        let sim = Simulation::new(doc, config.clone(), MotionGate::default());
        App::new(sim, &config, Theme::default())
    }

    fn carousel_paused(app: &App) -> bool {
        app.sim.page().carousel().is_some_and(|c| c.is_paused())
    }

    #[test]
    fn test_tick_turns_time_into_frames() {
        let mut app = app();
        app.tick(Duration::from_millis(10));
        assert_eq!(app.sim.frame_count(), 0);
        app.tick(Duration::from_millis(10));
        assert_eq!(app.sim.frame_count(), 1);

        // a long stall is capped
        app.tick(Duration::from_secs(5));
        assert!(app.sim.frame_count() <= 16);
    }

    #[test]
    fn test_window_focus_toggle_pauses_carousel() {
        let mut app = app();
        app.handle_action(Action::ToggleWindowFocus);
        assert!(app.window_blurred);
        assert!(carousel_paused(&app));

        app.handle_action(Action::ToggleWindowFocus);
        assert!(!app.window_blurred);
        assert!(!carousel_paused(&app));
    }

    #[test]
    fn test_pointer_on_carousel() {
        let mut app = app();
        app.handle_action(Action::TogglePointerOnCarousel);
        assert!(app.pointer_on_carousel);
        assert!(carousel_paused(&app));

        app.handle_action(Action::TogglePointerOnCarousel);
        assert!(!carousel_paused(&app));
    }

    #[test]
    fn test_sweep_ends_back_at_neutral() {
        let mut app = app();
        app.handle_action(Action::SweepPointer);
        assert!(app.is_sweeping());

        for _ in 0..10 {
            app.tick(Duration::from_millis(17));
        }
        assert!(app.sim.page().parallax()[0].pointer().0 < 0.0);

        for _ in 0..60 {
            app.tick(Duration::from_millis(17));
        }
        assert!(!app.is_sweeping());
        assert_eq!(app.sim.page().parallax()[0].pointer(), (0.0, 0.0));
    }

    #[test]
    fn test_scroll_and_remount() {
        let mut app = app();
        app.handle_action(Action::ScrollDown);
        assert_eq!(app.sim.document().viewport().scroll_y, 60.0);
        app.handle_action(Action::PageDown);
        assert_eq!(app.sim.document().viewport().scroll_y, 780.0);
        app.handle_action(Action::JumpToBottom);
        assert_eq!(app.sim.document().viewport().scroll_y, 3200.0);

        app.handle_action(Action::ToggleWindowFocus);
        app.handle_action(Action::Remount);
        assert!(!app.window_blurred);
        assert!(!carousel_paused(&app));
        assert_eq!(app.sim.frame_count(), 0);
    }

    #[test]
    fn test_quit() {
        let mut app = app();
        app.handle_action(Action::Quit);
        assert!(app.should_quit);
    }
}
