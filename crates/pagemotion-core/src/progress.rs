//! Reading progress bar

use tracing::trace;

use crate::config::ProgressConfig;
use crate::host::{ElementId, Surface, Viewport};

/// Percentage of the page scrolled, in `[0, 100]`
pub fn scroll_percent(viewport: &Viewport) -> f64 {
    let max = (viewport.scroll_height - viewport.height).max(1.0);
    (viewport.scroll_y / max * 100.0).clamp(0.0, 100.0)
}

/// Keeps the width of the progress bar in step with the scroll position
#[derive(Debug, Clone)]
pub struct ScrollProgress {
    bar: ElementId,
    percent: f64,
}

impl ScrollProgress {
    pub fn mount(config: &ProgressConfig, surface: &mut dyn Surface) -> Option<Self> {
        let bar = surface.query_class(&config.bar_class).into_iter().next()?;
        let mut progress = Self { bar, percent: 0.0 };
        progress.update(surface);
        Some(progress)
    }

    #[inline]
    pub fn bar(&self) -> ElementId {
        self.bar
    }

    #[inline]
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Recompute after a scroll or resize
    pub fn update(&mut self, surface: &mut dyn Surface) {
        self.percent = scroll_percent(&surface.viewport());
        surface.set_style(self.bar, "width", &format!("{}%", self.percent));
        trace!(percent = self.percent, "Scroll progress");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, Rect};

    fn page() -> (Document, ElementId) {
        let mut doc = Document::new(Viewport {
            width: 1000.0,
            height: 800.0,
            scroll_y: 0.0,
            scroll_height: 2800.0,
        });
        let bar = doc.create(None, &["scroll-progress"], Rect::default());
        (doc, bar)
    }

    #[test]
    fn test_width_follows_scroll() {
        let (mut doc, bar) = page();
        let mut progress = ScrollProgress::mount(&ProgressConfig::default(), &mut doc).unwrap();
        assert_eq!(doc.style(bar, "width"), Some("0%"));

        doc.set_scroll_y(1000.0);
        progress.update(&mut doc);
        assert_eq!(progress.percent(), 50.0);
        assert_eq!(doc.style(bar, "width"), Some("50%"));

        doc.set_scroll_y(5000.0);
        progress.update(&mut doc);
        assert_eq!(doc.style(bar, "width"), Some("100%"));
    }

    #[test]
    fn test_short_page_stays_in_range() {
        let viewport = Viewport {
            width: 400.0,
            height: 800.0,
            scroll_y: 30.0,
            scroll_height: 500.0,
        };
        assert_eq!(scroll_percent(&viewport), 100.0);
        assert_eq!(scroll_percent(&Viewport { scroll_y: 0.0, ..viewport }), 0.0);
    }

    #[test]
    fn test_missing_bar() {
        let mut doc = Document::default();
        assert!(ScrollProgress::mount(&ProgressConfig::default(), &mut doc).is_none());
    }
}
