//! Pointer and scroll driven layer offsets
//!
//! Each wrap owns a set of layers. A layer's translation is a pure function
//! of the normalised pointer position, the wrap's scroll term and the layer
//! depth; the wrap only keeps the latest pointer sample and renders it on the
//! next frame.

use tracing::{debug, trace};

use crate::config::ParallaxConfig;
use crate::host::{ElementId, FrameTarget, Rect, Scheduler, Surface};
use crate::motion::MotionGate;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxLayer {
    pub element: ElementId,
    pub depth: f64,
}

/// Travel ranges in pixels per unit of depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallaxRanges {
    pub pointer_x: f64,
    pub pointer_y: f64,
    pub scroll: f64,
}

impl From<&ParallaxConfig> for ParallaxRanges {
    fn from(config: &ParallaxConfig) -> Self {
        Self {
            pointer_x: config.pointer_x_range,
            pointer_y: config.pointer_y_range,
            scroll: config.scroll_range,
        }
    }
}

/// Scroll term for a wrap at `rect` (viewport-relative)
///
/// Zero when the wrap's centre of travel is mid-viewport, positive once it
/// has scrolled up past that point.
pub fn scroll_shift(rect: &Rect, viewport_height: f64, range: f64) -> f64 {
    let span = viewport_height + rect.height;
    if span <= 0.0 {
        return 0.0;
    }
    ((viewport_height - rect.top()) / span - 0.5) * range
}

/// Pointer position relative to `rect`, mapped to `[-1, 1]` on both axes
pub fn normalize_pointer(x: f64, y: f64, rect: &Rect) -> (f64, f64) {
    let axis = |value: f64, start: f64, size: f64| {
        if size <= 0.0 || !value.is_finite() {
            0.0
        } else {
            (((value - start) / size) * 2.0 - 1.0).clamp(-1.0, 1.0)
        }
    };
    (axis(x, rect.left(), rect.width), axis(y, rect.top(), rect.height))
}

/// Translation of one layer in pixels
pub fn layer_offset(
    pointer: (f64, f64),
    shift: f64,
    depth: f64,
    ranges: &ParallaxRanges,
) -> (f64, f64) {
    let (px, py) = pointer;
    let tx = px * depth * ranges.pointer_x;
    let ty = py * depth * ranges.pointer_y + shift * depth;
    (tx, ty)
}

/// CSS transform for a translation, two decimals, never `-0.00`
pub fn transform(tx: f64, ty: f64) -> String {
    let round = |v: f64| (v * 100.0).round() / 100.0 + 0.0;
    format!("translate3d({:.2}px,{:.2}px,0)", round(tx), round(ty))
}

#[derive(Debug, Clone)]
pub struct ParallaxWrap {
    index: usize,
    wrap: ElementId,
    layers: Vec<ParallaxLayer>,
    ranges: ParallaxRanges,
    pointer: (f64, f64),
    frame_requested: bool,
    renders: u64,
}

impl ParallaxWrap {
    /// Collect the layers of `wrap` and render them once
    ///
    /// Returns `None` under reduced motion or when the wrap has no layers.
    pub fn mount(
        index: usize,
        wrap: ElementId,
        config: &ParallaxConfig,
        gate: MotionGate,
        surface: &mut dyn Surface,
    ) -> Option<Self> {
        if gate.is_reduced() {
            return None;
        }

        let layers: Vec<ParallaxLayer> = surface
            .query_data_within(wrap, "parallax")
            .into_iter()
            .filter(|el| !surface.has_class(*el, &config.exclude_class))
            .map(|element| ParallaxLayer {
                element,
                depth: surface
                    .data(element, "parallax")
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .filter(|d| d.is_finite())
                    .unwrap_or(config.default_depth),
            })
            .collect();

        if layers.is_empty() {
            return None;
        }

        let mut parallax = Self {
            index,
            wrap,
            layers,
            ranges: ParallaxRanges::from(config),
            pointer: (0.0, 0.0),
            frame_requested: false,
            renders: 0,
        };
        parallax.render(surface);
        debug!(index, layers = parallax.layers.len(), "Parallax wrap mounted");
        Some(parallax)
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn wrap(&self) -> ElementId {
        self.wrap
    }

    pub fn layers(&self) -> &[ParallaxLayer] {
        &self.layers
    }

    #[inline]
    pub fn pointer(&self) -> (f64, f64) {
        self.pointer
    }

    /// Number of renders so far, including the one at mount
    #[inline]
    pub fn renders(&self) -> u64 {
        self.renders
    }

    #[inline]
    pub fn frame_requested(&self) -> bool {
        self.frame_requested
    }

    /// Pointer moved to viewport coordinates `(x, y)` over the wrap
    pub fn pointer_move(
        &mut self,
        x: f64,
        y: f64,
        surface: &dyn Surface,
        scheduler: &mut dyn Scheduler,
    ) {
        self.pointer = normalize_pointer(x, y, &surface.bounding_rect(self.wrap));
        self.request_frame(scheduler);
    }

    /// Pointer left the wrap; layers settle back to neutral on the next frame
    pub fn pointer_leave(&mut self, scheduler: &mut dyn Scheduler) {
        self.pointer = (0.0, 0.0);
        self.request_frame(scheduler);
    }

    pub fn on_scroll(&mut self, scheduler: &mut dyn Scheduler) {
        self.request_frame(scheduler);
    }

    pub fn on_frame(&mut self, surface: &mut dyn Surface) {
        self.frame_requested = false;
        self.render(surface);
    }

    fn request_frame(&mut self, scheduler: &mut dyn Scheduler) {
        if !self.frame_requested {
            self.frame_requested = true;
            scheduler.schedule_next_frame(FrameTarget::Parallax(self.index));
        }
    }

    fn render(&mut self, surface: &mut dyn Surface) {
        let rect = surface.bounding_rect(self.wrap);
        let shift = scroll_shift(&rect, surface.viewport().height, self.ranges.scroll);
        for layer in &self.layers {
            let (tx, ty) = layer_offset(self.pointer, shift, layer.depth, &self.ranges);
            surface.set_style(layer.element, "transform", &transform(tx, ty));
        }
        self.renders += 1;
        trace!(index = self.index, pointer = ?self.pointer, shift, "Parallax render");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Document, FrameScheduler, Viewport};

    struct Fixture {
        doc: Document,
        scheduler: FrameScheduler,
        wrap: ElementId,
        layer: ElementId,
        orb: ElementId,
        plain: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new(Viewport {
            width: 1000.0,
            height: 800.0,
            scroll_y: 0.0,
            scroll_height: 4000.0,
        });
        let rect = Rect::new(0.0, 0.0, 1000.0, 800.0);
        let wrap = doc.create(None, &["hero", "js-parallax-wrap"], rect);
        let layer = doc.create(Some(wrap), &["layer"], Rect::default());
        doc.set_data(layer, "parallax", "0.25");
        let orb = doc.create(Some(wrap), &["float-orb"], Rect::default());
        doc.set_data(orb, "parallax", "0.5");
        let plain = doc.create(Some(wrap), &["layer"], Rect::default());
        doc.set_data(plain, "parallax", "deep");
        Fixture {
            doc,
            scheduler: FrameScheduler::new(),
            wrap,
            layer,
            orb,
            plain,
        }
    }

    fn mount(f: &mut Fixture) -> ParallaxWrap {
        let config = ParallaxConfig::default();
        ParallaxWrap::mount(0, f.wrap, &config, MotionGate::default(), &mut f.doc).unwrap()
    }

    #[test]
    fn test_layer_offset_is_pure() {
        let ranges = ParallaxRanges::from(&ParallaxConfig::default());
        assert_eq!(layer_offset((0.0, 0.0), 0.0, 0.3, &ranges), (0.0, 0.0));
        assert_eq!(layer_offset((1.0, -1.0), 0.0, 0.5, &ranges), (11.0, -8.0));
        assert_eq!(layer_offset((0.0, 0.0), 6.0, 0.5, &ranges), (0.0, 3.0));
    }

    #[test]
    fn test_transform_format() {
        assert_eq!(transform(5.5, 0.0), "translate3d(5.50px,0.00px,0)");
        assert_eq!(transform(-0.001, -1.234), "translate3d(0.00px,-1.23px,0)");
    }

    #[test]
    fn test_normalize_pointer() {
        let rect = Rect::new(100.0, 0.0, 200.0, 100.0);
        assert_eq!(normalize_pointer(200.0, 50.0, &rect), (0.0, 0.0));
        assert_eq!(normalize_pointer(300.0, 0.0, &rect), (1.0, -1.0));
        assert_eq!(normalize_pointer(-50.0, 500.0, &rect), (-1.0, 1.0));
        assert_eq!(normalize_pointer(10.0, 10.0, &Rect::default()), (0.0, 0.0));
    }

    #[test]
    fn test_mount_renders_and_skips_excluded() {
        let mut f = fixture();
        let parallax = mount(&mut f);

        assert_eq!(parallax.layers().len(), 2);
        assert_eq!(parallax.layers()[1].depth, 0.1);
        assert_eq!(parallax.renders(), 1);
        assert_eq!(f.doc.style(f.layer, "transform"), Some("translate3d(0.00px,0.00px,0)"));
        assert_eq!(f.doc.style(f.plain, "transform"), Some("translate3d(0.00px,0.00px,0)"));
        assert_eq!(f.doc.style(f.orb, "transform"), None);
    }

    #[test]
    fn test_pointer_moves_coalesce_into_one_frame() {
        let mut f = fixture();
        let mut parallax = mount(&mut f);

        for x in [100.0, 400.0, 700.0, 1000.0] {
            parallax.pointer_move(x, 400.0, &f.doc, &mut f.scheduler);
        }
        parallax.on_scroll(&mut f.scheduler);
        assert_eq!(f.scheduler.take_frame_callbacks(), vec![FrameTarget::Parallax(0)]);

        parallax.on_frame(&mut f.doc);
        assert_eq!(parallax.renders(), 2);
        assert_eq!(f.doc.style(f.layer, "transform"), Some("translate3d(5.50px,0.00px,0)"));

        parallax.pointer_leave(&mut f.scheduler);
        assert_eq!(f.scheduler.take_frame_callbacks(), vec![FrameTarget::Parallax(0)]);
        parallax.on_frame(&mut f.doc);
        assert_eq!(f.doc.style(f.layer, "transform"), Some("translate3d(0.00px,0.00px,0)"));
    }

    #[test]
    fn test_scroll_shift() {
        let mut f = fixture();
        let mut parallax = mount(&mut f);

        f.doc.set_scroll_y(400.0);
        parallax.on_scroll(&mut f.scheduler);
        parallax.on_frame(&mut f.doc);
        assert_eq!(f.doc.style(f.layer, "transform"), Some("translate3d(0.00px,1.50px,0)"));
    }

    #[test]
    fn test_disabled_under_reduced_motion() {
        let mut f = fixture();
        let wrap = f.wrap;
        let config = ParallaxConfig::default();
        assert!(ParallaxWrap::mount(0, wrap, &config, MotionGate::new(true), &mut f.doc).is_none());
        assert_eq!(f.doc.style(f.layer, "transform"), None);
    }

    #[test]
    fn test_wrap_without_layers() {
        let mut doc = Document::default();
        let wrap = doc.create(None, &["js-parallax-wrap"], Rect::new(0.0, 0.0, 100.0, 100.0));
        doc.create(Some(wrap), &["copy"], Rect::default());
        let config = ParallaxConfig::default();
        assert!(ParallaxWrap::mount(0, wrap, &config, MotionGate::default(), &mut doc).is_none());
    }
}
