//! Host environment boundary
//!
//! The engines never touch a real DOM or clock. They read and mutate the page
//! through [`Surface`] and ask for frame callbacks, intersection observation
//! and timeouts through [`Scheduler`]. The host later feeds the matching
//! events back through [`crate::Page::dispatch`].
//!
//! [`Document`] and [`FrameScheduler`] are the in-memory implementations used
//! by the simulation, the terminal preview and the tests.

mod document;
mod scheduler;

pub use document::{Document, ElementFixture, PageFixture};
pub use scheduler::FrameScheduler;

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Handle to one element of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Axis-aligned box in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.left() && x <= self.right() && y >= self.top() && y <= self.bottom()
    }
}

/// Window metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    /// Vertical scroll position of the window
    #[serde(default)]
    pub scroll_y: f64,
    /// Total scrollable height of the document (0 = derive from layout)
    #[serde(default)]
    pub scroll_height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            scroll_y: 0.0,
            scroll_height: 0.0,
        }
    }
}

/// Identifies a reveal group or counter group inside a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct GroupId(pub usize);

/// Owner of an intersection observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ObserverId {
    Reveal(GroupId),
    Counter(GroupId),
}

/// Who wants the next animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FrameTarget {
    Counter(GroupId, ElementId),
    Carousel,
    /// Index of the parallax wrap in mount order
    Parallax(usize),
}

/// Who wants to be woken up after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TimerTarget {
    RevealDelay(GroupId, ElementId),
    RevealFallback(GroupId),
    CounterFallback(GroupId),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Visible fraction of the element that counts as a match
    pub threshold: f64,
    /// Bottom root margin in pixels, negative values shrink the root
    pub root_margin_bottom: f64,
}

impl ObserverOptions {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            root_margin_bottom: 0.0,
        }
    }

    pub fn with_bottom_margin(mut self, margin: f64) -> Self {
        self.root_margin_bottom = margin;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub is_intersecting: bool,
    pub ratio: f64,
}

impl IntersectionEntry {
    pub fn intersecting(ratio: f64) -> Self {
        Self {
            is_intersecting: true,
            ratio,
        }
    }

    pub fn outside() -> Self {
        Self {
            is_intersecting: false,
            ratio: 0.0,
        }
    }
}

/// Read/write access to the page the engines animate
pub trait Surface {
    /// All elements carrying `class`, in document order
    fn query_class(&self, class: &str) -> Vec<ElementId>;

    /// Descendants of `root` carrying `class`, in document order
    fn query_class_within(&self, root: ElementId, class: &str) -> Vec<ElementId>;

    /// Descendants of `root` that define the dataset key `key`
    fn query_data_within(&self, root: ElementId, key: &str) -> Vec<ElementId>;

    /// Element whose `id` attribute equals `id`
    fn find_by_id(&self, id: &str) -> Option<ElementId>;

    /// Whether `element` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: ElementId, element: ElementId) -> bool;

    fn has_class(&self, element: ElementId, class: &str) -> bool;
    fn add_class(&mut self, element: ElementId, class: &str);
    fn remove_class(&mut self, element: ElementId, class: &str);

    fn toggle_class(&mut self, element: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }

    /// Dataset value (`data-*` attribute, camelCase key)
    fn data(&self, element: ElementId, key: &str) -> Option<&str>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str>;
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);
    fn remove_attribute(&mut self, element: ElementId, name: &str);

    fn set_text(&mut self, element: ElementId, text: &str);
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn set_scroll_left(&mut self, element: ElementId, offset: f64);
    fn scroll_width(&self, element: ElementId) -> f64;

    /// Box relative to the top-left corner of the viewport
    fn bounding_rect(&self, element: ElementId) -> Rect;

    /// Distance from the top of the document
    fn offset_top(&self, element: ElementId) -> f64;

    /// Deep-clone `element` and append the copy to `parent`
    fn clone_child(&mut self, element: ElementId, parent: ElementId) -> ElementId;

    fn viewport(&self) -> Viewport;
}

/// Frame, observer and timer requests
pub trait Scheduler {
    /// Run `target` before the next paint; repeated requests coalesce
    fn schedule_next_frame(&mut self, target: FrameTarget);

    /// Report `element` once it matches `options`
    fn observe_until_first_match(
        &mut self,
        observer: ObserverId,
        element: ElementId,
        options: ObserverOptions,
    );

    fn unobserve(&mut self, observer: ObserverId, element: ElementId);

    fn set_timeout(&mut self, timer: TimerTarget, delay: Duration);

    /// Hosts without intersection observation reveal everything up front
    fn observation_supported(&self) -> bool {
        true
    }
}
