//! Navbar scroll state and active section highlighting

use tracing::{debug, trace};

use crate::config::NavbarConfig;
use crate::host::{ElementId, Surface};

const SCROLLED_CLASS: &str = "is-scrolled";
const ACTIVE_CLASS: &str = "is-active";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub link: ElementId,
    pub section: ElementId,
}

#[derive(Debug, Clone)]
pub struct ScrollSpy {
    root: ElementId,
    links: Vec<NavLink>,
    scrolled_threshold: f64,
    active_offset: f64,
    scrolled: bool,
    active: Option<usize>,
}

impl ScrollSpy {
    /// Bind the navbar links whose `href="#id"` points at a section on the page
    pub fn mount(config: &NavbarConfig, surface: &mut dyn Surface) -> Option<Self> {
        let root = surface.query_class(&config.root_class).into_iter().next()?;
        let links: Vec<NavLink> = surface
            .query_class_within(root, &config.link_class)
            .into_iter()
            .filter_map(|link| {
                let href = surface.attribute(link, "href")?;
                let id = href.strip_prefix('#')?;
                let section = surface.find_by_id(id)?;
                Some(NavLink { link, section })
            })
            .collect();

        let mut spy = Self {
            root,
            links,
            scrolled_threshold: config.scrolled_threshold_px,
            active_offset: config.active_offset_px,
            scrolled: false,
            active: None,
        };
        debug!(links = spy.links.len(), "Scroll spy mounted");
        spy.update(surface);
        Some(spy)
    }

    #[inline]
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    #[inline]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Section currently highlighted in the navbar
    pub fn active_section(&self) -> Option<ElementId> {
        self.active.map(|i| self.links[i].section)
    }

    pub fn update(&mut self, surface: &mut dyn Surface) {
        let scroll_y = surface.viewport().scroll_y;

        self.scrolled = scroll_y > self.scrolled_threshold;
        surface.toggle_class(self.root, SCROLLED_CLASS, self.scrolled);

        if self.links.is_empty() {
            return;
        }
        let probe = scroll_y + self.active_offset;
        let active = self
            .links
            .iter()
            .rposition(|l| surface.offset_top(l.section) <= probe)
            .unwrap_or(0);

        if self.active != Some(active) {
            trace!(active, scroll_y, "Active section changed");
        }
        self.active = Some(active);

        for (i, nav) in self.links.iter().enumerate() {
            if i == active {
                surface.add_class(nav.link, ACTIVE_CLASS);
                surface.set_attribute(nav.link, "aria-current", "page");
            } else {
                surface.remove_class(nav.link, ACTIVE_CLASS);
                surface.remove_attribute(nav.link, "aria-current");
            }
        }
    }
}
