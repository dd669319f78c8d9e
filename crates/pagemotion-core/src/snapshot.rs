//! Serializable view of a running simulation

use serde::Serialize;

use crate::error::Result;
use crate::host::Surface;
use crate::motion::AnimationState;
use crate::sim::Simulation;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevealSnapshot {
    pub label: String,
    pub group: usize,
    pub state: AnimationState,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterSnapshot {
    pub label: String,
    pub group: usize,
    pub state: AnimationState,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarouselSnapshot {
    pub cards: Vec<String>,
    pub offset: f64,
    pub loop_width: f64,
    pub paused: bool,
    pub running: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerSnapshot {
    pub label: String,
    pub depth: f64,
    pub transform: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub time_ms: f64,
    pub scroll_y: f64,
    pub reduced_motion: bool,
    pub progress_percent: Option<f64>,
    pub navbar_scrolled: bool,
    pub active_section: Option<String>,
    pub reveals: Vec<RevealSnapshot>,
    pub counters: Vec<CounterSnapshot>,
    pub carousel: Option<CarouselSnapshot>,
    pub layers: Vec<LayerSnapshot>,
    pub settled: bool,
}

impl Snapshot {
    pub fn capture(sim: &Simulation) -> Self {
        let doc = sim.document();
        let page = sim.page();

        let reveals = page
            .reveals()
            .iter()
            .flat_map(|group| {
                group.elements().map(move |el| RevealSnapshot {
                    label: doc.label(el),
                    group: group.id().0,
                    state: group.state(el).unwrap_or_default(),
                    visible: group.is_visible(el),
                })
            })
            .collect();

        let counters = page
            .counters()
            .iter()
            .flat_map(|group| {
                group.elements().map(move |el| CounterSnapshot {
                    label: doc.label(el),
                    group: group.id().0,
                    state: group.state(el).unwrap_or_default(),
                    text: doc.text(el).to_string(),
                })
            })
            .collect();

        let carousel = page.carousel().map(|c| CarouselSnapshot {
            cards: c.original_cards().iter().map(|el| doc.label(*el)).collect(),
            offset: c.offset(),
            loop_width: c.loop_width(),
            paused: c.is_paused(),
            running: c.is_running(),
        });

        let layers = page
            .parallax()
            .iter()
            .flat_map(|wrap| wrap.layers().iter())
            .map(|layer| LayerSnapshot {
                label: doc.label(layer.element),
                depth: layer.depth,
                transform: doc.style(layer.element, "transform").map(str::to_string),
            })
            .collect();

        Self {
            frame: sim.frame_count(),
            time_ms: sim.now().as_secs_f64() * 1000.0,
            scroll_y: doc.viewport().scroll_y,
            reduced_motion: sim.gate().is_reduced(),
            progress_percent: page.progress().map(|p| p.percent()),
            navbar_scrolled: page.navbar().is_some_and(|n| n.is_scrolled()),
            active_section: page
                .navbar()
                .and_then(|n| n.active_section())
                .map(|el| doc.label(el)),
            reveals,
            counters,
            carousel,
            layers,
            settled: page.is_settled(),
        }
    }

    /// Pretty-printed JSON report
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Plain-text report, one line per element
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "frame {} at {:.1}ms, scroll {:.0}px{}\n",
            self.frame,
            self.time_ms,
            self.scroll_y,
            if self.reduced_motion { ", reduced motion" } else { "" }
        ));
        if let Some(percent) = self.progress_percent {
            out.push_str(&format!("progress  {:.1}%\n", percent));
        }
        if let Some(section) = &self.active_section {
            out.push_str(&format!(
                "navbar    {}{}\n",
                section,
                if self.navbar_scrolled { " (scrolled)" } else { "" }
            ));
        }
        for reveal in &self.reveals {
            out.push_str(&format!(
                "reveal    {:<28} {}\n",
                reveal.label,
                if reveal.visible { "visible" } else { "pending" }
            ));
        }
        for counter in &self.counters {
            out.push_str(&format!("counter   {:<28} {}\n", counter.label, counter.text));
        }
        if let Some(c) = &self.carousel {
            out.push_str(&format!(
                "carousel  {} cards, offset {:.2} / {:.2}{}\n",
                c.cards.len(),
                c.offset,
                c.loop_width,
                match (c.running, c.paused) {
                    (false, _) => " (static)",
                    (true, true) => " (paused)",
                    (true, false) => "",
                }
            ));
        }
        for layer in &self.layers {
            out.push_str(&format!(
                "layer     {:<28} {}\n",
                layer.label,
                layer.transform.as_deref().unwrap_or("-")
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::host::PageFixture;
    use crate::motion::MotionGate;

    const PAGE: &str = r#"
        [viewport]
        width = 1280
        height = 800

        [[elements]]
        classes = ["scroll-progress"]

        [[elements]]
        label = "Trust card"
        classes = ["js-reveal"]
        rect = { y = 100, width = 400, height = 300 }

        [[elements.children]]
        label = "Jobs done"
        classes = ["js-counter"]
        data = { target = 1200, suffix = "+" }
        rect = { y = 150, width = 200, height = 60 }
    "#;

    #[test]
    fn test_capture_after_settling() {
        let fixture = PageFixture::from_toml(PAGE).unwrap();
        let sim = Simulation::from_fixture(&fixture, AppConfig::default(), MotionGate::new(true));
        let snapshot = sim.snapshot();

        assert!(snapshot.settled);
        assert_eq!(snapshot.progress_percent, Some(0.0));
        assert_eq!(snapshot.reveals.len(), 1);
        assert_eq!(snapshot.reveals[0].label, "Trust card");
        assert!(snapshot.reveals[0].visible);
        assert_eq!(snapshot.counters[0].text, "1,200+");
        assert_eq!(snapshot.counters[0].state, AnimationState::Done);
        assert!(snapshot.carousel.is_none());

        let text = snapshot.render_text();
        assert!(text.contains("reduced motion"));
        assert!(text.contains("1,200+"));

        let json: serde_json::Value = serde_json::from_str(&snapshot.to_json().unwrap()).unwrap();
        assert_eq!(json["counters"][0]["state"], "done");
        assert_eq!(json["reveals"][0]["visible"], true);
    }
}
