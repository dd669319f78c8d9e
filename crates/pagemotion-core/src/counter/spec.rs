//! Counter configuration read from the element dataset

use std::time::Duration;

use tracing::warn;

use crate::host::{ElementId, Surface};

/// Browsers refuse more fraction digits than this
const MAX_DECIMALS: usize = 20;

/// Immutable per-counter settings
#[derive(Debug, Clone, PartialEq)]
pub struct CounterSpec {
    /// Final raw value
    pub target: f64,
    pub prefix: String,
    pub suffix: String,
    /// Fraction digits shown
    pub decimals: usize,
    /// Displayed value is `raw / scale`
    pub scale: f64,
    pub duration: Duration,
}

impl CounterSpec {
    /// Parse `target`, `prefix`, `suffix`, `decimals` and `scale`
    ///
    /// Missing or unusable values fall back to `0`, `""`, `""`, `0` and `1`,
    /// so NaN never reaches the rendered text.
    pub fn from_element(surface: &dyn Surface, element: ElementId, duration: Duration) -> Self {
        let target = parse_number(surface, element, "target")
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);

        let decimals = parse_number(surface, element, "decimals")
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| (v.trunc() as usize).min(MAX_DECIMALS))
            .unwrap_or(0);

        let scale = parse_number(surface, element, "scale")
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(1.0);

        Self {
            target,
            prefix: surface.data(element, "prefix").unwrap_or_default().to_string(),
            suffix: surface.data(element, "suffix").unwrap_or_default().to_string(),
            decimals,
            scale,
            duration,
        }
    }
}

fn parse_number(surface: &dyn Surface, element: ElementId, key: &str) -> Option<f64> {
    let raw = surface.data(element, key)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.replace(',', "").parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(element = element.0, key, value = raw, "Ignoring non-numeric counter attribute");
            None
        }
    }
}
