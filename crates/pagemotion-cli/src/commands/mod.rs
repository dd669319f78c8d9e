pub mod config;
pub mod preview;
pub mod simulate;

use std::path::Path;

use anyhow::{Context, Result};

use pagemotion_core::host::PageFixture;
use pagemotion_core::{AppConfig, MotionGate, Simulation};

/// Landing page used when no fixture is given
const BUNDLED_PAGE: &str = include_str!("../../pages/landing.toml");

/// Build a simulation for `page`, or for the bundled landing page
pub fn load_simulation(
    config: &AppConfig,
    page: Option<&Path>,
    reduced_motion: bool,
) -> Result<Simulation> {
    let fixture = match page {
        Some(path) => PageFixture::load(path)
            .with_context(|| format!("Failed to load page {}", path.display()))?,
        None => PageFixture::from_toml(BUNDLED_PAGE).context("Bundled page is invalid")?,
    };
    let gate = motion_gate(config, reduced_motion);
    tracing::debug!(
        page = %page.map(|p| p.display().to_string()).unwrap_or_else(|| "bundled".into()),
        reduced_motion = gate.is_reduced(),
        "Loading page"
    );
    Ok(Simulation::from_fixture(&fixture, config.clone(), gate))
}

/// `--reduced-motion` always wins; otherwise the config decides
fn motion_gate(config: &AppConfig, reduced_motion: bool) -> MotionGate {
    if reduced_motion {
        MotionGate::new(true)
    } else {
        MotionGate::from_config(false, &config.motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_page_mounts_everything() {
        let sim = load_simulation(&AppConfig::default(), None, false).unwrap();
        let page = sim.page();
        assert!(page.progress().is_some());
        assert!(page.navbar().is_some());
        assert!(page.carousel().is_some_and(|c| c.is_running()));
        assert_eq!(page.parallax().len(), 1);
        assert_eq!(page.reveals().len(), 2);
        assert_eq!(page.counters().len(), 2);
    }

    #[test]
    fn test_bundled_page_settles() {
        let mut sim = load_simulation(&AppConfig::default(), None, false).unwrap();
        sim.advance_by(std::time::Duration::from_secs(4));
        let snapshot = sim.snapshot();
        assert!(snapshot.settled);
        assert!(snapshot.counters.iter().any(|c| c.text == "$1,234.5+"));
    }

    #[test]
    fn test_reduced_motion_flag_beats_config() {
        let mut config = AppConfig::default();
        config.motion.reduced_motion = Some(false);
        assert!(motion_gate(&config, true).is_reduced());
        assert!(motion_gate(&config, false).allows_motion());

        config.motion.reduced_motion = Some(true);
        assert!(motion_gate(&config, false).is_reduced());

        let sim = load_simulation(&config, None, true).unwrap();
        assert!(sim.gate().is_reduced());
    }

    #[test]
    fn test_missing_page_is_an_error() {
        let missing = Path::new("/nonexistent/page.toml");
        let err = load_simulation(&AppConfig::default(), Some(missing), false);
        assert!(err.is_err());
    }
}
