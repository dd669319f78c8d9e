use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use pagemotion_core::{AppConfig, Simulation, Snapshot};

pub struct SimulateOptions {
    pub page: Option<PathBuf>,
    pub frames: u64,
    pub scroll_to: Option<f64>,
    pub reduced_motion: bool,
    pub json: bool,
    pub realtime: bool,
}

pub async fn run(config: AppConfig, options: SimulateOptions) -> Result<()> {
    let mut sim = super::load_simulation(&config, options.page.as_deref(), options.reduced_motion)?;
    let snapshot = drive(&mut sim, &options).await;

    info!(
        frames = snapshot.frame,
        settled = snapshot.settled,
        "Simulation finished"
    );

    if options.json {
        println!("{}", snapshot.to_json()?);
    } else {
        print!("{}", snapshot.render_text());
    }
    Ok(())
}

async fn drive(sim: &mut Simulation, options: &SimulateOptions) -> Snapshot {
    if let Some(scroll_y) = options.scroll_to {
        sim.scroll_to(scroll_y);
    }

    if options.realtime {
        let mut interval = tokio::time::interval(sim.frame_interval());
        for _ in 0..options.frames {
            interval.tick().await;
            sim.advance_frame();
        }
    } else {
        sim.advance_frames(options.frames);
    }
    sim.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(frames: u64) -> SimulateOptions {
        SimulateOptions {
            page: None,
            frames,
            scroll_to: None,
            reduced_motion: false,
            json: true,
            realtime: false,
        }
    }

    #[tokio::test]
    async fn test_drive_runs_requested_frames() {
        let config = AppConfig::default();
        let mut sim = super::super::load_simulation(&config, None, false).unwrap();
        let snapshot = drive(&mut sim, &options(30)).await;
        assert_eq!(snapshot.frame, 30);
        assert!(!snapshot.settled);
    }

    #[tokio::test]
    async fn test_scroll_before_frames() {
        let config = AppConfig::default();
        let mut sim = super::super::load_simulation(&config, None, false).unwrap();
        let snapshot = drive(
            &mut sim,
            &SimulateOptions {
                scroll_to: Some(1300.0),
                ..options(1)
            },
        )
        .await;
        assert_eq!(snapshot.scroll_y, 1300.0);
        assert!(snapshot.navbar_scrolled);
        assert_eq!(snapshot.active_section.as_deref(), Some("Stats section"));
    }

    #[tokio::test]
    async fn test_realtime_pacing() {
        let config = AppConfig::default();
        let mut sim = super::super::load_simulation(&config, None, true).unwrap();
        let snapshot = drive(
            &mut sim,
            &SimulateOptions {
                realtime: true,
                ..options(5)
            },
        )
        .await;
        assert_eq!(snapshot.frame, 5);
        assert!(snapshot.settled);
    }
}
