pub mod config;
pub mod error;
pub mod host;
pub mod motion;
pub mod reveal;
pub mod counter;
pub mod carousel;
pub mod parallax;
pub mod progress;
pub mod scrollspy;
pub mod page;
pub mod sim;
pub mod snapshot;

pub use config::{AppConfig, EasingType};
pub use error::{Error, Result};
pub use host::{Document, ElementId, FrameScheduler, Scheduler, Surface};
pub use motion::{AnimationState, MotionGate};
pub use page::{Page, PageEvent};
pub use sim::Simulation;
pub use snapshot::Snapshot;
