//! Motion primitives shared by every engine
//!
//! # Layers
//!
//! ## Atomic
//! - `easing` - Share of a counter's target shown over its run
//! - `timing` - Progress from frame timestamps and ring wrapping
//! - `state` - The once-only animation flag
//!
//! ## Molecular
//! - `gate` - Reduced-motion preference, read once and handed to each engine

// Atomic
pub mod easing;
pub mod state;
pub mod timing;

// Molecular
pub mod gate;

pub use easing::EasingType;
pub use gate::MotionGate;
pub use state::AnimationState;
