//! Animated numeric counters
//!
//! - `spec` - Per-element configuration parsed from the dataset
//! - `format` - en-US style number rendering with prefix/suffix
//! - `group` - The per-group state machine (observer, frames, fallback)

pub mod format;
pub mod group;
pub mod spec;

pub use format::{format_number, format_value};
pub use group::{CounterGroup, TriggerMode};
pub use spec::CounterSpec;
