//! Platform abstraction layer
//!
//! Turns raw browser events (key codes, touch buttons, clicks) into the
//! per-frame [`TickInput`](crate::sim::TickInput) the simulation consumes.

pub mod input;

pub use input::{Action, Controls};
