//! Core game module - states, events, and the simulation clock.
//!
//! This module provides the foundation that all other game systems build upon.

mod clock;
mod events;
mod plugin;
mod states;

pub use clock::*;
pub use events::*;
pub use plugin::CorePlugin;
pub use states::*;
