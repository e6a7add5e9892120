//! World module - level layout and setup.

mod layout;
mod plugin;

pub use layout::{LevelLayout, SpawnPoint};
pub use plugin::{setup_level, LevelCamera, WorldPlugin};
