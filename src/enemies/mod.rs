//! Enemies module - enemy agents, their state machine, and spawning.

mod agent;
pub mod ai;
pub mod animation;
mod components;
pub mod data;
mod effects;
mod error;
mod plugin;
mod spawning;

pub use agent::{EnemyAgent, PlayerView};
pub use animation::{AnimationLibrary, AnimationProvider};
pub use components::*;
pub use data::{setup_species_table, EnemyTuning, SpeciesDefinition, SpeciesRegistry};
pub use effects::{AgentEvent, AgentEventWriters, EffectsSink, DEATH_SOUND};
pub use error::ConfigurationError;
pub use plugin::{EnemyPlugin, EnemySet};
pub use spawning::spawn_enemy;
