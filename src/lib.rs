//! Grovewarden - enemy AI and combat HUD for a top-down action game in Bevy.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, global events, the millisecond game clock
//! - **Enemies**: Species table, enemy state machine, enemy visuals
//! - **Combat**: Applies hits between enemies and the player
//! - **Player**: Player stats, movement and attack input
//! - **World**: Level layout and spawning
//! - **UI**: Status bars and the HUD
//! - **Audio**: Sound effect playback
//!
//! Each enemy is advanced twice per frame, in a fixed order: a general
//! update (death, knockback, movement, animation, timers) and then a
//! behavior update (status decision and action). See [`enemies::EnemyAgent`].

pub mod audio;
pub mod combat;
pub mod core;
pub mod enemies;
pub mod player;
pub mod ui;
pub mod world;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
///
/// Audio is left out so the game logic can run headless; add
/// [`audio::SoundPlugin`] alongside it in a windowed app.
pub struct GrovewardenPlugin;

impl Plugin for GrovewardenPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Player systems
            .add_plugins(player::PlayerPlugin)

            // Enemy systems
            .add_plugins(enemies::EnemyPlugin)

            // Combat systems
            .add_plugins(combat::CombatPlugin)

            // World systems
            .add_plugins(world::WorldPlugin)

            // UI systems
            .add_plugins(ui::UiPlugin);
    }
}
