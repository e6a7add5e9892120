//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. Enemy AI, combat
//! and player input only run while the game is `InGame` and not paused.

use bevy::prelude::*;

/// Main game states - controls overall game flow.
///
/// - Start in `Loading` until the first frame has run
/// - `InGame` loads data files on entry and spawns the level
/// - `GameOver` when the player dies
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Player has died
    GameOver,
}

/// Sub-states for gameplay - only active when GameState::InGame.
///
/// Pausing is a sub-state so that leaving it does not re-run the
/// `OnEnter(GameState::InGame)` level setup.
#[derive(SubStates, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[source(GameState = GameState::InGame)]
pub enum PlayState {
    /// Simulation is ticking
    #[default]
    Running,
    /// Simulation is frozen, the world stays visible
    Paused,
}
