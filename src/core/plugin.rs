//! Core plugin that sets up game states, events, and the game clock.

use bevy::prelude::*;
use bevy::time::TimeSystem;

use super::clock::*;
use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, GameOver) and the pause sub-state
/// - Global events (EnemyDeathEvent, DamagePlayerEvent, etc.)
/// - The millisecond game clock
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app
            // Initialize game states
            .init_state::<GameState>()
            .add_sub_state::<PlayState>()

            // Register global events
            .add_event::<EnemyDeathEvent>()
            .add_event::<DamagePlayerEvent>()
            .add_event::<ExpAwardEvent>()
            .add_event::<PlaySoundEvent>()
            .add_event::<PlayerAttackEvent>()

            .init_resource::<GameClock>()

            // Nothing to preload yet, data files are read on entering InGame
            .add_systems(OnEnter(GameState::Loading), transition_to_game)

            // Pause/unpause with Escape key
            .add_systems(Update, handle_pause_input.run_if(in_state(GameState::InGame)))
            .add_systems(OnEnter(PlayState::Paused), pause_time)
            .add_systems(OnExit(PlayState::Paused), resume_time)

            // Clock must be current before any cooldown is checked
            .add_systems(First, tick_game_clock.after(TimeSystem));
    }
}

fn transition_to_game(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}

/// Handle Escape key to pause/unpause the game.
fn handle_pause_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    current_state: Res<State<PlayState>>,
    mut next_state: ResMut<NextState<PlayState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        match current_state.get() {
            PlayState::Running => next_state.set(PlayState::Paused),
            PlayState::Paused => next_state.set(PlayState::Running),
        }
    }
}

fn pause_time(mut time: ResMut<Time<Virtual>>) {
    info!("Game paused");
    time.pause();
}

fn resume_time(mut time: ResMut<Time<Virtual>>) {
    info!("Game resumed");
    time.unpause();
}
