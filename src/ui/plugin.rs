//! UI plugin - HUD and overlays.

use bevy::prelude::*;

use super::bar::UiColors;
use super::hud;
use crate::core::{GameState, PlayState};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // Setup HUD systems
        hud::setup_hud_systems(app);

        app
            // Pause overlay
            .add_systems(OnEnter(PlayState::Paused), setup_pause_overlay)
            .add_systems(OnExit(PlayState::Paused), cleanup_overlay::<PauseOverlay>)

            // Game over
            .add_systems(OnEnter(GameState::GameOver), setup_game_over)
            .add_systems(Update, retry_input.run_if(in_state(GameState::GameOver)))
            .add_systems(OnExit(GameState::GameOver), cleanup_overlay::<GameOverOverlay>);
    }
}

/// Marker for pause overlay entities.
#[derive(Component)]
struct PauseOverlay;

/// Marker for game over entities.
#[derive(Component)]
struct GameOverOverlay;

fn setup_pause_overlay(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        "PAUSED",
        Color::srgba(0.0, 0.0, 0.0, 0.6),
        UiColors::TEXT,
        PauseOverlay,
    );
}

fn setup_game_over(mut commands: Commands) {
    spawn_overlay(
        &mut commands,
        "YOU DIED - press Enter",
        Color::srgba(0.1, 0.0, 0.0, 0.9),
        Color::srgb(0.8, 0.2, 0.2),
        GameOverOverlay,
    );
}

fn retry_input(keyboard: Res<ButtonInput<KeyCode>>, mut next_state: ResMut<NextState<GameState>>) {
    if keyboard.just_pressed(KeyCode::Enter) {
        next_state.set(GameState::InGame);
    }
}

/// Full-screen overlay with a centered title.
fn spawn_overlay<M: Component>(
    commands: &mut Commands,
    title: &str,
    background: Color,
    text_color: Color,
    marker: M,
) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(background),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(text_color),
            ));
        });
}

fn cleanup_overlay<M: Component>(mut commands: Commands, query: Query<Entity, With<M>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
