//! World plugin - level loading and setup.

use bevy::prelude::*;

use super::layout::LevelLayout;
use crate::core::GameState;
use crate::enemies::{spawn_enemy, Enemy, EnemyTuning, SpeciesRegistry};
use crate::player::{spawn_player, Player};

/// World plugin - handles level loading and world setup.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(OnEnter(GameState::InGame), setup_level)
            .add_systems(OnExit(GameState::InGame), cleanup_level);
    }
}

/// Marker for the gameplay camera.
#[derive(Component)]
pub struct LevelCamera;

/// The camera outlives levels so overlays still render after game over.
fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, LevelCamera));
}

/// Set up the level from data.
pub fn setup_level(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    registry: Res<SpeciesRegistry>,
    tuning: Res<EnemyTuning>,
) {
    let layout = match LevelLayout::load() {
        Ok(layout) => layout,
        Err(e) => {
            error!("Failed to load level: {}. Using an empty level.", e);
            LevelLayout::default()
        }
    };

    info!("Building level with {} enemies", layout.enemies.len());

    let player_spawn = Vec2::new(layout.player_spawn.0, layout.player_spawn.1);
    spawn_player(&mut commands, &asset_server, player_spawn);

    for spawn in &layout.enemies {
        let position = Vec2::new(spawn.position.0, spawn.position.1);
        if let Err(e) = spawn_enemy(&mut commands, &registry, &tuning, &spawn.species, position) {
            error!("Skipping enemy spawn: {}", e);
        }
    }

    commands.insert_resource(layout);
}

/// Clean up level entities when leaving InGame state.
fn cleanup_level(
    mut commands: Commands,
    query: Query<Entity, Or<(With<Enemy>, With<Player>)>>,
) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
