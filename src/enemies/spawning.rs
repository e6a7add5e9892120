//! Enemy spawning.

use bevy::prelude::*;

use super::agent::EnemyAgent;
use super::components::Enemy;
use super::data::{EnemyTuning, SpeciesRegistry};
use super::error::ConfigurationError;

/// Enemies draw above the floor and below the player.
const ENEMY_Z: f32 = 1.0;

/// Spawn one enemy of `species` centered on `position`.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &SpeciesRegistry,
    tuning: &EnemyTuning,
    species: &str,
    position: Vec2,
) -> Result<Entity, ConfigurationError> {
    let agent = EnemyAgent::new(registry, tuning, species, position)?;
    let size = agent.rect().size();

    let entity = commands
        .spawn((
            Enemy,
            Name::new(format!("Enemy ({species})")),
            Sprite {
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(position.extend(ENEMY_Z)),
            agent,
        ))
        .id();

    info!("Spawned {} at {:?}", species, position);
    Ok(entity)
}
