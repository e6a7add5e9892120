//! Enemy plugin - registers all enemy systems.

use bevy::prelude::*;

use super::ai;
use super::data::setup_species_table;
use crate::core::PlayState;

/// Ordering of the per-tick enemy work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EnemySet {
    /// Death check, knockback, movement, animation, timers
    Update,
    /// Status decision and actions
    Behavior,
    /// Despawn, sprites, health bars
    Presentation,
}

/// Enemy plugin - handles the species table, enemy AI and enemy visuals.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        setup_species_table(app);

        app.configure_sets(
            Update,
            (EnemySet::Update, EnemySet::Behavior, EnemySet::Presentation)
                .chain()
                .run_if(in_state(PlayState::Running)),
        )
        .add_systems(Update, ai::enemy_update.in_set(EnemySet::Update))
        .add_systems(Update, ai::enemy_behavior.in_set(EnemySet::Behavior))
        .add_systems(
            Update,
            (
                ai::despawn_dead_enemies,
                ai::sync_enemy_sprites,
                ai::draw_enemy_health_bars,
            )
                .in_set(EnemySet::Presentation),
        );
    }
}
