//! Enemy AI systems.
//!
//! These wrap [`EnemyAgent`] for the ECS: the agent owns the logic, the
//! systems feed it the clock, the player and the event writers.

use bevy::color::Alpha;
use bevy::prelude::*;

use super::agent::EnemyAgent;
use super::animation::{AnimationLibrary, AnimationProvider};
use super::components::Enemy;
use super::effects::AgentEventWriters;
use crate::core::{ClockSource, GameClock};
use crate::player::{Player, PlayerSnapshot, PlayerStats};
use crate::ui::{StatusBar, UiColors};

/// Alpha oscillation speed while an enemy is invincible, radians per ms.
const FLICKER_RATE: f32 = 0.05;

/// General update: death check, knockback, movement, animation and timers.
pub fn enemy_update(
    clock: Res<GameClock>,
    animations: Res<AnimationLibrary>,
    mut writers: AgentEventWriters,
    mut enemy_query: Query<(&mut EnemyAgent, &mut Transform), With<Enemy>>,
) {
    for (mut agent, mut transform) in enemy_query.iter_mut() {
        agent.update(&*clock, &*animations, &mut writers);

        let center = agent.center();
        transform.translation.x = center.x;
        transform.translation.y = center.y;
    }
}

/// Behavior update: status decision and action against the player.
///
/// Runs after [`enemy_update`] so every decision sees this tick's position.
pub fn enemy_behavior(
    clock: Res<GameClock>,
    mut writers: AgentEventWriters,
    player_query: Query<(&Transform, &PlayerStats), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<&mut EnemyAgent, With<Enemy>>,
) {
    let Ok((player_transform, player_stats)) = player_query.get_single() else {
        return;
    };

    let player = PlayerSnapshot::new(player_transform, player_stats);

    for mut agent in enemy_query.iter_mut() {
        agent.behave(&player, &*clock, &mut writers);
    }
}

/// Remove enemies whose death has been reported.
pub fn despawn_dead_enemies(
    mut commands: Commands,
    enemy_query: Query<(Entity, &EnemyAgent), With<Enemy>>,
) {
    for (entity, agent) in enemy_query.iter() {
        if agent.is_dead() {
            debug!("Despawning dead {} {:?}", agent.species(), entity);
            commands.entity(entity).despawn_recursive();
        }
    }
}

/// Show the current animation frame, flickering while invincible.
pub fn sync_enemy_sprites(
    clock: Res<GameClock>,
    animations: Res<AnimationLibrary>,
    asset_server: Res<AssetServer>,
    mut enemy_query: Query<(&EnemyAgent, &mut Sprite), With<Enemy>>,
) {
    for (agent, mut sprite) in enemy_query.iter_mut() {
        let frames = animations.frames(agent.species(), agent.status());
        if let Some(path) = frames.get(agent.current_frame(&*animations)) {
            let image: Handle<Image> = asset_server.load(path);
            if sprite.image != image {
                sprite.image = image;
            }
        }

        let alpha = if agent.is_vulnerable() {
            1.0
        } else {
            flicker_alpha(clock.now())
        };
        sprite.color.set_alpha(alpha);
    }
}

fn flicker_alpha(now_ms: u64) -> f32 {
    if ((now_ms as f32) * FLICKER_RATE).sin() >= 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Draw a health bar above every enemy.
pub fn draw_enemy_health_bars(
    mut gizmos: Gizmos,
    enemy_query: Query<&EnemyAgent, With<Enemy>>,
) {
    for agent in enemy_query.iter() {
        let bar = StatusBar::from_rect(agent.health_bar(), 2.0);
        bar.render(&mut gizmos, agent.health(), agent.max_health(), UiColors::HEALTH);
    }
}
