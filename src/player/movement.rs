//! Top-down player movement, camera follow and attack input.

use bevy::prelude::*;

use super::components::*;
use crate::core::{ClockSource, DamageSource, GameClock, PlayState, PlayerAttackEvent};
use crate::enemies::{Enemy, EnemyAgent};

/// Player draws above enemies.
const PLAYER_Z: f32 = 2.0;
const PLAYER_SIZE: f32 = 64.0;
/// Depth of the weapon swing area in front of the player.
const WEAPON_REACH: f32 = 48.0;
/// Length of the flame spell in front of the player.
const FLAME_REACH: f32 = 192.0;

/// Set up player movement and input systems.
pub fn setup_movement_systems(app: &mut App) {
    app.add_systems(
        Update,
        (
            player_movement,
            camera_follow,
            player_actions,
            recover_energy,
        )
            .chain()
            .run_if(in_state(PlayState::Running)),
    );
}

/// Spawn the player at `position`.
pub fn spawn_player(commands: &mut Commands, asset_server: &AssetServer, position: Vec2) -> Entity {
    commands
        .spawn((
            Player,
            Name::new("Player"),
            PlayerStats::default(),
            Facing::default(),
            Sprite {
                image: asset_server.load("graphics/player/down_idle/idle_down.png"),
                custom_size: Some(Vec2::splat(PLAYER_SIZE)),
                ..default()
            },
            Transform::from_translation(position.extend(PLAYER_Z)),
        ))
        .id()
}

/// WASD movement, one step of `speed` per tick.
fn player_movement(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&mut Transform, &mut Facing, &PlayerStats), With<Player>>,
) {
    let Ok((mut transform, mut facing, stats)) = query.get_single_mut() else {
        return;
    };

    let mut direction = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        direction.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        direction.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        direction.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        direction.x += 1.0;
    }

    let direction = direction.normalize_or_zero();
    if direction != Vec2::ZERO {
        facing.0 = direction;
        transform.translation += (direction * stats.speed).extend(0.0);
    }
}

fn camera_follow(
    player_query: Query<&Transform, (With<Player>, Without<Camera2d>)>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<Player>)>,
) {
    let Ok(player) = player_query.get_single() else {
        return;
    };
    let Ok(mut camera) = camera_query.get_single_mut() else {
        return;
    };

    camera.translation.x = player.translation.x;
    camera.translation.y = player.translation.y;
}

/// Space attacks, Left Ctrl casts, Q and E cycle weapon and spell.
fn player_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    clock: Res<GameClock>,
    mut player_query: Query<(&Transform, &Facing, &mut PlayerStats), With<Player>>,
    enemy_query: Query<(Entity, &EnemyAgent), With<Enemy>>,
    mut attacks: EventWriter<PlayerAttackEvent>,
) {
    let Ok((transform, facing, mut stats)) = player_query.get_single_mut() else {
        return;
    };
    let now = clock.now();
    let center = transform.translation.truncate();

    if keyboard.just_pressed(KeyCode::KeyQ) {
        stats.switch_weapon(now);
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        stats.switch_magic(now);
    }

    if !stats.can_attack(now) {
        return;
    }

    if keyboard.just_pressed(KeyCode::Space) {
        stats.attack_time = Some(now);
        let area = attack_area(center, facing.0, WEAPON_REACH);
        send_hits(&mut attacks, &enemy_query, area, DamageSource::Weapon);
    } else if keyboard.just_pressed(KeyCode::ControlLeft) {
        let spell = *stats.spell();
        if !stats.use_energy(spell.cost) {
            return;
        }
        stats.attack_time = Some(now);

        match spell.name {
            "heal" => {
                stats.health = (stats.health + spell.strength).min(stats.max_health);
            }
            _ => {
                let area = attack_area(center, facing.0, FLAME_REACH);
                send_hits(&mut attacks, &enemy_query, area, DamageSource::Magic);
            }
        }
    }
}

/// Area of `reach` depth directly in front of the player.
fn attack_area(center: Vec2, facing: Vec2, reach: f32) -> Rect {
    let front = center + facing * (PLAYER_SIZE + reach) * 0.5;
    let size = if facing.x.abs() > facing.y.abs() {
        Vec2::new(reach, PLAYER_SIZE)
    } else {
        Vec2::new(PLAYER_SIZE, reach)
    };
    Rect::from_center_size(front, size)
}

fn send_hits(
    attacks: &mut EventWriter<PlayerAttackEvent>,
    enemy_query: &Query<(Entity, &EnemyAgent), With<Enemy>>,
    area: Rect,
    source: DamageSource,
) {
    for (entity, agent) in enemy_query.iter() {
        if !area.intersect(agent.hitbox()).is_empty() {
            attacks.send(PlayerAttackEvent {
                target: entity,
                source,
            });
        }
    }
}

fn recover_energy(mut query: Query<&mut PlayerStats, With<Player>>) {
    for mut stats in query.iter_mut() {
        stats.recover_energy();
    }
}
