//! Enemy-related components.

use bevy::prelude::*;

use crate::core::AttackType;

/// Marker component for all enemies.
#[derive(Component)]
pub struct Enemy;

/// Behavior mode of an enemy, re-evaluated every tick.
#[derive(Default, PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub enum EnemyStatus {
    /// Standing still and regenerating, player out of notice range.
    #[default]
    Idle,
    /// Moving toward the player.
    Move,
    /// Playing one attack animation cycle.
    Attack,
    /// Low on health with the player too close.
    Flee,
}

impl EnemyStatus {
    pub const ALL: [EnemyStatus; 4] = [
        EnemyStatus::Idle,
        EnemyStatus::Move,
        EnemyStatus::Attack,
        EnemyStatus::Flee,
    ];

    /// Name of the animation folder for this status.
    pub fn folder(self) -> &'static str {
        match self {
            EnemyStatus::Idle => "idle",
            EnemyStatus::Move => "move",
            EnemyStatus::Attack => "attack",
            EnemyStatus::Flee => "flee",
        }
    }
}

/// Fraction of max health at or below which an enemy considers fleeing.
pub const HEALTH_THRESHOLD_RATIO: f32 = 0.60;

/// Per-enemy stats, fixed at spawn from the species table and tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyStats {
    pub max_health: f32,
    pub exp: f32,
    pub base_speed: f32,
    pub attack_damage: f32,
    pub attack_type: AttackType,
    pub attack_radius: f32,
    pub notice_radius: f32,
    /// Knockback multiplier applied to the facing direction while hit
    pub resistance: f32,
    pub safe_distance: f32,
    /// Always `HEALTH_THRESHOLD_RATIO * max_health`
    pub health_threshold: f32,
    /// Health regained per tick while idle or fleeing
    pub recovery_rate: f32,
    pub attack_sound: String,
}
