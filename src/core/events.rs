//! Global events used for cross-system communication.
//!
//! Enemies never call into the player or the scoring code directly. They
//! emit these events and the combat mediator applies them, which keeps the
//! agent logic independent and testable.

use bevy::prelude::*;
use serde::Deserialize;

/// Kind of attack an enemy species performs.
///
/// Carried with every hit on the player so that hit effects can be chosen
/// per attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum AttackType {
    Slash,
    Claw,
    Thunder,
    LeafAttack,
}

/// Which of the player's attack stats a hit on an enemy uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DamageSource {
    /// Base attack plus the equipped weapon's damage
    #[default]
    Weapon,
    /// Base magic plus the selected spell's strength
    Magic,
}

/// Sent once when an enemy's health drops to zero.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyDeathEvent {
    /// World position of the enemy's center
    pub position: Vec2,
    /// Species name, selects the death effect
    pub species: String,
}

/// Sent every tick an enemy spends in its attack state.
///
/// The player's own invincibility window decides whether it lands.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamagePlayerEvent {
    pub amount: f32,
    pub attack_type: AttackType,
}

/// Experience awarded to the player for a kill.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ExpAwardEvent {
    pub amount: f32,
}

/// Request to play a sound asset.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlaySoundEvent {
    /// Asset path relative to the assets folder
    pub path: String,
}

/// Sent when one of the player's attacks connects with an enemy.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerAttackEvent {
    /// Enemy entity that was hit
    pub target: Entity,
    pub source: DamageSource,
}
