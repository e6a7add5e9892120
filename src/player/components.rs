//! Player-related components.

use bevy::prelude::*;

use crate::core::DamageSource;
use crate::enemies::PlayerView;

/// Time after a hit during which the player cannot be hurt again.
pub const PLAYER_INVINCIBILITY_MS: u64 = 500;
/// Minimum time between two weapon (or two spell) switches.
pub const SWITCH_COOLDOWN_MS: u64 = 200;
/// Fixed part of the delay between two player attacks.
pub const BASE_ATTACK_COOLDOWN_MS: u64 = 400;

/// Marker component for the player entity.
#[derive(Component)]
pub struct Player;

/// A weapon the player can cycle through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponInfo {
    pub name: &'static str,
    pub damage: f32,
    /// Added to the base attack cooldown
    pub cooldown_ms: u64,
    pub icon: &'static str,
}

/// A spell the player can cycle through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellInfo {
    pub name: &'static str,
    pub strength: f32,
    pub cost: f32,
    pub icon: &'static str,
}

pub static WEAPONS: [WeaponInfo; 5] = [
    WeaponInfo { name: "sword", damage: 15.0, cooldown_ms: 100, icon: "graphics/weapons/sword/full.png" },
    WeaponInfo { name: "lance", damage: 30.0, cooldown_ms: 400, icon: "graphics/weapons/lance/full.png" },
    WeaponInfo { name: "axe", damage: 20.0, cooldown_ms: 300, icon: "graphics/weapons/axe/full.png" },
    WeaponInfo { name: "rapier", damage: 8.0, cooldown_ms: 50, icon: "graphics/weapons/rapier/full.png" },
    WeaponInfo { name: "sai", damage: 10.0, cooldown_ms: 80, icon: "graphics/weapons/sai/full.png" },
];

pub static SPELLS: [SpellInfo; 2] = [
    SpellInfo { name: "flame", strength: 5.0, cost: 20.0, icon: "graphics/particles/flame/fire.png" },
    SpellInfo { name: "heal", strength: 20.0, cost: 10.0, icon: "graphics/particles/heal/heal.png" },
];

/// Player's core statistics and combat timers.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlayerStats {
    pub max_health: f32,
    pub health: f32,
    pub max_energy: f32,
    pub energy: f32,
    pub exp: f32,
    /// Base melee damage
    pub attack: f32,
    /// Base spell damage, also drives energy recovery
    pub magic: f32,
    /// Units per tick
    pub speed: f32,
    pub weapon_index: usize,
    pub magic_index: usize,
    pub weapon_switch_time: Option<u64>,
    pub magic_switch_time: Option<u64>,
    pub attack_time: Option<u64>,
    pub hurt_time: Option<u64>,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            health: 100.0,
            max_energy: 60.0,
            energy: 60.0,
            exp: 0.0,
            attack: 10.0,
            magic: 4.0,
            speed: 5.0,
            weapon_index: 0,
            magic_index: 0,
            weapon_switch_time: None,
            magic_switch_time: None,
            attack_time: None,
            hurt_time: None,
        }
    }
}

fn elapsed_at_least(since: Option<u64>, now: u64, duration: u64) -> bool {
    since.map_or(true, |t| now.saturating_sub(t) >= duration)
}

impl PlayerStats {
    pub fn weapon(&self) -> &'static WeaponInfo {
        &WEAPONS[self.weapon_index % WEAPONS.len()]
    }

    pub fn spell(&self) -> &'static SpellInfo {
        &SPELLS[self.magic_index % SPELLS.len()]
    }

    /// Damage dealt by an attack of the given kind.
    pub fn full_attack_damage(&self, source: DamageSource) -> f32 {
        match source {
            DamageSource::Weapon => self.attack + self.weapon().damage,
            DamageSource::Magic => self.magic + self.spell().strength,
        }
    }

    pub fn is_vulnerable(&self, now: u64) -> bool {
        elapsed_at_least(self.hurt_time, now, PLAYER_INVINCIBILITY_MS)
    }

    /// Apply an enemy hit. Ignored inside the invincibility window.
    pub fn take_hit(&mut self, amount: f32, now: u64) -> bool {
        if !self.is_vulnerable(now) {
            return false;
        }

        self.health = (self.health - amount).max(0.0);
        self.hurt_time = Some(now);
        true
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    pub fn can_attack(&self, now: u64) -> bool {
        let cooldown = BASE_ATTACK_COOLDOWN_MS + self.weapon().cooldown_ms;
        elapsed_at_least(self.attack_time, now, cooldown)
    }

    pub fn can_switch_weapon(&self, now: u64) -> bool {
        elapsed_at_least(self.weapon_switch_time, now, SWITCH_COOLDOWN_MS)
    }

    pub fn can_switch_magic(&self, now: u64) -> bool {
        elapsed_at_least(self.magic_switch_time, now, SWITCH_COOLDOWN_MS)
    }

    pub fn switch_weapon(&mut self, now: u64) {
        if self.can_switch_weapon(now) {
            self.weapon_index = (self.weapon_index + 1) % WEAPONS.len();
            self.weapon_switch_time = Some(now);
        }
    }

    pub fn switch_magic(&mut self, now: u64) {
        if self.can_switch_magic(now) {
            self.magic_index = (self.magic_index + 1) % SPELLS.len();
            self.magic_switch_time = Some(now);
        }
    }

    /// Spend energy if there is enough of it.
    pub fn use_energy(&mut self, amount: f32) -> bool {
        if self.energy >= amount {
            self.energy -= amount;
            true
        } else {
            false
        }
    }

    /// Passive per-tick energy regeneration.
    pub fn recover_energy(&mut self) {
        if self.energy < self.max_energy {
            self.energy = (self.energy + 0.01 * self.magic).min(self.max_energy);
        }
    }
}

/// Direction the player last moved in, used to aim attacks.
#[derive(Component, Debug, Clone, Copy)]
pub struct Facing(pub Vec2);

impl Default for Facing {
    fn default() -> Self {
        Self(Vec2::NEG_Y)
    }
}

/// Copy of the player state enemies read during one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub center: Vec2,
    pub weapon_damage: f32,
    pub magic_damage: f32,
}

impl PlayerSnapshot {
    pub fn new(transform: &Transform, stats: &PlayerStats) -> Self {
        Self {
            center: transform.translation.truncate(),
            weapon_damage: stats.full_attack_damage(DamageSource::Weapon),
            magic_damage: stats.full_attack_damage(DamageSource::Magic),
        }
    }
}

impl PlayerView for PlayerSnapshot {
    fn center(&self) -> Vec2 {
        self.center
    }

    fn attack_damage(&self, source: DamageSource) -> f32 {
        match source {
            DamageSource::Weapon => self.weapon_damage,
            DamageSource::Magic => self.magic_damage,
        }
    }
}
