//! Side effects an enemy produces, decoupled from whoever applies them.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::core::{AttackType, DamagePlayerEvent, EnemyDeathEvent, ExpAwardEvent, PlaySoundEvent};

/// Sound played when any enemy dies.
pub const DEATH_SOUND: &str = "audio/death.wav";

/// Receiver for everything an agent wants to happen outside itself.
pub trait EffectsSink {
    fn on_death(&mut self, position: Vec2, species: &str);
    fn on_damage_player(&mut self, amount: f32, attack_type: AttackType);
    fn on_exp_award(&mut self, amount: f32);
    fn play_sound(&mut self, path: &str);
}

/// Recorded effect, for callers that apply effects later.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentEvent {
    Died { position: Vec2, species: String },
    DamagePlayer { amount: f32, attack_type: AttackType },
    ExpAward(f32),
    Sound(String),
}

impl EffectsSink for Vec<AgentEvent> {
    fn on_death(&mut self, position: Vec2, species: &str) {
        self.push(AgentEvent::Died {
            position,
            species: species.to_string(),
        });
    }

    fn on_damage_player(&mut self, amount: f32, attack_type: AttackType) {
        self.push(AgentEvent::DamagePlayer { amount, attack_type });
    }

    fn on_exp_award(&mut self, amount: f32) {
        self.push(AgentEvent::ExpAward(amount));
    }

    fn play_sound(&mut self, path: &str) {
        self.push(AgentEvent::Sound(path.to_string()));
    }
}

/// Event writers that turn agent effects into ECS events.
#[derive(SystemParam)]
pub struct AgentEventWriters<'w> {
    deaths: EventWriter<'w, EnemyDeathEvent>,
    player_damage: EventWriter<'w, DamagePlayerEvent>,
    exp: EventWriter<'w, ExpAwardEvent>,
    sounds: EventWriter<'w, PlaySoundEvent>,
}

impl EffectsSink for AgentEventWriters<'_> {
    fn on_death(&mut self, position: Vec2, species: &str) {
        self.deaths.send(EnemyDeathEvent {
            position,
            species: species.to_string(),
        });
    }

    fn on_damage_player(&mut self, amount: f32, attack_type: AttackType) {
        self.player_damage.send(DamagePlayerEvent { amount, attack_type });
    }

    fn on_exp_award(&mut self, amount: f32) {
        self.exp.send(ExpAwardEvent { amount });
    }

    fn play_sound(&mut self, path: &str) {
        self.sounds.send(PlaySoundEvent {
            path: path.to_string(),
        });
    }
}
