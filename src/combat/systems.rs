//! Combat systems - the mediator between enemies and the player.
//!
//! Enemies only emit events. These systems apply them to the player, route
//! player hits back into the enemies and react to deaths.

use bevy::prelude::*;

use crate::core::{
    ClockSource, DamagePlayerEvent, EnemyDeathEvent, ExpAwardEvent, GameClock, GameState,
    PlayState, PlayerAttackEvent,
};
use crate::enemies::{Enemy, EnemyAgent, EnemySet, PlayerView};
use crate::player::{Player, PlayerSnapshot, PlayerStats};

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Player hits on enemies
    Hits,
    /// Enemy effects on the player
    Damage,
    /// Deaths and rewards
    Outcome,
}

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app.configure_sets(
        Update,
        (CombatSet::Hits, CombatSet::Damage, CombatSet::Outcome)
            .chain()
            .after(EnemySet::Behavior)
            .before(EnemySet::Presentation)
            .run_if(in_state(PlayState::Running)),
    )
    .add_systems(Update, handle_player_attacks.in_set(CombatSet::Hits))
    .add_systems(Update, apply_player_damage.in_set(CombatSet::Damage))
    .add_systems(
        Update,
        (award_experience, report_enemy_deaths, check_player_death).in_set(CombatSet::Outcome),
    );
}

/// Route player hits into the enemies' own damage handling.
pub fn handle_player_attacks(
    clock: Res<GameClock>,
    mut attack_events: EventReader<PlayerAttackEvent>,
    player_query: Query<(&Transform, &PlayerStats), (With<Player>, Without<Enemy>)>,
    mut enemy_query: Query<&mut EnemyAgent, With<Enemy>>,
) {
    let Ok((player_transform, player_stats)) = player_query.get_single() else {
        attack_events.clear();
        return;
    };
    let player = PlayerSnapshot::new(player_transform, player_stats);

    for event in attack_events.read() {
        let Ok(mut agent) = enemy_query.get_mut(event.target) else {
            continue;
        };

        if agent.take_damage(&player, event.source, &*clock) {
            debug!(
                "{} hit for {:.1}, {:.1} health left",
                agent.species(),
                player.attack_damage(event.source),
                agent.health()
            );
        }
    }
}

/// Apply enemy attacks to the player, honoring the player's invincibility.
pub fn apply_player_damage(
    clock: Res<GameClock>,
    mut damage_events: EventReader<DamagePlayerEvent>,
    mut player_query: Query<&mut PlayerStats, With<Player>>,
) {
    let Ok(mut stats) = player_query.get_single_mut() else {
        damage_events.clear();
        return;
    };

    for event in damage_events.read() {
        if stats.take_hit(event.amount, clock.now()) {
            debug!(
                "Player took {:.1} {:?} damage, {:.1} health left",
                event.amount, event.attack_type, stats.health
            );
        }
    }
}

/// Add kill rewards to the player's experience.
pub fn award_experience(
    mut exp_events: EventReader<ExpAwardEvent>,
    mut player_query: Query<&mut PlayerStats, With<Player>>,
) {
    let Ok(mut stats) = player_query.get_single_mut() else {
        exp_events.clear();
        return;
    };

    for event in exp_events.read() {
        stats.exp += event.amount;
        info!("Gained {} exp, total {}", event.amount, stats.exp);
    }
}

fn report_enemy_deaths(mut death_events: EventReader<EnemyDeathEvent>) {
    for event in death_events.read() {
        info!("{} died at {:?}", event.species, event.position);
    }
}

fn check_player_death(
    player_query: Query<&PlayerStats, With<Player>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };

    if stats.is_dead() {
        info!("Player died! Transitioning to Game Over...");
        next_state.set(GameState::GameOver);
    }
}
