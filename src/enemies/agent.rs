//! Enemy behavior state machine.
//!
//! An [`EnemyAgent`] is advanced by two separate entry points every tick,
//! always in this order:
//!
//! 1. [`EnemyAgent::update`] - death check, knockback, movement, animation
//!    and cooldown timers.
//! 2. [`EnemyAgent::behave`] - status decision and the action for that
//!    status, using the state left behind by `update`.
//!
//! The agent never touches the player directly. It reads the player through
//! [`PlayerView`] and reports everything else through an [`EffectsSink`].

use bevy::prelude::*;

use super::animation::AnimationProvider;
use super::components::{EnemyStats, EnemyStatus};
use super::data::{EnemyTuning, SpeciesRegistry};
use super::effects::{EffectsSink, DEATH_SOUND};
use super::error::ConfigurationError;
use crate::core::{ClockSource, DamageSource};

/// Read-only view of the player, stable for the duration of a tick.
pub trait PlayerView {
    fn center(&self) -> Vec2;
    /// Damage the player deals with the given attack.
    fn attack_damage(&self, source: DamageSource) -> f32;
}

/// One enemy and its behavior state.
#[derive(Component, Debug, Clone)]
pub struct EnemyAgent {
    species: String,
    stats: EnemyStats,
    health: f32,
    speed: f32,
    status: EnemyStatus,
    direction: Vec2,
    frame_index: f32,

    can_attack: bool,
    attack_time: Option<u64>,
    attack_cooldown_ms: u64,

    vulnerable: bool,
    hit_time: Option<u64>,
    invincibility_ms: u64,

    flee_speed_multiplier: f32,
    animation_speed: f32,

    sprite_size: Vec2,
    hitbox: Rect,
    health_bar: Rect,
    health_bar_offset: f32,
    health_bar_height: f32,

    dead: bool,
}

impl EnemyAgent {
    /// Spawn an agent of `species` centered on `position`.
    pub fn new(
        registry: &SpeciesRegistry,
        tuning: &EnemyTuning,
        species: &str,
        position: Vec2,
    ) -> Result<Self, ConfigurationError> {
        let definition = registry.get(species)?;
        let stats = definition.to_stats(tuning);
        let sprite_size = Vec2::new(definition.sprite_size.0, definition.sprite_size.1);
        let hitbox_size = Vec2::new(sprite_size.x, (sprite_size.y - tuning.hitbox_inset).max(0.0));

        let mut agent = Self {
            species: definition.name.clone(),
            health: stats.max_health,
            speed: stats.base_speed,
            stats,
            status: EnemyStatus::Idle,
            direction: Vec2::ZERO,
            frame_index: 0.0,
            can_attack: true,
            attack_time: None,
            attack_cooldown_ms: tuning.attack_cooldown_ms,
            vulnerable: true,
            hit_time: None,
            invincibility_ms: tuning.invincibility_ms,
            flee_speed_multiplier: tuning.flee_speed_multiplier,
            animation_speed: tuning.animation_speed,
            sprite_size,
            hitbox: Rect::from_center_size(position, hitbox_size),
            health_bar: Rect::default(),
            health_bar_offset: tuning.health_bar_offset,
            health_bar_height: tuning.health_bar_height,
            dead: false,
        };
        agent.refresh_health_bar();
        Ok(agent)
    }

    /// General per-tick update: death check, knockback, movement, animation,
    /// cooldowns. Does nothing once the agent has died.
    pub fn update(
        &mut self,
        clock: &impl ClockSource,
        animations: &impl AnimationProvider,
        sink: &mut impl EffectsSink,
    ) {
        if self.dead {
            return;
        }

        self.check_death(sink);
        if self.dead {
            return;
        }

        self.hit_reaction();
        self.move_by_direction();
        self.animate(animations);
        self.cooldowns(clock);
    }

    /// Behavior update: pick a status against the player and act on it.
    pub fn behave(
        &mut self,
        player: &impl PlayerView,
        clock: &impl ClockSource,
        sink: &mut impl EffectsSink,
    ) {
        if self.dead {
            return;
        }

        self.update_status(player, clock);
        self.act(player, sink);
        self.refresh_health_bar();
    }

    /// Take a hit from the player. Ignored while invincible or dead.
    ///
    /// Returns whether the hit landed.
    pub fn take_damage(
        &mut self,
        player: &impl PlayerView,
        source: DamageSource,
        clock: &impl ClockSource,
    ) -> bool {
        if self.dead || !self.vulnerable {
            return false;
        }

        // Knockback pushes away from this direction
        self.direction = self.player_direction_distance(player).0;
        self.health = (self.health - player.attack_damage(source)).clamp(0.0, self.stats.max_health);
        self.hit_time = Some(clock.now());
        self.vulnerable = false;
        true
    }

    /// Emit death effects once health is gone. Idempotent.
    pub fn check_death(&mut self, sink: &mut impl EffectsSink) {
        if self.dead || self.health > 0.0 {
            return;
        }

        self.dead = true;
        sink.on_death(self.center(), &self.species);
        sink.play_sound(DEATH_SOUND);
        sink.on_exp_award(self.stats.exp);
    }

    fn player_direction_distance(&self, player: &impl PlayerView) -> (Vec2, f32) {
        let offset = player.center() - self.center();
        let distance = offset.length();

        if distance > 0.0 {
            (offset / distance, distance)
        } else {
            (Vec2::ZERO, 0.0)
        }
    }

    fn update_status(&mut self, player: &impl PlayerView, clock: &impl ClockSource) {
        let (_, distance) = self.player_direction_distance(player);
        self.status = self.decide_status(distance, clock);
    }

    fn decide_status(&mut self, distance: f32, clock: &impl ClockSource) -> EnemyStatus {
        if self.health <= self.stats.health_threshold && distance < self.stats.safe_distance {
            EnemyStatus::Flee
        } else if distance <= self.stats.attack_radius && self.can_attack {
            if self.status != EnemyStatus::Attack {
                self.frame_index = 0.0;
                self.attack_time = Some(clock.now());
            }
            EnemyStatus::Attack
        } else if distance <= self.stats.notice_radius {
            EnemyStatus::Move
        } else {
            EnemyStatus::Idle
        }
    }

    fn act(&mut self, player: &impl PlayerView, sink: &mut impl EffectsSink) {
        match self.status {
            EnemyStatus::Attack => {
                sink.on_damage_player(self.stats.attack_damage, self.stats.attack_type);
                sink.play_sound(&self.stats.attack_sound);
            }
            EnemyStatus::Move => {
                self.direction = self.player_direction_distance(player).0;
            }
            EnemyStatus::Flee => {
                self.speed = self.stats.base_speed * self.flee_speed_multiplier;
                self.recover();
            }
            EnemyStatus::Idle => {
                self.direction = Vec2::ZERO;
                self.speed = self.stats.base_speed;
                self.recover();
            }
        }
    }

    fn recover(&mut self) {
        self.health = (self.health + self.stats.recovery_rate).min(self.stats.max_health);
    }

    fn hit_reaction(&mut self) {
        if !self.vulnerable {
            // Stop growing before the direction can no longer be normalized
            let pushed = self.direction * -self.stats.resistance;
            if pushed.length_squared().is_finite() {
                self.direction = pushed;
            }
        }
    }

    fn move_by_direction(&mut self) {
        let step = self.direction.normalize_or_zero() * self.speed;
        self.hitbox.min += step;
        self.hitbox.max += step;
    }

    fn animate(&mut self, animations: &impl AnimationProvider) {
        let frame_count = animations.frame_count(&self.species, self.status).max(1) as f32;

        self.frame_index += self.animation_speed;
        if self.frame_index >= frame_count {
            // One full attack cycle is one attack
            if self.status == EnemyStatus::Attack {
                self.can_attack = false;
            }
            self.frame_index = 0.0;
        }
    }

    fn cooldowns(&mut self, clock: &impl ClockSource) {
        let now = clock.now();

        if !self.can_attack {
            let started = self.attack_time.unwrap_or(now);
            if now.saturating_sub(started) >= self.attack_cooldown_ms {
                self.can_attack = true;
            }
        }

        if !self.vulnerable {
            let hit = self.hit_time.unwrap_or(now);
            if now.saturating_sub(hit) >= self.invincibility_ms {
                self.vulnerable = true;
            }
        }
    }

    fn refresh_health_bar(&mut self) {
        let rect = self.rect();
        let top = rect.max.y + self.health_bar_offset;
        self.health_bar = Rect::new(rect.min.x, top - self.health_bar_height, rect.max.x, top);
    }

    pub fn species(&self) -> &str {
        &self.species
    }

    pub fn stats(&self) -> &EnemyStats {
        &self.stats
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.stats.max_health
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn status(&self) -> EnemyStatus {
        self.status
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn frame_index(&self) -> f32 {
        self.frame_index
    }

    /// Index of the frame to display for the current status.
    pub fn current_frame(&self, animations: &impl AnimationProvider) -> usize {
        let frame_count = animations.frame_count(&self.species, self.status).max(1);
        (self.frame_index.floor() as usize).min(frame_count - 1)
    }

    pub fn can_attack(&self) -> bool {
        self.can_attack
    }

    pub fn attack_time(&self) -> Option<u64> {
        self.attack_time
    }

    pub fn is_vulnerable(&self) -> bool {
        self.vulnerable
    }

    pub fn hit_time(&self) -> Option<u64> {
        self.hit_time
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn center(&self) -> Vec2 {
        self.hitbox.center()
    }

    pub fn hitbox(&self) -> Rect {
        self.hitbox
    }

    /// Sprite bounds, centered on the hitbox.
    pub fn rect(&self) -> Rect {
        Rect::from_center_size(self.hitbox.center(), self.sprite_size)
    }

    pub fn health_bar(&self) -> Rect {
        self.health_bar
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{AttackType, GameClock};
    use crate::enemies::data::{FrameCounts, SpeciesDefinition};
    use crate::enemies::effects::AgentEvent;
    use approx::assert_relative_eq;
    use rstest::rstest;

    struct StubPlayer {
        center: Vec2,
        damage: f32,
    }

    impl StubPlayer {
        fn at(x: f32, y: f32) -> Self {
            Self {
                center: Vec2::new(x, y),
                damage: 20.0,
            }
        }
    }

    impl PlayerView for StubPlayer {
        fn center(&self) -> Vec2 {
            self.center
        }

        fn attack_damage(&self, _source: DamageSource) -> f32 {
            self.damage
        }
    }

    /// Every status has the same number of frames.
    struct FixedFrames(usize);

    impl AnimationProvider for FixedFrames {
        fn frames(&self, _species: &str, _status: EnemyStatus) -> &[String] {
            &[]
        }

        fn frame_count(&self, _species: &str, _status: EnemyStatus) -> usize {
            self.0
        }
    }

    fn squid() -> SpeciesDefinition {
        SpeciesDefinition {
            name: "squid".to_string(),
            health: 100.0,
            exp: 100.0,
            speed: 3.0,
            damage: 20.0,
            attack_type: AttackType::Slash,
            attack_radius: 40.0,
            resistance: 3.0,
            notice_radius: 360.0,
            attack_sound: "audio/attack/slash.wav".to_string(),
            graphics_folder: "graphics/monsters/squid".to_string(),
            sprite_size: (64.0, 64.0),
            frames: FrameCounts { idle: 4, moving: 4, attack: 2, flee: 4 },
        }
    }

    fn spawn() -> EnemyAgent {
        let registry = SpeciesRegistry::from_definitions([squid()]).unwrap();
        EnemyAgent::new(&registry, &EnemyTuning::default(), "squid", Vec2::ZERO).unwrap()
    }

    #[test]
    fn unknown_species_fails_at_construction() {
        let registry = SpeciesRegistry::from_definitions([squid()]).unwrap();
        let result = EnemyAgent::new(&registry, &EnemyTuning::default(), "wyvern", Vec2::ZERO);

        assert!(matches!(result, Err(ConfigurationError::UnknownSpecies(_))));
    }

    #[test]
    fn spawns_idle_at_full_health() {
        let agent = spawn();

        assert_eq!(agent.status(), EnemyStatus::Idle);
        assert_eq!(agent.health(), 100.0);
        assert_eq!(agent.stats().health_threshold, 60.0);
        assert!(agent.can_attack());
        assert!(agent.is_vulnerable());
        assert_eq!(agent.hitbox().size(), Vec2::new(64.0, 54.0));
    }

    #[test]
    fn low_health_near_player_flees_over_everything() {
        let mut agent = spawn();
        agent.health = 50.0;
        let clock = GameClock::at(0);
        let mut events = Vec::new();

        // Inside attack and notice radius, but still flees
        agent.behave(&StubPlayer::at(10.0, 0.0), &clock, &mut events);
        assert_eq!(agent.status(), EnemyStatus::Flee);

        agent.behave(&StubPlayer::at(400.0, 0.0), &clock, &mut events);
        assert_eq!(agent.status(), EnemyStatus::Flee);
        assert!(events.is_empty());
    }

    #[test]
    fn flee_speeds_up_and_regenerates() {
        let mut agent = spawn();
        agent.health = 50.0;
        let clock = GameClock::at(0);

        agent.behave(&StubPlayer::at(400.0, 0.0), &clock, &mut Vec::new());

        assert_relative_eq!(agent.speed(), 4.5);
        assert_relative_eq!(agent.health(), 50.2);
    }

    #[test]
    fn entering_attack_resets_frame_and_records_start() {
        let mut agent = spawn();
        agent.status = EnemyStatus::Move;
        agent.frame_index = 1.4;
        let clock = GameClock::at(1_000);
        let mut events = Vec::new();

        agent.behave(&StubPlayer::at(30.0, 0.0), &clock, &mut events);

        assert_eq!(agent.status(), EnemyStatus::Attack);
        assert_eq!(agent.frame_index(), 0.0);
        assert_eq!(agent.attack_time(), Some(1_000));
        assert_eq!(
            events,
            vec![
                AgentEvent::DamagePlayer { amount: 20.0, attack_type: AttackType::Slash },
                AgentEvent::Sound("audio/attack/slash.wav".to_string()),
            ]
        );
    }

    #[test]
    fn staying_in_attack_keeps_frame_progress() {
        let mut agent = spawn();
        let player = StubPlayer::at(30.0, 0.0);
        let mut events = Vec::new();

        agent.behave(&player, &GameClock::at(0), &mut events);
        agent.frame_index = 0.9;
        agent.behave(&player, &GameClock::at(16), &mut events);

        assert_eq!(agent.frame_index(), 0.9);
        assert_eq!(agent.attack_time(), Some(0));
    }

    #[rstest]
    // health, distance, can_attack, expected
    #[case(60.0, 499.9, true, EnemyStatus::Flee)]
    #[case(60.0, 500.0, true, EnemyStatus::Idle)]
    #[case(60.1, 10.0, true, EnemyStatus::Attack)]
    #[case(100.0, 40.0, true, EnemyStatus::Attack)]
    #[case(100.0, 40.0, false, EnemyStatus::Move)]
    #[case(100.0, 40.1, true, EnemyStatus::Move)]
    #[case(100.0, 360.0, true, EnemyStatus::Move)]
    #[case(100.0, 360.1, true, EnemyStatus::Idle)]
    fn status_priority_at_boundaries(
        #[case] health: f32,
        #[case] distance: f32,
        #[case] can_attack: bool,
        #[case] expected: EnemyStatus,
    ) {
        let mut agent = spawn();
        agent.health = health;
        agent.can_attack = can_attack;
        if !can_attack {
            agent.attack_time = Some(0);
        }

        agent.behave(&StubPlayer::at(distance, 0.0), &GameClock::at(0), &mut Vec::new());

        assert_eq!(agent.status(), expected);
    }

    #[test]
    fn move_faces_player() {
        let mut agent = spawn();

        agent.behave(&StubPlayer::at(0.0, 200.0), &GameClock::at(0), &mut Vec::new());

        assert_eq!(agent.status(), EnemyStatus::Move);
        assert_relative_eq!(agent.direction().x, 0.0);
        assert_relative_eq!(agent.direction().y, 1.0);
    }

    #[test]
    fn player_on_top_of_enemy_gives_zero_direction() {
        let mut agent = spawn();
        let player = StubPlayer::at(0.0, 0.0);

        let (direction, distance) = agent.player_direction_distance(&player);
        assert_eq!(direction, Vec2::ZERO);
        assert_eq!(distance, 0.0);

        agent.take_damage(&player, DamageSource::Weapon, &GameClock::at(0));
        assert_eq!(agent.direction(), Vec2::ZERO);
        assert!(!agent.direction().is_nan());
    }

    #[test]
    fn idle_resets_movement_and_caps_regeneration() {
        let mut agent = spawn();
        agent.direction = Vec2::X;
        agent.speed = 9.0;
        agent.health = 99.9;

        agent.behave(&StubPlayer::at(1_000.0, 0.0), &GameClock::at(0), &mut Vec::new());

        assert_eq!(agent.status(), EnemyStatus::Idle);
        assert_eq!(agent.direction(), Vec2::ZERO);
        assert_eq!(agent.speed(), 3.0);
        assert_eq!(agent.health(), 100.0);
    }

    #[test]
    fn second_hit_inside_invincibility_is_ignored() {
        let mut agent = spawn();
        agent.health = 80.0;
        let player = StubPlayer::at(100.0, 0.0);

        assert!(agent.take_damage(&player, DamageSource::Weapon, &GameClock::at(1_000)));
        assert_eq!(agent.health(), 60.0);
        assert!(!agent.is_vulnerable());
        assert_eq!(agent.hit_time(), Some(1_000));

        let later = GameClock::at(1_100);
        agent.update(&later, &FixedFrames(4), &mut Vec::new());
        assert!(!agent.take_damage(&player, DamageSource::Weapon, &later));
        assert_eq!(agent.health(), 60.0);
    }

    #[test]
    fn invincibility_expires_after_duration() {
        let mut agent = spawn();
        let player = StubPlayer::at(100.0, 0.0);
        let frames = FixedFrames(4);

        agent.take_damage(&player, DamageSource::Magic, &GameClock::at(1_000));

        agent.update(&GameClock::at(1_299), &frames, &mut Vec::new());
        assert!(!agent.is_vulnerable());

        agent.update(&GameClock::at(1_300), &frames, &mut Vec::new());
        assert!(agent.is_vulnerable());
        assert!(agent.take_damage(&player, DamageSource::Magic, &GameClock::at(1_300)));
        assert_eq!(agent.health(), 60.0);
    }

    #[test]
    fn knockback_pushes_away_from_attacker() {
        let mut agent = spawn();
        let player = StubPlayer::at(100.0, 0.0);
        let start = agent.center();

        agent.take_damage(&player, DamageSource::Weapon, &GameClock::at(0));
        agent.update(&GameClock::at(16), &FixedFrames(4), &mut Vec::new());

        assert_relative_eq!(agent.direction().x, -3.0);
        assert_relative_eq!(agent.center().x, start.x - 3.0);
    }

    #[test]
    fn long_knockback_keeps_moving() {
        let mut agent = spawn();
        let player = StubPlayer::at(100.0, 0.0);
        agent.take_damage(&player, DamageSource::Weapon, &GameClock::at(0));

        // Clock held inside the invincibility window for far more ticks than
        // it takes 3^n to overflow an f32
        for _ in 0..200 {
            agent.update(&GameClock::at(0), &FixedFrames(4), &mut Vec::new());
        }
        assert!(!agent.is_vulnerable());
        assert!(agent.direction().length_squared().is_finite());

        let before = agent.center();
        agent.update(&GameClock::at(0), &FixedFrames(4), &mut Vec::new());
        assert_relative_eq!(agent.center().distance(before), agent.speed(), epsilon = 1e-3);
    }

    #[test]
    fn attack_ends_after_one_cycle_then_cools_down() {
        let mut agent = spawn();
        let player = StubPlayer::at(30.0, 0.0);
        // 0.15 per tick over 2 frames wraps on the 14th tick
        let frames = FixedFrames(2);

        agent.behave(&player, &GameClock::at(0), &mut Vec::new());
        assert_eq!(agent.status(), EnemyStatus::Attack);

        let mut now = 0;
        while agent.can_attack() {
            now += 16;
            agent.update(&GameClock::at(now), &frames, &mut Vec::new());
            assert!(now < 1_000, "attack never finished");
        }
        assert_eq!(now, 14 * 16);
        assert_eq!(agent.frame_index(), 0.0);

        // Out of the attack state while cooling down
        agent.behave(&player, &GameClock::at(now), &mut Vec::new());
        assert_eq!(agent.status(), EnemyStatus::Move);

        agent.update(&GameClock::at(499), &frames, &mut Vec::new());
        assert!(!agent.can_attack());
        agent.update(&GameClock::at(500), &frames, &mut Vec::new());
        assert!(agent.can_attack());
    }

    #[test]
    fn displayed_frame_is_floor_of_index() {
        let mut agent = spawn();
        let frames = FixedFrames(4);
        agent.frame_index = 2.95;

        assert_eq!(agent.current_frame(&frames), 2);
        agent.update(&GameClock::at(0), &frames, &mut Vec::new());
        assert_eq!(agent.current_frame(&frames), 3);
    }

    #[test]
    fn death_emits_once_and_freezes_agent() {
        let mut agent = spawn();
        agent.health = 0.0;
        let mut events = Vec::new();

        agent.check_death(&mut events);
        agent.check_death(&mut events);
        agent.update(&GameClock::at(0), &FixedFrames(4), &mut events);

        assert!(agent.is_dead());
        assert_eq!(
            events,
            vec![
                AgentEvent::Died { position: Vec2::ZERO, species: "squid".to_string() },
                AgentEvent::Sound(DEATH_SOUND.to_string()),
                AgentEvent::ExpAward(100.0),
            ]
        );
    }

    #[test]
    fn dead_agent_ignores_updates_and_hits() {
        let mut agent = spawn();
        agent.health = 0.0;
        let player = StubPlayer::at(10.0, 0.0);
        agent.update(&GameClock::at(0), &FixedFrames(4), &mut Vec::new());

        let mut events = Vec::new();
        let before = agent.center();
        agent.behave(&player, &GameClock::at(16), &mut events);
        agent.update(&GameClock::at(32), &FixedFrames(4), &mut events);

        assert!(events.is_empty());
        assert_eq!(agent.center(), before);
        assert!(!agent.take_damage(&player, DamageSource::Weapon, &GameClock::at(1_000)));
    }

    #[test]
    fn lethal_hit_clamps_health_at_zero() {
        let mut agent = spawn();
        let player = StubPlayer {
            center: Vec2::new(10.0, 0.0),
            damage: 250.0,
        };

        agent.take_damage(&player, DamageSource::Weapon, &GameClock::at(0));

        assert_eq!(agent.health(), 0.0);
    }

    #[test]
    fn health_stays_in_bounds_over_a_fight() {
        let mut agent = spawn();
        let frames = FixedFrames(3);
        let mut events = Vec::new();

        for tick in 0..600u64 {
            let now = tick * 16;
            let clock = GameClock::at(now);
            // Player circles in and out of range
            let distance = 20.0 + (tick % 120) as f32 * 5.0;
            let player = StubPlayer {
                center: agent.center() + Vec2::new(distance, 0.0),
                damage: 7.0,
            };

            agent.update(&clock, &frames, &mut events);
            if tick % 10 == 0 {
                agent.take_damage(&player, DamageSource::Weapon, &clock);
            }
            agent.behave(&player, &clock, &mut events);

            assert!(agent.health() >= 0.0);
            assert!(agent.health() <= agent.max_health());
            if !agent.can_attack() {
                assert!(agent.attack_time().is_some());
            }
            if !agent.is_vulnerable() {
                assert!(agent.hit_time().is_some());
            }
        }
    }

    #[test]
    fn health_bar_sits_above_sprite() {
        let mut agent = spawn();
        agent.behave(&StubPlayer::at(1_000.0, 0.0), &GameClock::at(0), &mut Vec::new());

        let rect = agent.rect();
        let bar = agent.health_bar();
        assert_eq!(bar.min.x, rect.min.x);
        assert_eq!(bar.width(), rect.width());
        assert_eq!(bar.max.y, rect.max.y + 15.0);
        assert_eq!(bar.height(), 10.0);
    }
}
