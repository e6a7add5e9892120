//! Drives the enemy and combat systems through a headless app.

use bevy::prelude::*;
use std::path::Path;

use grovewarden::combat::{apply_player_damage, award_experience, handle_player_attacks};
use grovewarden::core::{
    DamagePlayerEvent, DamageSource, EnemyDeathEvent, ExpAwardEvent, GameClock, PlaySoundEvent,
    PlayerAttackEvent,
};
use grovewarden::enemies::ai::{despawn_dead_enemies, enemy_behavior, enemy_update};
use grovewarden::enemies::{
    AnimationLibrary, Enemy, EnemyAgent, EnemyStatus, EnemyTuning, SpeciesRegistry, DEATH_SOUND,
};
use grovewarden::player::{Player, PlayerStats};

#[derive(Resource)]
struct Captured<E>(Vec<E>);

impl<E> Default for Captured<E> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

fn capture<E: Event + Clone>(mut reader: EventReader<E>, mut captured: ResMut<Captured<E>>) {
    captured.0.extend(reader.read().cloned());
}

fn registry() -> SpeciesRegistry {
    SpeciesRegistry::load_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data/enemies"))
        .expect("bundled species table should load")
}

fn test_app() -> App {
    let registry = registry();
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_event::<EnemyDeathEvent>()
        .add_event::<DamagePlayerEvent>()
        .add_event::<ExpAwardEvent>()
        .add_event::<PlaySoundEvent>()
        .add_event::<PlayerAttackEvent>()
        .init_resource::<Captured<EnemyDeathEvent>>()
        .init_resource::<Captured<ExpAwardEvent>>()
        .init_resource::<Captured<PlaySoundEvent>>()
        .insert_resource(GameClock::at(1_000))
        .insert_resource(AnimationLibrary::from_registry(&registry))
        .insert_resource(EnemyTuning::default())
        .insert_resource(registry)
        .add_systems(
            Update,
            (
                enemy_update,
                enemy_behavior,
                handle_player_attacks,
                apply_player_damage,
                award_experience,
                despawn_dead_enemies,
                capture::<EnemyDeathEvent>,
                capture::<ExpAwardEvent>,
                capture::<PlaySoundEvent>,
            )
                .chain(),
        );
    app
}

fn spawn_squid(app: &mut App, position: Vec2) -> Entity {
    let agent = EnemyAgent::new(
        app.world().resource::<SpeciesRegistry>(),
        app.world().resource::<EnemyTuning>(),
        "squid",
        position,
    )
    .expect("squid is in the species table");

    app.world_mut()
        .spawn((Enemy, Transform::from_translation(position.extend(1.0)), agent))
        .id()
}

fn spawn_player(app: &mut App, position: Vec2, stats: PlayerStats) -> Entity {
    app.world_mut()
        .spawn((Player, stats, Transform::from_translation(position.extend(2.0))))
        .id()
}

fn player_stats(app: &App, player: Entity) -> PlayerStats {
    app.world().get::<PlayerStats>(player).cloned().expect("player exists")
}

#[test]
fn enemy_in_range_attacks_player_once_per_invincibility_window() {
    let mut app = test_app();
    let enemy = spawn_squid(&mut app, Vec2::ZERO);
    let player = spawn_player(&mut app, Vec2::new(30.0, 0.0), PlayerStats::default());

    app.update();

    let agent = app.world().get::<EnemyAgent>(enemy).expect("enemy alive");
    assert_eq!(agent.status(), EnemyStatus::Attack);
    assert_eq!(player_stats(&app, player).health, 80.0);
    assert!(app
        .world()
        .resource::<Captured<PlaySoundEvent>>()
        .0
        .iter()
        .any(|e| e.path == "audio/attack/slash.wav"));

    // Still attacking, but the player is invincible for 500 ms
    app.world_mut().resource_mut::<GameClock>().advance_by(16);
    app.update();
    assert_eq!(player_stats(&app, player).health, 80.0);
}

#[test]
fn idle_enemy_does_not_move_toward_distant_player() {
    let mut app = test_app();
    let enemy = spawn_squid(&mut app, Vec2::ZERO);
    spawn_player(&mut app, Vec2::new(2_000.0, 0.0), PlayerStats::default());

    for _ in 0..5 {
        app.world_mut().resource_mut::<GameClock>().advance_by(16);
        app.update();
    }

    let agent = app.world().get::<EnemyAgent>(enemy).expect("enemy alive");
    assert_eq!(agent.status(), EnemyStatus::Idle);
    assert_eq!(agent.center(), Vec2::ZERO);
}

#[test]
fn noticed_player_is_chased() {
    let mut app = test_app();
    let enemy = spawn_squid(&mut app, Vec2::ZERO);
    spawn_player(&mut app, Vec2::new(300.0, 0.0), PlayerStats::default());

    // Decide to move on the first tick, step on the second
    app.update();
    app.world_mut().resource_mut::<GameClock>().advance_by(16);
    app.update();

    let agent = app.world().get::<EnemyAgent>(enemy).expect("enemy alive");
    let transform = app.world().get::<Transform>(enemy).expect("enemy alive");
    assert_eq!(agent.status(), EnemyStatus::Move);
    assert_eq!(agent.center(), Vec2::new(3.0, 0.0));
    assert_eq!(transform.translation.truncate(), agent.center());
}

#[test]
fn hits_in_the_same_frame_land_once() {
    let mut app = test_app();
    let enemy = spawn_squid(&mut app, Vec2::ZERO);
    spawn_player(&mut app, Vec2::new(1_000.0, 0.0), PlayerStats::default());

    for _ in 0..2 {
        app.world_mut().send_event(PlayerAttackEvent {
            target: enemy,
            source: DamageSource::Weapon,
        });
    }
    app.update();

    let agent = app.world().get::<EnemyAgent>(enemy).expect("enemy alive");
    assert_eq!(agent.health(), 75.0);
    assert!(!agent.is_vulnerable());
}

#[test]
fn killed_enemy_reports_death_once_and_is_removed() {
    let mut app = test_app();
    let enemy = spawn_squid(&mut app, Vec2::new(-50.0, 0.0));
    let strong = PlayerStats {
        attack: 500.0,
        ..PlayerStats::default()
    };
    let player = spawn_player(&mut app, Vec2::new(1_000.0, 0.0), strong);

    app.world_mut().send_event(PlayerAttackEvent {
        target: enemy,
        source: DamageSource::Weapon,
    });
    app.update();
    assert!(app.world().get::<EnemyAgent>(enemy).is_some());

    for _ in 0..3 {
        app.world_mut().resource_mut::<GameClock>().advance_by(16);
        app.update();
    }

    assert!(app.world().get::<EnemyAgent>(enemy).is_none());

    let deaths = &app.world().resource::<Captured<EnemyDeathEvent>>().0;
    assert_eq!(deaths.len(), 1);
    assert_eq!(deaths[0].species, "squid");
    assert_eq!(deaths[0].position, Vec2::new(-50.0, 0.0));

    let awards = &app.world().resource::<Captured<ExpAwardEvent>>().0;
    assert_eq!(awards.len(), 1);
    assert_eq!(player_stats(&app, player).exp, 100.0);

    let death_sounds = app
        .world()
        .resource::<Captured<PlaySoundEvent>>()
        .0
        .iter()
        .filter(|e| e.path == DEATH_SOUND)
        .count();
    assert_eq!(death_sounds, 1);
}
