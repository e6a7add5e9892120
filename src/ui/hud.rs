//! In-game HUD - health, energy, experience and selected items.

use bevy::prelude::*;

use super::bar::{compute_fill_ratio, StatusBar, UiColors};
use crate::core::{ClockSource, GameClock, GameState};
use crate::player::{Player, PlayerStats, SPELLS, WEAPONS};

pub const HEALTH_BAR: StatusBar = StatusBar::new(Vec2::new(10.0, 10.0), Vec2::new(200.0, 20.0), 3.0);
pub const ENERGY_BAR: StatusBar = StatusBar::new(Vec2::new(10.0, 34.0), Vec2::new(140.0, 20.0), 3.0);

/// Side length of the weapon and magic selection boxes.
const ITEM_BOX_SIZE: f32 = 80.0;
const ITEM_BOX_BORDER: f32 = 3.0;

/// Marker for HUD root entities.
#[derive(Component)]
pub struct HudRoot;

/// Marker for health bar fill.
#[derive(Component)]
pub struct HealthBar;

/// Marker for energy bar fill.
#[derive(Component)]
pub struct EnergyBar;

/// Marker for the experience counter text.
#[derive(Component)]
pub struct ExpCounter;

/// Which selection box a node belongs to.
#[derive(Component, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SelectionBox {
    Weapon,
    Magic,
}

/// Marker for the icon inside a selection box.
#[derive(Component, Clone, Copy)]
pub struct SelectionIcon(pub SelectionBox);

/// Weapon and spell icons, loaded once so switching never waits on disk.
#[derive(Resource, Default)]
pub struct HudIcons {
    pub weapons: Vec<Handle<Image>>,
    pub spells: Vec<Handle<Image>>,
}

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.init_resource::<HudIcons>()
        .add_systems(Startup, preload_hud_icons)
        .add_systems(OnEnter(GameState::InGame), spawn_hud)
        .add_systems(OnExit(GameState::InGame), cleanup_hud)
        .add_systems(
            Update,
            (
                update_health_bar,
                update_energy_bar,
                update_exp_counter,
                update_selection_boxes,
            )
                .run_if(in_state(GameState::InGame)),
        );
}

fn preload_hud_icons(asset_server: Res<AssetServer>, mut icons: ResMut<HudIcons>) {
    icons.weapons = WEAPONS.iter().map(|w| asset_server.load(w.icon)).collect();
    icons.spells = SPELLS.iter().map(|s| asset_server.load(s.icon)).collect();
    debug!(
        "Preloaded {} weapon and {} spell icons",
        icons.weapons.len(),
        icons.spells.len()
    );
}

/// Spawn the HUD UI.
fn spawn_hud(mut commands: Commands) {
    spawn_bar(&mut commands, HEALTH_BAR, UiColors::HEALTH, HealthBar);
    spawn_bar(&mut commands, ENERGY_BAR, UiColors::ENERGY, EnergyBar);

    // Experience counter (top-right corner)
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(10.0),
                top: Val::Px(10.0),
                padding: UiRect::all(Val::Px(10.0)),
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BackgroundColor(UiColors::BACKGROUND),
            BorderColor(UiColors::BORDER),
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("0"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(UiColors::TEXT),
                ExpCounter,
            ));
        });

    // Selection boxes (bottom-left corner)
    spawn_selection_box(&mut commands, SelectionBox::Weapon, 10.0, 50.0);
    spawn_selection_box(&mut commands, SelectionBox::Magic, 80.0, 40.0);
}

/// Helper to spawn a status bar at its fixed screen position.
fn spawn_bar<M: Component>(commands: &mut Commands, bar: StatusBar, color: Color, marker: M) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(bar.origin.x),
                top: Val::Px(bar.origin.y),
                width: Val::Px(bar.size.x),
                height: Val::Px(bar.size.y),
                border: UiRect::all(Val::Px(bar.border)),
                ..default()
            },
            BackgroundColor(UiColors::BACKGROUND),
            BorderColor(UiColors::BORDER),
            HudRoot,
        ))
        .with_children(|bg| {
            bg.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    ..default()
                },
                BackgroundColor(color),
                marker,
            ));
        });
}

fn spawn_selection_box(commands: &mut Commands, kind: SelectionBox, left: f32, bottom: f32) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(left),
                bottom: Val::Px(bottom),
                width: Val::Px(ITEM_BOX_SIZE),
                height: Val::Px(ITEM_BOX_SIZE),
                border: UiRect::all(Val::Px(ITEM_BOX_BORDER)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(UiColors::BACKGROUND),
            BorderColor(UiColors::BORDER),
            kind,
            HudRoot,
        ))
        .with_children(|parent| {
            parent.spawn((ImageNode::default(), SelectionIcon(kind)));
        });
}

/// Update health bar based on player health.
fn update_health_bar(
    player_query: Query<&PlayerStats, With<Player>>,
    mut bar_query: Query<&mut Node, With<HealthBar>>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(compute_fill_ratio(stats.health, stats.max_health) * 100.0);
}

/// Update energy bar based on player energy.
fn update_energy_bar(
    player_query: Query<&PlayerStats, With<Player>>,
    mut bar_query: Query<&mut Node, With<EnergyBar>>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    let Ok(mut bar) = bar_query.get_single_mut() else {
        return;
    };

    bar.width = Val::Percent(compute_fill_ratio(stats.energy, stats.max_energy) * 100.0);
}

fn update_exp_counter(
    player_query: Query<&PlayerStats, (With<Player>, Changed<PlayerStats>)>,
    mut text_query: Query<&mut Text, With<ExpCounter>>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    let Ok(mut text) = text_query.get_single_mut() else {
        return;
    };

    text.0 = format!("{}", stats.exp.floor() as i64);
}

/// Show the selected items, with a gold border while a switch is cooling down.
fn update_selection_boxes(
    clock: Res<GameClock>,
    icons: Res<HudIcons>,
    player_query: Query<&PlayerStats, With<Player>>,
    mut box_query: Query<(&SelectionBox, &mut BorderColor)>,
    mut icon_query: Query<(&SelectionIcon, &mut ImageNode)>,
) {
    let Ok(stats) = player_query.get_single() else {
        return;
    };
    let now = clock.now();

    for (kind, mut border) in box_query.iter_mut() {
        let switching = match kind {
            SelectionBox::Weapon => !stats.can_switch_weapon(now),
            SelectionBox::Magic => !stats.can_switch_magic(now),
        };
        border.0 = if switching {
            UiColors::BORDER_ACTIVE
        } else {
            UiColors::BORDER
        };
    }

    for (icon, mut image) in icon_query.iter_mut() {
        let handle = match icon.0 {
            SelectionBox::Weapon => icons.weapons.get(stats.weapon_index),
            SelectionBox::Magic => icons.spells.get(stats.magic_index),
        };
        if let Some(handle) = handle {
            if image.image != *handle {
                image.image = handle.clone();
            }
        }
    }
}

/// Clean up HUD entities.
fn cleanup_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
