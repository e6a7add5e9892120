//! Grovewarden - Entry Point
//!
//! Controls:
//! - WASD: Move
//! - Space: Weapon attack
//! - Left Ctrl: Cast spell
//! - Q / E: Cycle weapon / spell
//! - Escape: Pause/Unpause

use bevy::prelude::*;

fn main() {
    App::new()
        // Bevy default plugins
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Grovewarden".to_string(),
                resolution: (1280.0, 720.0).into(),
                ..default()
            }),
            ..default()
        }))

        // Grass background
        .insert_resource(ClearColor(Color::srgb(0.28, 0.54, 0.36)))

        // Sound effects
        .add_plugins(grovewarden::audio::SoundPlugin)

        // Our game plugin
        .add_plugins(grovewarden::GrovewardenPlugin)

        .run();
}
