//! Player plugin - movement, camera, and player-related systems.

use bevy::prelude::*;

use super::movement;

/// Player plugin - handles player movement, attacks and the camera.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        // Set up movement systems
        movement::setup_movement_systems(app);
    }
}
