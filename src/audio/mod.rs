//! Audio module - plays the sounds other systems request.

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;

use crate::core::PlaySoundEvent;

/// Volume for every gameplay sound effect.
const EFFECT_VOLUME: f64 = 0.15;

/// Sound plugin - turns `PlaySoundEvent`s into playing sounds.
pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_kira_audio::AudioPlugin)
            .add_systems(PostUpdate, play_requested_sounds);
    }
}

fn play_requested_sounds(
    asset_server: Res<AssetServer>,
    audio: Res<Audio>,
    mut sound_events: EventReader<PlaySoundEvent>,
) {
    for event in sound_events.read() {
        audio
            .play(asset_server.load(event.path.clone()))
            .with_volume(EFFECT_VOLUME);
    }
}
