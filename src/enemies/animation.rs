//! Enemy animation frame lookup.

use bevy::prelude::*;
use std::collections::HashMap;

use super::components::EnemyStatus;
use super::data::SpeciesRegistry;

/// Frame sequences per (species, status).
pub trait AnimationProvider {
    /// Ordered frame image paths for a species in a given status.
    fn frames(&self, species: &str, status: EnemyStatus) -> &[String];

    /// Number of frames in the sequence, at least 1.
    fn frame_count(&self, species: &str, status: EnemyStatus) -> usize {
        self.frames(species, status).len().max(1)
    }
}

/// Frame image paths for every loaded species, built from the species table.
#[derive(Resource, Default, Debug)]
pub struct AnimationLibrary {
    sequences: HashMap<(String, EnemyStatus), Vec<String>>,
}

impl AnimationLibrary {
    /// Frames live at `{graphics_folder}/{status}/{index}.png`.
    pub fn from_registry(registry: &SpeciesRegistry) -> Self {
        let mut sequences = HashMap::new();

        for definition in registry.iter() {
            for status in EnemyStatus::ALL {
                let frames = (0..definition.frames.get(status))
                    .map(|i| format!("{}/{}/{}.png", definition.graphics_folder, status.folder(), i))
                    .collect();
                sequences.insert((definition.name.clone(), status), frames);
            }
        }

        Self { sequences }
    }
}

impl AnimationProvider for AnimationLibrary {
    fn frames(&self, species: &str, status: EnemyStatus) -> &[String] {
        self.sequences
            .get(&(species.to_string(), status))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
