//! Level layout loaded from assets/data/level.ron.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;

use crate::enemies::ConfigurationError;

const LEVEL_PATH: &str = "assets/data/level.ron";

/// One enemy placement.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SpawnPoint {
    pub species: String,
    pub position: (f32, f32),
}

/// Where the player and every enemy start.
#[derive(Resource, Debug, Clone, Deserialize, PartialEq)]
pub struct LevelLayout {
    pub player_spawn: (f32, f32),
    #[serde(default)]
    pub enemies: Vec<SpawnPoint>,
}

impl Default for LevelLayout {
    fn default() -> Self {
        Self {
            player_spawn: (0.0, 0.0),
            enemies: Vec::new(),
        }
    }
}

impl LevelLayout {
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigurationError> {
        ron::from_str(contents).map_err(|e| ConfigurationError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
    }

    /// Load the level file.
    pub fn load() -> Result<Self, ConfigurationError> {
        let contents = fs::read_to_string(LEVEL_PATH).map_err(|e| ConfigurationError::ReadError {
            path: LEVEL_PATH.to_string(),
            details: e.to_string(),
        })?;
        Self::from_ron(LEVEL_PATH, &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_spawn_list() {
        let layout = LevelLayout::from_ron(
            "level.ron",
            r#"(
                player_spawn: (10.0, -20.0),
                enemies: [
                    (species: "squid", position: (300.0, 0.0)),
                    (species: "bamboo", position: (-200.0, 150.0)),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(layout.player_spawn, (10.0, -20.0));
        assert_eq!(layout.enemies.len(), 2);
        assert_eq!(layout.enemies[1].species, "bamboo");
    }

    #[test]
    fn enemies_default_to_empty() {
        let layout = LevelLayout::from_ron("level.ron", "(player_spawn: (0.0, 0.0))").unwrap();
        assert!(layout.enemies.is_empty());
    }
}
