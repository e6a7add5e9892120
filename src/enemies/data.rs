//! Species table and enemy tuning, loaded from RON files.

use bevy::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::animation::AnimationLibrary;
use super::components::{EnemyStats, EnemyStatus, HEALTH_THRESHOLD_RATIO};
use super::error::ConfigurationError;
use crate::core::AttackType;

const SPECIES_DIR: &str = "assets/data/enemies";
const TUNING_PATH: &str = "assets/data/enemy_tuning.ron";

/// Number of animation frames per status.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameCounts {
    pub idle: u32,
    #[serde(rename = "move")]
    pub moving: u32,
    pub attack: u32,
    pub flee: u32,
}

impl FrameCounts {
    pub fn get(&self, status: EnemyStatus) -> u32 {
        match status {
            EnemyStatus::Idle => self.idle,
            EnemyStatus::Move => self.moving,
            EnemyStatus::Attack => self.attack,
            EnemyStatus::Flee => self.flee,
        }
    }
}

/// Species definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct SpeciesDefinition {
    pub name: String,
    pub health: f32,
    pub exp: f32,
    pub speed: f32,
    pub damage: f32,
    pub attack_type: AttackType,
    pub attack_radius: f32,
    pub resistance: f32,
    pub notice_radius: f32,
    pub attack_sound: String,
    pub graphics_folder: String,
    pub sprite_size: (f32, f32),
    pub frames: FrameCounts,
}

impl SpeciesDefinition {
    /// Parse a single definition from RON source.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigurationError> {
        let definition: Self =
            ron::from_str(contents).map_err(|e| ConfigurationError::ParseError {
                path: path.to_string(),
                details: e.to_string(),
            })?;
        definition.validate()?;
        Ok(definition)
    }

    /// Reject stats the state machine cannot work with.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid = |field: &'static str, value: f32| ConfigurationError::InvalidStat {
            species: self.name.clone(),
            field,
            value,
        };

        for (field, value) in [
            ("health", self.health),
            ("sprite_width", self.sprite_size.0),
            ("sprite_height", self.sprite_size.1),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(invalid(field, value));
            }
        }
        for (field, value) in [
            ("speed", self.speed),
            ("damage", self.damage),
            ("attack_radius", self.attack_radius),
            ("notice_radius", self.notice_radius),
            ("resistance", self.resistance),
            ("exp", self.exp),
        ] {
            if !(value >= 0.0) {
                return Err(invalid(field, value));
            }
        }

        for status in EnemyStatus::ALL {
            if self.frames.get(status) == 0 {
                return Err(ConfigurationError::EmptyAnimation {
                    species: self.name.clone(),
                    status,
                });
            }
        }

        Ok(())
    }

    /// Build the stats an agent of this species spawns with.
    pub fn to_stats(&self, tuning: &EnemyTuning) -> EnemyStats {
        EnemyStats {
            max_health: self.health,
            exp: self.exp,
            base_speed: self.speed,
            attack_damage: self.damage,
            attack_type: self.attack_type,
            attack_radius: self.attack_radius,
            notice_radius: self.notice_radius,
            resistance: self.resistance,
            safe_distance: tuning.safe_distance,
            health_threshold: self.health * HEALTH_THRESHOLD_RATIO,
            recovery_rate: tuning.recovery_rate,
            attack_sound: self.attack_sound.clone(),
        }
    }
}

/// Read-only species table, built once when the game starts.
#[derive(Resource, Default, Debug)]
pub struct SpeciesRegistry {
    definitions: HashMap<String, SpeciesDefinition>,
}

impl SpeciesRegistry {
    /// Build a registry from already-parsed definitions.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = SpeciesDefinition>,
    ) -> Result<Self, ConfigurationError> {
        let mut registry = Self::default();
        for definition in definitions {
            definition.validate()?;
            if registry.definitions.contains_key(&definition.name) {
                return Err(ConfigurationError::DuplicateSpecies(definition.name));
            }
            registry
                .definitions
                .insert(definition.name.clone(), definition);
        }
        Ok(registry)
    }

    /// Load every `.ron` file in `dir`, keyed by the definition's name.
    pub fn load_dir(dir: &Path) -> Result<Self, ConfigurationError> {
        let entries = fs::read_dir(dir).map_err(|e| ConfigurationError::ReadError {
            path: dir.display().to_string(),
            details: e.to_string(),
        })?;

        let mut definitions = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == "ron") {
                continue;
            }

            let path_str = path.display().to_string();
            let contents =
                fs::read_to_string(&path).map_err(|e| ConfigurationError::ReadError {
                    path: path_str.clone(),
                    details: e.to_string(),
                })?;
            definitions.push(SpeciesDefinition::from_ron(&path_str, &contents)?);
        }

        Self::from_definitions(definitions)
    }

    /// Get a species definition by name.
    pub fn get(&self, species: &str) -> Result<&SpeciesDefinition, ConfigurationError> {
        self.definitions
            .get(species)
            .ok_or_else(|| ConfigurationError::UnknownSpecies(species.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpeciesDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

/// Tunables shared by every species, loaded from assets/data/enemy_tuning.ron.
#[derive(Resource, Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnemyTuning {
    pub attack_cooldown_ms: u64,
    pub invincibility_ms: u64,
    pub safe_distance: f32,
    pub recovery_rate: f32,
    pub flee_speed_multiplier: f32,
    /// Frames advanced per tick
    pub animation_speed: f32,
    /// Hitbox is the sprite shrunk by this much vertically
    pub hitbox_inset: f32,
    /// Gap between the sprite's top edge and the far edge of its health bar
    pub health_bar_offset: f32,
    pub health_bar_height: f32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            attack_cooldown_ms: 500,
            invincibility_ms: 300,
            safe_distance: 500.0,
            recovery_rate: 0.2,
            flee_speed_multiplier: 1.5,
            animation_speed: 0.15,
            hitbox_inset: 10.0,
            health_bar_offset: 15.0,
            health_bar_height: 10.0,
        }
    }
}

impl EnemyTuning {
    /// Parse and validate tuning from RON source. Missing fields keep their defaults.
    pub fn from_ron(path: &str, contents: &str) -> Result<Self, ConfigurationError> {
        let tuning: Self = ron::from_str(contents).map_err(|e| ConfigurationError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the health bounds or stall the attack cycle.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let invalid =
            |field: &'static str, value: f32| ConfigurationError::InvalidTuning { field, value };

        if !(self.animation_speed > 0.0 && self.animation_speed.is_finite()) {
            return Err(invalid("animation_speed", self.animation_speed));
        }
        for (field, value) in [
            ("safe_distance", self.safe_distance),
            ("recovery_rate", self.recovery_rate),
            ("flee_speed_multiplier", self.flee_speed_multiplier),
            ("hitbox_inset", self.hitbox_inset),
            ("health_bar_offset", self.health_bar_offset),
            ("health_bar_height", self.health_bar_height),
        ] {
            if !(value >= 0.0 && value.is_finite()) {
                return Err(invalid(field, value));
            }
        }

        Ok(())
    }

    /// Parse tuning, logging and falling back to defaults if it is unusable.
    pub fn from_ron_or_default(path: &str, contents: &str) -> Self {
        match Self::from_ron(path, contents) {
            Ok(tuning) => {
                info!("Loaded enemy tuning from {}", path);
                tuning
            }
            Err(e) => {
                error!("{}. Using default enemy tuning.", e);
                Self::default()
            }
        }
    }

    /// Load tuning from RON file, falling back to defaults.
    pub fn load() -> Self {
        match fs::read_to_string(TUNING_PATH) {
            Ok(contents) => Self::from_ron_or_default(TUNING_PATH, &contents),
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", TUNING_PATH, e);
                Self::default()
            }
        }
    }
}

/// Register the species table resources and load them once at startup,
/// before the first level is spawned.
pub fn setup_species_table(app: &mut App) {
    app.init_resource::<SpeciesRegistry>()
        .init_resource::<AnimationLibrary>()
        .init_resource::<EnemyTuning>()
        .add_systems(Startup, load_species_table);
}

/// Load the species table, its animation library and the tuning file.
///
/// Everything it loads is read-only afterwards.
pub fn load_species_table(
    mut registry: ResMut<SpeciesRegistry>,
    mut library: ResMut<AnimationLibrary>,
    mut tuning: ResMut<EnemyTuning>,
) {
    *tuning = EnemyTuning::load();

    match SpeciesRegistry::load_dir(Path::new(SPECIES_DIR)) {
        Ok(loaded) => {
            for definition in loaded.iter() {
                info!("Loaded species definition: {}", definition.name);
            }
            info!("Loaded {} species definitions", loaded.len());
            *library = AnimationLibrary::from_registry(&loaded);
            *registry = loaded;
        }
        Err(e) => {
            error!("Failed to load species table: {}", e);
        }
    }
}
