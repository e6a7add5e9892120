//! Combat module - applies enemy and player hits, rewards and deaths.

mod plugin;
mod systems;

pub use plugin::CombatPlugin;
pub use systems::{
    apply_player_damage, award_experience, handle_player_attacks, CombatSet,
};
