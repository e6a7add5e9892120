//! UI module - status bars and the in-game HUD.

mod bar;
mod hud;
mod plugin;

pub use bar::{compute_fill_ratio, BarPainter, StatusBar, UiColors};
pub use hud::{HudIcons, ENERGY_BAR, HEALTH_BAR};
pub use plugin::UiPlugin;
