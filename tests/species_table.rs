//! The species table is loaded once and survives level restarts.

use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use grovewarden::core::{CorePlugin, GameState};
use grovewarden::enemies::{setup_species_table, EnemyTuning, SpeciesRegistry};

fn set_state(app: &mut App, state: GameState) {
    app.world_mut().resource_mut::<NextState<GameState>>().set(state);
    app.update();
}

#[test]
fn species_table_is_loaded_once_at_startup() {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, InputPlugin, CorePlugin));
    setup_species_table(&mut app);

    app.update();
    assert!(app.world().resource::<SpeciesRegistry>().get("squid").is_ok());
    assert_eq!(*app.world().resource::<EnemyTuning>(), EnemyTuning::default());

    // Anything a restart reloaded would overwrite these
    app.insert_resource(SpeciesRegistry::default());
    app.world_mut().resource_mut::<EnemyTuning>().safe_distance = 1.0;

    app.update();
    assert_eq!(*app.world().resource::<State<GameState>>().get(), GameState::InGame);
    set_state(&mut app, GameState::GameOver);
    set_state(&mut app, GameState::InGame);

    assert!(app.world().resource::<SpeciesRegistry>().is_empty());
    assert_eq!(app.world().resource::<EnemyTuning>().safe_distance, 1.0);
}
