pub mod components;
pub mod events;
pub mod resources;
pub mod systems;

use crate::city::events::{NewCitySeedEvent, RegenerateCityEvent};
use crate::city::resources::CitySettings;
use crate::core::state::SceneState;
use bevy::prelude::*;

pub struct CityPlugin;

impl Plugin for CityPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<RegenerateCityEvent>()
            .add_message::<NewCitySeedEvent>()
            .init_resource::<CitySettings>()
            .add_systems(OnEnter(SceneState::City), systems::enter_city)
            .add_systems(OnExit(SceneState::City), systems::exit_city)
            .add_systems(
                Update,
                (
                    systems::pause_control,
                    systems::advance_simulation,
                    systems::day_night_lighting,
                    systems::shade_buildings,
                    systems::breathe_buildings,
                    systems::flicker_windows,
                    systems::outline_buildings,
                    systems::draw_panel_grids,
                    systems::draw_weather,
                    systems::drift_clouds,
                    systems::zoom_control,
                    systems::handle_new_seed,
                    systems::regenerate_city,
                )
                    .run_if(in_state(SceneState::City)),
            );
    }
}
