pub mod components;
pub mod logic;
pub mod material;
pub mod resources;
pub mod systems;

use crate::core::state::SceneState;
use crate::globe::material::EarthSurfaceMaterial;
use bevy::prelude::*;

pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<EarthSurfaceMaterial>::default())
            .init_resource::<resources::DroughtInteraction>()
            .add_systems(OnEnter(SceneState::Globe), systems::spawn_globe)
            .add_systems(OnExit(SceneState::Globe), systems::cleanup_globe)
            .add_systems(
                Update,
                (
                    systems::globe_control,
                    systems::track_contact_point,
                    systems::update_drought,
                    systems::rotate_clouds,
                )
                    .run_if(in_state(SceneState::Globe)),
            );
    }
}
