use crate::core::state::SceneState;
use bevy::prelude::*;
use bevy_asset_loader::prelude::*;

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.add_loading_state(
            LoadingState::new(SceneState::AssetLoading)
                .continue_to_state(SceneState::Globe)
                .load_collection::<GlobeTextures>(),
        );
    }
}

/// Surface rasters for the globe scene. The earth mesh is only spawned after
/// every texture in this collection resolves, so a half-loaded bundle can
/// never reach the shader.
#[derive(AssetCollection, Resource)]
pub struct GlobeTextures {
    #[asset(path = "textures/earth_day.jpg")]
    pub day: Handle<Image>,
    #[asset(path = "textures/earth_topology.png")]
    pub elevation: Handle<Image>,
    #[asset(path = "textures/earth_water.png")]
    pub water: Handle<Image>,
    #[asset(path = "textures/clouds.png")]
    pub clouds: Handle<Image>,
    #[asset(path = "textures/night_sky.png")]
    pub starfield: Handle<Image>,
}
