mod city;
mod core;
mod globe;
mod helpers;
mod hud;
mod loading;

use crate::city::CityPlugin;
use crate::core::camera::CameraPlugin;
use crate::core::state::SceneState;
use crate::globe::GlobePlugin;
use crate::hud::HudPlugin;
use crate::loading::LoadingPlugin;

use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;
use bevy_egui::EguiPlugin;

pub struct ScenesPlugin;

impl Plugin for ScenesPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneState>()
            .add_plugins(EguiPlugin::default())
            .add_plugins((
                CameraPlugin,
                LoadingPlugin,
                GlobePlugin,
                CityPlugin,
                HudPlugin,
            ));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
