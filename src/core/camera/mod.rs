pub mod components;
pub mod logic;
pub mod systems;

use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, systems::spawn_camera)
            .add_systems(Update, systems::smooth_camera_movement);
    }
}
