use bevy::prelude::*;

/// Marker on every entity owned by the globe scene; cleanup despawns by it
#[derive(Component)]
pub struct GlobeEntity;

#[derive(Component)]
pub struct EarthSphere;

#[derive(Component)]
pub struct CloudShell;

#[derive(Component)]
pub struct Starfield;

#[derive(Component)]
pub struct GlobeControls {
    pub rotation: Quat,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}
