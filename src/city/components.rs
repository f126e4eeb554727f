use bevy::prelude::*;

/// Marker on every entity owned by the city scene; cleanup despawns by it
#[derive(Component)]
pub struct CityEntity;

/// A building's body (or solar panel slab), indexed into the current grid
#[derive(Component)]
pub struct BuildingBody {
    pub index: usize,
}

/// Window quad belonging to a building body
#[derive(Component)]
pub struct BuildingWindow;

/// Solar cells render as tilted panel slabs instead of boxes
#[derive(Component)]
pub struct SolarPanel;

#[derive(Component)]
pub struct GroundPlane;

/// One drifting daytime cloud puff cluster
#[derive(Component)]
pub struct DriftCloud {
    pub index: usize,
}

/// Clamped zoom proxy on the main camera while the city scene is active
#[derive(Component)]
pub struct CityOrbit {
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}
