use crate::globe::material::EarthSurfaceMaterial;
use bevy::prelude::*;

/// Pointer interaction state feeding the drought shader.
///
/// `intensity` is the smoothed value actually displayed; it chases the
/// pressing flag with a first-order low-pass so the effect grows and fades
/// instead of popping.
#[derive(Resource)]
pub struct DroughtInteraction {
    pub pressing: bool,
    pub hold_duration: f32,
    pub intensity: f32,
    pub contact_uv: Vec2,
}

impl Default for DroughtInteraction {
    fn default() -> Self {
        Self {
            pressing: false,
            hold_duration: 0.0,
            intensity: 0.0,
            // off-texture sentinel until the first raycast lands
            contact_uv: Vec2::new(-1.0, -1.0),
        }
    }
}

#[derive(Resource)]
pub struct EarthMaterialHandle(pub Handle<EarthSurfaceMaterial>);
