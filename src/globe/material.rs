use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

/// Earth surface material: vertices displaced by the elevation texture,
/// day-texture base color, and a pointer-driven drought discoloration that
/// grows with hold duration and is masked out over water.
#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct EarthSurfaceMaterial {
    #[uniform(0)]
    pub params: EarthSurfaceParams,
    #[texture(1)]
    #[sampler(2)]
    pub day_texture: Handle<Image>,
    #[texture(3)]
    #[sampler(4)]
    pub elevation_texture: Handle<Image>,
    #[texture(5)]
    #[sampler(6)]
    pub water_texture: Handle<Image>,
}

#[derive(ShaderType, Debug, Clone)]
pub struct EarthSurfaceParams {
    /// Last pointer-contact point on the surface, in UV space
    pub contact_uv: Vec2,
    /// 1.0 while the pointer is held down
    pub pressing: f32,
    /// Radius of the effect at the instant of pointer-down
    pub drought_radius: f32,
    /// Smoothed display intensity in [0, 1]
    pub drought_intensity: f32,
    /// Seconds-equivalent hold accumulator; the shader grows the radius
    /// linearly with this
    pub hold_duration: f32,
    /// Terrain relief as a fraction of the sphere radius
    pub displacement_scale: f32,
}

impl Default for EarthSurfaceParams {
    fn default() -> Self {
        Self {
            contact_uv: Vec2::new(-1.0, -1.0),
            pressing: 0.0,
            drought_radius: crate::globe::logic::BASE_DROUGHT_RADIUS,
            drought_intensity: 0.0,
            hold_duration: 0.0,
            displacement_scale: 0.1,
        }
    }
}

impl Material for EarthSurfaceMaterial {
    fn vertex_shader() -> ShaderRef {
        "shaders/earth_surface.wgsl".into()
    }

    fn fragment_shader() -> ShaderRef {
        "shaders/earth_surface.wgsl".into()
    }
}
