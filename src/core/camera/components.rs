use bevy::prelude::*;

#[derive(Component)]
pub struct MainCamera;

#[derive(Component)]
pub struct SceneLight;

#[derive(Component)]
pub struct CameraLerp {
    pub target_position: Vec3,
    pub target_look_at: Vec3,
    pub current_look_at: Vec3,
    pub lerp_speed: f32,
    pub is_lerping: bool,
}
