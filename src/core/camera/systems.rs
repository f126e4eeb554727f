use crate::core::camera::components::{CameraLerp, MainCamera, SceneLight};
use crate::core::camera::logic::{LerpState, lerp_step};
use bevy::math::{EulerRot, Quat, Vec3};
use bevy::prelude::*;
use std::f32::consts::PI;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 0.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
        CameraLerp {
            target_position: Vec3::new(0.0, 0.0, 4.0),
            target_look_at: Vec3::ZERO,
            current_look_at: Vec3::ZERO,
            lerp_speed: 3.0,
            is_lerping: false,
        },
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight::default(),
        SceneLight,
    ));

    info!("Camera spawned");
}

pub fn smooth_camera_movement(
    time: Res<Time>,
    mut camera_query: Query<(&mut Transform, &mut CameraLerp), With<MainCamera>>,
) {
    let Ok((mut camera_transform, mut camera_lerp)) = camera_query.single_mut() else {
        return;
    };
    if !camera_lerp.is_lerping {
        return;
    }

    let current = LerpState {
        position: camera_transform.translation,
        look_at: camera_lerp.current_look_at,
    };
    let target = LerpState {
        position: camera_lerp.target_position,
        look_at: camera_lerp.target_look_at,
    };

    let (next, arrived) = lerp_step(current, target, camera_lerp.lerp_speed, time.delta_secs());

    camera_transform.translation = next.position;
    camera_lerp.current_look_at = next.look_at;
    camera_transform.look_at(camera_lerp.current_look_at, Vec3::Y);

    if arrived {
        camera_lerp.is_lerping = false;
    }
}
