use crate::core::camera::components::{CameraLerp, MainCamera, SceneLight};
use crate::globe::components::{CloudShell, EarthSphere, GlobeControls, GlobeEntity, Starfield};
use crate::globe::logic;
use crate::globe::material::{EarthSurfaceMaterial, EarthSurfaceParams};
use crate::globe::resources::{DroughtInteraction, EarthMaterialHandle};
use crate::hud::HUD_HEIGHT;
use crate::loading::GlobeTextures;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_clouds::{ShellBuilder, ShellConfig, sphere_mesh};

pub const EARTH_RADIUS: f32 = 1.8;
const EARTH_MESH_RESOLUTION: u32 = 256;
/// Shell sits just above the terrain's displacement ceiling
const CLOUD_SHELL_RADIUS: f32 = 1.82 * 1.004;
const CLOUD_ROTATION_RATE: f32 = 0.03; // rad/s
const STARFIELD_RADIUS: f32 = 90.0;
const DEFAULT_ZOOM: f32 = 4.0;
const MIN_ZOOM: f32 = 3.0;
const MAX_ZOOM: f32 = 10.0;
const DRAG_SENSITIVITY: f32 = 0.002;
const ZOOM_STEP: f32 = 0.4;

pub fn spawn_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut earth_materials: ResMut<Assets<EarthSurfaceMaterial>>,
    mut std_materials: ResMut<Assets<StandardMaterial>>,
    textures: Res<GlobeTextures>,
    mut camera_query: Query<(&mut Transform, &mut CameraLerp), With<MainCamera>>,
    mut light_query: Query<
        (&mut Transform, &mut DirectionalLight),
        (With<SceneLight>, Without<MainCamera>),
    >,
    mut ambient_light: ResMut<AmbientLight>,
) {
    if let Ok((mut transform, mut lerp)) = camera_query.single_mut() {
        *transform = Transform::from_xyz(0.0, 0.0, DEFAULT_ZOOM).looking_at(Vec3::ZERO, Vec3::Y);
        lerp.target_position = transform.translation;
        lerp.target_look_at = Vec3::ZERO;
        lerp.current_look_at = Vec3::ZERO;
        lerp.is_lerping = false;
    }
    // light direction matches the fixed specular direction baked into the
    // shader; the city scene animates both of these, so restore them
    if let Ok((mut transform, mut light)) = light_query.single_mut() {
        *transform = Transform::from_xyz(5.0, 3.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y);
        light.illuminance = 10_000.0;
    }
    ambient_light.brightness = 80.0;

    let earth_material = earth_materials.add(EarthSurfaceMaterial {
        params: EarthSurfaceParams::default(),
        day_texture: textures.day.clone(),
        elevation_texture: textures.elevation.clone(),
        water_texture: textures.water.clone(),
    });
    commands.insert_resource(EarthMaterialHandle(earth_material.clone()));

    commands.spawn((
        Mesh3d(meshes.add(sphere_mesh(EARTH_RADIUS, EARTH_MESH_RESOLUTION, false))),
        MeshMaterial3d(earth_material),
        Transform::default(),
        GlobeEntity,
        EarthSphere,
        GlobeControls {
            rotation: Quat::IDENTITY,
            zoom: DEFAULT_ZOOM,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        },
    ));

    let clouds = ShellBuilder::new(ShellConfig {
        radius: CLOUD_SHELL_RADIUS,
        grid_size: 128,
        color: Color::srgba(1.0, 1.0, 1.0, 0.1),
        alpha_mode: AlphaMode::Add,
        ..Default::default()
    })
    .with_texture(textures.clouds.clone())
    .build();
    commands.spawn((
        Mesh3d(meshes.add(clouds.mesh)),
        MeshMaterial3d(std_materials.add(clouds.material)),
        Transform::default(),
        GlobeEntity,
        CloudShell,
    ));

    let starfield = ShellBuilder::new(ShellConfig {
        radius: STARFIELD_RADIUS,
        grid_size: 64,
        color: Color::WHITE,
        alpha_mode: AlphaMode::Opaque,
        inward: true,
        unlit: true,
    })
    .with_texture(textures.starfield.clone())
    .build();
    commands.spawn((
        Mesh3d(meshes.add(starfield.mesh)),
        MeshMaterial3d(std_materials.add(starfield.material)),
        Transform::default(),
        GlobeEntity,
        Starfield,
    ));

    info!("Globe scene spawned");
}

pub fn cleanup_globe(
    mut commands: Commands,
    entities: Query<Entity, With<GlobeEntity>>,
    mut drought: ResMut<DroughtInteraction>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<EarthMaterialHandle>();
    *drought = DroughtInteraction::default();
    info!("Globe scene cleaned up");
}

pub fn globe_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    mut mouse_wheel: MessageReader<MouseWheel>,
    mut globe_query: Query<(&mut Transform, &mut GlobeControls), With<EarthSphere>>,
    mut camera_query: Query<&mut CameraLerp, With<MainCamera>>,
    windows: Query<&Window>,
) {
    let Ok((mut globe_transform, mut controls)) = globe_query.single_mut() else {
        return;
    };
    let Ok(mut camera_lerp) = camera_query.single_mut() else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };

    let is_over_hud = window
        .cursor_position()
        .is_some_and(|pos| pos.y < HUD_HEIGHT);

    if mouse_input.pressed(MouseButton::Left) && !is_over_hud {
        for motion in mouse_motion.read() {
            let sensitivity = DRAG_SENSITIVITY * (controls.zoom / DEFAULT_ZOOM);
            let yaw = Quat::from_rotation_y(motion.delta.x * sensitivity);

            controls.rotation = controls.rotation * yaw;
            globe_transform.rotation = controls.rotation;
        }
    }

    if !is_over_hud {
        for wheel in mouse_wheel.read() {
            controls.zoom -= wheel.y * ZOOM_STEP;
            controls.zoom = controls.zoom.clamp(controls.min_zoom, controls.max_zoom);

            camera_lerp.target_position = Vec3::new(0.0, 0.0, controls.zoom);
            camera_lerp.target_look_at = Vec3::ZERO;
            camera_lerp.is_lerping = true;
        }
    }
}

/// Re-casts the cursor ray every frame; a miss keeps the previous contact
/// point so the effect doesn't jump while the cursor grazes the horizon
pub fn track_contact_point(
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    globe_query: Query<&GlobeControls, With<EarthSphere>>,
    mut drought: ResMut<DroughtInteraction>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(controls) = globe_query.single() else {
        return;
    };

    let Ok(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };
    if let Some(uv) =
        logic::sphere_contact_uv(ray.origin, *ray.direction, controls.rotation, EARTH_RADIUS)
    {
        drought.contact_uv = uv;
    }
}

pub fn update_drought(
    mouse_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drought: ResMut<DroughtInteraction>,
    handle: Option<Res<EarthMaterialHandle>>,
    mut materials: ResMut<Assets<EarthSurfaceMaterial>>,
) {
    let is_over_hud = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .is_some_and(|pos| pos.y < HUD_HEIGHT);

    if mouse_input.just_pressed(MouseButton::Left) && !is_over_hud {
        drought.pressing = true;
        drought.hold_duration = 0.0;
        debug!("drought press at uv {:?}", drought.contact_uv);
    }
    if mouse_input.just_released(MouseButton::Left) {
        drought.pressing = false;
        drought.hold_duration = 0.0;
    }

    drought.hold_duration = logic::advance_hold(drought.hold_duration, drought.pressing);
    let target = if drought.pressing { 1.0 } else { 0.0 };
    drought.intensity = logic::ease_intensity(drought.intensity, target);

    let Some(handle) = handle else {
        return;
    };
    if let Some(material) = materials.get_mut(&handle.0) {
        material.params.contact_uv = drought.contact_uv;
        material.params.pressing = if drought.pressing { 1.0 } else { 0.0 };
        material.params.drought_intensity = drought.intensity;
        material.params.hold_duration = drought.hold_duration;
    }
}

/// Constant slow drift, independent of any input
pub fn rotate_clouds(time: Res<Time>, mut clouds: Query<&mut Transform, With<CloudShell>>) {
    for mut transform in &mut clouds {
        transform.rotate_y(CLOUD_ROTATION_RATE * time.delta_secs());
    }
}
