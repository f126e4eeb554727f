use crate::city::components::{
    BuildingBody, BuildingWindow, CityEntity, CityOrbit, DriftCloud, GroundPlane, SolarPanel,
};
use crate::city::events::{NewCitySeedEvent, RegenerateCityEvent};
use crate::city::resources::{
    BreathingNoise, CityConfig, CityMeshes, CitySettings, CityWeather, CloudMaterialHandle,
    CurrentCityGrid, CurrentCityStats, SimulationClock, weather_bounds,
};
use crate::core::camera::components::{CameraLerp, MainCamera, SceneLight};
use crate::helpers::mesh::shaded_building_mesh;
use crate::hud::HUD_HEIGHT;
use bevy::ecs::relationship::RelatedSpawnerCommands;
use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use citygen::animate::{breathing_scale, fog_factor, window_brightness};
use citygen::config::NoiseField;
use citygen::constants::{
    RAIN_COLOR, SNOW_COLOR, SOLAR_GRID_COLOR, SOLAR_GRID_STEP, SOLAR_PANEL_COLOR, WINDOW_SIZE,
    WINDOW_SPACING,
};
use citygen::cycle::{cloud_color, cloud_opacity, ground_color, sky_color};
use citygen::grid::{BuildingKind, CityGrid};
use citygen::painter::{back_to_front, planar_distance};
use citygen::tools::derive_stream;
use citygen::weather::{WeatherKind, WeatherState};
use rand::random_range;
use std::f32::consts::PI;

pub const CITY_CAMERA_POSITION: Vec3 = Vec3::new(0.0, 450.0, -750.0);
const PANEL_THICKNESS: f32 = 2.0;
const PANEL_ALTITUDE: f32 = 10.0;
const PANEL_TILT: f32 = 0.2 * PI;
/// Window quads float one unit off the face so they never z-fight the wall
const WINDOW_FACE_OFFSET: f32 = 1.0;
const DRIFT_CLOUD_COUNT: usize = 8;
const DRIFT_CLOUD_ALTITUDE: f32 = 260.0;
const MIN_ZOOM: f32 = 0.35;
const MAX_ZOOM: f32 = 2.0;
const ZOOM_STEP: f32 = 0.1;
const RAIN_STREAK_LENGTH: f32 = 8.0;
const SNOWFLAKE_RADIUS: f32 = 1.5;

pub fn enter_city(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<CitySettings>,
    mut camera_query: Query<(Entity, &mut Transform, &mut CameraLerp), With<MainCamera>>,
    mut light_query: Query<&mut Transform, (With<SceneLight>, Without<MainCamera>)>,
) {
    let config = citygen::get_config();

    if let Ok((camera_entity, mut transform, mut lerp)) = camera_query.single_mut() {
        *transform = Transform::from_translation(CITY_CAMERA_POSITION).looking_at(Vec3::ZERO, Vec3::Y);
        lerp.target_position = CITY_CAMERA_POSITION;
        lerp.target_look_at = Vec3::ZERO;
        lerp.current_look_at = Vec3::ZERO;
        lerp.is_lerping = false;
        commands.entity(camera_entity).insert(CityOrbit {
            zoom: 1.0,
            min_zoom: MIN_ZOOM,
            max_zoom: MAX_ZOOM,
        });
    }
    if let Ok(mut transform) = light_query.single_mut() {
        *transform = Transform::from_xyz(300.0, 600.0, -300.0).looking_at(Vec3::ZERO, Vec3::Y);
    }

    let city_meshes = CityMeshes {
        building: meshes.add(shaded_building_mesh()),
        window: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        panel: meshes.add(Cuboid::new(1.0, 1.0, 1.0)),
        cloud: meshes.add(bevy_clouds::sphere_mesh(1.0, 24, false)),
    };

    // ground sheet, tinted by the hour every frame
    let half = config.half_extent();
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(half * 6.0, half * 6.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.471, 0.157),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, -0.1, 0.0),
        CityEntity,
        GroundPlane,
    ));

    // drifting daytime cloud puffs share one tintable material
    let cloud_material = materials.add(StandardMaterial {
        base_color: Color::srgba(1.0, 1.0, 1.0, 0.15),
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        ..default()
    });
    commands.insert_resource(CloudMaterialHandle(cloud_material.clone()));
    for index in 0..DRIFT_CLOUD_COUNT {
        // puff shapes vary per cluster, re-rolled on every scene entry
        let puff = Vec3::new(
            random_range(120.0..200.0),
            random_range(40.0..65.0),
            random_range(60.0..110.0),
        );
        commands.spawn((
            Mesh3d(city_meshes.cloud.clone()),
            MeshMaterial3d(cloud_material.clone()),
            Transform::from_xyz(0.0, DRIFT_CLOUD_ALTITUDE, 0.0).with_scale(puff),
            Visibility::Hidden,
            CityEntity,
            DriftCloud { index },
        ));
    }

    let grid = citygen::grid::generate(&config, settings.seed, 0.0);
    info!(
        "Generated city: {} buildings, population {}, renewable {:.0}%",
        grid.buildings.len(),
        grid.stats.total_population,
        grid.stats.renewable_fraction * 100.0
    );
    spawn_city_buildings(&mut commands, &grid, &city_meshes, &mut materials);

    commands.insert_resource(CurrentCityStats { stats: grid.stats });
    commands.insert_resource(CurrentCityGrid { grid });
    commands.insert_resource(SimulationClock::default());
    commands.insert_resource(CityWeather {
        state: WeatherState::default(),
        wind_noise: NoiseField::new(derive_stream(settings.seed, 1), 1.0),
    });
    commands.insert_resource(BreathingNoise(NoiseField::new(
        derive_stream(settings.seed, 2),
        1.0,
    )));
    commands.insert_resource(city_meshes);
    commands.insert_resource(CityConfig(config));
}

pub fn exit_city(
    mut commands: Commands,
    entities: Query<Entity, With<CityEntity>>,
    camera_query: Query<Entity, (With<MainCamera>, With<CityOrbit>)>,
    mut clear_color: ResMut<ClearColor>,
) {
    for entity in entities.iter() {
        commands.entity(entity).despawn();
    }
    if let Ok(camera_entity) = camera_query.single() {
        commands.entity(camera_entity).remove::<CityOrbit>();
    }
    commands.remove_resource::<CityConfig>();
    commands.remove_resource::<SimulationClock>();
    commands.remove_resource::<CityWeather>();
    commands.remove_resource::<BreathingNoise>();
    commands.remove_resource::<CurrentCityGrid>();
    commands.remove_resource::<CurrentCityStats>();
    commands.remove_resource::<CityMeshes>();
    commands.remove_resource::<CloudMaterialHandle>();
    clear_color.0 = Color::linear_rgb(0.02, 0.02, 0.03);
    info!("City scene cleaned up");
}

fn spawn_city_buildings(
    commands: &mut Commands,
    grid: &CityGrid,
    city_meshes: &CityMeshes,
    materials: &mut Assets<StandardMaterial>,
) {
    for (index, building) in grid.buildings.iter().enumerate() {
        match building.kind {
            BuildingKind::Solar => {
                let material = materials.add(StandardMaterial {
                    base_color: Color::srgb(
                        SOLAR_PANEL_COLOR[0],
                        SOLAR_PANEL_COLOR[1],
                        SOLAR_PANEL_COLOR[2],
                    ),
                    perceptual_roughness: 0.4,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                });
                commands.spawn((
                    Mesh3d(city_meshes.panel.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(building.x, PANEL_ALTITUDE, building.y)
                        .with_rotation(Quat::from_rotation_x(PANEL_TILT))
                        .with_scale(Vec3::new(building.width, PANEL_THICKNESS, building.depth)),
                    CityEntity,
                    BuildingBody { index },
                    SolarPanel,
                ));
            }
            kind => {
                let material = materials.add(StandardMaterial {
                    base_color: Color::srgb(
                        building.color[0],
                        building.color[1],
                        building.color[2],
                    ),
                    perceptual_roughness: 0.9,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                });
                let mut body = commands.spawn((
                    Mesh3d(city_meshes.building.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(building.x, 0.0, building.y).with_scale(Vec3::new(
                        building.width,
                        building.height,
                        building.depth,
                    )),
                    CityEntity,
                    BuildingBody { index },
                ));
                if kind != BuildingKind::Park {
                    body.with_children(|parent| {
                        spawn_windows(parent, building, city_meshes, materials);
                    });
                }
            }
        }
    }
}

/// Window quads on the front and back faces, laid out against the base
/// dimensions in the parent's normalized space so they ride the breathing
/// animation with the wall they sit on
fn spawn_windows(
    parent: &mut RelatedSpawnerCommands<ChildOf>,
    building: &citygen::grid::Building,
    city_meshes: &CityMeshes,
    materials: &mut Assets<StandardMaterial>,
) {
    let face_z = 0.5 + WINDOW_FACE_OFFSET / building.depth;
    let scale = Vec3::new(
        WINDOW_SIZE / building.width,
        WINDOW_SIZE / building.height,
        1.0 / building.depth,
    );

    let mut h = WINDOW_SIZE;
    while h < building.height {
        let mut w = -building.width / 2.0 + WINDOW_SIZE;
        while w < building.width / 2.0 {
            for side in [1.0f32, -1.0] {
                let material = materials.add(StandardMaterial {
                    base_color: Color::srgba(1.0, 1.0, 0.784, 0.0),
                    unlit: true,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                });
                parent.spawn((
                    Mesh3d(city_meshes.window.clone()),
                    MeshMaterial3d(material),
                    Transform::from_xyz(w / building.width, h / building.height, side * face_z)
                        .with_scale(scale),
                    BuildingWindow,
                ));
            }
            w += WINDOW_SPACING;
        }
        h += WINDOW_SPACING;
    }
}

/// Pointer press freezes the clock and weather; release resumes them
pub fn pause_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut clock: ResMut<SimulationClock>,
) {
    let is_over_hud = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .is_some_and(|pos| pos.y < HUD_HEIGHT);

    if mouse_input.just_pressed(MouseButton::Left) && !is_over_hud {
        clock.paused = true;
        debug!("simulation paused");
    }
    if mouse_input.just_released(MouseButton::Left) {
        clock.paused = false;
    }
}

pub fn advance_simulation(
    mut clock: ResMut<SimulationClock>,
    mut weather: ResMut<CityWeather>,
    config: Res<CityConfig>,
) {
    // the frame counter keeps ticking while paused so the breathing and
    // cloud drift stay alive; only the day cycle and weather freeze
    clock.frame += 1;
    if clock.paused {
        return;
    }

    clock.cycle.advance(&config.0.cycle);

    let bounds = weather_bounds(&config.0);
    let time_of_day = clock.cycle.time_of_day;
    let CityWeather { state, wind_noise } = &mut *weather;
    state.drift_wind(wind_noise, time_of_day);
    if state.maybe_transition(&config.0.weather, &bounds) {
        info!(
            "weather switched to {} (intensity {:.2})",
            state.kind.label(),
            state.intensity
        );
    }
    state.advance_particles(&bounds);
}

/// Painter's ordering plus fog and day-light attenuation, written into each
/// building's material alpha and transparent-pass depth bias
pub fn shade_buildings(
    clock: Res<SimulationClock>,
    weather: Res<CityWeather>,
    config: Res<CityConfig>,
    grid: Res<CurrentCityGrid>,
    camera_query: Query<&Transform, With<MainCamera>>,
    bodies: Query<(&BuildingBody, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Ok(camera_transform) = camera_query.single() else {
        return;
    };
    let camera_ground = Vec2::new(camera_transform.translation.x, camera_transform.translation.z);

    let order = back_to_front(&grid.grid.buildings, camera_ground);
    let mut rank = vec![0usize; grid.grid.buildings.len()];
    for (position, index) in order.iter().enumerate() {
        rank[*index] = position;
    }

    let darkness = weather.state.darkness(&config.0.weather);
    let ambient = clock.cycle.ambient_light(&config.0.cycle, darkness);
    let extent = config.0.grid.grid_size as f32 * config.0.grid.spacing;

    for (body, material_handle) in bodies.iter() {
        let Some(building) = grid.grid.buildings.get(body.index) else {
            continue;
        };
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };

        let distance = planar_distance(building, camera_ground);
        let fog = fog_factor(distance / extent, config.0.atmosphere.fog_density);

        material.base_color = material.base_color.with_alpha(fog * ambient);
        // far buildings get a lower bias so the transparent pass draws them
        // first regardless of mesh origin quirks
        material.depth_bias = rank[body.index] as f32;
    }
}

pub fn day_night_lighting(
    clock: Res<SimulationClock>,
    weather: Res<CityWeather>,
    config: Res<CityConfig>,
    mut clear_color: ResMut<ClearColor>,
    mut ambient_light: ResMut<AmbientLight>,
    mut light_query: Query<&mut DirectionalLight, With<SceneLight>>,
    ground_query: Query<&MeshMaterial3d<StandardMaterial>, With<GroundPlane>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let darkness = weather.state.darkness(&config.0.weather);
    let ambient = clock.cycle.ambient_light(&config.0.cycle, darkness);

    let sky = sky_color(clock.cycle.day_light());
    clear_color.0 = Color::srgb(sky[0], sky[1], sky[2]);

    ambient_light.brightness = 80.0 + ambient * 400.0;
    if let Ok(mut light) = light_query.single_mut() {
        light.illuminance = ambient * 10_000.0;
    }

    if let Ok(material_handle) = ground_query.single() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            let ground = ground_color(clock.cycle.hour());
            material.base_color = Color::srgb(
                ground[0] * ambient,
                ground[1] * ambient,
                ground[2] * ambient,
            );
        }
    }
}

pub fn breathe_buildings(
    clock: Res<SimulationClock>,
    breathing: Res<BreathingNoise>,
    config: Res<CityConfig>,
    grid: Res<CurrentCityGrid>,
    mut bodies: Query<(&BuildingBody, Has<SolarPanel>, &mut Transform)>,
) {
    for (body, is_panel, mut transform) in bodies.iter_mut() {
        let Some(building) = grid.grid.buildings.get(body.index) else {
            continue;
        };
        let (width_scale, height_scale) =
            breathing_scale(&breathing.0, clock.frame, body.index, &config.0.atmosphere);

        transform.scale = if is_panel {
            Vec3::new(
                building.width * width_scale,
                PANEL_THICKNESS,
                building.depth * width_scale,
            )
        } else {
            Vec3::new(
                building.width * width_scale,
                building.height * height_scale,
                building.depth * width_scale,
            )
        };
    }
}

/// Every window re-rolls its brightness every frame - the flicker is the
/// point, not an artifact
pub fn flicker_windows(
    windows: Query<&MeshMaterial3d<StandardMaterial>, With<BuildingWindow>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for material_handle in windows.iter() {
        if let Some(material) = materials.get_mut(&material_handle.0) {
            material.base_color = material.base_color.with_alpha(window_brightness());
        }
    }
}

pub fn draw_weather(
    mut gizmos: Gizmos,
    weather: Res<CityWeather>,
    config: Res<CityConfig>,
) {
    if weather.state.kind == WeatherKind::Clear {
        return;
    }

    let bounds = weather_bounds(&config.0);
    let wind_drift = weather.state.wind_direction.sin();

    match weather.state.kind {
        WeatherKind::Rain => {
            let color = Color::srgb(RAIN_COLOR[0], RAIN_COLOR[1], RAIN_COLOR[2]);
            for particle in &weather.state.particles {
                let position = Vec3::new(
                    particle.x,
                    bounds.half_height - particle.y,
                    particle.z - bounds.depth / 2.0,
                );
                let streak = Vec3::new(
                    wind_drift * RAIN_STREAK_LENGTH * 0.5,
                    -RAIN_STREAK_LENGTH,
                    0.0,
                );
                gizmos.line(position, position + streak, color);
            }
        }
        WeatherKind::Snow => {
            let color = Color::srgb(SNOW_COLOR[0], SNOW_COLOR[1], SNOW_COLOR[2]);
            for particle in &weather.state.particles {
                let position = Vec3::new(
                    particle.x,
                    bounds.half_height - particle.y,
                    particle.z - bounds.depth / 2.0,
                );
                gizmos.sphere(position, SNOWFLAKE_RADIUS, color);
            }
        }
        WeatherKind::Clear => {}
    }
}

pub fn drift_clouds(
    clock: Res<SimulationClock>,
    config: Res<CityConfig>,
    cloud_material: Res<CloudMaterialHandle>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut clouds: Query<(&DriftCloud, &mut Transform, &mut Visibility)>,
) {
    let daytime = clock.cycle.is_daytime();
    let span = config.0.half_extent() * 1.5;

    for (cloud, mut transform, mut visibility) in clouds.iter_mut() {
        *visibility = if daytime {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if !daytime {
            continue;
        }

        let x = ((clock.frame as f32 * 0.2 + cloud.index as f32 * 300.0) % (span * 2.0)) - span;
        let y = DRIFT_CLOUD_ALTITUDE + (x * 0.01).sin() * 50.0;
        let z = (cloud.index % 4) as f32 * 120.0 - 180.0;
        transform.translation = Vec3::new(x, y, z);
    }

    if daytime {
        if let Some(material) = materials.get_mut(&cloud_material.0) {
            let tint = cloud_color(clock.cycle.hour());
            let alpha = cloud_opacity(clock.cycle.time_of_day);
            material.base_color = Color::srgba(tint[0], tint[1], tint[2], alpha);
        }
    }
}

/// Dark vertical edges plus two thin highlight strokes per block, drawn
/// immediate-mode over the shaded faces
pub fn outline_buildings(
    mut gizmos: Gizmos,
    clock: Res<SimulationClock>,
    weather: Res<CityWeather>,
    config: Res<CityConfig>,
    bodies: Query<&Transform, (With<BuildingBody>, Without<SolarPanel>)>,
) {
    let darkness = weather.state.darkness(&config.0.weather);
    let ambient = clock.cycle.ambient_light(&config.0.cycle, darkness);
    let edge_color = Color::srgba(0.12, 0.12, 0.12, 0.9 * ambient);
    let highlight_color = Color::srgba(1.0, 1.0, 1.0, 0.3 * ambient);

    for transform in bodies.iter() {
        let t = transform.translation;
        let half_w = transform.scale.x / 2.0;
        let half_d = transform.scale.z / 2.0;
        let height = transform.scale.y;

        for (sx, sz) in [(1.0f32, 1.0f32), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)] {
            let base = Vec3::new(t.x + sx * half_w, t.y, t.z + sz * half_d);
            gizmos.line(base, base + Vec3::Y * height, edge_color);
        }

        let front = Vec3::new(t.x - half_w + 1.0, t.y, t.z + half_d);
        gizmos.line(front, front + Vec3::Y * height, highlight_color);
        let back = Vec3::new(t.x + half_w - 1.0, t.y, t.z - half_d);
        gizmos.line(back, back + Vec3::Y * height, highlight_color);
    }
}

/// Grid-line pattern across each tilted solar slab
pub fn draw_panel_grids(
    mut gizmos: Gizmos,
    panels: Query<&Transform, With<SolarPanel>>,
) {
    let color = Color::srgb(SOLAR_GRID_COLOR[0], SOLAR_GRID_COLOR[1], SOLAR_GRID_COLOR[2]);
    // just above the slab's top surface, in the panel's local unit space
    let lift = 0.6;

    for transform in panels.iter() {
        let step_x = SOLAR_GRID_STEP / transform.scale.x;
        let mut x = -0.5;
        while x <= 0.5 {
            let a = transform.transform_point(Vec3::new(x, lift, -0.5));
            let b = transform.transform_point(Vec3::new(x, lift, 0.5));
            gizmos.line(a, b, color);
            x += step_x;
        }

        let step_z = SOLAR_GRID_STEP / transform.scale.z;
        let mut z = -0.5;
        while z <= 0.5 {
            let a = transform.transform_point(Vec3::new(-0.5, lift, z));
            let b = transform.transform_point(Vec3::new(0.5, lift, z));
            gizmos.line(a, b, color);
            z += step_z;
        }
    }
}

/// Scroll wheel zooms the fixed camera within clamped bounds
pub fn zoom_control(
    mut mouse_wheel: MessageReader<MouseWheel>,
    windows: Query<&Window>,
    mut camera_query: Query<(&mut CameraLerp, &mut CityOrbit), With<MainCamera>>,
) {
    let Ok((mut camera_lerp, mut orbit)) = camera_query.single_mut() else {
        return;
    };
    let is_over_hud = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position())
        .is_some_and(|pos| pos.y < HUD_HEIGHT);
    if is_over_hud {
        mouse_wheel.clear();
        return;
    }

    for wheel in mouse_wheel.read() {
        orbit.zoom = (orbit.zoom * (1.0 - wheel.y * ZOOM_STEP)).clamp(orbit.min_zoom, orbit.max_zoom);
        camera_lerp.target_position = CITY_CAMERA_POSITION * orbit.zoom;
        camera_lerp.target_look_at = Vec3::ZERO;
        camera_lerp.is_lerping = true;
    }
}

pub fn handle_new_seed(
    mut events: MessageReader<NewCitySeedEvent>,
    mut settings: ResMut<CitySettings>,
    mut regenerate: MessageWriter<RegenerateCityEvent>,
) {
    for _ in events.read() {
        settings.seed = citygen::tools::generate_seed();
        info!("new city seed: {}", settings.seed);
        regenerate.write(RegenerateCityEvent);
    }
}

/// Tears the grid down wholesale and regenerates it with the current seed
/// and the drifted noise offset; stats republish with the new grid
pub fn regenerate_city(
    mut commands: Commands,
    mut events: MessageReader<RegenerateCityEvent>,
    settings: Res<CitySettings>,
    clock: Res<SimulationClock>,
    mut config: ResMut<CityConfig>,
    mut grid: ResMut<CurrentCityGrid>,
    mut stats: ResMut<CurrentCityStats>,
    city_meshes: Res<CityMeshes>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    bodies: Query<Entity, With<BuildingBody>>,
) {
    for _ in events.read() {
        citygen::reload_config();
        config.0 = citygen::get_config();

        for entity in bodies.iter() {
            commands.entity(entity).despawn();
        }

        let new_grid =
            citygen::grid::generate(&config.0, settings.seed, clock.cycle.noise_offset);
        info!(
            "Regenerated city: population {}, efficiency {:.2}, renewable {:.0}%",
            new_grid.stats.total_population,
            new_grid.stats.average_efficiency,
            new_grid.stats.renewable_fraction * 100.0
        );
        spawn_city_buildings(&mut commands, &new_grid, &city_meshes, &mut materials);

        stats.stats = new_grid.stats;
        grid.grid = new_grid;
    }
}
