use bevy::prelude::*;
use citygen::config::{CityGenConfig, NoiseField};
use citygen::cycle::DayCycle;
use citygen::grid::{CityGrid, CityStats};
use citygen::tools;
use citygen::weather::{WeatherBounds, WeatherState};

#[derive(Resource, Clone)]
pub struct CitySettings {
    pub seed: u32,
}

impl Default for CitySettings {
    fn default() -> Self {
        Self {
            seed: tools::generate_seed(),
        }
    }
}

/// Snapshot of the generation config, refreshed from citygen_config.toml on
/// every regeneration
#[derive(Resource, Clone)]
pub struct CityConfig(pub CityGenConfig);

/// The simulation clock. Pointer press pauses it; the camera keeps moving.
#[derive(Resource, Default)]
pub struct SimulationClock {
    pub cycle: DayCycle,
    pub frame: u64,
    pub paused: bool,
}

#[derive(Resource)]
pub struct CityWeather {
    pub state: WeatherState,
    pub wind_noise: NoiseField,
}

/// Decorrelated noise stream driving the per-building breathing jitter
#[derive(Resource)]
pub struct BreathingNoise(pub NoiseField);

#[derive(Resource)]
pub struct CurrentCityGrid {
    pub grid: CityGrid,
}

#[derive(Resource, Default)]
pub struct CurrentCityStats {
    pub stats: CityStats,
}

/// Shared mesh handles reused across every building entity
#[derive(Resource)]
pub struct CityMeshes {
    pub building: Handle<Mesh>,
    pub window: Handle<Mesh>,
    pub panel: Handle<Mesh>,
    pub cloud: Handle<Mesh>,
}

/// All drifting cloud puffs share one material so the day cycle can tint
/// them in a single write
#[derive(Resource)]
pub struct CloudMaterialHandle(pub Handle<StandardMaterial>);

pub fn weather_bounds(config: &CityGenConfig) -> WeatherBounds {
    let half = config.half_extent();
    WeatherBounds {
        half_width: half * 1.5,
        half_height: 400.0,
        depth: half * 2.0,
    }
}
