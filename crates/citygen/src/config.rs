use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};

static CONFIG: OnceLock<Mutex<CityGenConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded
pub fn get_config() -> CityGenConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = CityGenConfig::load_from_file("citygen_config.toml")
            .expect("Failed to load citygen_config.toml - file must exist and be valid");
        Mutex::new(config)
    });
    config_mutex.lock().unwrap().clone()
}

pub fn reload_config() {
    reload_config_from_file("citygen_config.toml").unwrap();
}

/// Coherent 2D/3D noise sampler normalized to [0, 1].
///
/// `Perlin::get` returns values in [-1, 1]; every consumer in this crate wants
/// the p5-style [0, 1] range, so the remap lives here once.
#[derive(Debug, Clone)]
pub struct NoiseField {
    perlin: Perlin,
    frequency: f32,
}

impl NoiseField {
    pub fn new(seed: u32, frequency: f32) -> Self {
        Self {
            perlin: Perlin::new(seed),
            frequency,
        }
    }

    pub fn sample01(&self, x: f32, y: f32) -> f32 {
        let x = (x * self.frequency) as f64;
        let y = (y * self.frequency) as f64;
        let v = self.perlin.get([x, y]) as f32;
        (v * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// 2D sample with a shift applied in noise space (after frequency scaling),
    /// so a regeneration offset drifts the whole field instead of rescaling it
    pub fn sample01_shifted(&self, x: f32, y: f32, y_shift: f32) -> f32 {
        let x = (x * self.frequency) as f64;
        let y = (y * self.frequency + y_shift) as f64;
        let v = self.perlin.get([x, y]) as f32;
        (v * 0.5 + 0.5).clamp(0.0, 1.0)
    }

    /// 2D sample with an unscaled third "evolution" coordinate
    pub fn sample01_evolving(&self, x: f32, y: f32, w: f32) -> f32 {
        let x = (x * self.frequency) as f64;
        let y = (y * self.frequency) as f64;
        let v = self.perlin.get([x, y, w as f64]) as f32;
        (v * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CityGenConfig {
    pub grid: GridConfig,
    pub zoning: ZoningConfig,
    pub cycle: CycleConfig,
    pub weather: WeatherConfig,
    pub atmosphere: AtmosphereConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub grid_size: usize,
    pub spacing: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub kind_noise_frequency: f32,
    pub height_noise_frequency: f32,
    /// Footprints span spacing * (base + noise * span)
    pub footprint_base: f32,
    pub footprint_span: f32,
    /// Horizontal height falloff: column 0 scales heights by `falloff_min`,
    /// the last column by `falloff_max`
    pub falloff_min: f32,
    pub falloff_max: f32,
}

/// Ordered noise bands for building kinds. Thresholds are ascending:
/// park < solar < residential < commercial < industrial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoningConfig {
    pub park_threshold: f32,
    pub solar_threshold: f32,
    pub residential_threshold: f32,
    pub commercial_threshold: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleConfig {
    /// Fraction of a day advanced per simulation frame
    pub time_speed: f32,
    pub noise_drift: f32,
    pub ambient_min: f32,
    pub ambient_max: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub particle_count: usize,
    /// Per-frame chance of re-rolling the weather kind
    pub switch_probability: f64,
    /// Chance the re-roll lands on clear skies
    pub clear_probability: f64,
    /// Chance a non-clear re-roll is rain rather than snow
    pub rain_probability: f64,
    pub min_intensity: f32,
    pub max_intensity: f32,
    pub min_particle_speed: f32,
    pub max_particle_speed: f32,
    /// How much a full-intensity storm darkens the ambient light
    pub darkness_factor: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AtmosphereConfig {
    pub fog_density: f32,
    pub breath_width_min: f32,
    pub breath_width_max: f32,
    pub breath_height_min: f32,
    pub breath_height_max: f32,
}

impl CityGenConfig {
    pub fn default() -> Self {
        Self {
            grid: GridConfig {
                grid_size: 30,
                spacing: 25.0,
                min_height: 30.0,
                max_height: 200.0,
                kind_noise_frequency: 0.2,
                height_noise_frequency: 0.3,
                footprint_base: 0.7,
                footprint_span: 0.3,
                falloff_min: 0.3,
                falloff_max: 1.0,
            },
            zoning: ZoningConfig {
                park_threshold: 0.15,
                solar_threshold: 0.2,
                residential_threshold: 0.5,
                commercial_threshold: 0.8,
            },
            cycle: CycleConfig {
                time_speed: 0.0003,
                noise_drift: 0.001,
                ambient_min: 0.3,
                ambient_max: 1.0,
            },
            weather: WeatherConfig {
                particle_count: 1000,
                switch_probability: 0.001,
                clear_probability: 0.7,
                rain_probability: 0.5,
                min_intensity: 0.3,
                max_intensity: 1.0,
                min_particle_speed: 2.0,
                max_particle_speed: 5.0,
                darkness_factor: 0.3,
            },
            atmosphere: AtmosphereConfig {
                fog_density: 0.08,
                breath_width_min: 0.8,
                breath_width_max: 1.2,
                breath_height_min: 0.85,
                breath_height_max: 1.15,
            },
        }
    }

    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: CityGenConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// World-space half-extent of the grid on each planar axis
    pub fn half_extent(&self) -> f32 {
        self.grid.grid_size as f32 * self.grid.spacing / 2.0
    }
}

fn reload_config_from_file(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let new_config = CityGenConfig::load_from_file(path)?;

    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *config_mutex.lock().unwrap() = new_config;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noise_field_sample_in_unit_range() {
        let field = NoiseField::new(42, 0.2);
        for i in 0..100 {
            for j in 0..100 {
                let v = field.sample01(i as f32, j as f32);
                assert!((0.0..=1.0).contains(&v), "sample {v} out of range");
            }
        }
    }

    #[test]
    fn test_default_thresholds_are_ordered() {
        let config = CityGenConfig::default();
        let z = &config.zoning;
        assert!(z.park_threshold < z.solar_threshold);
        assert!(z.solar_threshold < z.residential_threshold);
        assert!(z.residential_threshold < z.commercial_threshold);
        assert!(z.commercial_threshold < 1.0);
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = CityGenConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: CityGenConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.grid.grid_size, config.grid.grid_size);
        assert_eq!(parsed.weather.particle_count, config.weather.particle_count);
    }
}
