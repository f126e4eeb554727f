use crate::config::CycleConfig;
use std::f32::consts::TAU;

/// Repeating fraction-of-day clock plus the slow drift applied to the zoning
/// noise field on regeneration. Advanced once per unpaused frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct DayCycle {
    pub time_of_day: f32,
    pub noise_offset: f32,
}

impl DayCycle {
    pub fn advance(&mut self, config: &CycleConfig) {
        self.time_of_day = (self.time_of_day + config.time_speed) % 1.0;
        self.noise_offset += config.noise_drift;
    }

    pub fn hour(&self) -> f32 {
        (self.time_of_day * 24.0) % 24.0
    }

    /// Sinusoidal light level in [-1, 1]; positive during the day half
    pub fn day_light(&self) -> f32 {
        (self.time_of_day * TAU).sin()
    }

    /// Ambient light in [ambient_min, ambient_max], scaled by weather darkness
    pub fn ambient_light(&self, config: &CycleConfig, weather_darkness: f32) -> f32 {
        let t = (self.day_light() + 1.0) / 2.0;
        (config.ambient_min + t * (config.ambient_max - config.ambient_min)) * weather_darkness
    }

    pub fn is_daytime(&self) -> bool {
        self.time_of_day > 0.25 && self.time_of_day < 0.75
    }
}

/// Warm ground ramp keyed by hour of day
pub fn ground_color(hour: f32) -> [f32; 3] {
    if hour < 6.0 {
        [1.0, 0.471, 0.157]
    } else if hour < 8.0 {
        [1.0, 0.588, 0.314]
    } else if hour < 17.0 {
        [1.0, 0.706, 0.471]
    } else {
        [1.0, 0.471, 0.157]
    }
}

/// Sky clear-color: sunset orange at full daylight fading to near black at
/// night
pub fn sky_color(day_light: f32) -> [f32; 3] {
    let t = ((day_light + 1.0) / 2.0).clamp(0.0, 1.0);
    let night = [0.02, 0.02, 0.03];
    let day = [0.918, 0.506, 0.149]; // #EA8126
    [
        night[0] + (day[0] - night[0]) * t,
        night[1] + (day[1] - night[1]) * t,
        night[2] + (day[2] - night[2]) * t,
    ]
}

/// Drifting daytime clouds: pink at dawn/dusk hours, white mid-day
pub fn cloud_color(hour: f32) -> [f32; 3] {
    if hour < 8.0 || hour > 17.0 {
        [1.0, 0.737, 0.588]
    } else {
        [1.0, 1.0, 1.0]
    }
}

/// Cloud band alpha over the day, in [20/255, 60/255]
pub fn cloud_opacity(time_of_day: f32) -> f32 {
    let s = (time_of_day * TAU).sin();
    let t = (s + 1.0) / 2.0;
    (20.0 + t * 40.0) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityGenConfig;

    #[test]
    fn test_clock_wraps_at_one_day() {
        let config = CityGenConfig::default().cycle;
        let mut cycle = DayCycle {
            time_of_day: 0.9999,
            noise_offset: 0.0,
        };
        for _ in 0..10 {
            cycle.advance(&config);
        }
        assert!(cycle.time_of_day < 1.0);
        assert!(cycle.time_of_day >= 0.0);
        assert!(cycle.noise_offset > 0.0);
    }

    #[test]
    fn test_ambient_light_bounds() {
        let config = CityGenConfig::default().cycle;
        let mut cycle = DayCycle::default();
        for _ in 0..5000 {
            cycle.advance(&config);
            let ambient = cycle.ambient_light(&config, 1.0);
            assert!(ambient >= config.ambient_min - f32::EPSILON);
            assert!(ambient <= config.ambient_max + f32::EPSILON);
        }
    }

    #[test]
    fn test_storm_darkens_ambient() {
        let config = CityGenConfig::default().cycle;
        let cycle = DayCycle {
            time_of_day: 0.25, // noon peak of the sinusoid
            noise_offset: 0.0,
        };
        let clear = cycle.ambient_light(&config, 1.0);
        let stormy = cycle.ambient_light(&config, 0.7);
        assert!(stormy < clear);
    }

    #[test]
    fn test_hour_in_range() {
        for i in 0..100 {
            let cycle = DayCycle {
                time_of_day: i as f32 / 100.0,
                noise_offset: 0.0,
            };
            let hour = cycle.hour();
            assert!((0.0..24.0).contains(&hour));
        }
    }

    #[test]
    fn test_cloud_opacity_range() {
        for i in 0..100 {
            let opacity = cloud_opacity(i as f32 / 100.0);
            assert!(opacity >= 20.0 / 255.0 - f32::EPSILON);
            assert!(opacity <= 60.0 / 255.0 + f32::EPSILON);
        }
    }
}
