use crate::config::{AtmosphereConfig, NoiseField};
use crate::constants::{WINDOW_LIT_PROBABILITY, WINDOW_MIN_BRIGHTNESS};
use rand::{random_bool, random_range};

/// Per-building "breathing" jitter: smooth width/height scale factors sampled
/// from coherent noise, keyed by building index so neighbours animate out of
/// phase. Deterministic for a given (frame, index).
pub fn breathing_scale(
    noise: &NoiseField,
    frame: u64,
    index: usize,
    config: &AtmosphereConfig,
) -> (f32, f32) {
    let t = frame as f32 * 0.01;
    let phase = index as f32 * 0.5;

    let width_noise = noise.sample01(t + phase, 0.0);
    let height_noise = noise.sample01(0.0, t + phase);

    let width_scale =
        config.breath_width_min + width_noise * (config.breath_width_max - config.breath_width_min);
    let height_scale = config.breath_height_min
        + height_noise * (config.breath_height_max - config.breath_height_min);
    (width_scale, height_scale)
}

/// Fresh window brightness roll: mostly lit near full white, otherwise dark.
/// Re-rolled independently for every window every frame.
pub fn window_brightness() -> f32 {
    if random_bool(WINDOW_LIT_PROBABILITY) {
        random_range(WINDOW_MIN_BRIGHTNESS..1.0)
    } else {
        0.0
    }
}

/// Fog/distance attenuation in [0.2, 1.0] for a normalized camera distance
pub fn fog_factor(normalized_distance: f32, fog_density: f32) -> f32 {
    1.0 - (normalized_distance * fog_density).min(0.8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityGenConfig;

    #[test]
    fn test_breathing_scale_bounds() {
        let config = CityGenConfig::default().atmosphere;
        let noise = NoiseField::new(3, 1.0);
        for frame in 0..500 {
            for index in [0, 1, 17, 899] {
                let (w, h) = breathing_scale(&noise, frame, index, &config);
                assert!(w >= config.breath_width_min && w <= config.breath_width_max);
                assert!(h >= config.breath_height_min && h <= config.breath_height_max);
            }
        }
    }

    #[test]
    fn test_breathing_scale_is_deterministic() {
        let config = CityGenConfig::default().atmosphere;
        let noise = NoiseField::new(3, 1.0);
        assert_eq!(
            breathing_scale(&noise, 120, 42, &config),
            breathing_scale(&noise, 120, 42, &config)
        );
    }

    #[test]
    fn test_neighbours_animate_out_of_phase() {
        let config = CityGenConfig::default().atmosphere;
        let noise = NoiseField::new(3, 1.0);
        let mut differing = 0;
        for frame in 0..100 {
            if breathing_scale(&noise, frame, 0, &config)
                != breathing_scale(&noise, frame, 1, &config)
            {
                differing += 1;
            }
        }
        assert!(differing > 50, "adjacent buildings breathe in lockstep");
    }

    #[test]
    fn test_window_brightness_values() {
        for _ in 0..1000 {
            let brightness = window_brightness();
            assert!(
                brightness == 0.0
                    || (WINDOW_MIN_BRIGHTNESS..=1.0).contains(&brightness),
                "brightness {brightness} outside the lit/dark bands"
            );
        }
    }

    #[test]
    fn test_fog_factor_bounds() {
        for i in 0..200 {
            let f = fog_factor(i as f32 * 0.1, 0.08);
            assert!((0.2..=1.0).contains(&f));
        }
        // close buildings are unattenuated
        assert_eq!(fog_factor(0.0, 0.08), 1.0);
    }
}
