use crate::config::{NoiseField, WeatherConfig};
use rand::{random_bool, random_range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherKind {
    Clear,
    Rain,
    Snow,
}

impl WeatherKind {
    pub fn label(&self) -> &'static str {
        match self {
            WeatherKind::Clear => "clear",
            WeatherKind::Rain => "rain",
            WeatherKind::Snow => "snow",
        }
    }
}

/// The volume weather particles live in: planar half-extents plus a depth
/// span for parallax
#[derive(Debug, Clone, Copy)]
pub struct WeatherBounds {
    pub half_width: f32,
    pub half_height: f32,
    pub depth: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct WeatherParticle {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub speed: f32,
}

#[derive(Debug, Clone)]
pub struct WeatherState {
    pub kind: WeatherKind,
    pub intensity: f32,
    pub wind_direction: f32,
    pub particles: Vec<WeatherParticle>,
}

impl Default for WeatherState {
    fn default() -> Self {
        Self {
            kind: WeatherKind::Clear,
            intensity: 0.0,
            wind_direction: 0.0,
            particles: Vec::new(),
        }
    }
}

/// Advances one particle: fall by speed, drift by wind, wrap at the bounds
/// so no particle escapes permanently
pub fn step_particle(particle: &mut WeatherParticle, wind_direction: f32, bounds: &WeatherBounds) {
    particle.y += particle.speed;
    particle.x += wind_direction.sin() * particle.speed;

    if particle.y > bounds.half_height {
        particle.y = -bounds.half_height;
    }
    if particle.x > bounds.half_width {
        particle.x = -bounds.half_width;
    }
    if particle.x < -bounds.half_width {
        particle.x = bounds.half_width;
    }
}

impl WeatherState {
    pub fn reseed_particles(&mut self, config: &WeatherConfig, bounds: &WeatherBounds) {
        self.particles = (0..config.particle_count)
            .map(|_| WeatherParticle {
                x: random_range(-bounds.half_width..bounds.half_width),
                y: random_range(-bounds.half_height..bounds.half_height),
                z: random_range(0.0..bounds.depth),
                speed: random_range(config.min_particle_speed..config.max_particle_speed),
            })
            .collect();
    }

    /// One discrete-time Markov draw. With `switch_probability` per frame the
    /// kind and intensity re-roll and the particle set reinitializes at random
    /// positions. Returns whether a switch happened.
    pub fn maybe_transition(&mut self, config: &WeatherConfig, bounds: &WeatherBounds) -> bool {
        if !random_bool(config.switch_probability) {
            return false;
        }

        self.kind = if random_bool(config.clear_probability) {
            WeatherKind::Clear
        } else if random_bool(config.rain_probability) {
            WeatherKind::Rain
        } else {
            WeatherKind::Snow
        };
        self.intensity = random_range(config.min_intensity..config.max_intensity);
        self.reseed_particles(config, bounds);
        true
    }

    /// Wind meanders with a coherent-noise walk over the day fraction
    pub fn drift_wind(&mut self, wind_noise: &NoiseField, time_of_day: f32) {
        self.wind_direction += wind_noise.sample01(time_of_day, 0.0) * 0.01 - 0.005;
    }

    pub fn advance_particles(&mut self, bounds: &WeatherBounds) {
        let wind = self.wind_direction;
        for particle in &mut self.particles {
            step_particle(particle, wind, bounds);
        }
    }

    /// Ambient light multiplier: 1.0 under clear skies, dimmed by intensity
    /// during rain or snow
    pub fn darkness(&self, config: &WeatherConfig) -> f32 {
        match self.kind {
            WeatherKind::Clear => 1.0,
            _ => 1.0 - self.intensity * config.darkness_factor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CityGenConfig;

    const BOUNDS: WeatherBounds = WeatherBounds {
        half_width: 100.0,
        half_height: 80.0,
        depth: 500.0,
    };

    #[test]
    fn test_particle_wraps_bottom_to_top() {
        let mut particle = WeatherParticle {
            x: 0.0,
            y: 79.0,
            z: 10.0,
            speed: 5.0,
        };
        step_particle(&mut particle, 0.0, &BOUNDS);
        assert_eq!(particle.y, -BOUNDS.half_height);
    }

    #[test]
    fn test_particle_wraps_horizontally() {
        let mut blown_right = WeatherParticle {
            x: 99.0,
            y: 0.0,
            z: 0.0,
            speed: 4.0,
        };
        // wind_direction PI/2 -> sin = 1, full drift to the right
        step_particle(&mut blown_right, std::f32::consts::FRAC_PI_2, &BOUNDS);
        assert_eq!(blown_right.x, -BOUNDS.half_width);

        let mut blown_left = WeatherParticle {
            x: -99.0,
            y: 0.0,
            z: 0.0,
            speed: 4.0,
        };
        step_particle(&mut blown_left, -std::f32::consts::FRAC_PI_2, &BOUNDS);
        assert_eq!(blown_left.x, BOUNDS.half_width);
    }

    #[test]
    fn test_no_particle_escapes_over_time() {
        let config = CityGenConfig::default().weather;
        let mut state = WeatherState {
            kind: WeatherKind::Rain,
            intensity: 0.8,
            wind_direction: 0.7,
            ..Default::default()
        };
        state.reseed_particles(&config, &BOUNDS);
        for _ in 0..1000 {
            state.advance_particles(&BOUNDS);
        }
        for particle in &state.particles {
            assert!(particle.x.abs() <= BOUNDS.half_width + f32::EPSILON);
            assert!(particle.y.abs() <= BOUNDS.half_height + f32::EPSILON);
        }
    }

    #[test]
    fn test_darkness_range() {
        let config = CityGenConfig::default().weather;
        let clear = WeatherState::default();
        assert_eq!(clear.darkness(&config), 1.0);

        let storm = WeatherState {
            kind: WeatherKind::Snow,
            intensity: 1.0,
            ..Default::default()
        };
        let darkness = storm.darkness(&config);
        assert!(darkness < 1.0);
        assert!(darkness >= 1.0 - config.darkness_factor);
    }

    #[test]
    fn test_reseed_populates_within_bounds() {
        let config = CityGenConfig::default().weather;
        let mut state = WeatherState::default();
        state.reseed_particles(&config, &BOUNDS);
        assert_eq!(state.particles.len(), config.particle_count);
        for particle in &state.particles {
            assert!(particle.x.abs() <= BOUNDS.half_width);
            assert!(particle.y.abs() <= BOUNDS.half_height);
            assert!(particle.z >= 0.0 && particle.z <= BOUNDS.depth);
            assert!(particle.speed >= config.min_particle_speed);
            assert!(particle.speed <= config.max_particle_speed);
        }
    }
}
