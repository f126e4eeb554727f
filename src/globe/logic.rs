use bevy::math::{Quat, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Hold duration advances by a fixed per-frame increment while pressing
pub const HOLD_INCREMENT_PER_FRAME: f32 = 0.016;
/// Fractional step the displayed intensity takes toward its target each frame
pub const INTENSITY_EASE_FACTOR: f32 = 0.01;
/// Drought radius at the instant of pointer-down, in UV units
pub const BASE_DROUGHT_RADIUS: f32 = 0.05;

/// First-order low-pass toward the target; never overshoots
pub fn ease_intensity(current: f32, target: f32) -> f32 {
    current + (target - current) * INTENSITY_EASE_FACTOR
}

/// Accumulates while pressing, zeroes the moment the pointer releases
pub fn advance_hold(hold_duration: f32, pressing: bool) -> f32 {
    if pressing {
        hold_duration + HOLD_INCREMENT_PER_FRAME
    } else {
        0.0
    }
}

/// Casts a ray against the globe sphere and maps the nearest hit to the
/// equirectangular UV used by the surface mesh (u from +x toward +z,
/// v = 0 at the north pole). Returns None on a miss or when the sphere is
/// behind the ray origin.
pub fn sphere_contact_uv(
    ray_origin: Vec3,
    ray_direction: Vec3,
    globe_rotation: Quat,
    radius: f32,
) -> Option<Vec2> {
    // work in the globe's local frame so surface UVs stay glued to terrain
    // while the globe spins
    let inverse = globe_rotation.inverse();
    let origin = inverse * ray_origin;
    let direction = (inverse * ray_direction).normalize();

    let b = origin.dot(direction);
    let c = origin.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let t = -b - discriminant.sqrt();
    if t < 0.0 {
        return None;
    }

    let point = (origin + direction * t) / radius;
    let mut u = point.z.atan2(point.x) / TAU;
    if u < 0.0 {
        u += 1.0;
    }
    let v = point.y.clamp(-1.0, 1.0).acos() / PI;
    Some(Vec2::new(u, v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::f32::consts::FRAC_PI_2;

    const RADIUS: f32 = 1.8;

    #[test]
    fn test_hold_monotonic_while_pressing() {
        let mut hold = 0.0;
        let mut previous = hold;
        for _ in 0..240 {
            hold = advance_hold(hold, true);
            assert!(hold >= previous);
            previous = hold;
        }
        assert!(hold > 0.0);
    }

    #[test]
    fn test_hold_resets_on_release() {
        let mut hold = 0.0;
        for _ in 0..60 {
            hold = advance_hold(hold, true);
        }
        assert!(hold > 0.0);
        assert_eq!(advance_hold(hold, false), 0.0);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.3, 1.0)]
    #[case(0.9, 0.0)]
    #[case(1.0, 0.0)]
    fn test_intensity_approaches_target_without_overshoot(
        #[case] start: f32,
        #[case] target: f32,
    ) {
        let mut intensity = start;
        let mut previous_gap = (target - intensity).abs();
        for _ in 0..10_000 {
            intensity = ease_intensity(intensity, target);
            assert!((0.0..=1.0).contains(&intensity), "intensity {intensity} escaped [0,1]");
            let gap = (target - intensity).abs();
            assert!(gap <= previous_gap, "easing overshot the target");
            previous_gap = gap;
        }
        assert!(previous_gap < 0.01, "easing never got close to the target");
    }

    #[test]
    fn test_strict_approach_from_below() {
        let intensity = ease_intensity(0.5, 1.0);
        assert!(intensity > 0.5);
        assert!(intensity < 1.0);
    }

    #[test]
    fn test_contact_straight_on_maps_to_quarter_longitude() {
        // camera on +z looking at the origin hits the surface point (0, 0, r):
        // longitude atan2(1, 0) = π/2 -> u = 0.25, equator -> v = 0.5
        let uv = sphere_contact_uv(
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
            Quat::IDENTITY,
            RADIUS,
        )
        .expect("ray through the center must hit");
        assert!((uv.x - 0.25).abs() < 1e-5);
        assert!((uv.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_contact_follows_globe_rotation() {
        // with the globe yawed a quarter turn the same screen point lands on
        // the meridian that used to face -x: atan2(0, -1) = π -> u = 0.5
        let uv = sphere_contact_uv(
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, -1.0),
            Quat::from_rotation_y(FRAC_PI_2),
            RADIUS,
        )
        .expect("rotated globe still intersects");
        assert!((uv.x - 0.5).abs() < 1e-5);
        assert!((uv.y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_miss_returns_none() {
        let uv = sphere_contact_uv(
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 1.0, 0.0),
            Quat::IDENTITY,
            RADIUS,
        );
        assert!(uv.is_none());
    }

    #[test]
    fn test_sphere_behind_ray_returns_none() {
        let uv = sphere_contact_uv(
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, 1.0),
            Quat::IDENTITY,
            RADIUS,
        );
        assert!(uv.is_none());
    }

    #[test]
    fn test_uv_always_in_unit_square() {
        for i in 0..32 {
            let angle = i as f32 / 32.0 * TAU;
            let origin = Vec3::new(angle.cos() * 4.0, 1.0, angle.sin() * 4.0);
            let direction = (Vec3::ZERO - origin).normalize();
            let uv = sphere_contact_uv(origin, direction, Quat::from_rotation_y(angle), RADIUS)
                .expect("center ray must hit");
            assert!((0.0..=1.0).contains(&uv.x));
            assert!((0.0..=1.0).contains(&uv.y));
        }
    }
}
