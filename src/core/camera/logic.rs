use bevy::math::Vec3;

pub const ARRIVAL_EPSILON: f32 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LerpState {
    pub position: Vec3,
    pub look_at: Vec3,
}

/// One smoothing step toward the target. Returns the new state and whether
/// the camera has arrived (position and look-at both snapped to target).
pub fn lerp_step(current: LerpState, target: LerpState, lerp_speed: f32, dt: f32) -> (LerpState, bool) {
    let factor = (lerp_speed * dt).min(1.0);

    let mut next = LerpState {
        position: current.position.lerp(target.position, factor),
        look_at: current.look_at.lerp(target.look_at, factor),
    };

    let pos_dist = next.position.distance(target.position);
    let look_dist = next.look_at.distance(target.look_at);

    if pos_dist < ARRIVAL_EPSILON && look_dist < ARRIVAL_EPSILON {
        // Snap the last tiny epsilon to avoid drift (imperceptible)
        next = target;
        return (next, true);
    }
    (next, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn state(position: Vec3, look_at: Vec3) -> LerpState {
        LerpState { position, look_at }
    }

    #[test]
    fn test_zero_dt_does_not_move() {
        let current = state(Vec3::ZERO, Vec3::ZERO);
        let target = state(Vec3::new(10.0, 0.0, 0.0), Vec3::ZERO);
        let (next, arrived) = lerp_step(current, target, 3.0, 0.0);
        assert_eq!(next.position, current.position);
        assert!(!arrived);
    }

    #[test]
    fn test_large_dt_clamps_to_target() {
        let current = state(Vec3::ZERO, Vec3::ZERO);
        let target = state(Vec3::new(5.0, 2.0, -1.0), Vec3::new(1.0, 0.0, 0.0));
        // lerp factor would be 30 without the clamp
        let (next, arrived) = lerp_step(current, target, 3.0, 10.0);
        assert_eq!(next, target);
        assert!(arrived);
    }

    #[rstest]
    #[case(Vec3::new(100.0, 0.0, 0.0))]
    #[case(Vec3::new(0.0, -50.0, 25.0))]
    #[case(Vec3::new(0.3, 0.3, 0.3))]
    fn test_converges_and_snaps(#[case] target_position: Vec3) {
        let mut current = state(Vec3::ZERO, Vec3::ZERO);
        let target = state(target_position, Vec3::new(0.0, 1.0, 0.0));

        let mut arrived = false;
        for _ in 0..2000 {
            let (next, done) = lerp_step(current, target, 3.0, 1.0 / 60.0);
            current = next;
            if done {
                arrived = true;
                break;
            }
        }
        assert!(arrived, "camera never converged");
        assert_eq!(current, target);
    }

    #[test]
    fn test_each_step_strictly_reduces_distance() {
        let mut current = state(Vec3::new(-30.0, 10.0, 4.0), Vec3::ZERO);
        let target = state(Vec3::new(12.0, 0.0, 60.0), Vec3::new(3.0, 0.0, 0.0));
        let mut previous = current.position.distance(target.position);
        for _ in 0..100 {
            let (next, arrived) = lerp_step(current, target, 3.0, 1.0 / 60.0);
            current = next;
            let distance = current.position.distance(target.position);
            assert!(distance < previous);
            previous = distance;
            if arrived {
                break;
            }
        }
    }
}
