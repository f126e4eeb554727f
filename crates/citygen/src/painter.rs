use crate::grid::Building;
use glam::Vec2;

/// Back-to-front draw order by planar distance from the camera's ground
/// position. Far buildings draw first so translucent faces composite
/// correctly without relying on the depth buffer.
pub fn back_to_front(buildings: &[Building], camera: Vec2) -> Vec<usize> {
    let mut order: Vec<usize> = (0..buildings.len()).collect();
    order.sort_by(|&a, &b| {
        let da = planar_distance(&buildings[a], camera);
        let db = planar_distance(&buildings[b], camera);
        db.partial_cmp(&da).unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}

pub fn planar_distance(building: &Building, camera: Vec2) -> f32 {
    Vec2::new(building.x, building.y).distance(camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Building, BuildingKind};

    fn building_at(x: f32, y: f32) -> Building {
        Building {
            col: 0,
            row: 0,
            x,
            y,
            width: 10.0,
            height: 50.0,
            depth: 10.0,
            kind: BuildingKind::Residential,
            color: [0.5, 0.5, 0.5],
            energy_efficiency: 0.8,
            population: 20,
            green_score: 0.5,
        }
    }

    #[test]
    fn test_order_is_a_permutation() {
        let buildings: Vec<Building> =
            (0..50).map(|i| building_at(i as f32 * 3.0, -i as f32)).collect();
        let mut order = back_to_front(&buildings, Vec2::new(0.0, -750.0));
        order.sort_unstable();
        assert_eq!(order, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_far_buildings_draw_first() {
        let camera = Vec2::new(0.0, -750.0);
        let buildings = vec![
            building_at(0.0, 0.0),    // near
            building_at(0.0, 400.0),  // far
            building_at(0.0, 200.0),  // middle
        ];
        let order = back_to_front(&buildings, camera);
        assert_eq!(order, vec![1, 2, 0]);
    }

    #[test]
    fn test_ordering_is_monotonic_in_distance() {
        let camera = Vec2::new(30.0, -500.0);
        let buildings: Vec<Building> = (0..100)
            .map(|i| building_at((i * 13 % 71) as f32 * 7.0, (i * 29 % 53) as f32 * 11.0))
            .collect();
        let order = back_to_front(&buildings, camera);
        for pair in order.windows(2) {
            let first = planar_distance(&buildings[pair[0]], camera);
            let second = planar_distance(&buildings[pair[1]], camera);
            assert!(first >= second, "draw order not back-to-front");
        }
    }
}
