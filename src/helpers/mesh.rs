use bevy::asset::RenderAssetUsages;
use bevy::prelude::Mesh;
use bevy::mesh::{Indices, PrimitiveTopology};

/// Unit building block: footprint [-0.5, 0.5] on x/z, base at y = 0, top at
/// y = 1, so scaling by (width, height, depth) keeps the base on the ground.
///
/// Per-face shading is baked into vertex colors (top brighter, sides darker)
/// and multiplies the material's base color at draw time.
pub fn shaded_building_mesh() -> Mesh {
    const TOP_TINT: f32 = 1.2;
    const SIDE_TINT: f32 = 0.7;
    const FACE_TINT: f32 = 1.0;
    const BOTTOM_TINT: f32 = 0.5;

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(24);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(24);
    let mut colors: Vec<[f32; 4]> = Vec::with_capacity(24);
    let mut indices: Vec<u32> = Vec::with_capacity(36);

    // corners are counter-clockwise seen from outside the block
    let faces: [([[f32; 3]; 4], [f32; 3], f32); 6] = [
        // top
        (
            [
                [-0.5, 1.0, -0.5],
                [-0.5, 1.0, 0.5],
                [0.5, 1.0, 0.5],
                [0.5, 1.0, -0.5],
            ],
            [0.0, 1.0, 0.0],
            TOP_TINT,
        ),
        // bottom
        (
            [
                [-0.5, 0.0, -0.5],
                [0.5, 0.0, -0.5],
                [0.5, 0.0, 0.5],
                [-0.5, 0.0, 0.5],
            ],
            [0.0, -1.0, 0.0],
            BOTTOM_TINT,
        ),
        // +x side
        (
            [
                [0.5, 0.0, -0.5],
                [0.5, 1.0, -0.5],
                [0.5, 1.0, 0.5],
                [0.5, 0.0, 0.5],
            ],
            [1.0, 0.0, 0.0],
            SIDE_TINT,
        ),
        // -x side
        (
            [
                [-0.5, 0.0, 0.5],
                [-0.5, 1.0, 0.5],
                [-0.5, 1.0, -0.5],
                [-0.5, 0.0, -0.5],
            ],
            [-1.0, 0.0, 0.0],
            SIDE_TINT,
        ),
        // +z front
        (
            [
                [0.5, 0.0, 0.5],
                [0.5, 1.0, 0.5],
                [-0.5, 1.0, 0.5],
                [-0.5, 0.0, 0.5],
            ],
            [0.0, 0.0, 1.0],
            FACE_TINT,
        ),
        // -z back
        (
            [
                [-0.5, 0.0, -0.5],
                [-0.5, 1.0, -0.5],
                [0.5, 1.0, -0.5],
                [0.5, 0.0, -0.5],
            ],
            [0.0, 0.0, -1.0],
            FACE_TINT,
        ),
    ];

    for (corners, normal, tint) in faces {
        let base = positions.len() as u32;
        for corner in corners {
            positions.push(corner);
            normals.push(normal);
            colors.push([tint, tint, tint, 1.0]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_mesh_shape() {
        let mesh = shaded_building_mesh();
        assert_eq!(mesh.count_vertices(), 24);
        let positions = mesh
            .attribute(Mesh::ATTRIBUTE_POSITION)
            .and_then(|values| values.as_float3())
            .unwrap();
        for p in positions {
            // base anchored at y = 0
            assert!(p[1] >= 0.0 && p[1] <= 1.0);
            assert!(p[0].abs() <= 0.5 && p[2].abs() <= 0.5);
        }
    }
}
