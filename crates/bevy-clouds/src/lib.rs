//! # Bevy Clouds Crate
//!
//! Stateless translucent-shell renderer for Bevy 0.17: builds the sphere
//! mesh and material for cloud layers and sky backdrops.
//!
//! ## Usage
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_clouds::*;
//!
//! fn setup(
//!     mut commands: Commands,
//!     mut meshes: ResMut<Assets<Mesh>>,
//!     mut materials: ResMut<Assets<StandardMaterial>>,
//!     asset_server: Res<AssetServer>,
//! ) {
//!     let config = ShellConfig {
//!         radius: 1.83,
//!         grid_size: 128,
//!         color: Color::srgba(1.0, 1.0, 1.0, 0.1),
//!         alpha_mode: AlphaMode::Add,
//!         ..Default::default()
//!     };
//!
//!     let shell = ShellBuilder::new(config)
//!         .with_texture(asset_server.load("textures/clouds.png"))
//!         .build();
//!
//!     commands.spawn((
//!         Mesh3d(meshes.add(shell.mesh)),
//!         MeshMaterial3d(materials.add(shell.material)),
//!     ));
//! }
//! ```

use bevy::asset::{Handle, RenderAssetUsages};
use bevy::color::Color;
use bevy::image::Image;
use bevy::mesh::{Indices, Mesh, PrimitiveTopology};
use bevy::pbr::StandardMaterial;
use bevy::prelude::AlphaMode;

/// Configuration for one shell - your scene provides this
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Sphere radius in world units
    pub radius: f32,
    /// Number of grid subdivisions (higher = smoother silhouette)
    pub grid_size: u32,
    /// Base color; the alpha channel sets the shell's translucency
    pub color: Color,
    /// Blend for soft layers, Add for glowing cloud shells, Opaque for
    /// backdrops
    pub alpha_mode: AlphaMode,
    /// Face the triangles inward so the shell reads as a surrounding sky
    /// when the camera sits inside it
    pub inward: bool,
    /// Skip lighting entirely (backdrops)
    pub unlit: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            radius: 1.0,
            grid_size: 64,
            color: Color::srgba(1.0, 1.0, 1.0, 0.1),
            alpha_mode: AlphaMode::Add,
            inward: false,
            unlit: false,
        }
    }
}

/// The output of shell generation - ready to render
pub struct ShellOutput {
    pub mesh: Mesh,
    pub material: StandardMaterial,
}

/// Builder for creating shell meshes from external state
pub struct ShellBuilder {
    config: ShellConfig,
    texture: Option<Handle<Image>>,
}

impl ShellBuilder {
    pub fn new(config: ShellConfig) -> Self {
        Self {
            config,
            texture: None,
        }
    }

    /// Texture mapped over the shell (cloud cover, star field)
    pub fn with_texture(mut self, texture: Handle<Image>) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Build the shell mesh and material
    pub fn build(self) -> ShellOutput {
        let mesh = self.generate_mesh();
        let material = self.generate_material();

        ShellOutput { mesh, material }
    }

    fn generate_mesh(&self) -> Mesh {
        sphere_mesh(self.config.radius, self.config.grid_size, self.config.inward)
    }

    fn generate_material(&self) -> StandardMaterial {
        shell_material(&self.config, self.texture.clone())
    }
}

/// UV sphere with equirectangular texture coordinates:
/// u = longitude / 2π (from +x toward +z), v = colatitude / π (0 at +y).
///
/// Shared pole/edge vertices keep the texture seam closed. `inward` flips
/// winding and normals so the camera can sit inside the shell.
pub fn sphere_mesh(radius: f32, grid_size: u32, inward: bool) -> Mesh {
    let size = grid_size;
    let normal_sign = if inward { -1.0 } else { 1.0 };

    let mut positions = Vec::new();
    let mut normals = Vec::new();
    let mut uvs = Vec::new();
    let mut indices = Vec::new();

    for y in 0..=size {
        for x in 0..=size {
            let u = x as f32 / size as f32;
            let v = y as f32 / size as f32;

            let theta = u * std::f32::consts::TAU; // longitude (0 to 2π)
            let phi = v * std::f32::consts::PI; // latitude (0 to π)

            let sin_phi = phi.sin();
            let cos_phi = phi.cos();
            let sin_theta = theta.sin();
            let cos_theta = theta.cos();

            let x_pos = radius * sin_phi * cos_theta;
            let y_pos = radius * cos_phi;
            let z_pos = radius * sin_phi * sin_theta;

            positions.push([x_pos, y_pos, z_pos]);
            normals.push([
                normal_sign * sin_phi * cos_theta,
                normal_sign * cos_phi,
                normal_sign * sin_phi * sin_theta,
            ]);
            uvs.push([u, v]);
        }
    }

    for y in 0..size {
        for x in 0..size {
            let i0 = y * (size + 1) + x;
            let i1 = i0 + 1;
            let i2 = i0 + (size + 1);
            let i3 = i2 + 1;

            if inward {
                indices.push(i0);
                indices.push(i1);
                indices.push(i2);

                indices.push(i1);
                indices.push(i3);
                indices.push(i2);
            } else {
                indices.push(i0);
                indices.push(i2);
                indices.push(i1);

                indices.push(i1);
                indices.push(i2);
                indices.push(i3);
            }
        }
    }

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));

    mesh
}

fn shell_material(config: &ShellConfig, texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: config.color,
        base_color_texture: texture,
        metallic: 0.0,
        perceptual_roughness: 1.0,
        alpha_mode: config.alpha_mode,
        unlit: config.unlit,
        double_sided: false,
        cull_mode: None,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_vertex_and_index_counts() {
        let config = ShellConfig {
            grid_size: 8,
            ..Default::default()
        };
        let shell = ShellBuilder::new(config).build();
        let count = shell.mesh.count_vertices();
        assert_eq!(count, 9 * 9);
    }

    #[test]
    fn test_inward_shell_flips_normals() {
        let outward = ShellBuilder::new(ShellConfig {
            grid_size: 4,
            ..Default::default()
        })
        .build();
        let inward = ShellBuilder::new(ShellConfig {
            grid_size: 4,
            inward: true,
            ..Default::default()
        })
        .build();

        let out_normals = outward.mesh.attribute(Mesh::ATTRIBUTE_NORMAL).unwrap();
        let in_normals = inward.mesh.attribute(Mesh::ATTRIBUTE_NORMAL).unwrap();
        let (Some(a), Some(b)) = (out_normals.as_float3(), in_normals.as_float3()) else {
            panic!("normals missing");
        };
        for (left, right) in a.iter().zip(b) {
            for axis in 0..3 {
                assert_eq!(left[axis], -right[axis]);
            }
        }
    }
}
