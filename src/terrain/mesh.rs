//! Terrain mesh tessellation into a triangle-strip vertex buffer.

use bytemuck::{Pod, Zeroable};

use super::heightfield::HeightField;
use crate::params::MeshParams;

/// Vertex data for the terrain mesh (position + normal + normalized height).
///
/// Field order is load-bearing: the shader's input bindings are positional
/// (position @0, normal @1, height @2).
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub height: f32,
}

/// Static terrain mesh in triangle-strip order.
///
/// The buffer holds `strips` row bands of `vertices_per_strip` vertices
/// each; the draw stage issues one strip draw per band using exactly this
/// offset arithmetic.
pub struct TerrainMesh {
    pub vertices: Vec<Vertex>,
    strips: u32,
    vertices_per_strip: u32,
}

impl TerrainMesh {
    /// Tessellate the heightfield over a regular UV grid.
    ///
    /// For each of N row bands, each of the M + 1 columns emits two
    /// vertices (current row, next row), giving 2 * (M + 1) vertices per
    /// strip. After emission the whole buffer is scanned once and every
    /// vertex's stored height is remapped into [0, 1].
    pub fn build(field: &HeightField, params: &MeshParams) -> Self {
        let m = params.resolution_u;
        let n = params.resolution_v;
        let vertices_per_strip = 2 * (m + 1);

        let mut vertices = Vec::with_capacity((n * vertices_per_strip) as usize);
        for i in 0..n {
            for j in 0..=m {
                let u = j as f32 / m as f32;
                vertices.push(Self::vertex_at(field, params, u, i as f32 / n as f32));
                vertices.push(Self::vertex_at(field, params, u, (i + 1) as f32 / n as f32));
            }
        }

        Self::normalize_heights(&mut vertices);

        Self {
            vertices,
            strips: n,
            vertices_per_strip,
        }
    }

    fn vertex_at(field: &HeightField, params: &MeshParams, u: f32, v: f32) -> Vertex {
        let sample = field.sample(u, v);
        let half = params.footprint_m / 2.0;
        Vertex {
            position: [
                u * params.footprint_m - half,
                sample.height,
                v * params.footprint_m - half,
            ],
            normal: sample.normal.to_array(),
            height: sample.height,
        }
    }

    /// Remap every stored height into [0, 1] against the global extrema.
    ///
    /// This depends on the min/max of the whole buffer, so it has to run as
    /// a second pass after generation. A flat field (max == min) maps every
    /// vertex to 0.5 instead of dividing by zero.
    fn normalize_heights(vertices: &mut [Vertex]) {
        let Some(first) = vertices.first() else {
            return;
        };

        let mut min = first.height;
        let mut max = first.height;
        for vertex in vertices.iter() {
            min = min.min(vertex.height);
            max = max.max(vertex.height);
        }

        let range = max - min;
        if range <= f32::EPSILON {
            for vertex in vertices.iter_mut() {
                vertex.height = 0.5;
            }
        } else {
            for vertex in vertices.iter_mut() {
                vertex.height = (vertex.height - min) / range;
            }
        }
    }

    /// Number of triangle-strip row bands (N)
    pub fn strips(&self) -> u32 {
        self.strips
    }

    /// Vertices per strip: 2 * (M + 1)
    pub fn vertices_per_strip(&self) -> u32 {
        self.vertices_per_strip
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::TerrainParams;

    fn test_field() -> HeightField {
        HeightField::new(TerrainParams {
            max_frequency: 10,
            ..TerrainParams::default()
        })
    }

    fn small_params() -> MeshParams {
        MeshParams {
            resolution_u: 6,
            resolution_v: 4,
            footprint_m: 15.0,
        }
    }

    #[test]
    fn test_strip_vertex_counts() {
        let mesh = TerrainMesh::build(&test_field(), &small_params());

        // 2 * (M + 1) vertices per strip, N strips
        assert_eq!(mesh.vertices_per_strip(), 14);
        assert_eq!(mesh.strips(), 4);
        assert_eq!(mesh.vertices.len(), 4 * 14);
    }

    #[test]
    fn test_world_footprint_centered_at_origin() {
        let params = small_params();
        let mesh = TerrainMesh::build(&test_field(), &params);

        let half = params.footprint_m / 2.0;
        for vertex in &mesh.vertices {
            assert!(vertex.position[0] >= -half && vertex.position[0] <= half);
            assert!(vertex.position[2] >= -half && vertex.position[2] <= half);
        }

        // Corners land exactly on the footprint edge
        assert_eq!(mesh.vertices[0].position[0], -half);
        assert_eq!(mesh.vertices[0].position[2], -half);
    }

    #[test]
    fn test_normalized_heights_span_unit_interval() {
        let mesh = TerrainMesh::build(&test_field(), &small_params());

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for vertex in &mesh.vertices {
            assert!((0.0..=1.0).contains(&vertex.height));
            min = min.min(vertex.height);
            max = max.max(vertex.height);
        }
        assert!(min.abs() < 1e-6);
        assert!((max - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_flat_field_normalizes_to_half() {
        let flat = HeightField::new(TerrainParams {
            amplitude_scale: 0.0,
            max_frequency: 5,
            ..TerrainParams::default()
        });
        let mesh = TerrainMesh::build(&flat, &small_params());

        for vertex in &mesh.vertices {
            assert_eq!(vertex.height, 0.5);
        }
    }

    #[test]
    fn test_strip_rows_interleave() {
        // Even-indexed vertices sit on row i, odd-indexed on row i + 1,
        // so consecutive pairs share x and differ in z.
        let mesh = TerrainMesh::build(&test_field(), &small_params());
        let vps = mesh.vertices_per_strip() as usize;

        for strip in 0..mesh.strips() as usize {
            for pair in 0..vps / 2 {
                let a = &mesh.vertices[strip * vps + 2 * pair];
                let b = &mesh.vertices[strip * vps + 2 * pair + 1];
                assert_eq!(a.position[0], b.position[0]);
                assert!(b.position[2] > a.position[2]);
            }
        }
    }

    #[test]
    fn test_build_is_reproducible() {
        let params = small_params();
        let a = TerrainMesh::build(&test_field(), &params);
        let b = TerrainMesh::build(&test_field(), &params);

        let a_bytes: &[u8] = bytemuck::cast_slice(&a.vertices);
        let b_bytes: &[u8] = bytemuck::cast_slice(&b.vertices);
        assert_eq!(a_bytes, b_bytes);
    }

    /// Full reference resolution; slow in debug builds.
    /// Run with `cargo test -- --ignored`.
    #[test]
    #[ignore]
    fn test_reference_mesh_reproducible_at_full_resolution() {
        let field = HeightField::new(TerrainParams::default());
        let params = MeshParams::default();

        let a = TerrainMesh::build(&field, &params);
        let b = TerrainMesh::build(&field, &params);

        assert_eq!(a.vertices.len(), (200 * 2 * 201) as usize);
        let a_bytes: &[u8] = bytemuck::cast_slice(&a.vertices);
        let b_bytes: &[u8] = bytemuck::cast_slice(&b.vertices);
        assert_eq!(a_bytes, b_bytes);
    }
}
