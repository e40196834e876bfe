// sphere.rs — panorama sphere mesh

use bytemuck::{Pod, Zeroable};

pub const SPHERE_RADIUS: f32 = 500.0;
pub const LON_SEGMENTS: usize = 60;
pub const LAT_SEGMENTS: usize = 40;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Latitude/longitude sphere enclosing the viewer. U runs mirrored
/// (1 at the first meridian down to 0) so the equirectangular image reads the
/// right way around when viewed from inside; V runs 0 at the top pole.
pub fn build_sphere(radius: f32, lat: usize, lon: usize) -> SphereMesh {
    let mut vertices = Vec::with_capacity((lat + 1) * (lon + 1));
    let mut indices = Vec::with_capacity(lat * lon * 6);

    for i in 0..=lat {
        let theta = std::f32::consts::PI * (i as f32) / (lat as f32);
        let y = radius * theta.cos();
        let sin_t = theta.sin();

        for j in 0..=lon {
            let phi = 2.0 * std::f32::consts::PI * (j as f32) / (lon as f32);

            let x = radius * phi.cos() * sin_t;
            let z = radius * phi.sin() * sin_t;

            let u = 1.0 - (j as f32) / (lon as f32);
            let v = (i as f32) / (lat as f32);

            vertices.push(Vertex {
                position: [x, y, z],
                uv: [u, v],
            });
        }
    }

    for i in 0..lat {
        for j in 0..lon {
            let a = (i * (lon + 1) + j) as u32;
            let b = a + (lon + 1) as u32;

            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }

    SphereMesh { vertices, indices }
}

impl SphereMesh {
    pub fn panorama() -> Self {
        build_sphere(SPHERE_RADIUS, LAT_SEGMENTS, LON_SEGMENTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_index_counts() {
        let mesh = build_sphere(500.0, 40, 60);
        assert_eq!(mesh.vertices.len(), 41 * 61);
        assert_eq!(mesh.indices.len(), 40 * 60 * 6);
        let max = *mesh.indices.iter().max().unwrap();
        assert!((max as usize) < mesh.vertices.len());
    }

    #[test]
    fn vertices_lie_on_the_sphere() {
        let mesh = build_sphere(500.0, 8, 12);
        for v in &mesh.vertices {
            let [x, y, z] = v.position;
            let r = (x * x + y * y + z * z).sqrt();
            assert!((r - 500.0).abs() < 1e-2);
        }
    }

    #[test]
    fn uv_is_mirrored_horizontally_and_top_down() {
        let mesh = build_sphere(500.0, 4, 8);
        // first vertex: top pole, first meridian
        let first = mesh.vertices[0];
        assert_eq!(first.uv, [1.0, 0.0]);
        // last vertex of the first ring: u back at 0
        let last_in_ring = mesh.vertices[8];
        assert_eq!(last_in_ring.uv, [0.0, 0.0]);
        // bottom pole row: v == 1
        let bottom = mesh.vertices.last().unwrap();
        assert_eq!(bottom.uv[1], 1.0);
    }
}
