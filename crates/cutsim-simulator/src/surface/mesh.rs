//! Static grid topology sampling the heightfield at shade time
//!
//! The topology is built once per resolution and never changes; only the
//! heights sampled from the current heightfield do. Cells alternate
//! their diagonal orientation in a checkerboard so the triangulation has
//! no directional bias. Where neighboring heights diverge sharply the
//! surface color blends toward a wall tone, approximating vertical-wall
//! shading without computing normals.

use crate::raster::Heightfield;
use crate::sweep::GeometryTransform;

const TOP_COLOR: [f32; 3] = [0.9, 0.9, 1.0];
const BOTTOM_COLOR: [f32; 3] = [0.0, 0.0, 0.4];
const WALL_COLOR: [f32; 3] = [0.0, 0.0, 0.6];
const WALL_TRANSITION_CAP: f32 = 0.4;
const WALL_GRADIENT_GAIN: f32 = 100.0;

/// Shaded surface vertex, ready for upload
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

/// Build-once triangulated grid over the heightfield
#[derive(Debug, Clone)]
pub struct SurfaceMesh {
    resolution: usize,
    triangles: Vec<[[u32; 2]; 3]>,
}

impl SurfaceMesh {
    /// Build the grid topology: R×(R−1) cells, one triangle each, with
    /// alternating diagonal orientation.
    pub fn new(resolution: usize) -> Self {
        let mut triangles = Vec::with_capacity(resolution * (resolution - 1));
        for y in 0..resolution - 1 {
            for x in 0..resolution {
                let left = x.saturating_sub(1) as u32;
                let right = (x + 1).min(resolution - 1) as u32;
                let (x, y) = (x as u32, y as u32);
                let triangle = if (x % 2 == 0) != (y % 2 == 1) {
                    [[left, y + 1], [x, y], [right, y + 1]]
                } else {
                    [[left, y], [right, y], [x, y + 1]]
                };
                triangles.push(triangle);
            }
        }
        Self {
            resolution,
            triangles,
        }
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Sample the heightfield and emit one shaded vertex per triangle
    /// corner into `out`, replacing its previous contents.
    pub fn shade(
        &self,
        heightfield: &Heightfield,
        transform: &GeometryTransform,
        out: &mut Vec<SurfaceVertex>,
    ) {
        out.clear();
        out.reserve(self.triangles.len() * 3);

        let res = self.resolution as f32;
        let z_span = (transform.top_z - transform.min_z) * transform.scale;

        for triangle in &self.triangles {
            let heights = [
                heightfield.get(triangle[0][0] as usize, triangle[0][1] as usize),
                heightfield.get(triangle[1][0] as usize, triangle[1][1] as usize),
                heightfield.get(triangle[2][0] as usize, triangle[2][1] as usize),
            ];
            let gradient = (heights[0] - heights[1])
                .abs()
                .max((heights[0] - heights[2]).abs());
            let transition = (WALL_GRADIENT_GAIN * gradient).min(WALL_TRANSITION_CAP);

            for (corner, height) in triangle.iter().zip(heights) {
                let base = mix(TOP_COLOR, BOTTOM_COLOR, height);
                let color = mix(base, WALL_COLOR, transition);
                out.push(SurfaceVertex {
                    position: [
                        corner[0] as f32 * 2.0 / res - 1.0,
                        corner[1] as f32 * 2.0 / res - 1.0,
                        -height * z_span,
                    ],
                    color,
                });
            }
        }
    }
}

fn mix(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn flat_transform() -> GeometryTransform {
        GeometryTransform {
            xy_offset: Vec2::ZERO,
            scale: 1.0,
            min_z: -1.0,
            top_z: 0.0,
        }
    }

    #[test]
    fn topology_covers_every_cell_once() {
        let mesh = SurfaceMesh::new(8);
        assert_eq!(mesh.triangle_count(), 8 * 7);
    }

    #[test]
    fn uncut_field_shades_to_the_top_color() {
        let mesh = SurfaceMesh::new(8);
        let field = Heightfield::new(8);
        let mut shaded = Vec::new();
        mesh.shade(&field, &flat_transform(), &mut shaded);

        assert_eq!(shaded.len(), mesh.triangle_count() * 3);
        assert!(shaded.iter().all(|v| v.color == TOP_COLOR));
        assert!(shaded.iter().all(|v| v.position[2] == 0.0));
    }

    #[test]
    fn steep_gradient_blends_toward_the_wall_tone() {
        let mesh = SurfaceMesh::new(8);
        let mut field = Heightfield::new(8);
        // one deep cell produces a steep local gradient
        field.deepen(4, 4, 1.0);
        let mut shaded = Vec::new();
        mesh.shade(&field, &flat_transform(), &mut shaded);

        let has_wall_blend = shaded
            .iter()
            .any(|v| v.color != TOP_COLOR && v.position[2] == 0.0);
        assert!(
            has_wall_blend,
            "vertices at the top next to the cut must pick up the wall tone"
        );
    }
}
