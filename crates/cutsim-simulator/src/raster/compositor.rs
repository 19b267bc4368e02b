//! Heightfield compositing over swept geometry
//!
//! A single pass over the segment triangles replaces a per-cell scan:
//! each triangle is projected top-down onto the unit square, depth is
//! interpolated barycentrically, and every covered cell keeps its
//! deepest value. Geometry is consumed through a fixed-budget staging
//! buffer, so peak memory stays independent of path length.

use glam::{Vec2, Vec3};
use tracing::debug;

use cutsim_core::error::SimError;

use crate::path::{MotionSegment, PathTimeline};
use crate::sweep::{
    GeometryTransform, SweptGeometry, SweptVertex, ROLE_DISCARD, ROLE_END_OFFSET,
    ROLE_START_OFFSET,
};

use super::heightfield::Heightfield;

/// Screen-space triangle corner with its normalized depth
#[derive(Debug, Clone, Copy)]
struct Corner {
    pos: Vec2,
    depth: f32,
}

/// Composites swept geometry into a heightfield for a given time cutoff
pub struct Rasterizer {
    resolution: usize,
    staging_budget_bytes: usize,
    chunk_triangles: usize,
    staging: Vec<SweptVertex>,
}

impl Rasterizer {
    /// The staging budget must fit at least one triangle; smaller
    /// budgets are rejected before any frame can be produced.
    pub fn new(resolution: usize, staging_budget_bytes: usize) -> Result<Self, SimError> {
        let triangle_bytes = 3 * std::mem::size_of::<SweptVertex>();
        let chunk_triangles = staging_budget_bytes / triangle_bytes;
        if chunk_triangles == 0 {
            return Err(SimError::InvalidConfig {
                reason: format!(
                    "staging budget of {staging_budget_bytes} bytes is below one \
                     {triangle_bytes}-byte triangle"
                ),
            });
        }
        Ok(Self {
            resolution,
            staging_budget_bytes,
            chunk_triangles,
            staging: Vec::with_capacity(chunk_triangles * 3),
        })
    }

    /// Triangles staged per upload chunk
    pub fn chunk_triangles(&self) -> usize {
        self.chunk_triangles
    }

    /// Composite all geometry whose time lies at or before
    /// `stop_at_time` into `out`, replacing its previous contents.
    pub fn composite(
        &mut self,
        geometry: &SweptGeometry,
        timeline: &PathTimeline,
        stop_at_time: f32,
        out: &mut Heightfield,
    ) {
        out.clear();
        let vertices = geometry.vertices();
        let triangle_count = vertices.len() / 3;
        let mut staged = 0usize;

        while staged < triangle_count {
            let count = (triangle_count - staged).min(self.chunk_triangles);
            self.staging.clear();
            self.staging
                .extend_from_slice(&vertices[staged * 3..(staged + count) * 3]);
            debug_assert!(
                bytemuck::cast_slice::<SweptVertex, u8>(&self.staging).len()
                    <= self.staging_budget_bytes
            );

            for triangle in self.staging.chunks_exact(3) {
                rasterize_triangle(
                    [triangle[0], triangle[1], triangle[2]],
                    geometry,
                    timeline,
                    stop_at_time,
                    self.resolution,
                    out,
                );
            }
            staged += count;
        }

        debug!(
            triangles = triangle_count,
            chunk_triangles = self.chunk_triangles,
            stop_at_time,
            "heightfield composited"
        );
    }
}

/// Rasterize one triangle, reconstructing vertex positions from the
/// segment endpoints and role tags.
fn rasterize_triangle(
    triangle: [SweptVertex; 3],
    geometry: &SweptGeometry,
    timeline: &PathTimeline,
    stop_at_time: f32,
    resolution: usize,
    out: &mut Heightfield,
) {
    if triangle.iter().any(|v| v.role == ROLE_DISCARD) {
        return;
    }
    let Some(segment) = timeline.segments().get(triangle[0].segment as usize) else {
        return;
    };
    if segment.start_time > stop_at_time {
        return;
    }

    let end = clamped_end(segment, stop_at_time);
    let transform = geometry.transform();
    let start_scaled = to_unit_square(segment.start, transform);
    let end_scaled = to_unit_square(end, transform);
    let (lower, upper) = if start_scaled.z < end_scaled.z {
        (start_scaled, end_scaled)
    } else {
        (end_scaled, start_scaled)
    };

    let radius = geometry.cutter_diameter() * transform.scale / 2.0;
    let res = resolution as f32;

    // constant per cap triangle: fragments outside the circle are
    // discarded, rounding the square silhouette
    let cap = if triangle[0].role < 6 {
        Some((to_pixels(lower.truncate(), res), radius * res / 2.0))
    } else if triangle[0].role < 12 {
        Some((to_pixels(upper.truncate(), res), radius * res / 2.0))
    } else {
        None
    };

    let mut corners = [Corner {
        pos: Vec2::ZERO,
        depth: 0.0,
    }; 3];
    for (corner, vertex) in corners.iter_mut().zip(triangle.iter()) {
        let position = match vertex.role {
            0..=11 => {
                let base = if vertex.role < 6 { lower } else { upper };
                let offset = match vertex.role % 6 {
                    0 | 3 => Vec2::new(-radius, -radius),
                    1 | 5 => Vec2::new(radius, radius),
                    2 => Vec2::new(-radius, radius),
                    _ => Vec2::new(radius, -radius),
                };
                Vec3::new(base.x + offset.x, base.y + offset.y, base.z)
            }
            12..=17 => {
                let travel = lower.truncate() - upper.truncate();
                let length = travel.length();
                if length <= f32::EPSILON {
                    // pure plunge: no connector, the caps coincide
                    return;
                }
                let delta = travel / length * radius;
                match vertex.role {
                    12 => Vec3::new(upper.x + delta.y, upper.y - delta.x, upper.z),
                    13 | 16 => Vec3::new(lower.x + delta.y, lower.y - delta.x, lower.z),
                    14 | 15 => Vec3::new(upper.x - delta.y, upper.y + delta.x, upper.z),
                    _ => Vec3::new(lower.x - delta.y, lower.y + delta.x, lower.z),
                }
            }
            ROLE_START_OFFSET => anchored_position(segment.start, vertex.raw, transform),
            ROLE_END_OFFSET => anchored_position(end, vertex.raw, transform),
            _ => return,
        };
        *corner = Corner {
            pos: to_pixels(position.truncate(), res),
            depth: normalized_depth(position.z, transform),
        };
    }

    fill_triangle(&corners, cap, resolution, out);
}

/// Truncate the moving endpoint when the cutoff falls inside the segment
fn clamped_end(segment: &MotionSegment, stop_at_time: f32) -> Vec3 {
    if stop_at_time < segment.end_time {
        let ratio =
            (stop_at_time - segment.start_time) / (segment.end_time - segment.start_time);
        segment.start + (segment.end - segment.start) * ratio
    } else {
        segment.end
    }
}

fn to_unit_square(point: Vec3, transform: &GeometryTransform) -> Vec3 {
    Vec3::new(
        (point.x + transform.xy_offset.x) * transform.scale,
        (point.y + transform.xy_offset.y) * transform.scale,
        point.z,
    )
}

fn anchored_position(anchor: Vec3, raw: [f32; 3], transform: &GeometryTransform) -> Vec3 {
    Vec3::new(
        (anchor.x + raw[0] + transform.xy_offset.x) * transform.scale,
        (anchor.y + raw[1] + transform.xy_offset.y) * transform.scale,
        anchor.z + raw[2],
    )
}

/// Unit-square coordinates to pixel coordinates
fn to_pixels(clip: Vec2, resolution: f32) -> Vec2 {
    (clip * resolution + resolution) / 2.0
}

/// Normalized cut depth: 0 at the stock top, 1 at the deepest Z
fn normalized_depth(z: f32, transform: &GeometryTransform) -> f32 {
    let bottom = if transform.min_z == transform.top_z {
        transform.top_z - 1.0
    } else {
        transform.min_z
    };
    (transform.top_z - z) / (transform.top_z - bottom)
}

/// Scanline fill with barycentric depth interpolation
fn fill_triangle(
    corners: &[Corner; 3],
    cap: Option<(Vec2, f32)>,
    resolution: usize,
    out: &mut Heightfield,
) {
    let [a, b, c] = *corners;
    let area = edge(a.pos, b.pos, c.pos);
    if area == 0.0 {
        return;
    }

    let limit = (resolution - 1) as f32;
    let min_x = a.pos.x.min(b.pos.x).min(c.pos.x).floor().clamp(0.0, limit);
    let max_x = a.pos.x.max(b.pos.x).max(c.pos.x).ceil().clamp(0.0, limit);
    let min_y = a.pos.y.min(b.pos.y).min(c.pos.y).floor().clamp(0.0, limit);
    let max_y = a.pos.y.max(b.pos.y).max(c.pos.y).ceil().clamp(0.0, limit);

    for y in min_y as usize..=max_y as usize {
        for x in min_x as usize..=max_x as usize {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let w0 = edge(b.pos, c.pos, p);
            let w1 = edge(c.pos, a.pos, p);
            let w2 = edge(a.pos, b.pos, p);

            // both windings rasterize; the sign just has to be consistent
            let inside = if area > 0.0 {
                w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
            } else {
                w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
            };
            if !inside {
                continue;
            }
            if let Some((center, radius)) = cap {
                if radius > 0.0 && p.distance(center) > radius {
                    continue;
                }
            }

            let depth = (w0 * a.depth + w1 * b.depth + w2 * c.depth) / area;
            out.deepen(x, y, depth);
        }
    }
}

fn edge(a: Vec2, b: Vec2, p: Vec2) -> f32 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}
