//! Swept-volume geometry generation
//!
//! Converts each motion segment into the triangles of the cutter's swept
//! volume: a rounded capsule for flat cutters, a cone envelope for
//! V-bits. Vertex positions stay implicit (see [`super::vertex`]); the
//! builder only decides roles, raw offsets, and the normalization that
//! maps the whole path into the unit square.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;
use tracing::debug;

use cutsim_core::constants::BOUNDS_PADDING_DIAMETERS;
use cutsim_core::CutterProfile;

use crate::path::{MotionSegment, PathTimeline};

use super::vertex::{
    cone_verts_per_segment, SweptVertex, CYLINDER_VERTS_PER_SEGMENT, ROLE_END_OFFSET,
    ROLE_START_OFFSET,
};

/// Extra cone height above the deepest endpoint, so the envelope always
/// clears the stock top
const CONE_TIP_CLEARANCE: f32 = 0.1;

/// Normalization mapping path space into the unit square
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTransform {
    /// XY offset centering the path bounding box
    pub xy_offset: Vec2,
    /// Uniform scale mapping the padded bounding box into [-1, 1]
    pub scale: f32,
    /// Deepest Z reached by the path
    pub min_z: f32,
    /// Stock top surface Z
    pub top_z: f32,
}

impl GeometryTransform {
    /// Transform for an empty path
    pub fn identity(top_z: f32) -> Self {
        Self {
            xy_offset: Vec2::ZERO,
            scale: 1.0,
            min_z: -1.0,
            top_z,
        }
    }
}

/// Swept geometry for an entire toolpath
#[derive(Debug, Clone)]
pub struct SweptGeometry {
    vertices: Vec<SweptVertex>,
    verts_per_segment: usize,
    cutter_diameter: f32,
    transform: GeometryTransform,
}

impl SweptGeometry {
    /// Geometry for an empty path
    pub fn empty(top_z: f32) -> Self {
        Self {
            vertices: Vec::new(),
            verts_per_segment: CYLINDER_VERTS_PER_SEGMENT,
            cutter_diameter: 0.0,
            transform: GeometryTransform::identity(top_z),
        }
    }

    pub fn vertices(&self) -> &[SweptVertex] {
        &self.vertices
    }

    pub fn verts_per_segment(&self) -> usize {
        self.verts_per_segment
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn cutter_diameter(&self) -> f32 {
        self.cutter_diameter
    }

    pub fn transform(&self) -> &GeometryTransform {
        &self.transform
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Builds swept geometry for a cutter profile over a motion timeline
pub struct PathGeometryBuilder {
    cutter: CutterProfile,
    stock_top_z: f32,
    half_circle_segments: usize,
}

impl PathGeometryBuilder {
    pub fn new(cutter: CutterProfile, stock_top_z: f32, half_circle_segments: usize) -> Self {
        Self {
            cutter: cutter.normalized(),
            stock_top_z,
            half_circle_segments,
        }
    }

    /// Emit the per-segment swept geometry plus normalization parameters.
    pub fn build(&self, timeline: &PathTimeline) -> SweptGeometry {
        let segments = timeline.segments();
        let Some((min, max)) = timeline.bounds() else {
            return SweptGeometry::empty(self.stock_top_z);
        };

        let conical = self.cutter.is_conical();
        let verts_per_segment = if conical {
            cone_verts_per_segment(self.half_circle_segments)
        } else {
            CYLINDER_VERTS_PER_SEGMENT
        };

        let mut vertices = Vec::with_capacity(segments.len() * verts_per_segment);
        for (index, segment) in segments.iter().enumerate() {
            if conical {
                self.emit_cone(index as u32, segment, verts_per_segment, &mut vertices);
            } else {
                emit_capsule(index as u32, &mut vertices);
            }
        }

        let xy_offset = Vec2::new(-(min.x + max.x) / 2.0, -(min.y + max.y) / 2.0);
        let padding = BOUNDS_PADDING_DIAMETERS * self.cutter.diameter;
        let size = (max.x - min.x + padding).max(max.y - min.y + padding);
        let scale = if size > 0.0 { 2.0 / size } else { 1.0 };
        let transform = GeometryTransform {
            xy_offset,
            scale,
            min_z: min.z,
            top_z: self.stock_top_z,
        };

        debug!(
            segments = segments.len(),
            vertices = vertices.len(),
            buffer_mb = (vertices.len() * std::mem::size_of::<SweptVertex>()) as f32 / 1024.0 / 1024.0,
            conical,
            "swept geometry built"
        );

        SweptGeometry {
            vertices,
            verts_per_segment,
            cutter_diameter: self.cutter.diameter,
            transform,
        }
    }

    /// Cone envelope for one segment.
    ///
    /// Near-vertical motions get a full cone fan at the deeper endpoint;
    /// lateral cuts get two tangent bridge quads plus a fan on each side
    /// of the travel direction.
    fn emit_cone(
        &self,
        index: u32,
        segment: &MotionSegment,
        verts_per_segment: usize,
        out: &mut Vec<SweptVertex>,
    ) {
        let half = self.cutter.half_angle_rad();
        let z1 = segment.start.z;
        let z2 = segment.end.z;

        // cone grows taller as the motion goes deeper
        let cone_height = -z1.min(z2).min(0.0) + CONE_TIP_CLEARANCE;
        let cone_radius = cone_height * half.tan();

        let dx = segment.end.x - segment.start.x;
        let dy = segment.end.y - segment.start.y;
        let xy_dist = (dx * dx + dy * dy).sqrt();
        let rot_angle = if xy_dist == 0.0 { 0.0 } else { dy.atan2(dx) };

        let target_len = out.len() + verts_per_segment;
        let halves = self.half_circle_segments;

        if (z2 - z1).abs() >= xy_dist * FRAC_PI_2 * (half.cos() / half.sin()) {
            // plunge or retract: full silhouette at the deeper endpoint
            let role = if z1 < z2 {
                ROLE_START_OFFSET
            } else {
                ROLE_END_OFFSET
            };
            for circle_index in 0..halves * 2 {
                let a1 = PI * circle_index as f32 / halves as f32;
                let a2 = PI * (circle_index + 1) as f32 / halves as f32;
                out.push(SweptVertex::anchored(
                    index,
                    role,
                    [cone_radius * a2.cos(), cone_radius * a2.sin(), cone_height],
                ));
                out.push(SweptVertex::anchored(index, role, [0.0, 0.0, 0.0]));
                out.push(SweptVertex::anchored(
                    index,
                    role,
                    [cone_radius * a1.cos(), cone_radius * a1.sin(), cone_height],
                ));
            }
            while out.len() < target_len {
                out.push(SweptVertex::discard(index));
            }
        } else {
            // angle at which the cone silhouette is tangent to the travel
            // direction
            let plane_contact = ((z1 - z2) / xy_dist * half.tan()).asin();

            let left = rotated([0.0, -cone_radius, cone_height], rot_angle - plane_contact);
            let right = rotated([0.0, cone_radius, cone_height], rot_angle + plane_contact);
            let apex = [0.0, 0.0, 0.0];

            // two tangent quads bridging the cone at both endpoints
            out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, left));
            out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, left));
            out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, apex));
            out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, apex));
            out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, left));
            out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, apex));
            out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, apex));
            out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, apex));
            out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, right));
            out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, right));
            out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, apex));
            out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, right));

            // fan on each side spanning the tangent contact angles
            let start_angle = rot_angle + FRAC_PI_2 - plane_contact;
            let end_angle = rot_angle + 3.0 * FRAC_PI_2 + plane_contact;
            for circle_index in 0..halves {
                let a1 =
                    start_angle + circle_index as f32 / halves as f32 * (end_angle - start_angle);
                let a2 = start_angle
                    + (circle_index + 1) as f32 / halves as f32 * (end_angle - start_angle);

                out.push(SweptVertex::anchored(
                    index,
                    ROLE_START_OFFSET,
                    [cone_radius * a2.cos(), cone_radius * a2.sin(), cone_height],
                ));
                out.push(SweptVertex::anchored(index, ROLE_START_OFFSET, apex));
                out.push(SweptVertex::anchored(
                    index,
                    ROLE_START_OFFSET,
                    [cone_radius * a1.cos(), cone_radius * a1.sin(), cone_height],
                ));
                out.push(SweptVertex::anchored(
                    index,
                    ROLE_END_OFFSET,
                    [
                        cone_radius * (a2 + PI).cos(),
                        cone_radius * (a2 + PI).sin(),
                        cone_height,
                    ],
                ));
                out.push(SweptVertex::anchored(index, ROLE_END_OFFSET, apex));
                out.push(SweptVertex::anchored(
                    index,
                    ROLE_END_OFFSET,
                    [
                        cone_radius * (a1 + PI).cos(),
                        cone_radius * (a1 + PI).sin(),
                        cone_height,
                    ],
                ));
            }
        }
    }
}

/// Fixed 18-vertex capsule: two end caps plus the connector quad
fn emit_capsule(index: u32, out: &mut Vec<SweptVertex>) {
    for role in 0..CYLINDER_VERTS_PER_SEGMENT as u32 {
        out.push(SweptVertex::capsule(index, role));
    }
}

/// Rotate a raw offset around Z
fn rotated(raw: [f32; 3], angle: f32) -> [f32; 3] {
    let (sin, cos) = angle.sin_cos();
    [
        raw[0] * cos - raw[1] * sin,
        raw[1] * cos + raw[0] * sin,
        raw[2],
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gcode::PathPoint;
    use crate::sweep::vertex::ROLE_DISCARD;

    fn timeline_of(points: &[[f32; 4]]) -> PathTimeline {
        let points: Vec<PathPoint> = points.iter().map(|&p| PathPoint::from(p)).collect();
        PathTimeline::from_points(&points)
    }

    #[test]
    fn cylindrical_segments_emit_eighteen_vertices() {
        let timeline = timeline_of(&[[0.0, 0.0, 0.0, 100.0], [10.0, 0.0, -1.0, 100.0]]);
        let builder = PathGeometryBuilder::new(CutterProfile::flat(1.0, 5.0), 0.0, 5);
        let geometry = builder.build(&timeline);
        assert_eq!(geometry.verts_per_segment(), 18);
        assert_eq!(geometry.vertices().len(), 2 * 18);
        assert_eq!(geometry.triangle_count(), 12);
    }

    #[test]
    fn conical_segments_emit_fixed_vertex_count() {
        let timeline = timeline_of(&[[0.0, 0.0, 0.0, 100.0], [10.0, 0.0, -1.0, 100.0]]);
        let builder = PathGeometryBuilder::new(CutterProfile::conical(2.0, 60.0), 0.0, 5);
        let geometry = builder.build(&timeline);
        assert_eq!(geometry.verts_per_segment(), 12 + 6 * 5);
        assert_eq!(geometry.vertices().len(), 2 * (12 + 6 * 5));
    }

    #[test]
    fn vertical_plunge_pads_with_discard_roles() {
        // straight plunge: no XY travel at all
        let timeline = timeline_of(&[[0.0, 0.0, 0.0, 100.0], [0.0, 0.0, -2.0, 100.0]]);
        let builder = PathGeometryBuilder::new(CutterProfile::conical(2.0, 60.0), 0.0, 5);
        let geometry = builder.build(&timeline);

        let second = &geometry.vertices()[geometry.verts_per_segment()..];
        let discard_count = second.iter().filter(|v| v.role == ROLE_DISCARD).count();
        assert_eq!(discard_count, 12, "fan uses 30 of 42 slots, rest discarded");
        assert_eq!(discard_count % 3, 0, "discards cover whole triangles");
    }

    #[test]
    fn lateral_cut_classification_at_the_analytic_boundary() {
        let half = CutterProfile::conical(2.0, 60.0).half_angle_rad();
        let xy = 1.0f32;
        let boundary = xy * FRAC_PI_2 * (half.cos() / half.sin());

        // just below the boundary: lateral cut, no discard padding
        let timeline = timeline_of(&[
            [0.0, 0.0, 0.0, 100.0],
            [1.0, 0.0, -(boundary - 0.01), 100.0],
        ]);
        let builder = PathGeometryBuilder::new(CutterProfile::conical(2.0, 60.0), 0.0, 5);
        let geometry = builder.build(&timeline);
        let second = &geometry.vertices()[geometry.verts_per_segment()..];
        assert!(
            second.iter().all(|v| v.role != ROLE_DISCARD),
            "lateral cut fills every slot"
        );

        // at/above the boundary: plunge fan with padding
        let timeline = timeline_of(&[
            [0.0, 0.0, 0.0, 100.0],
            [1.0, 0.0, -(boundary + 0.01), 100.0],
        ]);
        let geometry = builder.build(&timeline);
        let second = &geometry.vertices()[geometry.verts_per_segment()..];
        assert!(
            second.iter().any(|v| v.role == ROLE_DISCARD),
            "plunge pads unused slots"
        );
    }

    #[test]
    fn transform_centers_and_pads_the_bounding_box() {
        let timeline = timeline_of(&[[0.0, 0.0, -1.0, 100.0], [10.0, 4.0, -3.0, 100.0]]);
        let builder = PathGeometryBuilder::new(CutterProfile::flat(1.0, 5.0), 0.5, 5);
        let transform = *builder.build(&timeline).transform();

        assert_eq!(transform.xy_offset, Vec2::new(-5.0, -2.0));
        // X extent 10 + 4 diameters padding = 14, larger than Y's 8
        assert!((transform.scale - 2.0 / 14.0).abs() < 1e-6);
        assert_eq!(transform.min_z, -3.0);
        assert_eq!(transform.top_z, 0.5);
    }
}
