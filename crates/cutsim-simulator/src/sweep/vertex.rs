//! Compact swept-geometry vertex encoding
//!
//! Vertices do not store world coordinates. Each names its motion
//! segment and a small integer role; the rasterizer reconstructs the
//! position from the segment's two endpoints, the role's analytic
//! offset, and the prerotated raw offset carried here. Roles 0..=5 are
//! the lower end-cap corners of the cylindrical capsule, 6..=11 the
//! upper cap, 12..=17 the connector quad along the travel direction.

use bytemuck::{Pod, Zeroable};

/// Highest capsule corner role
pub const ROLE_CAPSULE_LAST: u32 = 17;
/// Raw offset anchored at the segment start
pub const ROLE_START_OFFSET: u32 = 100;
/// Raw offset anchored at the (time-clamped) segment end
pub const ROLE_END_OFFSET: u32 = 101;
/// Unused slot; the containing triangle is dropped
pub const ROLE_DISCARD: u32 = 200;

/// Vertices per segment for a cylindrical cutter
pub const CYLINDER_VERTS_PER_SEGMENT: usize = 18;

/// Vertices per segment for a conical cutter
pub fn cone_verts_per_segment(half_circle_segments: usize) -> usize {
    12 + 6 * half_circle_segments
}

/// One swept-geometry vertex; every 3 consecutive vertices form a triangle
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct SweptVertex {
    /// Prerotated offset applied on top of the anchor endpoint
    pub raw: [f32; 3],
    /// Index of the motion segment this vertex belongs to
    pub segment: u32,
    /// Position role tag
    pub role: u32,
}

impl SweptVertex {
    /// Capsule corner vertex; the role alone determines the offset
    pub fn capsule(segment: u32, role: u32) -> Self {
        Self {
            raw: [0.0; 3],
            segment,
            role,
        }
    }

    /// Vertex anchored at an endpoint plus a raw offset
    pub fn anchored(segment: u32, role: u32, raw: [f32; 3]) -> Self {
        Self { raw, segment, role }
    }

    /// Padding vertex whose triangle the rasterizer drops
    pub fn discard(segment: u32) -> Self {
        Self {
            raw: [0.0; 3],
            segment,
            role: ROLE_DISCARD,
        }
    }
}
