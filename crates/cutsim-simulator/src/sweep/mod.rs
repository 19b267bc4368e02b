//! Swept-volume geometry for cylindrical and conical cutters

pub mod builder;
pub mod vertex;

pub use builder::{GeometryTransform, PathGeometryBuilder, SweptGeometry};
pub use vertex::{
    cone_verts_per_segment, SweptVertex, CYLINDER_VERTS_PER_SEGMENT, ROLE_CAPSULE_LAST,
    ROLE_DISCARD, ROLE_END_OFFSET, ROLE_START_OFFSET,
};
