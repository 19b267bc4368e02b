//! Terrain-style surface over the heightfield

pub mod mesh;

pub use mesh::{SurfaceMesh, SurfaceVertex};
