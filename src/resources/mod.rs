//! Core resource definitions
//!
//! Plain CPU-side data consumed by scene objects and render backends:
//! - Color: RGB colour with hex / HSL constructors
//! - Geometry: indexed vertex buffers with bounding volumes
//! - Material: mesh and point materials
//! - PointCloud: fixed-length particle buffers
//! - primitives: sphere and platonic-solid builders

pub mod color;
pub mod geometry;
pub mod material;
pub mod points;
pub mod primitives;

pub use color::Color;
pub use geometry::{BoundingSphere, Geometry, Topology};
pub use material::{MeshMaterial, PointsMaterial};
pub use points::{PointCloud, wrap_vertical};
pub use primitives::{PolyhedronKind, SphereOptions, create_polyhedron, create_sphere};
