pub mod polyhedron;
pub mod sphere;

pub use polyhedron::{PolyhedronKind, create_polyhedron};
pub use sphere::{SphereOptions, create_sphere};
