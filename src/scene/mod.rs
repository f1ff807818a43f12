//! Scene graph module
//!
//! - Transform: position / Euler rotation / scale with a cached local matrix
//! - SceneObject: point clouds, solids and lights
//! - Scene: flat object container keyed by [`ObjectKey`]
//! - Camera: the surface's single perspective camera
//! - Light: ambient, directional and point lights

pub mod camera;
pub mod light;
pub mod object;
pub mod scene;
pub mod transform;

pub use camera::{Camera, Frustum};
pub use light::{Light, LightKind, PointLight};
pub use object::{ObjectKind, SceneObject, Solid, SolidShape};
pub use scene::Scene;
pub use transform::Transform;

use slotmap::new_key_type;

new_key_type! {
    pub struct ObjectKey;
}
