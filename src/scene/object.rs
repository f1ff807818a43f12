use std::borrow::Cow;

use uuid::Uuid;

use crate::resources::{Geometry, MeshMaterial, PointCloud, PolyhedronKind};
use crate::scene::light::Light;
use crate::scene::transform::Transform;

/// Shape tag carried by a [`Solid`], kept alongside the geometry so programs
/// and backends can tell solids apart without inspecting vertex data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidShape {
    Sphere,
    Polyhedron(PolyhedronKind),
}

/// A single mesh with its material.
#[derive(Debug, Clone)]
pub struct Solid {
    pub shape: SolidShape,
    pub geometry: Geometry,
    pub material: MeshMaterial,
}

impl Solid {
    #[must_use]
    pub fn new(shape: SolidShape, geometry: Geometry, material: MeshMaterial) -> Self {
        Self {
            shape,
            geometry,
            material,
        }
    }
}

/// Renderable payload of a [`SceneObject`].
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Points(PointCloud),
    Solid(Solid),
    Light(Light),
}

/// An entity owned by a [`Scene`](crate::scene::Scene) while attached.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub uuid: Uuid,
    pub name: Cow<'static, str>,
    pub transform: Transform,
    pub visible: bool,
    pub kind: ObjectKind,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>, kind: ObjectKind) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            transform: Transform::new(),
            visible: true,
            kind,
        }
    }

    #[must_use]
    pub fn points(name: impl Into<Cow<'static, str>>, cloud: PointCloud) -> Self {
        Self::new(name, ObjectKind::Points(cloud))
    }

    #[must_use]
    pub fn solid(name: impl Into<Cow<'static, str>>, solid: Solid) -> Self {
        Self::new(name, ObjectKind::Solid(solid))
    }

    #[must_use]
    pub fn light(name: impl Into<Cow<'static, str>>, light: Light) -> Self {
        Self::new(name, ObjectKind::Light(light))
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn as_points(&self) -> Option<&PointCloud> {
        match &self.kind {
            ObjectKind::Points(cloud) => Some(cloud),
            _ => None,
        }
    }

    pub fn as_points_mut(&mut self) -> Option<&mut PointCloud> {
        match &mut self.kind {
            ObjectKind::Points(cloud) => Some(cloud),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_solid(&self) -> Option<&Solid> {
        match &self.kind {
            ObjectKind::Solid(solid) => Some(solid),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_light(&self) -> Option<&Light> {
        match &self.kind {
            ObjectKind::Light(light) => Some(light),
            _ => None,
        }
    }
}
