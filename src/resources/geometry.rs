use glam::{Affine3A, Vec3};

/// How the index buffer of a [`Geometry`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    TriangleList,
    LineList,
}

/// Bounding sphere in local space, used for frustum culling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub const EMPTY: Self = Self {
        center: Vec3::ZERO,
        radius: 0.0,
    };

    /// Transforms the sphere into another space. The radius is scaled by the
    /// largest axis scale so the result still encloses the geometry.
    #[must_use]
    pub fn transform(&self, matrix: &Affine3A) -> Self {
        let center = matrix.transform_point3(self.center);
        let scale = matrix
            .matrix3
            .x_axis
            .length()
            .max(matrix.matrix3.y_axis.length())
            .max(matrix.matrix3.z_axis.length());
        Self {
            center,
            radius: self.radius * scale,
        }
    }
}

/// CPU-side mesh geometry.
///
/// The scene system never uploads this anywhere itself; render backends read
/// the buffers they need each frame.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub topology: Topology,
    bounding_sphere: BoundingSphere,
}

impl Geometry {
    #[must_use]
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, topology: Topology) -> Self {
        let mut geo = Self {
            positions,
            normals: Vec::new(),
            indices,
            topology,
            bounding_sphere: BoundingSphere::EMPTY,
        };
        geo.compute_bounding_volume();
        geo
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of primitives (triangles or lines) described by the index buffer.
    #[must_use]
    pub fn primitive_count(&self) -> usize {
        match self.topology {
            Topology::TriangleList => self.indices.len() / 3,
            Topology::LineList => self.indices.len() / 2,
        }
    }

    #[inline]
    #[must_use]
    pub fn bounding_sphere(&self) -> BoundingSphere {
        self.bounding_sphere
    }

    /// Recomputes the bounding sphere around the centroid of the positions.
    pub fn compute_bounding_volume(&mut self) {
        if self.positions.is_empty() {
            self.bounding_sphere = BoundingSphere::EMPTY;
            return;
        }

        let center =
            self.positions.iter().copied().sum::<Vec3>() / self.positions.len() as f32;
        let radius = self
            .positions
            .iter()
            .map(|p| p.distance(center))
            .fold(0.0_f32, f32::max);

        self.bounding_sphere = BoundingSphere { center, radius };
    }

    /// Converts a triangle list into a line list covering each unique edge once.
    #[must_use]
    pub fn to_wireframe(&self) -> Self {
        if self.topology == Topology::LineList {
            return self.clone();
        }

        let mut edges: Vec<(u32, u32)> = Vec::with_capacity(self.indices.len());
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                if a != b {
                    edges.push((a.min(b), a.max(b)));
                }
            }
        }
        edges.sort_unstable();
        edges.dedup();

        let indices = edges.into_iter().flat_map(|(a, b)| [a, b]).collect();
        let mut geo = Self::new(self.positions.clone(), indices, Topology::LineList);
        geo.normals.clone_from(&self.normals);
        geo
    }
}
