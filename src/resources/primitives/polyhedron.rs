use glam::Vec3;
use rand::RngExt;
use rand::rngs::StdRng;

use crate::resources::geometry::{Geometry, Topology};

/// Closed set of platonic solids the ambient scene scatters around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolyhedronKind {
    Tetrahedron,
    Octahedron,
    Icosahedron,
    Dodecahedron,
}

impl PolyhedronKind {
    pub const ALL: [Self; 4] = [
        Self::Tetrahedron,
        Self::Octahedron,
        Self::Icosahedron,
        Self::Dodecahedron,
    ];

    /// Picks one of the four shapes with equal probability.
    pub fn sample(rng: &mut StdRng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    #[must_use]
    pub fn face_count(self) -> usize {
        match self {
            Self::Tetrahedron => 4,
            Self::Octahedron => 8,
            Self::Icosahedron => 20,
            Self::Dodecahedron => 12,
        }
    }
}

const PHI: f32 = 1.618_034;
const INV_PHI: f32 = 1.0 / PHI;

/// Builds a polyhedron whose vertices all lie on a sphere of `radius`.
#[must_use]
pub fn create_polyhedron(kind: PolyhedronKind, radius: f32) -> Geometry {
    let (raw, indices): (Vec<[f32; 3]>, Vec<u32>) = match kind {
        PolyhedronKind::Tetrahedron => (
            vec![
                [1.0, 1.0, 1.0],
                [-1.0, -1.0, 1.0],
                [-1.0, 1.0, -1.0],
                [1.0, -1.0, -1.0],
            ],
            vec![2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1],
        ),
        PolyhedronKind::Octahedron => (
            vec![
                [1.0, 0.0, 0.0],
                [-1.0, 0.0, 0.0],
                [0.0, 1.0, 0.0],
                [0.0, -1.0, 0.0],
                [0.0, 0.0, 1.0],
                [0.0, 0.0, -1.0],
            ],
            vec![
                0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2, //
                1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
            ],
        ),
        PolyhedronKind::Icosahedron => (
            vec![
                [-1.0, PHI, 0.0],
                [1.0, PHI, 0.0],
                [-1.0, -PHI, 0.0],
                [1.0, -PHI, 0.0],
                [0.0, -1.0, PHI],
                [0.0, 1.0, PHI],
                [0.0, -1.0, -PHI],
                [0.0, 1.0, -PHI],
                [PHI, 0.0, -1.0],
                [PHI, 0.0, 1.0],
                [-PHI, 0.0, -1.0],
                [-PHI, 0.0, 1.0],
            ],
            vec![
                0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11, //
                1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8, //
                3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9, //
                4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
            ],
        ),
        PolyhedronKind::Dodecahedron => (
            vec![
                // (±1, ±1, ±1)
                [-1.0, -1.0, -1.0],
                [-1.0, -1.0, 1.0],
                [-1.0, 1.0, -1.0],
                [-1.0, 1.0, 1.0],
                [1.0, -1.0, -1.0],
                [1.0, -1.0, 1.0],
                [1.0, 1.0, -1.0],
                [1.0, 1.0, 1.0],
                // (0, ±1/φ, ±φ)
                [0.0, -INV_PHI, -PHI],
                [0.0, -INV_PHI, PHI],
                [0.0, INV_PHI, -PHI],
                [0.0, INV_PHI, PHI],
                // (±1/φ, ±φ, 0)
                [-INV_PHI, -PHI, 0.0],
                [-INV_PHI, PHI, 0.0],
                [INV_PHI, -PHI, 0.0],
                [INV_PHI, PHI, 0.0],
                // (±φ, 0, ±1/φ)
                [-PHI, 0.0, -INV_PHI],
                [PHI, 0.0, -INV_PHI],
                [-PHI, 0.0, INV_PHI],
                [PHI, 0.0, INV_PHI],
            ],
            // Each pentagonal face is fanned into three triangles
            vec![
                3, 11, 7, 3, 7, 15, 3, 15, 13, //
                7, 19, 17, 7, 17, 6, 7, 6, 15, //
                17, 4, 8, 17, 8, 10, 17, 10, 6, //
                8, 0, 16, 8, 16, 2, 8, 2, 10, //
                0, 12, 1, 0, 1, 18, 0, 18, 16, //
                6, 10, 2, 6, 2, 13, 6, 13, 15, //
                2, 16, 18, 2, 18, 3, 2, 3, 13, //
                18, 1, 9, 18, 9, 11, 18, 11, 3, //
                4, 14, 12, 4, 12, 0, 4, 0, 8, //
                11, 9, 5, 11, 5, 19, 11, 19, 7, //
                19, 5, 14, 19, 14, 4, 19, 4, 17, //
                1, 12, 14, 1, 14, 5, 1, 5, 9,
            ],
        ),
    };

    let positions: Vec<Vec3> = raw
        .into_iter()
        .map(|p| Vec3::from_array(p).normalize() * radius)
        .collect();

    let mut geo = Geometry::new(positions, indices, Topology::TriangleList);
    geo.normals = geo.positions.iter().map(|p| p.normalize_or_zero()).collect();
    geo
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn vertices_lie_on_sphere() {
        for kind in PolyhedronKind::ALL {
            let geo = create_polyhedron(kind, 0.5);
            for p in &geo.positions {
                assert!((p.length() - 0.5).abs() < 1e-5, "{kind:?} vertex off sphere");
            }
            assert!(geo.indices.iter().all(|&i| (i as usize) < geo.vertex_count()));
        }
    }

    #[test]
    fn vertex_and_triangle_counts() {
        // (kind, vertices, triangles, triangles per face)
        let counts = [
            (PolyhedronKind::Tetrahedron, 4, 4, 1),
            (PolyhedronKind::Octahedron, 6, 8, 1),
            (PolyhedronKind::Icosahedron, 12, 20, 1),
            (PolyhedronKind::Dodecahedron, 20, 36, 3),
        ];
        for (kind, vertices, triangles, per_face) in counts {
            let geo = create_polyhedron(kind, 1.0);
            assert_eq!(geo.vertex_count(), vertices, "{kind:?}");
            assert_eq!(geo.primitive_count(), triangles, "{kind:?}");
            assert_eq!(kind.face_count() * per_face, triangles, "{kind:?}");
        }
    }

    #[test]
    fn wireframe_edges_of_triangular_solids() {
        let edges = |kind| create_polyhedron(kind, 1.0).to_wireframe().primitive_count();
        assert_eq!(edges(PolyhedronKind::Tetrahedron), 6);
        assert_eq!(edges(PolyhedronKind::Octahedron), 12);
        assert_eq!(edges(PolyhedronKind::Icosahedron), 30);
    }

    #[test]
    fn sampling_reaches_every_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(PolyhedronKind::sample(&mut rng));
        }
        assert_eq!(seen.len(), PolyhedronKind::ALL.len());
    }
}
