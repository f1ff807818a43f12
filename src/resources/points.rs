use glam::Vec3;

use crate::errors::{Result, SceneError};
use crate::resources::color::Color;
use crate::resources::material::PointsMaterial;

/// Fixed-size point cloud.
///
/// The number of points is decided at creation and never changes: there is
/// no API that grows or shrinks the buffers. Animations move points around
/// (and wrap them back into range) instead of reallocating.
#[derive(Debug, Clone)]
pub struct PointCloud {
    positions: Box<[Vec3]>,
    colors: Option<Box<[Color]>>,
    pub material: PointsMaterial,
}

impl PointCloud {
    /// Creates a cloud with `count` points at the origin.
    #[must_use]
    pub fn new(count: usize, material: PointsMaterial) -> Self {
        Self {
            positions: vec![Vec3::ZERO; count].into_boxed_slice(),
            colors: None,
            material,
        }
    }

    #[must_use]
    pub fn from_positions(positions: Vec<Vec3>, material: PointsMaterial) -> Self {
        Self {
            positions: positions.into_boxed_slice(),
            colors: None,
            material,
        }
    }

    /// Attaches a per-point colour buffer. Its length must match the point count.
    pub fn with_colors(mut self, colors: Vec<Color>) -> Result<Self> {
        if colors.len() != self.positions.len() {
            return Err(SceneError::BufferMismatch {
                expected: self.positions.len(),
                actual: colors.len(),
            });
        }
        self.colors = Some(colors.into_boxed_slice());
        Ok(self)
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// Mutable view of the positions. The slice cannot change length.
    #[inline]
    pub fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    #[inline]
    #[must_use]
    pub fn colors(&self) -> Option<&[Color]> {
        self.colors.as_deref()
    }

    /// Translates every point by the matching entry of `velocities`.
    pub fn advance(&mut self, velocities: &[Vec3]) -> Result<()> {
        if velocities.len() != self.positions.len() {
            return Err(SceneError::BufferMismatch {
                expected: self.positions.len(),
                actual: velocities.len(),
            });
        }
        for (p, v) in self.positions.iter_mut().zip(velocities) {
            *p += *v;
        }
        Ok(())
    }
}

/// Wraps `value` to the opposite bound once it leaves `[-bound, bound]`.
///
/// Values exactly on a bound are left alone.
#[inline]
#[must_use]
pub fn wrap_vertical(value: f32, bound: f32) -> f32 {
    if value > bound {
        -bound
    } else if value < -bound {
        bound
    } else {
        value
    }
}
