use crate::resources::color::Color;

/// Lit surface material for solids (Phong-style parameters).
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMaterial {
    pub color: Color,
    pub emissive: Color,
    pub opacity: f32,
    pub transparent: bool,
    pub wireframe: bool,
    pub shininess: f32,
}

impl MeshMaterial {
    #[must_use]
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_emissive(mut self, emissive: Color) -> Self {
        self.emissive = emissive;
        self
    }

    /// Sets the opacity and marks the material transparent when below one.
    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = opacity < 1.0;
        self
    }

    #[must_use]
    pub fn with_wireframe(mut self, wireframe: bool) -> Self {
        self.wireframe = wireframe;
        self
    }

    #[must_use]
    pub fn with_shininess(mut self, shininess: f32) -> Self {
        self.shininess = shininess;
        self
    }
}

impl Default for MeshMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            emissive: Color::BLACK,
            opacity: 1.0,
            transparent: false,
            wireframe: false,
            shininess: 30.0,
        }
    }
}

/// Material for point clouds.
#[derive(Debug, Clone, PartialEq)]
pub struct PointsMaterial {
    pub color: Color,
    /// Point size in world units.
    pub size: f32,
    pub opacity: f32,
    pub transparent: bool,
    /// Use the cloud's per-point colour buffer instead of `color`.
    pub vertex_colors: bool,
}

impl PointsMaterial {
    #[must_use]
    pub fn new(color: Color, size: f32) -> Self {
        Self {
            color,
            size,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self.transparent = true;
        self
    }

    #[must_use]
    pub fn with_vertex_colors(mut self) -> Self {
        self.vertex_colors = true;
        self
    }
}

impl Default for PointsMaterial {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            size: 1.0,
            opacity: 1.0,
            transparent: false,
            vertex_colors: false,
        }
    }
}
