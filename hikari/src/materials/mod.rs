use crate::{
    math::{Color, Tuple},
    patterns::Pattern,
    shapes::Shape,
};

/// Phong surface description.
///
/// `transparency` and `refractive_index` are carried for scene descriptions
/// that set them but don't affect shading.
#[derive(Clone, Debug)]
pub struct Material {
    pub color: Color,
    /// Overrides `color` when set
    pub pattern: Option<Pattern>,
    pub ambient: f64,
    pub diffuse: f64,
    pub specular: f64,
    pub shininess: f64,
    pub reflective: f64,
    pub transparency: f64,
    pub refractive_index: f64,
}

impl Material {
    /// Returns the surface color of `object` at world-space `point`.
    pub fn color_at(&self, object: &Shape, point: Tuple) -> Color {
        match &self.pattern {
            Some(pattern) => pattern.color_at_shape(object, point),
            None => self.color,
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_pattern(mut self, pattern: Pattern) -> Self {
        self.pattern = Some(pattern);
        self
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            pattern: None,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
        }
    }
}
