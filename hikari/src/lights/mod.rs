mod area_light;
mod point_light;

pub use area_light::{AreaLight, JitterSequence};
pub use point_light::PointLight;

use std::fmt::Debug;

use crate::{
    materials::Material,
    math::{Color, Tuple},
    shapes::Shape,
    world::World,
};

/// A light source sampled over a `usteps` by `vsteps` grid of positions.
pub trait Light: Send + Sync + Debug {
    /// Returns the color and brightness of this `Light`.
    fn intensity(&self) -> Color;
    /// Returns the nominal position of this `Light`.
    fn position(&self) -> Tuple;
    fn usteps(&self) -> usize;
    fn vsteps(&self) -> usize;
    /// Returns a sample position in cell (`u`, `v`) of this `Light`.
    fn point_on_light(&self, u: usize, v: usize) -> Tuple;

    fn samples(&self) -> usize {
        self.usteps() * self.vsteps()
    }

    /// Returns the fraction of this `Light`'s samples that reach `point` unoccluded in `world`.
    fn intensity_at(&self, point: Tuple, world: &World) -> f64 {
        let mut total = 0.0;
        for v in 0..self.vsteps() {
            for u in 0..self.usteps() {
                if !world.is_occluded(self.point_on_light(u, v), point) {
                    total += 1.0;
                }
            }
        }
        total / self.samples() as f64
    }
}

/// Phong shading of `point` on `object` lit by `light`.
///
/// Diffuse and specular terms are averaged over the light's samples and scaled
/// by `intensity`, the unoccluded fraction of the light. Ambient is unaffected.
pub fn lighting(
    material: &Material,
    object: &Shape,
    light: &dyn Light,
    point: Tuple,
    eyev: Tuple,
    normalv: Tuple,
    intensity: f64,
) -> Color {
    let effective_color = material.color_at(object, point) * light.intensity();
    let ambient = effective_color * material.ambient;
    if intensity <= 0.0 {
        return ambient;
    }

    let mut sum = Color::BLACK;
    for v in 0..light.vsteps() {
        for u in 0..light.usteps() {
            let lightv = (light.point_on_light(u, v) - point).normalized();
            let light_dot_normal = lightv.dot(normalv);
            if light_dot_normal < 0.0 {
                continue;
            }

            sum += effective_color * material.diffuse * light_dot_normal;

            let reflectv = (-lightv).reflect(normalv);
            let reflect_dot_eye = reflectv.dot(eyev);
            if reflect_dot_eye > 0.0 {
                let factor = reflect_dot_eye.powf(material.shininess);
                sum += light.intensity() * material.specular * factor;
            }
        }
    }

    ambient + sum / light.samples() as f64 * intensity
}
