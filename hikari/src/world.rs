use std::sync::Arc;

use crate::{
    intersection::{Computations, Intersections},
    lights::{lighting, Light, PointLight},
    materials::Material,
    math::{point, transforms::scaling, Color, Ray, Tuple},
    shapes::Shape,
};

/// The objects and lights of a scene.
///
/// A `World` is only read while rendering, so it can be shared between
/// render threads as-is.
#[derive(Debug, Default)]
pub struct World {
    objects: Vec<Shape>,
    lights: Vec<Arc<dyn Light>>,
}

impl World {
    /// Creates a new empty `World`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the reference scene of two concentric spheres lit from the upper left.
    pub fn default_scene() -> Self {
        let mut ret = Self::new();
        ret.add_light(PointLight::new(point(-10.0, 10.0, -10.0), Color::WHITE));
        ret.add_object(Shape::sphere().with_material(Material {
            color: Color::new(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Material::default()
        }));
        ret.add_object(Shape::sphere().with_transform(scaling(0.5, 0.5, 0.5)));
        ret
    }

    pub fn add_object(&mut self, object: Shape) {
        self.objects.push(object);
    }

    pub fn add_light(&mut self, light: impl Light + 'static) {
        self.lights.push(Arc::new(light));
    }

    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    pub fn objects_mut(&mut self) -> &mut Vec<Shape> {
        &mut self.objects
    }

    pub fn lights(&self) -> &[Arc<dyn Light>] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut Vec<Arc<dyn Light>> {
        &mut self.lights
    }

    /// Intersects `ray` with every object, sorted by `t`.
    pub fn intersect(&self, ray: &Ray) -> Intersections<'_> {
        let mut hits = Vec::new();
        for object in &self.objects {
            object.intersect_into(ray, &mut hits);
        }
        Intersections::new(hits)
    }

    /// Checks if a shadow-casting object lies between `point` and `light_position`.
    pub fn is_occluded(&self, light_position: Tuple, point: Tuple) -> bool {
        let v = (light_position - point).as_vector();
        let distance = v.len();
        let ray = Ray::new(point, v / distance);

        self.intersect(&ray)
            .iter()
            .find(|i| i.t >= 0.0 && i.object.casts_shadow())
            .map_or(false, |i| i.t < distance)
    }

    /// Checks if `point` is occluded from the nominal position of `light`.
    pub fn is_shadowed(&self, point: Tuple, light: &dyn Light) -> bool {
        self.is_occluded(light.position(), point)
    }

    /// Returns the color at a hit, summing direct light from every light and
    /// reflections up to `remaining` bounces deep.
    pub fn shade_hit(&self, comps: &Computations, remaining: u32) -> Color {
        let object = comps.object;
        let material = object.material();

        let surface = self.lights.iter().fold(Color::BLACK, |acc, light| {
            let intensity = if object.receives_shadow() {
                light.intensity_at(comps.over_point, self)
            } else {
                1.0
            };
            acc + lighting(
                material,
                object,
                light.as_ref(),
                comps.over_point,
                comps.eyev,
                comps.normalv,
                intensity,
            )
        });

        surface + self.reflected_color(comps, remaining)
    }

    /// Returns the color reflected at a hit, black once `remaining` runs out.
    pub fn reflected_color(&self, comps: &Computations, remaining: u32) -> Color {
        let reflective = comps.object.material().reflective;
        if remaining == 0 || reflective == 0.0 {
            return Color::BLACK;
        }

        let reflect_ray = Ray::new(comps.over_point, comps.reflectv);
        self.color_at(&reflect_ray, remaining - 1) * reflective
    }

    /// Returns the color seen along `ray`, black if it hits nothing.
    pub fn color_at(&self, ray: &Ray, remaining: u32) -> Color {
        let hits = self.intersect(ray);
        match hits.hit() {
            Some(hit) => {
                let comps = hit.prepare_computations(ray);
                self.shade_hit(&comps, remaining)
            }
            None => Color::BLACK,
        }
    }
}
