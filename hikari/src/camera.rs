use std::sync::Arc;

use crate::{
    canvas::Canvas,
    math::{point, Ray, Transform},
    renderer::{self, PixelStream},
    settings::RenderSettings,
    world::World,
};

/// A pinhole camera looking down -z in its own space with the image plane at z = -1.
#[derive(Clone, Debug)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,
    transform: Transform,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    /// Creates a new `Camera` with a `hsize` by `vsize` image. `field_of_view` is in radians.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Self {
        assert!(hsize > 0 && vsize > 0, "Camera with an empty image");

        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;
        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view,
            transform: Transform::default(),
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / hsize as f64,
        }
    }

    /// Sets the world-to-camera transform, typically a view transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    /// Returns the world-space size of a pixel on the image plane.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Returns the world-space ray through the center of pixel (`px`, `py`).
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        let x_offset = (px as f64 + 0.5) * self.pixel_size;
        let y_offset = (py as f64 + 0.5) * self.pixel_size;

        // The camera looks toward -z so +x is to the left
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        let pixel = self.transform.inverse_apply(point(world_x, world_y, -1.0));
        let origin = self.transform.inverse_apply(point(0.0, 0.0, 0.0));
        let direction = (pixel - origin).normalized();

        Ray::new(origin, direction)
    }

    /// Renders `world` into a new [Canvas], blocking until every pixel is done.
    pub fn render(&self, world: &World, settings: &RenderSettings) -> Canvas {
        renderer::render(self, world, settings)
    }

    /// Starts rendering `world` in the background, yielding pixels as they finish.
    pub fn stream(&self, world: Arc<World>, settings: &RenderSettings) -> PixelStream {
        renderer::stream(self.clone(), world, settings)
    }
}
