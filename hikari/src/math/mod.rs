mod bounds;
mod color;
mod common;
mod inverse_cache;
mod matrix;
mod ray;
mod transform;
pub mod transforms;
mod tuple;

pub use bounds::BoundingBox;
pub(crate) use bounds::check_axis;
pub use color::Color;
pub use common::{float_eq, EPSILON};
pub use inverse_cache::{InverseCache, DEFAULT_INVERSE_CACHE_CAPACITY};
pub use matrix::Matrix4;
pub use ray::Ray;
pub use transform::Transform;
pub use tuple::{point, vector, Tuple};
