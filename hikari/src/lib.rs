//! A Whitted-style software ray tracer.
//!
//! Scenes are built from [`shapes::Shape`] trees and [`lights::Light`]s
//! gathered in a [`world::World`], then rendered through a [`camera::Camera`]
//! into a [`canvas::Canvas`] by a pool of worker threads.

#[doc(hidden)]
pub use log as __log;

mod macros;

pub mod camera;
pub mod canvas;
pub mod intersection;
pub mod lights;
pub mod materials;
pub mod math;
pub mod patterns;
pub mod renderer;
pub mod settings;
pub mod shapes;
pub mod world;
