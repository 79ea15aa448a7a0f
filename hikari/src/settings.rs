use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::{
    camera::Camera,
    hikari_info,
    math::{
        point, transforms::view_transform, vector, DEFAULT_INVERSE_CACHE_CAPACITY, EPSILON,
    },
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse settings: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Checks the values a settings struct can't express through its types alone.
trait Validate {
    fn validate(&self) -> Result<(), SettingsError> {
        Ok(())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Worker thread count, 0 for one per logical core
    pub threads: usize,
    /// Side length of the square tiles workers claim, 1 for per-pixel claiming
    pub tile_dim: usize,
    /// Reflection recursion budget
    pub max_bounces: u32,
    /// Pixels buffered between stream workers and the consumer
    pub stream_capacity: usize,
    pub inverse_cache_capacity: usize,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            threads: 0,
            tile_dim: 16,
            max_bounces: 5,
            stream_capacity: 1024,
            inverse_cache_capacity: DEFAULT_INVERSE_CACHE_CAPACITY,
        }
    }
}

impl RenderSettings {
    /// Returns the number of worker threads to launch.
    pub fn thread_count(&self) -> usize {
        if self.threads == 0 {
            num_cpus::get()
        } else {
            self.threads
        }
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, SettingsError> {
        from_yaml_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load(path.as_ref())
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CameraSettings {
    pub hsize: usize,
    pub vsize: usize,
    /// In radians
    pub field_of_view: f64,
    pub from: [f64; 3],
    pub to: [f64; 3],
    pub up: [f64; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            hsize: 640,
            vsize: 480,
            field_of_view: std::f64::consts::FRAC_PI_3,
            from: [0.0, 1.5, -5.0],
            to: [0.0, 1.0, 0.0],
            up: [0.0, 1.0, 0.0],
        }
    }
}

impl CameraSettings {
    /// Creates a new [Camera] looking from `from` toward `to`.
    ///
    /// Fails if the image is empty, the field of view is outside (0, pi) or
    /// `from`, `to` and `up` don't define a view direction and an up vector.
    pub fn camera(&self) -> Result<Camera, SettingsError> {
        self.validate()?;
        let [fx, fy, fz] = self.from;
        let [tx, ty, tz] = self.to;
        let [ux, uy, uz] = self.up;
        Ok(
            Camera::new(self.hsize, self.vsize, self.field_of_view).with_transform(
                view_transform(point(fx, fy, fz), point(tx, ty, tz), vector(ux, uy, uz)),
            ),
        )
    }

    pub fn from_yaml_str(s: &str) -> Result<Self, SettingsError> {
        from_yaml_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load(path.as_ref())
    }
}

impl Validate for RenderSettings {}

impl Validate for CameraSettings {
    fn validate(&self) -> Result<(), SettingsError> {
        let invalid =
            |msg: String| -> Result<(), SettingsError> { Err(SettingsError::Invalid(msg)) };

        if self.hsize == 0 || self.vsize == 0 {
            return invalid(format!("Empty camera image {}x{}", self.hsize, self.vsize));
        }
        if !(self.field_of_view > 0.0 && self.field_of_view < std::f64::consts::PI) {
            return invalid(format!("Field of view {} is not in (0, pi)", self.field_of_view));
        }

        let [fx, fy, fz] = self.from;
        let [tx, ty, tz] = self.to;
        let [ux, uy, uz] = self.up;
        let forward = vector(tx - fx, ty - fy, tz - fz);
        let up = vector(ux, uy, uz);
        if !(forward.len() > EPSILON) {
            return invalid(format!("Camera looks from {:?} to itself", self.from));
        }
        if !(up.len() > EPSILON) {
            return invalid(format!("Camera up {:?} has no direction", self.up));
        }
        if !(forward.normalized().cross(up.normalized()).len() > EPSILON) {
            return invalid(format!(
                "Camera up {:?} is parallel to the view direction",
                self.up
            ));
        }
        Ok(())
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<(), SettingsError> {
        self.render.validate()?;
        self.camera.validate()
    }
}

/// Render and camera settings stored together, as in a settings file.
#[derive(Debug, Copy, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub render: RenderSettings,
    pub camera: CameraSettings,
}

impl Settings {
    pub fn from_yaml_str(s: &str) -> Result<Self, SettingsError> {
        from_yaml_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        load(path.as_ref())
    }

    pub fn to_yaml_string(&self) -> Result<String, SettingsError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

fn from_yaml_str<T: DeserializeOwned + Default + Validate>(s: &str) -> Result<T, SettingsError> {
    // An empty document parses as null rather than an empty mapping
    if s.trim().is_empty() {
        return Ok(T::default());
    }
    let ret: T = serde_yaml::from_str(s)?;
    ret.validate()?;
    Ok(ret)
}

fn load<T: DeserializeOwned + Default + Validate>(path: &Path) -> Result<T, SettingsError> {
    hikari_info!("Loading settings from '{}'", path.display());
    let s = std::fs::read_to_string(path)?;
    from_yaml_str(&s)
}
