//! Time-of-day sky lighting.
//!
//! [`SkyLighting::at`] turns the hour slider into a sun position, light
//! intensities and a night flag. Sky and ground colors come from the theme.

pub mod time;

pub use time::TimeOfDay;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Distance of the sun from the garden center.
const SUN_DISTANCE: f32 = 50.0;
/// Fixed sideways offset so the sun never sits directly overhead.
const SUN_OFFSET_Z: f32 = 20.0;

const AMBIENT_DAY: f32 = 0.6;
const AMBIENT_NIGHT: f32 = 0.2;
const DIRECTIONAL_DAY: f32 = 1.5;
const DIRECTIONAL_NIGHT: f32 = 0.1;

/// Lighting for one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkyLighting {
    pub hour: f32,
    pub sun_position: Vec3,
    pub is_night: bool,
    pub ambient_intensity: f32,
    pub directional_intensity: f32,
    pub stars_visible: bool,
}

impl SkyLighting {
    pub fn at(time: TimeOfDay) -> Self {
        let angle = time.sun_angle();
        let is_night = time.is_night();
        Self {
            hour: time.hour(),
            sun_position: Vec3::new(angle.sin() * SUN_DISTANCE, angle.cos() * SUN_DISTANCE, SUN_OFFSET_Z),
            is_night,
            ambient_intensity: if is_night { AMBIENT_NIGHT } else { AMBIENT_DAY },
            directional_intensity: if is_night { DIRECTIONAL_NIGHT } else { DIRECTIONAL_DAY },
            stars_visible: is_night,
        }
    }

    /// Normalized direction from the garden toward the sun.
    pub fn sun_direction(&self) -> Vec3 {
        self.sun_position.normalize_or_zero()
    }
}
