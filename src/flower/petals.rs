//! Petal layouts per species.
//!
//! Every layout is expressed in head space: the origin is the top of the
//! stem, +Y points along the stem. A petal's orientation is the Euler XYZ
//! rotation `(inclination, -azimuth, 0)`, so inclination 0 is a petal
//! pointing straight up and `PI / 2` lies flat.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Golden angle in radians, `PI * (3 - sqrt(5))`.
pub const GOLDEN_ANGLE: f32 = 2.399_963_2;

/// Outline used to pick a petal mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetalShape {
    Thin,
    Oval,
    Heart,
    Pointed,
}

/// One petal in head space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PetalDescriptor {
    /// Attachment point relative to the head origin
    pub position: Vec3,
    /// Tilt away from the stem axis (radians)
    pub inclination: f32,
    /// Angle around the stem axis (radians)
    pub azimuth: f32,
    /// Ellipsoid half-extents (width, length, thickness)
    pub scale: Vec3,
    pub shape: PetalShape,
}

impl PetalDescriptor {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.inclination, -self.azimuth, 0.0)
    }
}

/// Evenly spaced ring of identical petals.
fn ring(
    count: usize,
    radius: f32,
    lift: f32,
    inclination: f32,
    scale: Vec3,
    shape: PetalShape,
) -> impl Iterator<Item = PetalDescriptor> {
    (0..count).map(move |i| {
        let azimuth = i as f32 / count as f32 * TAU;
        PetalDescriptor {
            position: Vec3::new(azimuth.cos() * radius, lift, azimuth.sin() * radius),
            inclination,
            azimuth,
            scale,
            shape,
        }
    })
}

/// Daisy: one radial ring of thin petals.
pub fn daisy() -> Vec<PetalDescriptor> {
    ring(18, 0.15, 0.0, PI * 0.45, Vec3::new(0.05, 0.35, 0.01), PetalShape::Thin).collect()
}

/// Tulip: six broad petals forming a cup, alternating between an inner
/// and an outer tilt.
pub fn tulip() -> Vec<PetalDescriptor> {
    ring(6, 0.1, 0.2, 0.0, Vec3::new(0.25, 0.5, 0.05), PetalShape::Oval)
        .enumerate()
        .map(|(i, mut petal)| {
            let (radius, tilt) = if i % 2 == 0 { (0.09, 0.08) } else { (0.11, 0.12) };
            petal.position.x = petal.azimuth.cos() * radius;
            petal.position.z = petal.azimuth.sin() * radius;
            petal.inclination = PI * tilt;
            petal
        })
        .collect()
}

/// Rose: golden-angle spiral. Later petals sit further out, higher and
/// flare wider.
pub fn rose() -> Vec<PetalDescriptor> {
    const COUNT: usize = 30;
    (0..COUNT)
        .map(|i| {
            let t = i as f32 / COUNT as f32;
            let azimuth = i as f32 * GOLDEN_ANGLE;
            let radius = t * 0.15;
            PetalDescriptor {
                position: Vec3::new(azimuth.cos() * radius, t * 0.2, azimuth.sin() * radius),
                inclination: PI * (0.2 + t * 0.5),
                azimuth,
                scale: Vec3::new(0.1 + t * 0.1, 0.15 + t * 0.1, 0.02),
                shape: PetalShape::Heart,
            }
        })
        .collect()
}

/// Sunflower: a single ring of long, nearly horizontal petals around the disc.
pub fn sunflower() -> Vec<PetalDescriptor> {
    ring(32, 0.35, 0.0, PI * 0.48, Vec3::new(0.08, 0.4, 0.02), PetalShape::Pointed).collect()
}

/// Lotus: three concentric layers (8, 12, 16 petals), opening further
/// with each layer.
pub fn lotus() -> Vec<PetalDescriptor> {
    (0..3)
        .flat_map(|layer| {
            let l = layer as f32;
            ring(
                8 + layer * 4,
                0.15 + l * 0.1,
                l * 0.05,
                PI * (0.3 + l * 0.1),
                Vec3::new(0.2, 0.4, 0.03),
                PetalShape::Pointed,
            )
        })
        .collect()
}
