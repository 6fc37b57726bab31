//! Leaf placement along the stem.
//!
//! Leaves are placed by normalized stem height so the same layout works for
//! any current stem length. Size shrinks linearly with height.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat};
use serde::{Deserialize, Serialize};

use super::petals::GOLDEN_ANGLE;

/// How leaves are distributed up the stem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeafArrangement {
    /// One leaf per node, successive nodes rotated by the golden angle
    Alternate,
    /// Pairs facing each other, successive pairs rotated a quarter turn
    Opposite,
    /// Rosette clustered at the base of the stem
    Basal,
}

/// One leaf relative to the stem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeafDescriptor {
    /// Attachment height as a fraction of the current stem height
    pub height: f32,
    /// Angle around the stem (radians)
    pub azimuth: f32,
    /// Tilt away from the stem axis (radians)
    pub inclination: f32,
    /// Blade half-extent at full leaf growth
    pub size: f32,
}

impl LeafDescriptor {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.inclination, self.azimuth, 0.0)
    }
}

const STEM_LEAF_INCLINATION: f32 = PI * 0.4;
const BASAL_LEAF_INCLINATION: f32 = PI * 0.45;

/// Fraction of size lost between the base and the top of the stem
const HEIGHT_SHRINK: f32 = 0.5;

fn shrink(size: f32, height: f32) -> f32 {
    size * (1.0 - HEIGHT_SHRINK * height)
}

/// Lay out `count` leaves of nominal `size` using `arrangement`.
pub fn arrange(arrangement: LeafArrangement, count: usize, size: f32) -> Vec<LeafDescriptor> {
    match arrangement {
        LeafArrangement::Alternate => (0..count)
            .map(|i| {
                let height = (i + 1) as f32 / (count + 1) as f32;
                LeafDescriptor {
                    height,
                    azimuth: i as f32 * GOLDEN_ANGLE,
                    inclination: STEM_LEAF_INCLINATION,
                    size: shrink(size, height),
                }
            })
            .collect(),
        LeafArrangement::Opposite => {
            // An odd count leaves the top node with a single leaf
            let pairs = count.div_ceil(2);
            (0..count)
                .map(|i| {
                    let pair = i / 2;
                    let height = (pair + 1) as f32 / (pairs + 1) as f32;
                    let side = if i % 2 == 0 { 0.0 } else { PI };
                    LeafDescriptor {
                        height,
                        azimuth: pair as f32 * PI * 0.5 + side,
                        inclination: STEM_LEAF_INCLINATION,
                        size: shrink(size, height),
                    }
                })
                .collect()
        }
        LeafArrangement::Basal => (0..count)
            .map(|i| {
                let height = 0.04 + 0.04 * i as f32;
                LeafDescriptor {
                    height,
                    azimuth: i as f32 / count as f32 * TAU,
                    inclination: BASAL_LEAF_INCLINATION,
                    size: shrink(size, height),
                }
            })
            .collect(),
    }
}
