//! Per-frame growth, bloom and wind evaluation.
//!
//! Everything here is a pure function of the instance state and the elapsed
//! time. Nothing accumulates between frames, so evaluating the same inputs
//! at any time `t` always produces the same transform.

use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::core::{Color, Error, Result};

use super::structure::{sway_mass, StaticStructure};
use super::Species;

/// Sub-range of the growth scalar driving one visual part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub start: f32,
    pub end: f32,
}

impl PhaseWindow {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Progress through this window for `growth`, clamped to 0.0-1.0.
    pub fn fraction(&self, growth: f32) -> f32 {
        ((growth - self.start) / (self.end - self.start)).clamp(0.0, 1.0)
    }
}

/// Overlapping growth windows: stem first, then leaves, then the bloom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthPhases {
    pub stem: PhaseWindow,
    pub leaf: PhaseWindow,
    pub bloom: PhaseWindow,
}

impl Default for GrowthPhases {
    fn default() -> Self {
        Self {
            stem: PhaseWindow::new(0.0, 0.5),
            leaf: PhaseWindow::new(0.3, 0.7),
            bloom: PhaseWindow::new(0.6, 1.0),
        }
    }
}

impl GrowthPhases {
    /// Check every window is a non-empty sub-range of 0.0-1.0 and that the
    /// windows open in stem, leaf, bloom order.
    pub fn validate(&self) -> Result<()> {
        for (name, window) in [("stem", self.stem), ("leaf", self.leaf), ("bloom", self.bloom)] {
            let in_range = (0.0..=1.0).contains(&window.start) && (0.0..=1.0).contains(&window.end);
            if !in_range || window.start >= window.end {
                return Err(Error::Config(format!(
                    "{name} phase window [{}, {}] must satisfy 0 <= start < end <= 1",
                    window.start, window.end
                )));
            }
        }
        if self.stem.start > self.leaf.start || self.leaf.start > self.bloom.start {
            return Err(Error::Config("growth phases must open in stem, leaf, bloom order".into()));
        }
        Ok(())
    }
}

/// Instance state consumed by [`evaluate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthInput {
    pub species: Species,
    pub growth: f32,
    pub hydration: f32,
    pub nutrients: f32,
    pub base_scale: f32,
    /// Yaw around the stem axis (radians)
    pub rotation: f32,
    /// Ground position; only x and z feed the sway phase
    pub position: Vec3,
}

/// Frame-wide inputs shared by every flower.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameParams {
    /// Seconds since the garden loop started
    pub elapsed: f32,
    pub wind_speed: f32,
    pub height_multiplier: f32,
}

/// Result of evaluating one flower at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DynamicTransform {
    pub stem_fraction: f32,
    pub leaf_fraction: f32,
    pub bloom_fraction: f32,
    /// Current stem length in world units
    pub stem_height: f32,
    /// Multiplier applied to every leaf's full-grown size
    pub leaf_scale: f32,
    /// Breathing factor, 1.0 at rest
    pub pulse: f32,
    /// `bloom_fraction * pulse`
    pub head_scale: f32,
    /// Whole-plant tilt: x = rotation about X, y = rotation about Z
    pub sway: Vec2,
}

const SWAY_X_AMPLITUDE: f32 = 0.04;
const SWAY_Z_AMPLITUDE: f32 = 0.02;
const SWAY_Z_FREQUENCY: f32 = 0.8;
const PULSE_FREQUENCY: f32 = 2.0;
const PULSE_AMPLITUDE: f32 = 0.02;

/// Evaluate growth phases, wind sway and bloom pulse for one flower.
pub fn evaluate(input: &GrowthInput, frame: &FrameParams, phases: &GrowthPhases) -> DynamicTransform {
    let stem_fraction = phases.stem.fraction(input.growth);
    let leaf_fraction = phases.leaf.fraction(input.growth);
    let bloom_fraction = phases.bloom.fraction(input.growth);

    let stem_height = input.base_scale * frame.height_multiplier * stem_fraction;

    // Taller plants lean further; heavy heads respond slower to the wind
    let mass = sway_mass(input.species);
    let t = frame.elapsed;
    let sway = Vec2::new(
        (t * frame.wind_speed / mass + input.position.x).sin() * SWAY_X_AMPLITUDE * stem_height,
        (t * frame.wind_speed * SWAY_Z_FREQUENCY / mass + input.position.z).cos()
            * SWAY_Z_AMPLITUDE
            * stem_height,
    );

    let pulse = 1.0 + (t * PULSE_FREQUENCY).sin() * PULSE_AMPLITUDE * input.nutrients;

    DynamicTransform {
        stem_fraction,
        leaf_fraction,
        bloom_fraction,
        stem_height,
        leaf_scale: leaf_fraction,
        pulse,
        head_scale: bloom_fraction * pulse,
        sway,
    }
}

// ---------------------------------------------------------------------------
// Frame composition
// ---------------------------------------------------------------------------

const STEM_WET: Color = Color::rgb(0x34, 0x4e, 0x41);
const STEM_DRY: Color = Color::rgb(0x58, 0x81, 0x57);
const LEAF_GREEN: Color = Color::rgb(0x3a, 0x5a, 0x40);
const HYDRATED_THRESHOLD: f32 = 0.4;
const LEAF_THICKNESS: f32 = 0.01;
const PETAL_OPACITY: f32 = 0.95;

/// Surface colors and emission for one flower.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowerMaterials {
    pub petal: Color,
    pub petal_emissive: f32,
    pub petal_opacity: f32,
    pub stem: Color,
    pub leaf: Color,
    pub center: Color,
    pub disc: Option<Color>,
}

impl FlowerMaterials {
    pub fn new(petal: Color, input: &GrowthInput, structure: &StaticStructure) -> Self {
        Self {
            petal,
            petal_emissive: 0.1 + input.nutrients * 0.2,
            petal_opacity: PETAL_OPACITY,
            stem: if input.hydration > HYDRATED_THRESHOLD { STEM_WET } else { STEM_DRY },
            leaf: LEAF_GREEN,
            center: structure.center.color,
            disc: structure.disc.map(|d| d.color),
        }
    }
}

/// World-space matrices for every part of one flower.
///
/// The stem matrix maps a unit-height cylinder centered on the origin;
/// its radii are carried separately because the stem tapers.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowerFrame {
    pub transform: DynamicTransform,
    pub root: Mat4,
    pub stem: Mat4,
    pub stem_radii: (f32, f32),
    pub leaves: Vec<Mat4>,
    pub head: Mat4,
    pub petals: Vec<Mat4>,
    pub center: Mat4,
    pub disc: Option<Mat4>,
    pub materials: FlowerMaterials,
}

impl FlowerFrame {
    /// Compose the part hierarchy: root -> stem / leaves / head -> petals.
    pub fn compose(
        input: &GrowthInput,
        transform: DynamicTransform,
        structure: &StaticStructure,
        petal_color: Color,
    ) -> Self {
        let h = transform.stem_height;
        let root = Mat4::from_rotation_translation(
            Quat::from_euler(EulerRot::XYZ, transform.sway.x, input.rotation, transform.sway.y),
            input.position,
        );

        let stem = root
            * Mat4::from_translation(Vec3::new(0.0, h * 0.5, 0.0))
            * Mat4::from_scale(Vec3::new(1.0, h, 1.0));

        let leaves = structure
            .leaves
            .iter()
            .map(|leaf| {
                let size = leaf.size * transform.leaf_scale;
                root * Mat4::from_scale_rotation_translation(
                    Vec3::new(size, size, LEAF_THICKNESS),
                    leaf.rotation(),
                    Vec3::new(0.0, leaf.height * h, 0.0),
                )
            })
            .collect();

        let head = root
            * Mat4::from_translation(Vec3::new(0.0, h, 0.0))
            * Mat4::from_scale(Vec3::splat(transform.head_scale));

        let petals = structure
            .petals
            .iter()
            .map(|petal| {
                head * Mat4::from_scale_rotation_translation(petal.scale, petal.rotation(), petal.position)
            })
            .collect();

        let center = head
            * Mat4::from_scale_rotation_translation(
                Vec3::splat(structure.center.radius),
                Quat::IDENTITY,
                Vec3::new(0.0, structure.center.offset, 0.0),
            );

        let disc = structure.disc.map(|disc| {
            head * Mat4::from_scale_rotation_translation(
                Vec3::splat(disc.radius),
                Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
                Vec3::ZERO,
            )
        });

        Self {
            transform,
            root,
            stem,
            stem_radii: (structure.stem.base_radius, structure.stem.tip_radius()),
            leaves,
            head,
            petals,
            center,
            disc,
            materials: FlowerMaterials::new(petal_color, input, structure),
        }
    }

    /// World-space top of the stem
    pub fn head_position(&self) -> Vec3 {
        self.head.w_axis.truncate()
    }
}
