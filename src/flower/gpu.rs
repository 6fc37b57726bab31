//! GPU-ready per-part instance data (96 bytes, 16-byte aligned).
//!
//! A composed [`FlowerFrame`] flattens into one [`PartInstance`] per mesh
//! part so a renderer can draw a whole garden with one instanced call per
//! part kind.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::core::Color;

use super::growth::FlowerFrame;

/// Which unit mesh a [`PartInstance`] draws.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Stem = 0,
    Leaf = 1,
    Petal = 2,
    Center = 3,
    Disc = 4,
}

impl PartKind {
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Stem),
            1 => Some(Self::Leaf),
            2 => Some(Self::Petal),
            3 => Some(Self::Center),
            4 => Some(Self::Disc),
            _ => None,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct PartInstance {
    pub model: [[f32; 4]; 4],
    // -- 64 bytes --
    pub color: [f32; 4],
    // -- 16 bytes --
    pub emissive: f32,
    pub kind: u32,
    /// Tip radius over base radius (stems only, 1.0 otherwise)
    pub taper: f32,
    pub _pad: f32,
    // -- 16 bytes --
    // Total: 96 bytes
}

impl PartInstance {
    pub fn new(kind: PartKind, model: Mat4, color: Color, alpha: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: color.to_rgba(alpha),
            emissive: 0.0,
            kind: kind as u32,
            taper: 1.0,
            _pad: 0.0,
        }
    }

    pub fn kind(&self) -> Option<PartKind> {
        PartKind::from_raw(self.kind)
    }
}

/// Append every part of `frame` to `out`. Stems fold their base radius into
/// the model matrix and carry the taper separately.
pub fn flatten(frame: &FlowerFrame, out: &mut Vec<PartInstance>) {
    let m = &frame.materials;
    let (base, tip) = frame.stem_radii;

    let mut stem = PartInstance::new(
        PartKind::Stem,
        frame.stem * Mat4::from_scale(Vec3::new(base, 1.0, base)),
        m.stem,
        1.0,
    );
    stem.taper = if base > 0.0 { tip / base } else { 1.0 };
    out.push(stem);

    out.extend(frame.leaves.iter().map(|model| PartInstance::new(PartKind::Leaf, *model, m.leaf, 1.0)));

    out.extend(frame.petals.iter().map(|model| {
        let mut petal = PartInstance::new(PartKind::Petal, *model, m.petal, m.petal_opacity);
        petal.emissive = m.petal_emissive;
        petal
    }));

    out.push(PartInstance::new(PartKind::Center, frame.center, m.center, 1.0));

    if let (Some(model), Some(color)) = (frame.disc, m.disc) {
        out.push(PartInstance::new(PartKind::Disc, model, color, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flower::growth::{evaluate, FrameParams, GrowthInput, GrowthPhases};
    use crate::flower::structure::synthesize;
    use crate::flower::Species;

    #[test]
    fn test_part_instance_size() {
        assert_eq!(std::mem::size_of::<PartInstance>(), 96);
    }

    #[test]
    fn test_part_instance_alignment() {
        assert_eq!(std::mem::size_of::<PartInstance>() % 16, 0);
    }

    #[test]
    fn test_bytemuck_cast() {
        let p = PartInstance::zeroed();
        let bytes = bytemuck::bytes_of(&p);
        assert_eq!(bytes.len(), 96);
    }

    fn frame_for(species: Species) -> FlowerFrame {
        let input = GrowthInput {
            species,
            growth: 1.0,
            hydration: 1.0,
            nutrients: 0.5,
            base_scale: 1.0,
            rotation: 0.0,
            position: Vec3::ZERO,
        };
        let structure = synthesize(species);
        let transform = evaluate(
            &input,
            &FrameParams { elapsed: 0.0, wind_speed: 1.2, height_multiplier: 1.4 },
            &GrowthPhases::default(),
        );
        FlowerFrame::compose(&input, transform, &structure, Color::rgb(255, 0, 0))
    }

    #[test]
    fn test_flatten_counts_every_part() {
        for species in Species::ALL {
            let structure = synthesize(species);
            let frame = frame_for(species);
            let mut out = Vec::new();
            flatten(&frame, &mut out);
            let expected = 1 + structure.leaves.len() + structure.petals.len() + 1 + usize::from(structure.disc.is_some());
            assert_eq!(out.len(), expected, "{species}");
        }
    }

    #[test]
    fn test_flatten_marks_petals_emissive() {
        let mut out = Vec::new();
        flatten(&frame_for(Species::Daisy), &mut out);
        let petals: Vec<_> = out.iter().filter(|p| p.kind() == Some(PartKind::Petal)).collect();
        assert_eq!(petals.len(), 18);
        for petal in petals {
            assert!((petal.emissive - 0.2).abs() < 1e-6);
            assert!((petal.color[3] - 0.95).abs() < 1e-6);
        }
        let stem = out[0];
        assert_eq!(stem.kind(), Some(PartKind::Stem));
        assert!((stem.taper - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_part_kind_roundtrip() {
        for raw in 0..5 {
            assert_eq!(PartKind::from_raw(raw).map(|k| k as u32), Some(raw));
        }
        assert_eq!(PartKind::from_raw(5), None);
    }
}
