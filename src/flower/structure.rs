//! Static per-species flower structure.
//!
//! [`synthesize`] maps a species to its petal, leaf and stem layout through a
//! lookup table of builder functions, one per species, in the same spirit as
//! the tree style presets: plain data, no instance state.

use serde::{Deserialize, Serialize};

use crate::core::Color;

use super::leaves::{self, LeafArrangement, LeafDescriptor};
use super::petals::{self, PetalDescriptor};
use super::Species;

/// Stem cylinder parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StemParams {
    /// Radius at ground level
    pub base_radius: f32,
    /// Tip radius as a fraction of the base radius
    pub tip_ratio: f32,
    /// Radial segments of the stem mesh
    pub radial_segments: u32,
    /// Inertia divisor for wind sway. Heavier heads sway slower.
    pub mass: f32,
}

impl StemParams {
    pub fn tip_radius(&self) -> f32 {
        self.base_radius * self.tip_ratio
    }
}

/// Pistil / seed head at the center of the bloom
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CenterParams {
    pub radius: f32,
    /// Height above the head origin
    pub offset: f32,
    pub color: Color,
}

/// Flat disc behind the center (sunflower only)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiscParams {
    pub radius: f32,
    pub color: Color,
}

/// Complete static layout for one species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticStructure {
    pub species: Species,
    pub petals: Vec<PetalDescriptor>,
    pub leaf_arrangement: LeafArrangement,
    pub leaves: Vec<LeafDescriptor>,
    pub stem: StemParams,
    pub center: CenterParams,
    pub disc: Option<DiscParams>,
}

const STEM_TIP_RATIO: f32 = 0.7;
const STEM_SEGMENTS: u32 = 12;
const LIGHT_MASS: f32 = 0.5;
const HEAVY_MASS: f32 = 2.0;

const POLLEN_YELLOW: Color = Color::rgb(0xff, 0xcc, 0x00);
const SEED_BROWN: Color = Color::rgb(0x3d, 0x2b, 0x1f);
const DISC_BROWN: Color = Color::rgb(0x2d, 0x1e, 0x14);

/// Wind inertia for `species`. Only the sunflower's heavy head is slowed.
pub fn sway_mass(species: Species) -> f32 {
    match species {
        Species::Sunflower => HEAVY_MASS,
        _ => LIGHT_MASS,
    }
}

fn stem(species: Species, base_radius: f32) -> StemParams {
    StemParams {
        base_radius,
        tip_ratio: STEM_TIP_RATIO,
        radial_segments: STEM_SEGMENTS,
        mass: sway_mass(species),
    }
}

fn small_center() -> CenterParams {
    CenterParams { radius: 0.1, offset: 0.05, color: POLLEN_YELLOW }
}

fn build(
    species: Species,
    petals: Vec<PetalDescriptor>,
    arrangement: LeafArrangement,
    leaf_count: usize,
    leaf_size: f32,
    stem: StemParams,
) -> StaticStructure {
    StaticStructure {
        species,
        petals,
        leaf_arrangement: arrangement,
        leaves: leaves::arrange(arrangement, leaf_count, leaf_size),
        stem,
        center: small_center(),
        disc: None,
    }
}

fn daisy() -> StaticStructure {
    build(Species::Daisy, petals::daisy(), LeafArrangement::Basal, 4, 0.25, stem(Species::Daisy, 0.015))
}

fn tulip() -> StaticStructure {
    build(Species::Tulip, petals::tulip(), LeafArrangement::Basal, 2, 0.5, stem(Species::Tulip, 0.02))
}

fn rose() -> StaticStructure {
    build(Species::Rose, petals::rose(), LeafArrangement::Alternate, 5, 0.25, stem(Species::Rose, 0.015))
}

fn sunflower() -> StaticStructure {
    let mut structure = build(
        Species::Sunflower,
        petals::sunflower(),
        LeafArrangement::Opposite,
        4,
        0.4,
        stem(Species::Sunflower, 0.05),
    );
    structure.center = CenterParams { radius: 0.3, offset: 0.05, color: SEED_BROWN };
    structure.disc = Some(DiscParams { radius: 0.32, color: DISC_BROWN });
    structure
}

fn lotus() -> StaticStructure {
    build(Species::Lotus, petals::lotus(), LeafArrangement::Basal, 3, 0.35, stem(Species::Lotus, 0.015))
}

type Synthesizer = fn() -> StaticStructure;

/// Builder per species, indexed by [`Species::index`].
const SYNTHESIZERS: [(Species, Synthesizer); 5] = [
    (Species::Daisy, daisy),
    (Species::Tulip, tulip),
    (Species::Rose, rose),
    (Species::Sunflower, sunflower),
    (Species::Lotus, lotus),
];

/// Build the static structure for `species`. Pure; identical input always
/// yields an identical structure.
pub fn synthesize(species: Species) -> StaticStructure {
    let (key, builder) = SYNTHESIZERS[species.index()];
    debug_assert_eq!(key, species, "synthesizer table out of order");
    builder()
}
