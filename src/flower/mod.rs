//! Procedural flowers.
//!
//! A flower is described in two layers:
//! - [`StaticStructure`]: the per-species layout of petals, leaves and stem,
//!   independent of any instance state. Pure and cached by species in
//!   [`StructureLibrary`].
//! - [`DynamicTransform`]: the per-frame evaluation of growth phases, wind
//!   sway and bloom pulsing for one instance at one point in time.
//!
//! Sown flowers additionally own a [`GrowthRamp`] that walks their growth
//! from 0 to 1 on a fixed tick.

pub mod petals;
pub mod leaves;
pub mod structure;
pub mod library;
pub mod growth;
pub mod config;
pub mod ramp;
pub mod gpu;

pub use structure::{synthesize, sway_mass, CenterParams, DiscParams, StaticStructure, StemParams};
pub use petals::{PetalDescriptor, PetalShape};
pub use leaves::{LeafArrangement, LeafDescriptor};
pub use library::StructureLibrary;
pub use growth::{evaluate, DynamicTransform, FlowerFrame, FlowerMaterials, FrameParams, GrowthInput, GrowthPhases, PhaseWindow};
pub use config::GrowthConfig;
pub use ramp::{GrowthRamp, GrowthRamps, GrowthSink, RampState};
pub use gpu::{PartInstance, PartKind};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// The closed set of flower species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    Daisy,
    Tulip,
    Rose,
    Sunflower,
    Lotus,
}

impl Species {
    pub const COUNT: usize = 5;

    /// All species in declaration order. Layout draws index into this array,
    /// so reordering it changes every daily garden.
    pub const ALL: [Species; Self::COUNT] = [
        Species::Daisy,
        Species::Tulip,
        Species::Rose,
        Species::Sunflower,
        Species::Lotus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Species::Daisy => "DAISY",
            Species::Tulip => "TULIP",
            Species::Rose => "ROSE",
            Species::Sunflower => "SUNFLOWER",
            Species::Lotus => "LOTUS",
        }
    }

    /// Position in [`Species::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Species {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Species::ALL
            .into_iter()
            .find(|species| species.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownSpecies(s.to_string()))
    }
}

impl TryFrom<u8> for Species {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Species::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| Error::UnknownSpecies(format!("index {value}")))
    }
}
