//! Flower identity and per-instance state.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Color, Error};
use crate::flower::{GrowthInput, Species};

/// Stable identity of a flower for its whole lifetime.
///
/// Layout ids encode where the flower came from; sown ids come from a
/// monotonically increasing serial that is never reused within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum FlowerId {
    Grid { x: i32, z: i32 },
    Zen { cluster: u32, member: u32 },
    Wild(u32),
    Sown(u64),
}

impl fmt::Display for FlowerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowerId::Grid { x, z } => write!(f, "grid-{x}-{z}"),
            FlowerId::Zen { cluster, member } => write!(f, "zen-{cluster}-{member}"),
            FlowerId::Wild(i) => write!(f, "wild-{i}"),
            FlowerId::Sown(n) => write!(f, "sown-{n}"),
        }
    }
}

/// Split `"a-b"` where either side may carry its own leading minus sign.
fn split_pair<T: FromStr>(s: &str) -> Option<(T, T)> {
    let sep = s.get(1..)?.find('-')? + 1;
    let a = s[..sep].parse().ok()?;
    let b = s[sep + 1..].parse().ok()?;
    Some((a, b))
}

impl FromStr for FlowerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, rest) = s.split_once('-').ok_or_else(|| Error::InvalidId(s.to_string()))?;
        let id = match kind {
            "grid" => split_pair(rest).map(|(x, z)| FlowerId::Grid { x, z }),
            "zen" => split_pair(rest).map(|(cluster, member)| FlowerId::Zen { cluster, member }),
            "wild" => rest.parse().ok().map(FlowerId::Wild),
            "sown" => rest.parse().ok().map(FlowerId::Sown),
            _ => None,
        };
        // Only the canonical spelling is accepted ("wild-+3" and "wild-03" are not)
        id.filter(|id| id.to_string() == s)
            .ok_or_else(|| Error::InvalidId(s.to_string()))
    }
}

impl TryFrom<String> for FlowerId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<FlowerId> for String {
    fn from(id: FlowerId) -> Self {
        id.to_string()
    }
}

/// One placed flower.
///
/// Species, position, color, scale and yaw are fixed at creation, except
/// that fertilizing grows `base_scale` permanently. Growth, hydration and
/// nutrients stay in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerInstance {
    pub id: FlowerId,
    pub species: Species,
    /// Ground position; y is always 0
    pub position: Vec3,
    pub color: Color,
    pub base_scale: f32,
    /// Yaw in radians
    pub rotation: f32,
    pub growth: f32,
    pub hydration: f32,
    pub nutrients: f32,
}

impl FlowerInstance {
    pub fn growth_input(&self) -> GrowthInput {
        GrowthInput {
            species: self.species,
            growth: self.growth,
            hydration: self.hydration,
            nutrients: self.nutrients,
            base_scale: self.base_scale,
            rotation: self.rotation,
            position: self.position,
        }
    }

    pub fn is_mature(&self) -> bool {
        self.growth >= 1.0
    }
}
