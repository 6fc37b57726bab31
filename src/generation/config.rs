//! Layout configuration for the three garden styles.

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Scatter parameters for the wild style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WildLayout {
    pub count: usize,
    /// Flowers land in [-half_extent, half_extent) on x and z.
    pub half_extent: f32,
}

impl Default for WildLayout {
    fn default() -> Self {
        Self { count: 45, half_extent: 25.0 }
    }
}

/// Largest accepted grid radius (a 201 x 201 grid)
pub const MAX_ORDERED_RADIUS: i32 = 100;

/// Grid parameters for the ordered style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderedLayout {
    /// Cells run from -radius to radius inclusive on both axes.
    pub radius: i32,
    pub spacing: f32,
}

impl Default for OrderedLayout {
    fn default() -> Self {
        Self { radius: 4, spacing: 4.0 }
    }
}

impl OrderedLayout {
    /// Cells per side (9 at the default radius)
    pub fn side(&self) -> usize {
        self.radius.max(0) as usize * 2 + 1
    }
}

/// Cluster parameters for the zen style.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZenLayout {
    pub clusters: usize,
    pub members: usize,
    /// Full width of the square cluster centers are drawn from.
    pub center_spread: f32,
    /// Full width of the per-member jitter square.
    pub jitter: f32,
}

impl Default for ZenLayout {
    fn default() -> Self {
        Self { clusters: 3, members: 6, center_spread: 30.0, jitter: 5.0 }
    }
}

/// Configuration for the daily layout generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub wild: WildLayout,
    pub ordered: OrderedLayout,
    pub zen: ZenLayout,
}

impl LayoutConfig {
    pub fn validate(&self) -> Result<()> {
        if self.wild.half_extent <= 0.0 {
            return Err(Error::Config("wild half_extent must be positive".into()));
        }
        if !(0..=MAX_ORDERED_RADIUS).contains(&self.ordered.radius) {
            return Err(Error::Config(format!(
                "ordered radius must lie in [0, {}]",
                MAX_ORDERED_RADIUS
            )));
        }
        if self.ordered.spacing <= 0.0 {
            return Err(Error::Config("ordered spacing must be positive".into()));
        }
        if self.zen.center_spread < 0.0 || self.zen.jitter < 0.0 {
            return Err(Error::Config("zen spread and jitter must not be negative".into()));
        }
        Ok(())
    }
}
