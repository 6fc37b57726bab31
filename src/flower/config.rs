//! Growth configuration: ramp timing and phase windows.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

use super::growth::GrowthPhases;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    /// Milliseconds between growth ramp ticks (independent of frame rate).
    pub tick_interval_ms: u64,
    /// Growth added per ramp tick.
    pub step: f32,
    /// Stem / leaf / bloom windows over the growth scalar.
    pub phases: GrowthPhases,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 30,
            step: 0.015,
            phases: GrowthPhases::default(),
        }
    }
}

impl GrowthConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(Error::Config("growth tick interval must be positive".into()));
        }
        if !(self.step > 0.0 && self.step <= 1.0) {
            return Err(Error::Config(format!("growth step {} must be in (0, 1]", self.step)));
        }
        self.phases.validate()
    }
}
