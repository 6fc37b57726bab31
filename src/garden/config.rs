//! Garden configuration, loadable from a JSON file.
//!
//! Every section is `#[serde(default)]`, so a partial file only overrides
//! what it names.

use std::f32::consts::TAU;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::flower::{GrowthConfig, Species};
use crate::generation::{LayoutConfig, SimpleRng};

use super::settings::GardenSettings;
use super::store::SowRequest;
use super::theme::GardenTheme;

/// Water and fertilizer effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CareConfig {
    pub water_delta: f32,
    pub fertilize_delta: f32,
    /// Permanent scale multiplier applied on every fertilize
    pub fertilize_scale: f32,
}

impl Default for CareConfig {
    fn default() -> Self {
        Self { water_delta: 0.3, fertilize_delta: 0.3, fertilize_scale: 1.05 }
    }
}

/// Traits of freshly sown flowers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SowConfig {
    pub scale_min: f32,
    pub scale_span: f32,
    pub hydration: f32,
    pub nutrients: f32,
    /// Draws above this pick the theme's primary color
    pub primary_above: f32,
}

impl Default for SowConfig {
    fn default() -> Self {
        Self {
            scale_min: 0.8,
            scale_span: 0.6,
            hydration: 1.0,
            nutrients: 1.0,
            primary_above: 0.5,
        }
    }
}

impl SowConfig {
    /// Draw color, scale and yaw (in that order) for a new flower.
    pub fn draw(&self, species: Species, position: Vec3, theme: &GardenTheme, rng: &mut SimpleRng) -> SowRequest {
        let color = if rng.next_float() > self.primary_above {
            theme.primary_color
        } else {
            theme.secondary_color
        };
        let base_scale = self.scale_min + rng.next_float() * self.scale_span;
        let rotation = rng.next_float() * TAU;
        SowRequest {
            species,
            position,
            color,
            base_scale,
            rotation,
            hydration: self.hydration,
            nutrients: self.nutrients,
        }
    }
}

/// Mood theme HTTP provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeProviderConfig {
    pub endpoint: String,
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for ThemeProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            api_key_env: "GEMINI_API_KEY".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GardenConfig {
    pub settings: GardenSettings,
    pub layout: LayoutConfig,
    pub growth: GrowthConfig,
    pub care: CareConfig,
    pub sow: SowConfig,
    pub theme_provider: ThemeProviderConfig,
    /// Rebuild the garden of the day whenever the theme changes
    pub regenerate_on_theme_change: bool,
    pub frame_rate: u32,
    pub control_port: u16,
}

impl Default for GardenConfig {
    fn default() -> Self {
        Self {
            settings: GardenSettings::default(),
            layout: LayoutConfig::default(),
            growth: GrowthConfig::default(),
            care: CareConfig::default(),
            sow: SowConfig::default(),
            theme_provider: ThemeProviderConfig::default(),
            regenerate_on_theme_change: true,
            frame_rate: 60,
            control_port: 9843,
        }
    }
}

impl GardenConfig {
    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.growth.validate()?;
        if self.frame_rate == 0 {
            return Err(Error::Config("frame_rate must be positive".into()));
        }
        if !(self.care.water_delta >= 0.0 && self.care.fertilize_delta >= 0.0) {
            return Err(Error::Config("care deltas must not be negative".into()));
        }
        if self.care.fertilize_scale <= 0.0 {
            return Err(Error::Config("fertilize_scale must be positive".into()));
        }
        if self.sow.scale_min <= 0.0 {
            return Err(Error::Config("sow scale_min must be positive".into()));
        }
        if !(0.0..=1.0).contains(&self.sow.hydration) || !(0.0..=1.0).contains(&self.sow.nutrients) {
            return Err(Error::Config("sow hydration and nutrients must lie in [0, 1]".into()));
        }
        if self.theme_provider.timeout_secs == 0 {
            return Err(Error::Config("theme provider timeout_secs must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("garden.json");
        let mut config = GardenConfig::default();
        config.control_port = 9000;
        config.care.water_delta = 0.25;
        config.save(&path).unwrap();
        assert_eq!(GardenConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garden.json");
        std::fs::write(&path, r#"{"settings":{"gardenStyle":"zen"},"growth":{"step":0.05}}"#).unwrap();
        let config = GardenConfig::load(&path).unwrap();
        assert_eq!(config.settings.garden_style, crate::garden::GardenStyle::Zen);
        assert_eq!(config.growth.step, 0.05);
        assert_eq!(config.growth.tick_interval_ms, 30);
        assert_eq!(config.frame_rate, 60);
        assert!(config.regenerate_on_theme_change);
    }

    #[test]
    fn test_load_rejects_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garden.json");
        std::fs::write(&path, r#"{"growth":{"step":0}}"#).unwrap();
        assert!(matches!(GardenConfig::load(&path), Err(Error::Config(_))));
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(GardenConfig::load(&path), Err(Error::Json(_))));
        assert!(matches!(GardenConfig::load(dir.path().join("missing.json")), Err(Error::Io(_))));
    }

    #[test]
    fn test_load_rejects_negative_care_delta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garden.json");
        std::fs::write(&path, r#"{"care":{"water_delta":-2.0,"fertilize_delta":-2.0}}"#).unwrap();
        assert!(matches!(GardenConfig::load(&path), Err(Error::Config(_))));
        std::fs::write(&path, r#"{"care":{"fertilize_delta":-0.1}}"#).unwrap();
        assert!(matches!(GardenConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_sow_vigor_range() {
        let mut config = GardenConfig::default();
        config.sow.hydration = 1.5;
        assert!(config.validate().is_err());
        config.sow.hydration = 0.9;
        config.sow.nutrients = -0.1;
        assert!(config.validate().is_err());
        config.sow.nutrients = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = GardenConfig::default();
        config.theme_provider.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_sow_draw_ranges() {
        let cfg = SowConfig::default();
        let theme = GardenTheme::initial();
        let mut rng = SimpleRng::new(3);
        for _ in 0..200 {
            let req = cfg.draw(Species::Tulip, Vec3::new(1.0, 0.0, 2.0), &theme, &mut rng);
            assert!((0.8..=1.4).contains(&req.base_scale));
            assert!((0.0..=TAU).contains(&req.rotation));
            assert!(req.color == theme.primary_color || req.color == theme.secondary_color);
            assert_eq!(req.hydration, 1.0);
        }
    }
}
