//! User-controlled garden settings, layout styles and tools.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::Error;

/// Layout style of the garden of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GardenStyle {
    #[default]
    Wild,
    Ordered,
    Zen,
}

impl GardenStyle {
    pub const ALL: [GardenStyle; 3] = [GardenStyle::Wild, GardenStyle::Ordered, GardenStyle::Zen];

    /// Tag appended to the date when seeding the daily RNG.
    pub fn tag(self) -> &'static str {
        match self {
            GardenStyle::Wild => "wild",
            GardenStyle::Ordered => "ordered",
            GardenStyle::Zen => "zen",
        }
    }
}

impl fmt::Display for GardenStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for GardenStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GardenStyle::ALL
            .into_iter()
            .find(|style| style.tag().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownStyle(s.to_string()))
    }
}

/// What a pointer click does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tool {
    #[default]
    Sow,
    Water,
    Fertilize,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Sow => "SOW",
            Tool::Water => "WATER",
            Tool::Fertilize => "FERTILIZE",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Tool::Sow, Tool::Water, Tool::Fertilize]
            .into_iter()
            .find(|tool| tool.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownTool(s.to_string()))
    }
}

pub const WIND_RANGE: (f32, f32) = (0.0, 10.0);
pub const HEIGHT_RANGE: (f32, f32) = (0.5, 3.0);
pub const HOURS_PER_DAY: f32 = 24.0;

/// Environment sliders, independent of the theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GardenSettings {
    pub wind_speed: f32,
    /// Multiplier on every flower's stem height
    pub flower_height: f32,
    pub color_richness: f32,
    pub bloom_intensity: f32,
    /// Hour of day, 0-24
    pub time_of_day: f32,
    pub garden_style: GardenStyle,
}

impl Default for GardenSettings {
    fn default() -> Self {
        Self {
            wind_speed: 1.2,
            flower_height: 1.4,
            color_richness: 0.8,
            bloom_intensity: 0.5,
            time_of_day: 9.0,
            garden_style: GardenStyle::Wild,
        }
    }
}

impl GardenSettings {
    /// Clamp every slider into its range.
    pub fn clamped(mut self) -> Self {
        self.wind_speed = self.wind_speed.clamp(WIND_RANGE.0, WIND_RANGE.1);
        self.flower_height = self.flower_height.clamp(HEIGHT_RANGE.0, HEIGHT_RANGE.1);
        self.color_richness = self.color_richness.clamp(0.0, 1.0);
        self.bloom_intensity = self.bloom_intensity.clamp(0.0, 1.0);
        self.time_of_day = self.time_of_day.clamp(0.0, HOURS_PER_DAY);
        self
    }
}

/// Partial settings update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flower_height: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_richness: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bloom_intensity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub garden_style: Option<GardenStyle>,
}

impl SettingsPatch {
    pub fn apply(&self, base: &GardenSettings) -> GardenSettings {
        GardenSettings {
            wind_speed: self.wind_speed.unwrap_or(base.wind_speed),
            flower_height: self.flower_height.unwrap_or(base.flower_height),
            color_richness: self.color_richness.unwrap_or(base.color_richness),
            bloom_intensity: self.bloom_intensity.unwrap_or(base.bloom_intensity),
            time_of_day: self.time_of_day.unwrap_or(base.time_of_day),
            garden_style: self.garden_style.unwrap_or(base.garden_style),
        }
        .clamped()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_settings() {
        let s = GardenSettings::default();
        assert_eq!(s.wind_speed, 1.2);
        assert_eq!(s.flower_height, 1.4);
        assert_eq!(s.time_of_day, 9.0);
        assert_eq!(s.garden_style, GardenStyle::Wild);
    }

    #[test]
    fn test_settings_json_is_camel_case() {
        let json = serde_json::to_value(GardenSettings::default()).unwrap();
        assert_eq!(json["gardenStyle"], "wild");
        assert!(json.get("timeOfDay").is_some());
        let parsed: GardenSettings = serde_json::from_str(r#"{"gardenStyle":"zen"}"#).unwrap();
        assert_eq!(parsed.garden_style, GardenStyle::Zen);
        assert_eq!(parsed.wind_speed, 1.2);
    }

    #[test]
    fn test_style_parse() {
        assert_eq!("Ordered".parse::<GardenStyle>().unwrap(), GardenStyle::Ordered);
        assert!(matches!("baroque".parse::<GardenStyle>(), Err(Error::UnknownStyle(_))));
    }

    #[test]
    fn test_tool_parse() {
        assert_eq!("water".parse::<Tool>().unwrap(), Tool::Water);
        assert!(matches!("shovel".parse::<Tool>(), Err(Error::UnknownTool(_))));
        assert_eq!(serde_json::to_string(&Tool::Fertilize).unwrap(), "\"FERTILIZE\"");
    }

    #[test]
    fn test_patch_applies_and_clamps() {
        let patch = SettingsPatch { wind_speed: Some(50.0), time_of_day: Some(20.5), ..Default::default() };
        let s = patch.apply(&GardenSettings::default());
        assert_eq!(s.wind_speed, 10.0);
        assert_eq!(s.time_of_day, 20.5);
        assert_eq!(s.flower_height, 1.4);
    }
}
