//! Garden color palette and mood text.

use serde::{Deserialize, Serialize};

use crate::core::Color;

const PINK: Color = Color::rgb(0xff, 0x7e, 0xb9);
const SKY_BLUE: Color = Color::rgb(0x87, 0xce, 0xeb);

/// Theme record. Replaced wholesale, never merged field by field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenTheme {
    pub primary_color: Color,
    pub secondary_color: Color,
    pub ground_color: Color,
    pub sky_color: Color,
    pub mood_description: String,
}

impl GardenTheme {
    /// Theme shown before any mood has been submitted.
    pub fn initial() -> Self {
        Self {
            primary_color: PINK,
            secondary_color: Color::rgb(0xff, 0xea, 0x00),
            ground_color: Color::rgb(0x1a, 0x2e, 0x1a),
            sky_color: SKY_BLUE,
            mood_description: "A secret garden in the morning light.".to_string(),
        }
    }

    /// Theme used whenever the mood provider fails.
    pub fn fallback() -> Self {
        Self {
            primary_color: PINK,
            secondary_color: Color::rgb(0x7a, 0xfc, 0xff),
            ground_color: Color::rgb(0x2d, 0x5a, 0x27),
            sky_color: SKY_BLUE,
            mood_description: "A gentle, blooming sanctuary of peace.".to_string(),
        }
    }
}

impl Default for GardenTheme {
    fn default() -> Self {
        Self::initial()
    }
}
