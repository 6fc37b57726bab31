//! Control protocol - JSON command/response definitions
//!
//! One JSON object per line in each direction. Species, styles, tools and
//! flower ids travel as strings and are validated by the garden.

use serde::{Deserialize, Serialize};

/// Commands sent by a control client (panel, scene harness, scripts)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", content = "params")]
pub enum DebugCommand {
    /// Ping (health check)
    Ping,
    /// Every flower with its current state
    GetGarden,
    /// Active theme
    GetTheme,
    /// Current settings
    GetSettings,
    /// Update settings (only specified fields are updated)
    SetSettings {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        wind_speed: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        flower_height: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color_richness: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bloom_intensity: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time_of_day: Option<f32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        garden_style: Option<String>,
    },
    /// Switch layout style (wild, ordered, zen)
    SetStyle { style: String },
    /// Select the active tool (SOW, WATER, FERTILIZE)
    SetTool { tool: String },
    /// Species planted by ground clicks
    SelectSpecies { species: String },
    /// Pointer hit the ground at a world point
    GroundClick { x: f32, y: f32, z: f32 },
    /// Pointer hit a flower
    FlowerClick { id: String },
    /// Sow a flower directly, regardless of the active tool
    Sow { species: String, x: f32, z: f32 },
    Water { id: String },
    Fertilize { id: String },
    /// Remove every flower
    Clear,
    /// Rebuild the garden of the day
    Regenerate,
    /// Ask the theme provider for a palette matching a mood
    SubmitMood { mood: String },
    /// Evaluate one flower at a given time (seconds)
    EvaluateFlower { id: String, time: f32 },
    /// Garden counters plus frame statistics
    GetStats,
}

/// Responses from the control server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum DebugResponse {
    #[serde(rename = "ok")]
    Ok { data: ResponseData },
    #[serde(rename = "error")]
    Error { message: String },
}

/// Response data variants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResponseData {
    None,
    Pong { message: String },
    Sowed { id: String },
    ParamsUpdated { description: String },
    /// Structured payload serialized by the garden (flowers, theme, frames)
    Value(serde_json::Value),
}

impl DebugResponse {
    pub fn ok(data: ResponseData) -> Self {
        Self::Ok { data }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self::Error {
            message: msg.into(),
        }
    }

    pub fn pong() -> Self {
        Self::ok(ResponseData::Pong {
            message: "pong".into(),
        })
    }

    pub fn none() -> Self {
        Self::ok(ResponseData::None)
    }

    pub fn updated(description: impl Into<String>) -> Self {
        Self::ok(ResponseData::ParamsUpdated {
            description: description.into(),
        })
    }

    /// Serialize `value` into an ok response.
    pub fn value<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => Self::ok(ResponseData::Value(v)),
            Err(e) => Self::error(format!("Serialize error: {}", e)),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_command_wire_format() {
        let cmd: DebugCommand =
            serde_json::from_str(r#"{"cmd":"Sow","params":{"species":"ROSE","x":1.0,"z":2.0}}"#).unwrap();
        assert_eq!(cmd, DebugCommand::Sow { species: "ROSE".into(), x: 1.0, z: 2.0 });

        let ping: DebugCommand = serde_json::from_str(r#"{"cmd":"Ping"}"#).unwrap();
        assert_eq!(ping, DebugCommand::Ping);
    }

    #[test]
    fn test_partial_settings() {
        let cmd: DebugCommand =
            serde_json::from_str(r#"{"cmd":"SetSettings","params":{"wind_speed":3.5}}"#).unwrap();
        let DebugCommand::SetSettings { wind_speed, garden_style, .. } = cmd else {
            panic!("wrong command");
        };
        assert_eq!(wind_speed, Some(3.5));
        assert_eq!(garden_style, None);
    }

    #[test]
    fn test_unknown_command_rejected() {
        assert!(serde_json::from_str::<DebugCommand>(r#"{"cmd":"Explode"}"#).is_err());
    }

    #[test]
    fn test_response_wire_format() {
        let ok = serde_json::to_value(DebugResponse::pong()).unwrap();
        assert_eq!(ok, json!({"status": "ok", "data": {"message": "pong"}}));

        let err = serde_json::to_value(DebugResponse::error("no such flower")).unwrap();
        assert_eq!(err, json!({"status": "error", "message": "no such flower"}));

        let none = serde_json::to_value(DebugResponse::none()).unwrap();
        assert_eq!(none, json!({"status": "ok", "data": null}));
    }

    #[test]
    fn test_value_response() {
        let resp = DebugResponse::value(&json!({"flowers": 45}));
        assert!(resp.is_ok());
        let text = serde_json::to_string(&resp).unwrap();
        assert_eq!(text, r#"{"status":"ok","data":{"flowers":45}}"#);
    }
}
