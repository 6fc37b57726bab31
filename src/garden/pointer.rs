//! Pointer events from the scene harness and how the active tool maps them
//! onto garden intents.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::instance::FlowerId;
use super::settings::Tool;

/// A resolved click. The harness delivers exactly one per click; a click on
/// a flower never also produces a ground click.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PointerEvent {
    GroundClick { point: Vec3 },
    FlowerClick { id: FlowerId },
}

/// What a click asks the garden to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Sow(Vec3),
    Water(FlowerId),
    Fertilize(FlowerId),
    Ignore,
}

/// What a click actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "id", rename_all = "camelCase")]
pub enum PointerOutcome {
    Sowed(FlowerId),
    Watered(FlowerId),
    Fertilized(FlowerId),
    /// Wrong tool for the target, or the flower is gone
    Ignored,
}

/// Map `event` under `tool` onto an intent. Ground clicks only sow, and
/// only with the sow tool; flower clicks do nothing with the sow tool.
pub fn resolve(tool: Tool, event: PointerEvent) -> Intent {
    match (tool, event) {
        (Tool::Sow, PointerEvent::GroundClick { point }) => Intent::Sow(Vec3::new(point.x, 0.0, point.z)),
        (Tool::Water, PointerEvent::FlowerClick { id }) => Intent::Water(id),
        (Tool::Fertilize, PointerEvent::FlowerClick { id }) => Intent::Fertilize(id),
        _ => Intent::Ignore,
    }
}
