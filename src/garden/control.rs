//! Control commands applied to a [`Garden`].
//!
//! The control server forwards every command to the garden loop, which
//! calls [`handle_command`]. Mood submissions cannot finish here: they
//! hand the accepted mood back so the loop can run the provider request
//! without blocking frames.

use glam::Vec3;
use moodgarden_debug::{DebugCommand, DebugResponse, ResponseData};
use serde::Serialize;

use crate::core::time::FrameStats;
use crate::core::{Color, Result};
use crate::flower::{DynamicTransform, FlowerMaterials, Species};

use super::{FlowerId, Garden, GardenStats, GardenStyle, PointerEvent, SettingsPatch, Tool};

/// Result of one control command.
#[derive(Debug)]
pub struct ControlOutcome {
    pub response: DebugResponse,
    /// Mood accepted for resolution; the caller must eventually call
    /// [`Garden::complete_mood`].
    pub mood: Option<String>,
}

impl From<DebugResponse> for ControlOutcome {
    fn from(response: DebugResponse) -> Self {
        Self { response, mood: None }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FlowerEvaluation {
    id: FlowerId,
    time: f32,
    transform: DynamicTransform,
    head_position: Vec3,
    materials: FlowerMaterials,
    petal_count: usize,
    leaf_count: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CareResult {
    id: FlowerId,
    applied: bool,
}

#[derive(Serialize)]
struct Stats<'a> {
    garden: GardenStats,
    frame: &'a FrameStats,
    ground: Color,
    sky: Color,
}

fn respond<T>(result: Result<T>, ok: impl FnOnce(T) -> DebugResponse) -> DebugResponse {
    match result {
        Ok(value) => ok(value),
        Err(e) => DebugResponse::error(e.to_string()),
    }
}

/// Apply `command` to `garden`.
pub fn handle_command(garden: &mut Garden, command: DebugCommand, frame: &FrameStats) -> ControlOutcome {
    let response = match command {
        DebugCommand::Ping => DebugResponse::pong(),

        DebugCommand::GetGarden => DebugResponse::value(&garden.store().as_slice()),

        DebugCommand::GetTheme => DebugResponse::value(garden.theme()),

        DebugCommand::GetSettings => DebugResponse::value(garden.settings()),

        DebugCommand::SetSettings {
            wind_speed,
            flower_height,
            color_richness,
            bloom_intensity,
            time_of_day,
            garden_style,
        } => {
            let style = garden_style.map(|s| s.parse::<GardenStyle>()).transpose();
            respond(style, |garden_style| {
                let patch = SettingsPatch {
                    wind_speed,
                    flower_height,
                    color_richness,
                    bloom_intensity,
                    time_of_day,
                    garden_style,
                };
                DebugResponse::value(garden.set_settings(&patch))
            })
        }

        DebugCommand::SetStyle { style } => respond(style.parse::<GardenStyle>(), |style| {
            if garden.set_style(style) {
                DebugResponse::updated(format!("style {} ({} flowers)", style, garden.store().len()))
            } else {
                DebugResponse::updated(format!("style already {}", style))
            }
        }),

        DebugCommand::SetTool { tool } => respond(tool.parse::<Tool>(), |tool| {
            garden.set_tool(tool);
            DebugResponse::updated(format!("tool {}", tool))
        }),

        DebugCommand::SelectSpecies { species } => respond(species.parse::<Species>(), |species| {
            garden.select_species(species);
            DebugResponse::updated(format!("species {}", species))
        }),

        DebugCommand::GroundClick { x, y, z } => {
            let outcome = garden.pointer(PointerEvent::GroundClick { point: Vec3::new(x, y, z) });
            DebugResponse::value(&outcome)
        }

        DebugCommand::FlowerClick { id } => respond(id.parse::<FlowerId>(), |id| {
            DebugResponse::value(&garden.pointer(PointerEvent::FlowerClick { id }))
        }),

        DebugCommand::Sow { species, x, z } => respond(species.parse::<Species>(), |species| {
            let id = garden.sow(species, Vec3::new(x, 0.0, z));
            DebugResponse::ok(ResponseData::Sowed { id: id.to_string() })
        }),

        DebugCommand::Water { id } => respond(id.parse::<FlowerId>(), |id| {
            let applied = garden.water(id);
            DebugResponse::value(&CareResult { id, applied })
        }),

        DebugCommand::Fertilize { id } => respond(id.parse::<FlowerId>(), |id| {
            let applied = garden.fertilize(id);
            DebugResponse::value(&CareResult { id, applied })
        }),

        DebugCommand::Clear => {
            garden.clear();
            DebugResponse::none()
        }

        DebugCommand::Regenerate => {
            garden.regenerate();
            DebugResponse::updated(format!("{} flowers", garden.store().len()))
        }

        DebugCommand::SubmitMood { mood } => {
            return match garden.submit_mood(&mood) {
                Ok(mood) => ControlOutcome {
                    response: DebugResponse::updated(format!("weaving \"{}\"", mood)),
                    mood: Some(mood),
                },
                Err(e) => DebugResponse::error(e.to_string()).into(),
            };
        }

        DebugCommand::EvaluateFlower { id, time } => respond(id.parse::<FlowerId>(), |id| {
            match garden.evaluate_flower(id, time) {
                Some(frame) => DebugResponse::value(&FlowerEvaluation {
                    id,
                    time,
                    transform: frame.transform,
                    head_position: frame.head_position(),
                    materials: frame.materials,
                    petal_count: frame.petals.len(),
                    leaf_count: frame.leaves.len(),
                }),
                None => DebugResponse::error(format!("no flower {}", id)),
            }
        }),

        DebugCommand::GetStats => DebugResponse::value(&Stats {
            garden: garden.stats(),
            frame,
            ground: garden.theme().ground_color,
            sky: garden.theme().sky_color,
        }),
    };
    response.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::garden::{GardenConfig, GardenTheme};
    use crate::generation::SimpleRng;

    fn garden() -> Garden {
        let mut g = Garden::new(GardenConfig::default(), "2024-05-01", SimpleRng::new(5));
        g.clear();
        g
    }

    fn stats() -> FrameStats {
        FrameStats { fps: 60.0, frame_count: 10, elapsed_secs: 0.5 }
    }

    fn run(g: &mut Garden, command: DebugCommand) -> DebugResponse {
        handle_command(g, command, &stats()).response
    }

    fn data(response: DebugResponse) -> serde_json::Value {
        match response {
            DebugResponse::Ok { data: ResponseData::Value(v) } => v,
            other => panic!("expected value response, got {other:?}"),
        }
    }

    #[test]
    fn test_ping() {
        assert_eq!(run(&mut garden(), DebugCommand::Ping), DebugResponse::pong());
    }

    #[test]
    fn test_sow_and_care() {
        let mut g = garden();
        let resp = run(&mut g, DebugCommand::Sow { species: "rose".into(), x: 1.0, z: 2.0 });
        let DebugResponse::Ok { data: ResponseData::Sowed { id } } = resp else {
            panic!("expected sow response");
        };
        assert_eq!(id, "sown-1");

        let watered = data(run(&mut g, DebugCommand::Water { id: id.clone() }));
        assert_eq!(watered["applied"], true);

        let stale = data(run(&mut g, DebugCommand::Fertilize { id: "wild-3".into() }));
        assert_eq!(stale["applied"], false);
    }

    #[test]
    fn test_unknown_names_fail_fast() {
        let mut g = garden();
        assert!(!run(&mut g, DebugCommand::Sow { species: "orchid".into(), x: 0.0, z: 0.0 }).is_ok());
        assert!(!run(&mut g, DebugCommand::SetStyle { style: "baroque".into() }).is_ok());
        assert!(!run(&mut g, DebugCommand::SetTool { tool: "rake".into() }).is_ok());
        assert!(!run(&mut g, DebugCommand::Water { id: "k3j2h1g0f".into() }).is_ok());
        assert!(g.store().is_empty());
    }

    #[test]
    fn test_settings_roundtrip() {
        let mut g = garden();
        let resp = run(
            &mut g,
            DebugCommand::SetSettings {
                wind_speed: Some(4.0),
                flower_height: None,
                color_richness: None,
                bloom_intensity: None,
                time_of_day: Some(21.0),
                garden_style: Some("ordered".into()),
            },
        );
        let settings = data(resp);
        assert_eq!(settings["windSpeed"], 4.0);
        assert_eq!(settings["gardenStyle"], "ordered");
        assert_eq!(g.store().len(), 81);
    }

    #[test]
    fn test_pointer_commands() {
        let mut g = garden();
        run(&mut g, DebugCommand::SelectSpecies { species: "LOTUS".into() });
        let sowed = data(run(&mut g, DebugCommand::GroundClick { x: 1.0, y: 0.0, z: 1.0 }));
        assert_eq!(sowed["action"], "sowed");
        let id = sowed["id"].as_str().unwrap().to_string();

        run(&mut g, DebugCommand::SetTool { tool: "WATER".into() });
        let watered = data(run(&mut g, DebugCommand::FlowerClick { id }));
        assert_eq!(watered["action"], "watered");
    }

    #[test]
    fn test_mood_submission_hands_back_mood() {
        let mut g = garden();
        let outcome = handle_command(&mut g, DebugCommand::SubmitMood { mood: " quiet ".into() }, &stats());
        assert_eq!(outcome.mood.as_deref(), Some("quiet"));
        assert!(outcome.response.is_ok());

        let again = handle_command(&mut g, DebugCommand::SubmitMood { mood: "loud".into() }, &stats());
        assert!(again.mood.is_none());
        assert!(!again.response.is_ok());

        g.complete_mood(GardenTheme::fallback());
        let theme = data(run(&mut g, DebugCommand::GetTheme));
        assert_eq!(theme["secondaryColor"], "#7afcff");
    }

    #[test]
    fn test_evaluate_flower() {
        let mut g = garden();
        g.sow(Species::Sunflower, Vec3::ZERO);
        let eval = data(run(&mut g, DebugCommand::EvaluateFlower { id: "sown-1".into(), time: 1.0 }));
        assert_eq!(eval["petalCount"], 32);
        assert_eq!(eval["transform"]["stem_height"], 0.0);
        assert!(!run(&mut g, DebugCommand::EvaluateFlower { id: "sown-9".into(), time: 1.0 }).is_ok());
    }

    #[test]
    fn test_stats() {
        let mut g = garden();
        g.sow(Species::Daisy, Vec3::ZERO);
        let stats = data(run(&mut g, DebugCommand::GetStats));
        assert_eq!(stats["garden"]["flowers"], 1);
        assert_eq!(stats["garden"]["growing"], 1);
        assert_eq!(stats["frame"]["frame_count"], 10);
    }
}
