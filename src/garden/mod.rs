//! The live garden.
//!
//! [`Garden`] owns every piece of mutable state: settings, theme, the
//! instance store, growth ramps, the structure cache and the mood weaver.
//! It is driven from a single loop: intents (sow, water, fertilize, clear,
//! style change, mood completion) mutate it between frames, and
//! [`Garden::frame`] evaluates every flower for the next frame.

pub mod config;
pub mod control;
pub mod gemini;
pub mod instance;
pub mod mood;
pub mod pointer;
pub mod settings;
pub mod store;
pub mod theme;

pub use config::{CareConfig, GardenConfig, SowConfig, ThemeProviderConfig};
pub use control::{handle_command, ControlOutcome};
pub use gemini::GeminiThemeProvider;
pub use instance::{FlowerId, FlowerInstance};
pub use mood::{parse_theme_payload, resolve_theme, MoodWeaver, ThemeError, ThemeProvider};
pub use pointer::{Intent, PointerEvent, PointerOutcome};
pub use settings::{GardenSettings, GardenStyle, SettingsPatch, Tool};
pub use store::{GardenStore, SowRequest};
pub use theme::GardenTheme;

use std::time::Duration;

use glam::Vec3;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::atmosphere::{SkyLighting, TimeOfDay};
use crate::core::{Color, Result};
use crate::flower::{evaluate, gpu, FlowerFrame, FrameParams, GrowthRamps, PartInstance, Species, StructureLibrary};
use crate::generation::{generate_for_day, SimpleRng};

/// One evaluated flower.
#[derive(Debug, Clone)]
pub struct RenderedFlower {
    pub id: FlowerId,
    pub frame: FlowerFrame,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone)]
pub struct GardenFrame {
    pub elapsed: f32,
    pub flowers: Vec<RenderedFlower>,
    pub lighting: SkyLighting,
    pub ground: Color,
    pub sky: Color,
}

impl GardenFrame {
    /// Flatten every flower into GPU instance records, in store order.
    pub fn part_instances(&self) -> Vec<PartInstance> {
        let mut out = Vec::new();
        for flower in &self.flowers {
            gpu::flatten(&flower.frame, &mut out);
        }
        out
    }
}

/// Snapshot of garden counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GardenStats {
    pub day: String,
    pub style: GardenStyle,
    pub flowers: usize,
    pub growing: usize,
    pub tool: Tool,
    pub selected_species: Species,
    pub mood_in_flight: bool,
    pub cached_structures: usize,
}

pub struct Garden {
    config: GardenConfig,
    settings: GardenSettings,
    theme: GardenTheme,
    /// Date (`YYYY-MM-DD`) the current layout was generated for
    day: String,
    store: GardenStore,
    ramps: GrowthRamps,
    library: StructureLibrary,
    weaver: MoodWeaver,
    rng: SimpleRng,
    tool: Tool,
    selected: Species,
}

impl Garden {
    /// Create a garden for `day` and lay out its flowers.
    pub fn new(config: GardenConfig, day: impl Into<String>, rng: SimpleRng) -> Self {
        let mut garden = Self {
            settings: config.settings.clone().clamped(),
            theme: GardenTheme::initial(),
            day: day.into(),
            store: GardenStore::new(config.care.clone()),
            ramps: GrowthRamps::from_config(&config.growth),
            library: StructureLibrary::warmed(),
            weaver: MoodWeaver::new(),
            rng,
            tool: Tool::Sow,
            selected: Species::Rose,
            config,
        };
        garden.regenerate();
        garden
    }

    pub fn config(&self) -> &GardenConfig {
        &self.config
    }

    pub fn settings(&self) -> &GardenSettings {
        &self.settings
    }

    pub fn theme(&self) -> &GardenTheme {
        &self.theme
    }

    pub fn day(&self) -> &str {
        &self.day
    }

    pub fn store(&self) -> &GardenStore {
        &self.store
    }

    pub fn ramps(&self) -> &GrowthRamps {
        &self.ramps
    }

    pub fn library(&self) -> &StructureLibrary {
        &self.library
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn selected_species(&self) -> Species {
        self.selected
    }

    pub fn is_mood_in_flight(&self) -> bool {
        self.weaver.is_in_flight()
    }

    // -- Layout -------------------------------------------------------------

    /// Replace the garden with the layout of the day for the current style.
    /// Live growth ramps are cancelled with the flowers they drive.
    pub fn regenerate(&mut self) {
        let cancelled = self.ramps.cancel_all();
        if cancelled > 0 {
            log::debug!("Cancelled {} growth ramps", cancelled);
        }
        let flowers = generate_for_day(&self.day, self.settings.garden_style, &self.theme, &self.config.layout);
        self.store.replace_all(flowers);
    }

    /// Switch layout style. Regenerates only when the style changes.
    pub fn set_style(&mut self, style: GardenStyle) -> bool {
        if self.settings.garden_style == style {
            return false;
        }
        log::info!("Garden style {} -> {}", self.settings.garden_style, style);
        self.settings.garden_style = style;
        self.regenerate();
        true
    }

    /// Apply a settings patch. A style change regenerates the layout.
    pub fn set_settings(&mut self, patch: &SettingsPatch) -> &GardenSettings {
        let next = patch.apply(&self.settings);
        let style = next.garden_style;
        self.settings = GardenSettings { garden_style: self.settings.garden_style, ..next };
        self.set_style(style);
        &self.settings
    }

    /// Move to a new date. Regenerates when the date changes.
    pub fn roll_day(&mut self, date: &str) -> bool {
        if self.day == date {
            return false;
        }
        log::info!("New day {} (was {})", date, self.day);
        self.day = date.to_string();
        self.regenerate();
        true
    }

    /// Remove every flower and stop every ramp.
    pub fn clear(&mut self) {
        let count = self.store.len();
        self.ramps.cancel_all();
        self.store.reset();
        log::info!("Cleared garden ({} flowers)", count);
    }

    // -- Intents ------------------------------------------------------------

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn select_species(&mut self, species: Species) {
        self.selected = species;
    }

    /// Sow a seedling at `position` and start its growth ramp.
    pub fn sow(&mut self, species: Species, position: Vec3) -> FlowerId {
        let request = self.config.sow.draw(species, position, &self.theme, &mut self.rng);
        let id = self.store.sow(request);
        self.ramps.start(id);
        id
    }

    pub fn water(&mut self, id: FlowerId) -> bool {
        let hit = self.store.water(id);
        if hit {
            log::debug!("Watered {}", id);
        }
        hit
    }

    pub fn fertilize(&mut self, id: FlowerId) -> bool {
        let hit = self.store.fertilize(id);
        if hit {
            log::debug!("Fertilized {}", id);
        }
        hit
    }

    /// Apply a pointer event under the active tool.
    pub fn pointer(&mut self, event: PointerEvent) -> PointerOutcome {
        match pointer::resolve(self.tool, event) {
            Intent::Sow(position) => PointerOutcome::Sowed(self.sow(self.selected, position)),
            Intent::Water(id) if self.water(id) => PointerOutcome::Watered(id),
            Intent::Fertilize(id) if self.fertilize(id) => PointerOutcome::Fertilized(id),
            _ => PointerOutcome::Ignored,
        }
    }

    // -- Growth -------------------------------------------------------------

    /// Fire one growth tick for every live ramp.
    pub fn tick_growth(&mut self) -> usize {
        self.ramps.tick(&mut self.store)
    }

    /// Fire as many growth ticks as fit in `dt`.
    pub fn advance_growth(&mut self, dt: Duration) -> u32 {
        self.ramps.advance(dt, &mut self.store)
    }

    // -- Mood ---------------------------------------------------------------

    /// Start a mood request. Returns the trimmed mood to send to the
    /// provider; rejects blank moods and concurrent submissions.
    pub fn submit_mood(&mut self, mood: &str) -> Result<String> {
        match self.weaver.submit(mood) {
            Ok(mood) => {
                log::info!("Weaving mood \"{}\"", mood);
                Ok(mood)
            }
            Err(e) => {
                log::warn!("Mood rejected: {}", e);
                Err(e)
            }
        }
    }

    /// Finish the in-flight mood request with `theme`, replacing the current
    /// theme wholesale.
    pub fn complete_mood(&mut self, theme: GardenTheme) {
        self.weaver.finish();
        self.set_theme(theme);
    }

    pub fn set_theme(&mut self, theme: GardenTheme) {
        if theme == self.theme {
            return;
        }
        log::info!("Theme: {}", theme.mood_description);
        self.theme = theme;
        if self.config.regenerate_on_theme_change {
            self.regenerate();
        }
    }

    // -- Frames -------------------------------------------------------------

    fn frame_params(&self, elapsed: f32) -> FrameParams {
        FrameParams {
            elapsed,
            wind_speed: self.settings.wind_speed,
            height_multiplier: self.settings.flower_height,
        }
    }

    fn render(&self, flower: &FlowerInstance, params: &FrameParams) -> FlowerFrame {
        let input = flower.growth_input();
        let structure = self.library.get(flower.species);
        let transform = evaluate(&input, params, &self.config.growth.phases);
        FlowerFrame::compose(&input, transform, &structure, flower.color)
    }

    /// Evaluate one flower at `elapsed` seconds.
    pub fn evaluate_flower(&self, id: FlowerId, elapsed: f32) -> Option<FlowerFrame> {
        let params = self.frame_params(elapsed);
        self.store.get(id).map(|flower| self.render(flower, &params))
    }

    /// Evaluate every flower for the frame at `elapsed` seconds.
    pub fn frame(&self, elapsed: f32) -> GardenFrame {
        let params = self.frame_params(elapsed);
        let flowers = self
            .store
            .as_slice()
            .par_iter()
            .map(|flower| RenderedFlower { id: flower.id, frame: self.render(flower, &params) })
            .collect();
        GardenFrame {
            elapsed,
            flowers,
            lighting: SkyLighting::at(TimeOfDay::new(self.settings.time_of_day)),
            ground: self.theme.ground_color,
            sky: self.theme.sky_color,
        }
    }

    pub fn stats(&self) -> GardenStats {
        GardenStats {
            day: self.day.clone(),
            style: self.settings.garden_style,
            flowers: self.store.len(),
            growing: self.ramps.len(),
            tool: self.tool,
            selected_species: self.selected,
            mood_in_flight: self.weaver.is_in_flight(),
            cached_structures: self.library.cached_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;

    const DAY: &str = "2024-05-01";

    fn garden() -> Garden {
        Garden::new(GardenConfig::default(), DAY, SimpleRng::new(1))
    }

    fn empty_garden() -> Garden {
        let mut g = garden();
        g.clear();
        g
    }

    #[test]
    fn test_new_lays_out_wild_garden() {
        let g = garden();
        assert_eq!(g.store().len(), 45);
        assert!(g.store().iter().all(|f| f.growth == 1.0));
        assert_eq!(g.stats().cached_structures, Species::COUNT);
    }

    #[test]
    fn test_style_change_regenerates() {
        let mut g = garden();
        assert!(g.set_style(GardenStyle::Ordered));
        assert_eq!(g.store().len(), 81);
        assert!(!g.set_style(GardenStyle::Ordered));
        let patch = SettingsPatch { garden_style: Some(GardenStyle::Zen), ..Default::default() };
        g.set_settings(&patch);
        assert_eq!(g.store().len(), 18);
        assert_eq!(g.settings().garden_style, GardenStyle::Zen);
    }

    #[test]
    fn test_same_day_same_garden() {
        let a = garden();
        let b = Garden::new(GardenConfig::default(), DAY, SimpleRng::new(99));
        assert_eq!(a.store().as_slice(), b.store().as_slice());
    }

    #[test]
    fn test_roll_day() {
        let mut g = garden();
        let before: Vec<_> = g.store().iter().cloned().collect();
        assert!(!g.roll_day(DAY));
        assert!(g.roll_day("2024-05-02"));
        assert_ne!(before.as_slice(), g.store().as_slice());
    }

    #[test]
    fn test_sow_then_fertilize_before_any_tick() {
        let mut g = empty_garden();
        let id = g.sow(Species::Rose, Vec3::new(1.0, 0.0, 2.0));
        let before = g.store().get(id).unwrap().clone();
        assert_eq!(before.growth, 0.0);

        assert!(g.fertilize(id));
        let after = g.store().get(id).unwrap();
        assert!((after.nutrients - (before.nutrients + 0.3).min(1.0)).abs() < 1e-6);
        assert!((after.base_scale - before.base_scale * 1.05).abs() < 1e-6);
        assert_eq!(after.growth, 0.0);
    }

    #[test]
    fn test_sown_flower_grows_to_maturity() {
        let mut g = empty_garden();
        let id = g.sow(Species::Daisy, Vec3::ZERO);
        let mut last = 0.0;
        for _ in 0..100 {
            g.tick_growth();
            let growth = g.store().get(id).unwrap().growth;
            assert!(growth >= last);
            last = growth;
        }
        assert_eq!(last, 1.0);
        assert_eq!(g.ramps().len(), 0);
    }

    #[test]
    fn test_clear_then_water_is_noop() {
        let mut g = garden();
        let id = g.sow(Species::Tulip, Vec3::ZERO);
        g.clear();
        assert!(!g.water(id));
        assert!(g.store().is_empty());
        assert_eq!(g.tick_growth(), 0);
        assert!(g.ramps().is_empty());
    }

    #[test]
    fn test_regenerate_cancels_ramps() {
        let mut g = garden();
        let id = g.sow(Species::Tulip, Vec3::ZERO);
        assert!(g.ramps().is_active(id));
        g.set_style(GardenStyle::Zen);
        assert!(!g.ramps().is_active(id));
        assert!(g.store().get(id).is_none());
    }

    #[test]
    fn test_water_and_fertilize_clamp() {
        let mut g = garden();
        let id = g.store().iter().next().unwrap().id;
        for _ in 0..10 {
            g.water(id);
            g.fertilize(id);
        }
        let f = g.store().get(id).unwrap();
        assert_eq!(f.hydration, 1.0);
        assert_eq!(f.nutrients, 1.0);
    }

    #[test]
    fn test_pointer_follows_tool() {
        let mut g = empty_garden();
        g.select_species(Species::Lotus);
        let outcome = g.pointer(PointerEvent::GroundClick { point: Vec3::new(3.0, 1.0, 4.0) });
        let PointerOutcome::Sowed(id) = outcome else {
            panic!("expected a sow, got {outcome:?}");
        };
        let flower = g.store().get(id).unwrap();
        assert_eq!(flower.species, Species::Lotus);
        assert_eq!(flower.position, Vec3::new(3.0, 0.0, 4.0));

        assert_eq!(g.pointer(PointerEvent::FlowerClick { id }), PointerOutcome::Ignored);
        g.set_tool(Tool::Water);
        assert_eq!(g.pointer(PointerEvent::FlowerClick { id }), PointerOutcome::Watered(id));
        assert_eq!(
            g.pointer(PointerEvent::GroundClick { point: Vec3::ZERO }),
            PointerOutcome::Ignored
        );
        g.set_tool(Tool::Fertilize);
        assert_eq!(g.pointer(PointerEvent::FlowerClick { id }), PointerOutcome::Fertilized(id));
        assert_eq!(
            g.pointer(PointerEvent::FlowerClick { id: FlowerId::Sown(999) }),
            PointerOutcome::Ignored
        );
    }

    #[test]
    fn test_mood_flow() {
        let mut g = garden();
        assert!(matches!(g.submit_mood(""), Err(Error::EmptyMood)));
        assert_eq!(g.submit_mood(" rainy ").unwrap(), "rainy");
        assert!(matches!(g.submit_mood("sunny"), Err(Error::MoodInFlight)));

        g.complete_mood(GardenTheme::fallback());
        assert!(!g.is_mood_in_flight());
        assert_eq!(g.theme(), &GardenTheme::fallback());
        let fallback = GardenTheme::fallback();
        assert!(g
            .store()
            .iter()
            .all(|f| f.color == fallback.primary_color || f.color == fallback.secondary_color));
    }

    #[test]
    fn test_theme_change_can_keep_layout() {
        let config = GardenConfig { regenerate_on_theme_change: false, ..Default::default() };
        let mut g = Garden::new(config, DAY, SimpleRng::new(1));
        let id = g.sow(Species::Rose, Vec3::ZERO);
        g.set_theme(GardenTheme::fallback());
        assert!(g.store().get(id).is_some());
        assert!(g.ramps().is_active(id));
    }

    #[test]
    fn test_frame_covers_every_flower_in_order() {
        let g = garden();
        let frame = g.frame(1.5);
        assert_eq!(frame.flowers.len(), g.store().len());
        for (rendered, flower) in frame.flowers.iter().zip(g.store().iter()) {
            assert_eq!(rendered.id, flower.id);
        }
        assert_eq!(frame.ground, GardenTheme::initial().ground_color);
        assert!(!frame.lighting.is_night);
        assert!(!frame.part_instances().is_empty());
    }

    #[test]
    fn test_evaluate_flower() {
        let g = garden();
        let id = g.store().iter().next().unwrap().id;
        let a = g.evaluate_flower(id, 2.0).unwrap();
        let b = g.evaluate_flower(id, 2.0).unwrap();
        assert_eq!(a, b);
        assert!(g.evaluate_flower(FlowerId::Sown(12345), 2.0).is_none());
    }
}
