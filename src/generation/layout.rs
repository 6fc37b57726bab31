//! Daily garden layouts.
//!
//! Each style consumes the [`DailyRng`] in a fixed order per instance.
//! Changing that order, or the order of [`Species::ALL`], changes every
//! garden of the day, so the draws below are written out one by one.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::core::Color;
use crate::flower::Species;
use crate::garden::{FlowerId, FlowerInstance, GardenStyle, GardenTheme};

use super::config::{LayoutConfig, OrderedLayout, WildLayout, ZenLayout};
use super::rng::DailyRng;

/// Build the initial garden for `style`. All instances start fully grown.
pub fn generate(
    style: GardenStyle,
    theme: &GardenTheme,
    config: &LayoutConfig,
    rng: &mut DailyRng,
) -> Vec<FlowerInstance> {
    match style {
        GardenStyle::Wild => wild(theme, &config.wild, rng),
        GardenStyle::Ordered => ordered(theme, &config.ordered, rng),
        GardenStyle::Zen => zen(theme, &config.zen, rng),
    }
}

/// Garden of the day for `date` (`YYYY-MM-DD`) and `style`.
pub fn generate_for_day(
    date: &str,
    style: GardenStyle,
    theme: &GardenTheme,
    config: &LayoutConfig,
) -> Vec<FlowerInstance> {
    let mut rng = DailyRng::for_day(date, style);
    let flowers = generate(style, theme, config, &mut rng);
    log::info!("Generated {} {} garden for {}", flowers.len(), style, date);
    flowers
}

fn species(rng: &mut DailyRng) -> Species {
    Species::ALL[rng.pick(Species::COUNT)]
}

fn color(rng: &mut DailyRng, theme: &GardenTheme, primary_above: f64) -> Color {
    if rng.chance_above(primary_above) {
        theme.primary_color
    } else {
        theme.secondary_color
    }
}

/// Centered draw: `(U - 0.5) * span`
fn centered(rng: &mut DailyRng, span: f32) -> f32 {
    (rng.next_f32() - 0.5) * span
}

fn grown(id: FlowerId, species: Species, position: Vec3, color: Color) -> FlowerInstance {
    FlowerInstance {
        id,
        species,
        position,
        color,
        base_scale: 1.0,
        rotation: 0.0,
        growth: 1.0,
        hydration: 1.0,
        nutrients: 1.0,
    }
}

// Draw order per cell: species, color, scale, rotation.
fn ordered(theme: &GardenTheme, cfg: &OrderedLayout, rng: &mut DailyRng) -> Vec<FlowerInstance> {
    let mut flowers = Vec::with_capacity(cfg.side() * cfg.side());
    for x in -cfg.radius..=cfg.radius {
        for z in -cfg.radius..=cfg.radius {
            let species = species(rng);
            let color = color(rng, theme, 0.5);
            let position = Vec3::new(x as f32 * cfg.spacing, 0.0, z as f32 * cfg.spacing);
            let mut flower = grown(FlowerId::Grid { x, z }, species, position, color);
            flower.base_scale = rng.range(0.9, 0.4);
            flower.rotation = rng.next_f32() * PI;
            flower.hydration = 0.8;
            flower.nutrients = 0.8;
            flowers.push(flower);
        }
    }
    flowers
}

// Draw order per cluster: center x, center z, species.
// Per member: jitter x, jitter z, scale, rotation.
fn zen(theme: &GardenTheme, cfg: &ZenLayout, rng: &mut DailyRng) -> Vec<FlowerInstance> {
    let mut flowers = Vec::with_capacity(cfg.clusters * cfg.members);
    for cluster in 0..cfg.clusters {
        let cx = centered(rng, cfg.center_spread);
        let cz = centered(rng, cfg.center_spread);
        let species = species(rng);
        for member in 0..cfg.members {
            let x = cx + centered(rng, cfg.jitter);
            let z = cz + centered(rng, cfg.jitter);
            let id = FlowerId::Zen { cluster: cluster as u32, member: member as u32 };
            let mut flower = grown(id, species, Vec3::new(x, 0.0, z), theme.primary_color);
            flower.base_scale = rng.range(0.7, 0.8);
            flower.rotation = rng.next_f32() * PI;
            flower.hydration = 0.9;
            flower.nutrients = 0.9;
            flowers.push(flower);
        }
    }
    flowers
}

// Draw order per flower: species, x, z, color, scale, rotation, hydration, nutrients.
fn wild(theme: &GardenTheme, cfg: &WildLayout, rng: &mut DailyRng) -> Vec<FlowerInstance> {
    let span = cfg.half_extent * 2.0;
    (0..cfg.count)
        .map(|i| {
            let species = species(rng);
            let x = centered(rng, span);
            let z = centered(rng, span);
            let color = color(rng, theme, 0.3);
            let mut flower = grown(FlowerId::Wild(i as u32), species, Vec3::new(x, 0.0, z), color);
            flower.base_scale = rng.range(0.6, 1.2);
            flower.rotation = rng.next_f32() * TAU;
            flower.hydration = rng.range(0.6, 0.4);
            flower.nutrients = rng.range(0.6, 0.4);
            flower
        })
        .collect()
}
