//! The mutable collection of live flowers.

use std::collections::HashMap;

use glam::Vec3;

use crate::core::Color;
use crate::flower::{GrowthSink, Species};

use super::config::CareConfig;
use super::instance::{FlowerId, FlowerInstance};

/// Creation-time traits of a sown flower. Everything except identity and
/// growth, which the store assigns.
#[derive(Debug, Clone, PartialEq)]
pub struct SowRequest {
    pub species: Species,
    pub position: Vec3,
    pub color: Color,
    pub base_scale: f32,
    pub rotation: f32,
    pub hydration: f32,
    pub nutrients: f32,
}

/// Flowers keyed by id, iterated in insertion order.
///
/// Every mutation reports whether it touched an instance. Mutating an id
/// that is not present is a silent no-op.
pub struct GardenStore {
    flowers: Vec<FlowerInstance>,
    index: HashMap<FlowerId, usize>,
    /// Next sown serial; survives `reset` and `replace_all`
    next_serial: u64,
    care: CareConfig,
}

impl GardenStore {
    pub fn new(care: CareConfig) -> Self {
        Self {
            flowers: Vec::new(),
            index: HashMap::new(),
            next_serial: 1,
            care,
        }
    }

    /// Insert a seedling (growth 0) and return its new id.
    pub fn sow(&mut self, request: SowRequest) -> FlowerId {
        let id = FlowerId::Sown(self.next_serial);
        self.next_serial += 1;
        let flower = FlowerInstance {
            id,
            species: request.species,
            position: Vec3::new(request.position.x, 0.0, request.position.z),
            color: request.color,
            base_scale: request.base_scale,
            rotation: request.rotation,
            growth: 0.0,
            hydration: request.hydration.clamp(0.0, 1.0),
            nutrients: request.nutrients.clamp(0.0, 1.0),
        };
        self.index.insert(id, self.flowers.len());
        self.flowers.push(flower);
        log::debug!("Sowed {} {} at ({:.2}, {:.2})", request.species, id, request.position.x, request.position.z);
        id
    }

    /// Raise hydration by the water delta, capped at 1.
    pub fn water(&mut self, id: FlowerId) -> bool {
        let delta = self.care.water_delta.max(0.0);
        self.update(id, |f| f.hydration = (f.hydration + delta).clamp(0.0, 1.0))
    }

    /// Raise nutrients by the fertilize delta (capped at 1) and grow the
    /// flower's base scale permanently.
    pub fn fertilize(&mut self, id: FlowerId) -> bool {
        let delta = self.care.fertilize_delta.max(0.0);
        let factor = self.care.fertilize_scale;
        self.update(id, |f| {
            f.nutrients = (f.nutrients + delta).clamp(0.0, 1.0);
            f.base_scale *= factor;
        })
    }

    /// Set growth, clamped to [0, 1]. Growth never goes backwards.
    pub fn set_growth(&mut self, id: FlowerId, growth: f32) -> bool {
        self.update(id, |f| f.growth = f.growth.max(growth.clamp(0.0, 1.0)))
    }

    fn update(&mut self, id: FlowerId, apply: impl FnOnce(&mut FlowerInstance)) -> bool {
        match self.index.get(&id) {
            Some(&i) => {
                apply(&mut self.flowers[i]);
                true
            }
            None => false,
        }
    }

    /// Remove every flower.
    pub fn reset(&mut self) {
        self.flowers.clear();
        self.index.clear();
    }

    /// Replace the whole garden. Later duplicates of an id are dropped.
    pub fn replace_all(&mut self, flowers: Vec<FlowerInstance>) {
        self.reset();
        for mut flower in flowers {
            if self.index.contains_key(&flower.id) {
                log::warn!("Dropping duplicate flower id {}", flower.id);
                continue;
            }
            flower.growth = flower.growth.clamp(0.0, 1.0);
            flower.hydration = flower.hydration.clamp(0.0, 1.0);
            flower.nutrients = flower.nutrients.clamp(0.0, 1.0);
            // Keep future sown ids clear of anything imported
            if let FlowerId::Sown(n) = flower.id {
                self.next_serial = self.next_serial.max(n + 1);
            }
            self.index.insert(flower.id, self.flowers.len());
            self.flowers.push(flower);
        }
    }

    pub fn get(&self, id: FlowerId) -> Option<&FlowerInstance> {
        self.index.get(&id).map(|&i| &self.flowers[i])
    }

    pub fn contains(&self, id: FlowerId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlowerInstance> {
        self.flowers.iter()
    }

    pub fn as_slice(&self) -> &[FlowerInstance] {
        &self.flowers
    }

    pub fn len(&self) -> usize {
        self.flowers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flowers.is_empty()
    }

    pub fn care(&self) -> &CareConfig {
        &self.care
    }
}

impl Default for GardenStore {
    fn default() -> Self {
        Self::new(CareConfig::default())
    }
}

impl GrowthSink for GardenStore {
    fn set_growth(&mut self, id: FlowerId, growth: f32) -> bool {
        GardenStore::set_growth(self, id, growth)
    }
}
