//! Growth ramp for sown flowers.
//!
//! Each sown flower walks Seed -> Growing -> Mature on a fixed tick, one
//! `step` per tick, independent of the frame rate. Ramps are owned by
//! [`GrowthRamps`]; cancelling a ramp removes it, so nothing keeps firing for
//! a flower that no longer exists.

use std::time::Duration;

use crate::garden::FlowerId;

use super::config::GrowthConfig;

/// Receives growth updates from the ramps.
pub trait GrowthSink {
    /// Set the growth of `id`. Returns false if `id` is no longer present.
    fn set_growth(&mut self, id: FlowerId, growth: f32) -> bool;
}

/// Lifecycle of one growth ramp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RampState {
    /// Sown, no tick yet (growth 0)
    Seed,
    Growing,
    /// Growth reached 1; the ramp is finished
    Mature,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GrowthRamp {
    pub id: FlowerId,
    pub ticks: u32,
    pub state: RampState,
}

/// Scheduler for all live growth ramps.
pub struct GrowthRamps {
    step: f32,
    interval: Duration,
    /// Wall time not yet converted into whole ticks
    pending: Duration,
    ramps: Vec<GrowthRamp>,
}

impl GrowthRamps {
    pub fn new(step: f32, interval: Duration) -> Self {
        Self {
            step,
            interval,
            pending: Duration::ZERO,
            ramps: Vec::new(),
        }
    }

    pub fn from_config(config: &GrowthConfig) -> Self {
        Self::new(config.step, config.tick_interval())
    }

    /// Number of ticks from seed to mature.
    pub fn ticks_to_mature(&self) -> u32 {
        (1.0 / self.step).ceil() as u32
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start a ramp for `id`. Returns false if one is already running.
    pub fn start(&mut self, id: FlowerId) -> bool {
        if self.is_active(id) {
            return false;
        }
        self.ramps.push(GrowthRamp { id, ticks: 0, state: RampState::Seed });
        true
    }

    /// Stop the ramp for `id`. Safe to call any number of times; returns
    /// whether a live ramp was stopped.
    pub fn cancel(&mut self, id: FlowerId) -> bool {
        let before = self.ramps.len();
        self.ramps.retain(|ramp| ramp.id != id);
        self.ramps.len() != before
    }

    /// Stop every ramp. Returns how many were live.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.ramps.len();
        self.ramps.clear();
        self.pending = Duration::ZERO;
        count
    }

    pub fn is_active(&self, id: FlowerId) -> bool {
        self.ramps.iter().any(|ramp| ramp.id == id)
    }

    pub fn state(&self, id: FlowerId) -> Option<RampState> {
        self.ramps.iter().find(|ramp| ramp.id == id).map(|ramp| ramp.state)
    }

    pub fn len(&self) -> usize {
        self.ramps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ramps.is_empty()
    }

    fn growth_at(&self, ticks: u32) -> f32 {
        if ticks >= self.ticks_to_mature() {
            1.0
        } else {
            (ticks as f32 * self.step).min(1.0)
        }
    }

    /// Fire one tick for every live ramp. Finished ramps and ramps whose
    /// flower has disappeared are dropped. Returns the number of flowers
    /// updated.
    pub fn tick(&mut self, sink: &mut impl GrowthSink) -> usize {
        let mature_at = self.ticks_to_mature();
        let mut updated = 0;
        let mut ramps = std::mem::take(&mut self.ramps);
        ramps.retain_mut(|ramp| {
            ramp.ticks += 1;
            let growth = self.growth_at(ramp.ticks);
            if !sink.set_growth(ramp.id, growth) {
                log::debug!("Dropping growth ramp for missing flower {}", ramp.id);
                return false;
            }
            updated += 1;
            if ramp.ticks >= mature_at {
                ramp.state = RampState::Mature;
                log::debug!("Flower {} matured after {} ticks", ramp.id, ramp.ticks);
                false
            } else {
                ramp.state = RampState::Growing;
                true
            }
        });
        self.ramps = ramps;
        updated
    }

    /// Convert `dt` of wall time into whole ticks and fire them. Returns the
    /// number of ticks fired. Time does not bank while no ramp is live.
    pub fn advance(&mut self, dt: Duration, sink: &mut impl GrowthSink) -> u32 {
        if self.ramps.is_empty() {
            self.pending = Duration::ZERO;
            return 0;
        }
        self.pending += dt;
        let mut fired = 0;
        while self.pending >= self.interval && !self.ramps.is_empty() {
            self.pending -= self.interval;
            self.tick(sink);
            fired += 1;
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Default)]
    struct Recorder {
        growth: HashMap<FlowerId, f32>,
        history: Vec<(FlowerId, f32)>,
    }

    impl GrowthSink for Recorder {
        fn set_growth(&mut self, id: FlowerId, growth: f32) -> bool {
            match self.growth.get_mut(&id) {
                Some(g) => {
                    *g = growth;
                    self.history.push((id, growth));
                    true
                }
                None => false,
            }
        }
    }

    fn recorder_with(ids: &[FlowerId]) -> Recorder {
        let mut r = Recorder::default();
        for id in ids {
            r.growth.insert(*id, 0.0);
        }
        r
    }

    #[test]
    fn test_ramp_reaches_mature_monotonically() {
        let id = FlowerId::Sown(1);
        let mut sink = recorder_with(&[id]);
        let mut ramps = GrowthRamps::new(0.015, Duration::from_millis(30));
        assert!(ramps.start(id));
        assert_eq!(ramps.state(id), Some(RampState::Seed));

        let mut ticks = 0;
        while !ramps.is_empty() {
            ramps.tick(&mut sink);
            ticks += 1;
            assert!(ticks <= 67, "ramp must finish within ceil(1/step) ticks");
        }
        assert_eq!(ticks, 67);
        assert_eq!(sink.growth[&id], 1.0);
        for pair in sink.history.windows(2) {
            assert!(pair[1].1 >= pair[0].1);
        }

        // Further ticks after maturity are no-ops
        let before = sink.history.len();
        assert_eq!(ramps.tick(&mut sink), 0);
        assert_eq!(sink.history.len(), before);
    }

    #[test]
    fn test_state_transitions() {
        let id = FlowerId::Sown(7);
        let mut sink = recorder_with(&[id]);
        let mut ramps = GrowthRamps::new(0.5, Duration::from_millis(30));
        ramps.start(id);
        ramps.tick(&mut sink);
        assert_eq!(ramps.state(id), Some(RampState::Growing));
        ramps.tick(&mut sink);
        assert_eq!(ramps.state(id), None);
        assert_eq!(sink.growth[&id], 1.0);
    }

    #[test]
    fn test_missing_flower_drops_ramp_silently() {
        let id = FlowerId::Sown(3);
        let mut sink = Recorder::default();
        let mut ramps = GrowthRamps::new(0.015, Duration::from_millis(30));
        ramps.start(id);
        assert_eq!(ramps.tick(&mut sink), 0);
        assert!(ramps.is_empty());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let id = FlowerId::Sown(4);
        let mut ramps = GrowthRamps::new(0.015, Duration::from_millis(30));
        ramps.start(id);
        assert!(!ramps.start(id));
        assert!(ramps.cancel(id));
        assert!(!ramps.cancel(id));
        assert!(!ramps.is_active(id));
    }

    #[test]
    fn test_cancel_all() {
        let mut ramps = GrowthRamps::new(0.015, Duration::from_millis(30));
        ramps.start(FlowerId::Sown(1));
        ramps.start(FlowerId::Sown(2));
        assert_eq!(ramps.cancel_all(), 2);
        assert_eq!(ramps.cancel_all(), 0);
    }

    #[test]
    fn test_advance_fires_whole_ticks() {
        let id = FlowerId::Sown(9);
        let mut sink = recorder_with(&[id]);
        let mut ramps = GrowthRamps::new(0.015, Duration::from_millis(30));
        ramps.start(id);
        assert_eq!(ramps.advance(Duration::from_millis(20), &mut sink), 0);
        assert_eq!(ramps.advance(Duration::from_millis(20), &mut sink), 1);
        assert_eq!(ramps.advance(Duration::from_millis(65), &mut sink), 2);
        assert!((sink.growth[&id] - 0.045).abs() < 1e-6);
    }

    #[test]
    fn test_advance_does_not_bank_idle_time() {
        let id = FlowerId::Sown(10);
        let mut sink = recorder_with(&[id]);
        let mut ramps = GrowthRamps::new(0.015, Duration::from_millis(30));
        assert_eq!(ramps.advance(Duration::from_secs(5), &mut sink), 0);
        ramps.start(id);
        assert_eq!(ramps.advance(Duration::from_millis(10), &mut sink), 0);
        assert_eq!(sink.growth[&id], 0.0);
    }

    #[test]
    fn test_large_advance_stops_when_mature() {
        let id = FlowerId::Sown(11);
        let mut sink = recorder_with(&[id]);
        let mut ramps = GrowthRamps::new(0.25, Duration::from_millis(30));
        ramps.start(id);
        assert_eq!(ramps.advance(Duration::from_secs(10), &mut sink), 4);
        assert_eq!(sink.growth[&id], 1.0);
    }
}
