//! Ambient traffic conditions. A single generator re-arms itself on a
//! randomized 10-15s cadence, shifting the tri-state intensity and
//! occasionally raising a road incident notification.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::clock::TimerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TrafficIntensity {
    Light,
    #[default]
    Moderate,
    Heavy,
}

impl TrafficIntensity {
    pub fn label(&self) -> &'static str {
        match self {
            TrafficIntensity::Light => "light",
            TrafficIntensity::Moderate => "moderate",
            TrafficIntensity::Heavy => "heavy",
        }
    }
}

/// Current traffic state as shown on the tracking view.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct TrafficConditions {
    pub intensity: TrafficIntensity,
}

/// Incident drawn alongside an intensity shift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Incident {
    pub road: &'static str,
    pub condition: &'static str,
}

/// Randomized source of traffic shifts and incidents.
#[derive(Resource, Debug)]
pub struct TrafficGenerator {
    rng: StdRng,
    min_interval_ms: u64,
    max_interval_ms: u64,
    incident_probability: f64,
    roads: Vec<&'static str>,
    conditions: Vec<&'static str>,
    pub(crate) timer: Option<TimerId>,
}

impl TrafficGenerator {
    pub fn new(
        seed: Option<u64>,
        min_interval_ms: u64,
        max_interval_ms: u64,
        incident_probability: f64,
    ) -> Self {
        Self {
            rng: seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy),
            min_interval_ms,
            max_interval_ms,
            incident_probability: incident_probability.clamp(0.0, 1.0),
            roads: crate::catalog::ROAD_SEGMENTS.to_vec(),
            conditions: crate::catalog::ROAD_CONDITIONS.to_vec(),
            timer: None,
        }
    }

    /// Delay until the next shift, drawn uniformly from the configured range.
    pub fn next_interval_ms(&mut self) -> u64 {
        if self.max_interval_ms <= self.min_interval_ms {
            return self.min_interval_ms;
        }
        self.rng.gen_range(self.min_interval_ms..self.max_interval_ms)
    }

    pub fn draw_intensity(&mut self) -> TrafficIntensity {
        match self.rng.gen_range(0..3) {
            0 => TrafficIntensity::Light,
            1 => TrafficIntensity::Moderate,
            _ => TrafficIntensity::Heavy,
        }
    }

    /// Roll for an incident. `None` when the roll misses or no road data is
    /// configured.
    pub fn draw_incident(&mut self) -> Option<Incident> {
        if self.roads.is_empty() || self.conditions.is_empty() {
            return None;
        }
        if !self.rng.gen_bool(self.incident_probability) {
            return None;
        }
        let road = self.roads[self.rng.gen_range(0..self.roads.len())];
        let condition = self.conditions[self.rng.gen_range(0..self.conditions.len())];
        Some(Incident { road, condition })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_stay_within_the_configured_range() {
        let mut generator = TrafficGenerator::new(Some(7), 10_000, 15_000, 0.3);
        for _ in 0..200 {
            let interval = generator.next_interval_ms();
            assert!((10_000..15_000).contains(&interval));
        }
    }

    #[test]
    fn degenerate_range_returns_the_minimum() {
        let mut generator = TrafficGenerator::new(Some(7), 12_000, 12_000, 0.3);
        assert_eq!(generator.next_interval_ms(), 12_000);
    }

    #[test]
    fn intensity_draw_reaches_every_state() {
        let mut generator = TrafficGenerator::new(Some(11), 10_000, 15_000, 0.3);
        let mut seen = [false; 3];
        for _ in 0..100 {
            match generator.draw_intensity() {
                TrafficIntensity::Light => seen[0] = true,
                TrafficIntensity::Moderate => seen[1] = true,
                TrafficIntensity::Heavy => seen[2] = true,
            }
        }
        assert_eq!(seen, [true; 3]);
    }

    #[test]
    fn incident_probability_bounds_are_honoured() {
        let mut never = TrafficGenerator::new(Some(3), 10_000, 15_000, 0.0);
        assert!((0..50).all(|_| never.draw_incident().is_none()));

        let mut always = TrafficGenerator::new(Some(3), 10_000, 15_000, 1.0);
        for _ in 0..50 {
            let incident = always.draw_incident().unwrap();
            assert!(crate::catalog::ROAD_SEGMENTS.contains(&incident.road));
            assert!(crate::catalog::ROAD_CONDITIONS.contains(&incident.condition));
        }
    }

    #[test]
    fn empty_road_data_yields_no_incident() {
        let mut generator = TrafficGenerator::new(Some(3), 10_000, 15_000, 1.0);
        generator.roads.clear();
        assert!(generator.draw_incident().is_none());
    }
}
