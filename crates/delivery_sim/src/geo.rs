//! Driver position random walk. The canonical position lives in
//! [`DriverPosition`]; the copy embedded in the order is a mirror of it, so a
//! mid-flight driver swap never teleports the marker.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::clock::TimerId;
use crate::order::GeoPoint;

/// Canonical driver coordinates, updated only by the walk and by explicit
/// repositioning at session start.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DriverPosition(pub GeoPoint);

/// Bounded random-walk process for the driver marker.
#[derive(Resource, Debug)]
pub struct GeoWalk {
    rng: StdRng,
    step_delta: f64,
    pub(crate) timer: Option<TimerId>,
}

impl GeoWalk {
    pub fn new(seed: Option<u64>, step_delta: f64) -> Self {
        Self {
            rng: seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy),
            step_delta: step_delta.abs(),
            timer: None,
        }
    }

    /// Per-axis displacement for one tick, each drawn from `[-δ, δ)`.
    pub fn sample_step(&mut self) -> (f64, f64) {
        if self.step_delta == 0.0 {
            return (0.0, 0.0);
        }
        let dlat = self.rng.gen_range(-self.step_delta..self.step_delta);
        let dlng = self.rng.gen_range(-self.step_delta..self.step_delta);
        (dlat, dlng)
    }

    /// Largest distance a single step can cover (the corner of the δ box).
    pub fn max_step_distance(&self) -> f64 {
        (2.0 * self.step_delta * self.step_delta).sqrt()
    }
}
