//! Driver churn: periodic reassignment from the candidate pool and canned
//! chat messages. Both processes stop for good once the order is delivered.

use bevy_ecs::prelude::Resource;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::DriverProfile;
use crate::clock::TimerId;

/// Randomized driver reassignment. Each firing swaps the assigned driver for
/// a different pool member and refreshes the delivery estimate, then re-arms
/// itself with a fresh delay draw.
#[derive(Resource, Debug)]
pub struct ReassignmentProcess {
    pool: Vec<DriverProfile>,
    windows: Vec<&'static str>,
    rng: StdRng,
    min_interval_ms: u64,
    max_interval_ms: u64,
    pub(crate) timer: Option<TimerId>,
}

impl ReassignmentProcess {
    pub fn new(seed: Option<u64>, min_interval_ms: u64, max_interval_ms: u64) -> Self {
        Self {
            pool: crate::catalog::DRIVER_POOL.to_vec(),
            windows: crate::catalog::DELIVERY_WINDOWS.to_vec(),
            rng: seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy),
            min_interval_ms,
            max_interval_ms,
            timer: None,
        }
    }

    /// Uniform pick from the pool, excluding the currently assigned driver.
    /// Yields `None` when no alternative exists, either because the pool is
    /// empty or because every member matches the current assignment.
    pub fn pick_excluding(&mut self, current_name: &str) -> Option<DriverProfile> {
        let candidates: Vec<usize> = self
            .pool
            .iter()
            .enumerate()
            .filter(|(_, profile)| profile.name != current_name)
            .map(|(index, _)| index)
            .collect();
        if candidates.is_empty() {
            return None;
        }
        let index = candidates[self.rng.gen_range(0..candidates.len())];
        Some(self.pool[index])
    }

    /// Fresh estimated delivery window, `None` when no windows are configured.
    pub fn pick_window(&mut self) -> Option<&'static str> {
        if self.windows.is_empty() {
            return None;
        }
        Some(self.windows[self.rng.gen_range(0..self.windows.len())])
    }

    /// Delay until the next reassignment, drawn uniformly per firing.
    pub fn next_interval_ms(&mut self) -> u64 {
        if self.max_interval_ms <= self.min_interval_ms {
            return self.min_interval_ms;
        }
        self.rng.gen_range(self.min_interval_ms..self.max_interval_ms)
    }
}

/// Source of canned driver chat messages on a randomized cadence.
#[derive(Resource, Debug)]
pub struct DriverMessenger {
    phrases: Vec<&'static str>,
    rng: StdRng,
    min_interval_ms: u64,
    max_interval_ms: u64,
    pub(crate) timer: Option<TimerId>,
}

impl DriverMessenger {
    pub fn new(seed: Option<u64>, min_interval_ms: u64, max_interval_ms: u64) -> Self {
        Self {
            phrases: crate::catalog::DRIVER_PHRASES.to_vec(),
            rng: seed.map(StdRng::seed_from_u64).unwrap_or_else(StdRng::from_entropy),
            min_interval_ms,
            max_interval_ms,
            timer: None,
        }
    }

    pub fn pick_phrase(&mut self) -> Option<&'static str> {
        if self.phrases.is_empty() {
            return None;
        }
        Some(self.phrases[self.rng.gen_range(0..self.phrases.len())])
    }

    pub fn next_interval_ms(&mut self) -> u64 {
        if self.max_interval_ms <= self.min_interval_ms {
            return self.min_interval_ms;
        }
        self.rng.gen_range(self.min_interval_ms..self.max_interval_ms)
    }
}
