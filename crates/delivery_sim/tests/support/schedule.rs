#![allow(dead_code)]

use bevy_ecs::prelude::World;
use bevy_ecs::schedule::Schedule;
use delivery_sim::clock::SimulationClock;
use delivery_sim::runner::{advance_until, run_next_event, run_until_empty, simulation_schedule};

/// Helper that owns a reusable `Schedule` so tests can step or drain the
/// event queue.
pub struct ScheduleRunner {
    schedule: Schedule,
}

impl Default for ScheduleRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleRunner {
    /// Create a runner with the default simulation schedule.
    pub fn new() -> Self {
        Self {
            schedule: simulation_schedule(),
        }
    }

    /// Run a single firing (returns `true` if one was processed).
    pub fn run_one(&mut self, world: &mut World) -> bool {
        run_next_event(world, &mut self.schedule)
    }

    /// Process every firing due at or before `deadline_ms`, then land the
    /// clock exactly on the deadline.
    pub fn advance_until(&mut self, world: &mut World, deadline_ms: u64) -> usize {
        advance_until(world, &mut self.schedule, deadline_ms)
    }

    /// Advance by a relative window from the current clock time.
    pub fn advance_by(&mut self, world: &mut World, delta_ms: u64) -> usize {
        let deadline = world
            .resource::<SimulationClock>()
            .now()
            .saturating_add(delta_ms);
        self.advance_until(world, deadline)
    }

    /// Run firings up to `max_steps`, returning the number executed.
    pub fn run_until_empty(&mut self, world: &mut World, max_steps: usize) -> usize {
        run_until_empty(world, &mut self.schedule, max_steps)
    }
}
