//! Route display animation: a 0-100 progress value driven by a fast tick
//! while the route panel is open, with waypoints revealed at fixed
//! thresholds. Closing the panel resets progress and cancels the tick.

use bevy_ecs::prelude::Resource;

use crate::clock::{EventKind, SimulationClock, TimerId};

/// Progress percentages at which route waypoints become visible.
pub const WAYPOINT_THRESHOLDS: [u8; 4] = [25, 50, 75, 90];

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct RouteProgress {
    value: u8,
    enabled: bool,
    step: u8,
    tick_ms: u64,
    pub(crate) timer: Option<TimerId>,
}

impl RouteProgress {
    pub fn new(step: u8, tick_ms: u64) -> Self {
        Self {
            value: 0,
            enabled: false,
            step: step.max(1),
            tick_ms: tick_ms.max(1),
            timer: None,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// One animation tick. Returns `true` once the value has reached 100, at
    /// which point the caller should stop the tick.
    pub fn advance(&mut self) -> bool {
        self.value = self.value.saturating_add(self.step).min(100);
        self.value == 100
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    /// Thresholds already passed, in ascending order.
    pub fn revealed_waypoints(&self) -> &'static [u8] {
        let passed = WAYPOINT_THRESHOLDS
            .iter()
            .take_while(|threshold| self.value >= **threshold)
            .count();
        &WAYPOINT_THRESHOLDS[..passed]
    }
}

/// Toggle the route panel. Opening arms the animation tick (a second open is
/// a no-op); closing resets progress to zero and cancels the tick so no
/// orphaned timer keeps animating a hidden panel.
pub fn set_display(route: &mut RouteProgress, clock: &mut SimulationClock, enabled: bool) {
    if enabled == route.enabled {
        return;
    }
    if enabled {
        route.enabled = true;
        route.reset();
        route.timer = Some(clock.schedule_every(route.tick_ms, EventKind::RouteTick, None));
    } else {
        route.enabled = false;
        route.reset();
        if let Some(timer) = route.timer.take() {
            clock.cancel(timer);
        }
    }
}
