//! Event pump for the tracking session.
//!
//! Systems never touch the clock's queue directly: each step here pops the
//! next firing from [SimulationClock], publishes it as [CurrentEvent], and
//! runs the schedule once. `run_if` conditions keep every system except the
//! firing's handler (and the interval-gated snapshot capture) from doing
//! work.

use bevy_ecs::prelude::Res;
use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::schedule::{IntoSystemConfigs, SystemSet};

use crate::clock::{CurrentEvent, EventKind, SimulationClock};
use crate::systems::{
    completion::{completion_prompt_system, completion_redirect_system},
    driver_message::driver_message_system,
    geo_step::geo_step_system,
    notification_expiry::notification_expiry_system,
    reassignment::driver_reassign_system,
    route_tick::route_tick_system,
    snapshot::capture_snapshot_system,
    stage_advance::stage_advance_system,
    traffic_shift::traffic_shift_system,
};

// Condition functions for each event kind
fn is_stage_advance(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::StageAdvance)
        .unwrap_or(false)
}

fn is_completion_prompt(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CompletionPrompt)
        .unwrap_or(false)
}

fn is_completion_redirect(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::CompletionRedirect)
        .unwrap_or(false)
}

fn is_driver_reassign(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::DriverReassign)
        .unwrap_or(false)
}

fn is_geo_step(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::GeoStep)
        .unwrap_or(false)
}

fn is_route_tick(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::RouteTick)
        .unwrap_or(false)
}

fn is_traffic_shift(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::TrafficShift)
        .unwrap_or(false)
}

fn is_driver_message(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::DriverMessage)
        .unwrap_or(false)
}

fn is_notification_expiry(event: Option<Res<CurrentEvent>>) -> bool {
    event
        .map(|e| e.0.kind == EventKind::NotificationExpiry)
        .unwrap_or(false)
}

/// Condition: snapshot interval has elapsed (or nothing captured yet).
fn should_capture_snapshot(
    clock: Option<Res<SimulationClock>>,
    config: Option<Res<crate::telemetry::SnapshotConfig>>,
    snapshots: Option<Res<crate::telemetry::SessionSnapshots>>,
) -> bool {
    let Some(clock) = clock else {
        return false;
    };
    let Some(config) = config else {
        return false;
    };
    let Some(snapshots) = snapshots else {
        return false;
    };
    if config.max_snapshots == 0 {
        return false;
    }

    let now = clock.now();
    match snapshots.last_snapshot_at() {
        None => true,
        Some(last) => now.saturating_sub(last) >= config.interval_ms,
    }
}

/// Runs one simulation step: pops the next firing, inserts it as
/// [CurrentEvent], then runs the schedule. Returns `true` if a firing was
/// processed, `false` if no timer is armed.
pub fn run_next_event(world: &mut World, schedule: &mut Schedule) -> bool {
    let event = match world.resource_mut::<SimulationClock>().pop_next() {
        Some(e) => e,
        None => return false,
    };
    world.insert_resource(CurrentEvent(event));
    schedule.run(world);
    true
}

/// Processes every firing due at or before `deadline_ms`, then fast-forwards
/// the clock to the deadline exactly. Returns the number of firings
/// processed. Firings scheduled by handlers along the way are picked up in
/// the same pass when they fall inside the window.
pub fn advance_until(world: &mut World, schedule: &mut Schedule, deadline_ms: u64) -> usize {
    let mut processed = 0;
    while let Some(due) = world.resource_mut::<SimulationClock>().next_due() {
        if due > deadline_ms {
            break;
        }
        if !run_next_event(world, schedule) {
            break;
        }
        processed += 1;
    }
    world.resource_mut::<SimulationClock>().advance_to(deadline_ms);
    processed
}

/// Runs simulation steps until no timer is armed or `max_steps` is reached.
/// Returns the number of steps executed.
pub fn run_until_empty(world: &mut World, schedule: &mut Schedule, max_steps: usize) -> usize {
    let mut steps = 0;
    while steps < max_steps && run_next_event(world, schedule) {
        steps += 1;
    }
    steps
}

/// Set containing every per-event handler, so the snapshot capture can be
/// ordered after whichever handler ran.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct EventHandlers;

/// Builds the simulation schedule: one handler per event kind, gated by the
/// conditions above, plus the interval-gated snapshot capture.
pub fn simulation_schedule() -> Schedule {
    let mut schedule = Schedule::default();

    schedule.add_systems(
        (
            // StageAdvance
            stage_advance_system.run_if(is_stage_advance),
            // CompletionPrompt
            completion_prompt_system.run_if(is_completion_prompt),
            // CompletionRedirect
            completion_redirect_system.run_if(is_completion_redirect),
            // DriverReassign
            driver_reassign_system.run_if(is_driver_reassign),
            // GeoStep
            geo_step_system.run_if(is_geo_step),
            // RouteTick
            route_tick_system.run_if(is_route_tick),
            // TrafficShift
            traffic_shift_system.run_if(is_traffic_shift),
            // DriverMessage
            driver_message_system.run_if(is_driver_message),
            // NotificationExpiry
            notification_expiry_system.run_if(is_notification_expiry),
        )
            .in_set(EventHandlers),
    );

    // Snapshot capture runs after the handlers so it sees the step's effects.
    schedule.add_systems(
        capture_snapshot_system
            .run_if(should_capture_snapshot)
            .after(EventHandlers),
    );

    schedule
}
