//! Session assembly: resolve the order, seed the processes, insert every
//! resource, and arm the initial timers.

use bevy_ecs::prelude::World;
use tracing::{debug, info};

use crate::catalog;
use crate::clock::{EventKind, SimulationClock};
use crate::drivers::{DriverMessenger, ReassignmentProcess};
use crate::geo::{DriverPosition, GeoWalk};
use crate::notifications::NotificationLog;
use crate::order::{ActiveOrder, CompletionSequence, LifecycleProcess, STAGE_TABLE};
use crate::route::{set_display, RouteProgress};
use crate::session::SessionParams;
use crate::telemetry::{SessionSnapshots, SessionTelemetry, SnapshotConfig};
use crate::traffic::{TrafficConditions, TrafficGenerator};

// Distinct salts give every process its own deterministic stream from a
// single session seed.
const REASSIGN_SEED_SALT: u64 = 0x7265;
const GEO_SEED_SALT: u64 = 0x6765;
const TRAFFIC_SEED_SALT: u64 = 0x7472;
const CHAT_SEED_SALT: u64 = 0x6368;

fn derive_seed(seed: Option<u64>, salt: u64) -> Option<u64> {
    seed.map(|s| s.wrapping_add(salt))
}

/// Build all session resources into `world` and arm the initial timers.
/// Building into a world that already holds a session is a no-op.
pub fn build_session(world: &mut World, params: &SessionParams, order_id: Option<&str>) {
    if world.contains_resource::<ActiveOrder>() {
        debug!("tracking session already started");
        return;
    }

    let mut clock = SimulationClock::default();

    let mut reassignment = ReassignmentProcess::new(
        derive_seed(params.seed, REASSIGN_SEED_SALT),
        params.reassign_min_interval_ms,
        params.reassign_max_interval_ms,
    );
    let mut walk = GeoWalk::new(derive_seed(params.seed, GEO_SEED_SALT), params.geo_step_delta);
    let mut generator = TrafficGenerator::new(
        derive_seed(params.seed, TRAFFIC_SEED_SALT),
        params.traffic_min_interval_ms,
        params.traffic_max_interval_ms,
        params.incident_probability,
    );
    let mut messenger = DriverMessenger::new(
        derive_seed(params.seed, CHAT_SEED_SALT),
        params.chat_min_interval_ms,
        params.chat_max_interval_ms,
    );

    let mut active = ActiveOrder::new(catalog::resolve_order(order_id));
    // Initial assignment draws from the same pool later reassignments use.
    let position = match reassignment.pick_excluding("") {
        Some(profile) => {
            let window = reassignment
                .pick_window()
                .map(str::to_string)
                .unwrap_or_else(|| active.order.estimated_window.clone());
            let driver = catalog::driver_from_profile(&profile);
            let start = driver.location;
            active.assign_driver(driver, profile.license_plate.to_string(), window);
            DriverPosition(start)
        }
        None => DriverPosition(active.order.driver.location),
    };

    let mut telemetry = SessionTelemetry::default();
    let first = &STAGE_TABLE[0];
    telemetry.record_transition(clock.now(), 0, first.status, first.progress, first.detail);

    let mut lifecycle = LifecycleProcess::new(
        params.lifecycle_interval_ms,
        params.completion_prompt_delay_ms,
        params.redirect_delay_ms,
    );
    lifecycle.timer = Some(clock.schedule_every(
        lifecycle.advance_interval_ms,
        EventKind::StageAdvance,
        None,
    ));
    walk.timer = Some(clock.schedule_every(params.geo_interval_ms, EventKind::GeoStep, None));

    let delay = reassignment.next_interval_ms();
    reassignment.timer = Some(clock.schedule_once(delay, EventKind::DriverReassign, None));
    let delay = generator.next_interval_ms();
    generator.timer = Some(clock.schedule_once(delay, EventKind::TrafficShift, None));
    let delay = messenger.next_interval_ms();
    messenger.timer = Some(clock.schedule_once(delay, EventKind::DriverMessage, None));

    let mut route = RouteProgress::new(params.route_step, params.route_tick_ms);
    if params.route_display_on_start {
        set_display(&mut route, &mut clock, true);
    }

    info!(
        order_id = %active.order.id,
        driver = %active.order.driver.name,
        "tracking session started"
    );

    world.insert_resource(active);
    world.insert_resource(position);
    world.insert_resource(lifecycle);
    world.insert_resource(CompletionSequence::default());
    world.insert_resource(reassignment);
    world.insert_resource(walk);
    world.insert_resource(generator);
    world.insert_resource(TrafficConditions::default());
    world.insert_resource(messenger);
    world.insert_resource(route);
    world.insert_resource(NotificationLog::new(params.notification_duration_ms));
    world.insert_resource(telemetry);
    world.insert_resource(SessionSnapshots::default());
    world.insert_resource(SnapshotConfig {
        interval_ms: params.snapshot_interval_ms,
        max_snapshots: params.max_snapshots,
    });
    world.insert_resource(clock);
}
