use bevy_ecs::prelude::{Res, ResMut};
use tracing::debug;

use crate::catalog;
use crate::clock::{EventKind, SimulationClock};
use crate::drivers::ReassignmentProcess;
use crate::geo::DriverPosition;
use crate::notifications::{NotificationKind, NotificationLog};
use crate::order::ActiveOrder;
use crate::telemetry::SessionTelemetry;

/// Swap the assigned driver for a different pool member and refresh the
/// delivery estimate, then re-arm with a fresh delay draw. The chain ends
/// once the order is delivered. The new driver takes over at the marker's
/// current position, so a swap never teleports the map.
pub fn driver_reassign_system(
    mut clock: ResMut<SimulationClock>,
    mut active: ResMut<ActiveOrder>,
    mut process: ResMut<ReassignmentProcess>,
    position: Res<DriverPosition>,
    mut telemetry: ResMut<SessionTelemetry>,
    mut notifications: ResMut<NotificationLog>,
) {
    if active.is_complete() {
        return;
    }
    let Some(profile) = process.pick_excluding(&active.order.driver.name) else {
        // No alternative candidate: keep the current driver and try again later.
        let delay = process.next_interval_ms();
        process.timer = Some(clock.schedule_once(delay, EventKind::DriverReassign, None));
        debug!(next_in_ms = delay, "no alternative driver available, skipping reassignment");
        return;
    };
    let window = process
        .pick_window()
        .map(str::to_string)
        .unwrap_or_else(|| active.order.estimated_window.clone());

    let mut driver = catalog::driver_from_profile(&profile);
    driver.location = position.0;
    active.assign_driver(driver, profile.license_plate.to_string(), window.clone());
    telemetry.record_reassignment(clock.now(), profile.name, window.as_str());
    notifications.publish(
        &mut clock,
        NotificationKind::DriverUpdate,
        "Driver update",
        format!("{} is now handling your delivery", profile.name),
    );

    let delay = process.next_interval_ms();
    process.timer = Some(clock.schedule_once(delay, EventKind::DriverReassign, None));
    debug!(driver = profile.name, window = %window, next_in_ms = delay, "driver reassigned");
}
