use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::SimulationClock;
use crate::geo::DriverPosition;
use crate::notifications::NotificationLog;
use crate::order::{ActiveOrder, CompletionSequence};
use crate::route::RouteProgress;
use crate::telemetry::{SessionSnapshot, SessionSnapshots, SnapshotConfig};
use crate::traffic::TrafficConditions;

/// Capture the full observable state into the snapshot ring. Runs after any
/// firing once the capture interval has elapsed; the runner's condition does
/// the gating.
#[allow(clippy::too_many_arguments)]
pub fn capture_snapshot_system(
    clock: Res<SimulationClock>,
    config: Option<Res<SnapshotConfig>>,
    active: Res<ActiveOrder>,
    position: Res<DriverPosition>,
    route: Res<RouteProgress>,
    traffic: Res<TrafficConditions>,
    completion: Res<CompletionSequence>,
    notifications: Res<NotificationLog>,
    mut snapshots: ResMut<SessionSnapshots>,
) {
    let config = config.as_deref().copied().unwrap_or_default();
    let snapshot = SessionSnapshot {
        timestamp_ms: clock.now(),
        order: active.order.clone(),
        driver_position: position.0,
        route_progress: route.value(),
        route_enabled: route.enabled(),
        traffic: traffic.intensity,
        completion: completion.step,
        active_notifications: notifications.active().iter().map(|n| n.id).collect(),
    };
    snapshots.push(snapshot, config.max_snapshots);
}
