use bevy_ecs::prelude::{Res, ResMut};
use tracing::warn;

use crate::clock::SimulationClock;
use crate::geo::{DriverPosition, GeoWalk};
use crate::order::{ActiveOrder, GeoPoint};

/// One random-walk step for the driver marker. [`DriverPosition`] is the
/// canonical coordinate; the copy inside the order is a mirror. If the mirror
/// has drifted further than a single step could explain, the canonical
/// position wins and the drift is logged, not escalated.
pub fn geo_step_system(
    clock: Res<SimulationClock>,
    mut walk: ResMut<GeoWalk>,
    mut position: ResMut<DriverPosition>,
    mut active: ResMut<ActiveOrder>,
) {
    if active.is_complete() {
        return;
    }

    let mirrored = active.order.driver.location;
    if position.0.euclidean_distance(&mirrored) > walk.max_step_distance() + 1e-9 {
        warn!(
            now = clock.now(),
            canonical_lat = position.0.lat,
            canonical_lng = position.0.lng,
            mirrored_lat = mirrored.lat,
            mirrored_lng = mirrored.lng,
            "driver marker diverged from canonical position, snapping back"
        );
    }

    let (dlat, dlng) = walk.sample_step();
    let next = GeoPoint {
        lat: position.0.lat + dlat,
        lng: position.0.lng + dlng,
    };
    position.0 = next;
    active.order.driver.location = next;
}
