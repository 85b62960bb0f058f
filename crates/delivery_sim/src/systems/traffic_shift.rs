use bevy_ecs::prelude::ResMut;
use tracing::debug;

use crate::clock::{EventKind, SimulationClock};
use crate::notifications::{NotificationKind, NotificationLog};
use crate::traffic::{TrafficConditions, TrafficGenerator};

/// Shift the ambient traffic intensity and occasionally raise a road
/// incident. Always re-arms with a fresh delay draw; traffic runs until the
/// session itself closes.
pub fn traffic_shift_system(
    mut clock: ResMut<SimulationClock>,
    mut generator: ResMut<TrafficGenerator>,
    mut conditions: ResMut<TrafficConditions>,
    mut notifications: ResMut<NotificationLog>,
) {
    let intensity = generator.draw_intensity();
    if intensity != conditions.intensity {
        debug!(
            from = conditions.intensity.label(),
            to = intensity.label(),
            "traffic conditions shifted"
        );
        conditions.intensity = intensity;
    }

    if let Some(incident) = generator.draw_incident() {
        notifications.publish(
            &mut clock,
            NotificationKind::TrafficIncident,
            "Traffic alert",
            format!("Expect {} on {}.", incident.condition, incident.road),
        );
    }

    let delay = generator.next_interval_ms();
    generator.timer = Some(clock.schedule_once(delay, EventKind::TrafficShift, None));
}
