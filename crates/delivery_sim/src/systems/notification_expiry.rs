use bevy_ecs::prelude::{Res, ResMut};
use tracing::debug;

use crate::clock::{CurrentEvent, EventSubject, SimulationClock};
use crate::notifications::NotificationLog;

/// Auto-dismiss the notification named in the firing's subject. Expiry for a
/// notification that was already dismissed by hand is a quiet no-op.
pub fn notification_expiry_system(
    current: Res<CurrentEvent>,
    clock: Res<SimulationClock>,
    mut notifications: ResMut<NotificationLog>,
) {
    let Some(EventSubject::Notification(id)) = current.0.subject else {
        debug!("notification expiry fired without a notification subject");
        return;
    };
    notifications.expire(clock.now(), id);
}
