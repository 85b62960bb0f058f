use bevy_ecs::prelude::{Res, ResMut};

use crate::clock::{EventKind, SimulationClock};
use crate::drivers::DriverMessenger;
use crate::notifications::{NotificationKind, NotificationLog};
use crate::order::ActiveOrder;

/// Publish a canned chat message from the current driver and re-arm. No more
/// messages once the order is delivered.
pub fn driver_message_system(
    mut clock: ResMut<SimulationClock>,
    active: Res<ActiveOrder>,
    mut messenger: ResMut<DriverMessenger>,
    mut notifications: ResMut<NotificationLog>,
) {
    if active.is_complete() {
        return;
    }
    if let Some(phrase) = messenger.pick_phrase() {
        notifications.publish(
            &mut clock,
            NotificationKind::DriverMessage,
            format!("Message from {}", active.order.driver.name),
            phrase,
        );
    }
    let delay = messenger.next_interval_ms();
    messenger.timer = Some(clock.schedule_once(delay, EventKind::DriverMessage, None));
}
