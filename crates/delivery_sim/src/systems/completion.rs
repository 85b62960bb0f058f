use bevy_ecs::prelude::ResMut;
use tracing::{debug, info};

use crate::clock::SimulationClock;
use crate::drivers::DriverMessenger;
use crate::geo::GeoWalk;
use crate::notifications::NotificationLog;
use crate::order::{CompletionSequence, CompletionStep};
use crate::route::{set_display, RouteProgress};
use crate::traffic::TrafficGenerator;

/// Open the arrival confirmation once the post-delivery delay elapses.
pub fn completion_prompt_system(mut completion: ResMut<CompletionSequence>) {
    if completion.step != CompletionStep::NotStarted {
        debug!(step = ?completion.step, "completion prompt fired in a later step");
        return;
    }
    completion.prompt_timer = None;
    completion.step = CompletionStep::ArrivalConfirmation;
    info!("arrival confirmation requested");
}

/// Close the session after the rating step's grace period: cancel every
/// ambient process still running (geo walk, traffic, route animation, driver
/// chat) and clear the notification tray.
pub fn completion_redirect_system(
    mut clock: ResMut<SimulationClock>,
    mut completion: ResMut<CompletionSequence>,
    mut walk: ResMut<GeoWalk>,
    mut generator: ResMut<TrafficGenerator>,
    mut messenger: ResMut<DriverMessenger>,
    mut route: ResMut<RouteProgress>,
    mut notifications: ResMut<NotificationLog>,
) {
    if completion.step != CompletionStep::RedirectPending {
        debug!(step = ?completion.step, "redirect fired outside the pending step");
        return;
    }
    completion.redirect_timer = None;
    completion.step = CompletionStep::Finished;

    let stopped = [walk.timer.take(), generator.timer.take(), messenger.timer.take()];
    for timer in stopped.into_iter().flatten() {
        clock.cancel(timer);
    }
    set_display(&mut route, &mut clock, false);
    notifications.dismiss_all(&mut clock);
    info!(now = clock.now(), "session finished, returning to order list");
}
