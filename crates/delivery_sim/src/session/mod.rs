//! The tracking session facade: owns the world and schedule and exposes the
//! operations a tracking view calls — start, advance, toggle the route
//! panel, acknowledge completion steps, dismiss notifications, stop.

mod build;
mod params;

pub use build::build_session;
pub use params::SessionParams;

use bevy_ecs::prelude::{Schedule, World};
use bevy_ecs::world::Mut;
use tracing::{debug, info};

use crate::clock::{EventKind, SimulationClock, TimerId};
use crate::drivers::{DriverMessenger, ReassignmentProcess};
use crate::geo::{DriverPosition, GeoWalk};
use crate::notifications::{JournalEntry, Notification, NotificationId, NotificationLog};
use crate::order::{
    ActiveOrder, CompletionSequence, CompletionStep, GeoPoint, LifecycleProcess, Order,
};
use crate::route::{set_display, RouteProgress};
use crate::runner;
use crate::telemetry::{SessionSnapshots, SessionTelemetry};
use crate::traffic::{TrafficConditions, TrafficGenerator, TrafficIntensity};

pub struct TrackingSession {
    world: World,
    schedule: Schedule,
    stopped: bool,
}

impl TrackingSession {
    /// Start tracking `order_id`. Missing or unknown ids track the default
    /// order.
    pub fn start(order_id: Option<&str>, params: SessionParams) -> Self {
        let mut world = World::new();
        build::build_session(&mut world, &params, order_id);
        Self {
            world,
            schedule: runner::simulation_schedule(),
            stopped: false,
        }
    }

    /// Current simulated time in milliseconds since session start.
    pub fn now(&self) -> u64 {
        self.world.resource::<SimulationClock>().now()
    }

    /// Process the next due firing, if any.
    pub fn run_next(&mut self) -> bool {
        runner::run_next_event(&mut self.world, &mut self.schedule)
    }

    /// Run everything due within the next `delta_ms`, landing exactly on the
    /// deadline. Returns the number of firings processed.
    pub fn advance_by(&mut self, delta_ms: u64) -> usize {
        let deadline = self.now().saturating_add(delta_ms);
        self.advance_until(deadline)
    }

    pub fn advance_until(&mut self, deadline_ms: u64) -> usize {
        runner::advance_until(&mut self.world, &mut self.schedule, deadline_ms)
    }

    /// Open or close the route panel. Opening twice is a no-op; closing
    /// resets progress and cancels the animation tick.
    pub fn toggle_route_display(&mut self, enabled: bool) {
        if self.stopped {
            debug!("route toggle after stop ignored");
            return;
        }
        self.world
            .resource_scope(|world, mut route: Mut<RouteProgress>| {
                let mut clock = world.resource_mut::<SimulationClock>();
                set_display(&mut route, &mut clock, enabled);
            });
    }

    /// Acknowledge the current completion step. Only an acknowledgment of
    /// the step actually showing advances the chain; anything else is
    /// ignored. Acknowledging the rating step arms the auto-redirect.
    pub fn acknowledge(&mut self, expected: CompletionStep) -> bool {
        if self.stopped {
            return false;
        }
        let redirect_delay_ms = self.world.resource::<LifecycleProcess>().redirect_delay_ms;
        self.world
            .resource_scope(|world, mut completion: Mut<CompletionSequence>| {
                if completion.step != expected {
                    debug!(current = ?completion.step, ?expected, "acknowledgment ignored");
                    return false;
                }
                let Some(next) = completion.step.next_on_acknowledge() else {
                    return false;
                };
                completion.step = next;
                info!(step = ?next, "completion step acknowledged");
                if next == CompletionStep::RedirectPending {
                    let mut clock = world.resource_mut::<SimulationClock>();
                    completion.redirect_timer = Some(clock.schedule_once(
                        redirect_delay_ms,
                        EventKind::CompletionRedirect,
                        None,
                    ));
                }
                true
            })
    }

    /// Dismiss one notification by hand, cancelling its expiry timer.
    pub fn dismiss_notification(&mut self, id: NotificationId) -> bool {
        self.world
            .resource_scope(|world, mut log: Mut<NotificationLog>| {
                let mut clock = world.resource_mut::<SimulationClock>();
                log.dismiss(&mut clock, id)
            })
    }

    /// Clear the notification tray.
    pub fn dismiss_all_notifications(&mut self) {
        self.world
            .resource_scope(|world, mut log: Mut<NotificationLog>| {
                let mut clock = world.resource_mut::<SimulationClock>();
                log.dismiss_all(&mut clock);
            });
    }

    /// Tear the session down: cancel every live timer and clear the tray.
    /// Idempotent; afterwards no timer is armed and nothing fires again.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.world
            .resource_scope(|world, mut clock: Mut<SimulationClock>| {
                for timer in take_process_timers(world) {
                    clock.cancel(timer);
                }
                {
                    let mut route = world.resource_mut::<RouteProgress>();
                    set_display(&mut route, &mut clock, false);
                }
                world
                    .resource_mut::<NotificationLog>()
                    .dismiss_all(&mut clock);
            });
        debug_assert!(self.world.resource::<SimulationClock>().is_idle());
        info!(now = self.now(), "tracking session stopped");
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    pub fn order(&self) -> &Order {
        &self.world.resource::<ActiveOrder>().order
    }

    pub fn stage_index(&self) -> usize {
        self.world.resource::<ActiveOrder>().stage_index()
    }

    pub fn is_delivered(&self) -> bool {
        self.world.resource::<ActiveOrder>().is_complete()
    }

    pub fn driver_position(&self) -> GeoPoint {
        self.world.resource::<DriverPosition>().0
    }

    pub fn route(&self) -> &RouteProgress {
        self.world.resource::<RouteProgress>()
    }

    pub fn traffic(&self) -> TrafficIntensity {
        self.world.resource::<TrafficConditions>().intensity
    }

    pub fn completion_step(&self) -> CompletionStep {
        self.world.resource::<CompletionSequence>().step
    }

    /// Whether the auto-redirect has closed the session.
    pub fn is_finished(&self) -> bool {
        self.completion_step() == CompletionStep::Finished
    }

    /// Notifications currently on screen, in publish order.
    pub fn notifications(&self) -> &[Notification] {
        self.world.resource::<NotificationLog>().active()
    }

    /// Everything published after `cursor`, expired or not. Poll with the
    /// last seen id to consume the bus without a callback.
    pub fn notifications_since(&self, cursor: Option<NotificationId>) -> Vec<JournalEntry> {
        self.world
            .resource::<NotificationLog>()
            .published_since(cursor)
    }

    pub fn latest_notification_id(&self) -> Option<NotificationId> {
        self.world.resource::<NotificationLog>().latest_id()
    }

    pub fn telemetry(&self) -> &SessionTelemetry {
        self.world.resource()
    }

    pub fn snapshots(&self) -> &SessionSnapshots {
        self.world.resource()
    }

    /// Number of armed timers; zero after [`stop`](Self::stop).
    pub fn live_timers(&self) -> usize {
        self.world.resource::<SimulationClock>().live_timers()
    }
}

/// Pull the handle out of every process that might still hold a live timer.
fn take_process_timers(world: &mut World) -> Vec<TimerId> {
    let mut timers = Vec::new();
    timers.extend(world.resource_mut::<LifecycleProcess>().timer.take());
    {
        let mut completion = world.resource_mut::<CompletionSequence>();
        timers.extend(completion.prompt_timer.take());
        timers.extend(completion.redirect_timer.take());
    }
    timers.extend(world.resource_mut::<ReassignmentProcess>().timer.take());
    timers.extend(world.resource_mut::<GeoWalk>().timer.take());
    timers.extend(world.resource_mut::<TrafficGenerator>().timer.take());
    timers.extend(world.resource_mut::<DriverMessenger>().timer.take());
    timers.extend(world.resource_mut::<RouteProgress>().timer.take());
    timers
}
