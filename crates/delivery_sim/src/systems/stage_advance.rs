use bevy_ecs::prelude::ResMut;
use tracing::{debug, info};

use crate::clock::{EventKind, SimulationClock};
use crate::drivers::{DriverMessenger, ReassignmentProcess};
use crate::notifications::{NotificationKind, NotificationLog};
use crate::order::{ActiveOrder, CompletionSequence, LifecycleProcess, STAGE_TABLE};
use crate::telemetry::SessionTelemetry;

/// Advance the order one stage per firing. Status, progress, and detail move
/// together so no observer sees a torn update. Reaching the final stage marks
/// the order complete, stops the in-flight processes (lifecycle cadence,
/// reassignment, driver chat), and arms the delayed completion prompt.
#[allow(clippy::too_many_arguments)]
pub fn stage_advance_system(
    mut clock: ResMut<SimulationClock>,
    mut active: ResMut<ActiveOrder>,
    mut lifecycle: ResMut<LifecycleProcess>,
    mut completion: ResMut<CompletionSequence>,
    mut reassignment: ResMut<ReassignmentProcess>,
    mut messenger: ResMut<DriverMessenger>,
    mut telemetry: ResMut<SessionTelemetry>,
    mut notifications: ResMut<NotificationLog>,
) {
    if active.is_complete() {
        debug!("stage advance fired after completion");
        return;
    }
    let next = active.stage_index() + 1;
    let Some(stage) = STAGE_TABLE.get(next) else {
        return;
    };

    active.apply_stage(next);
    telemetry.record_transition(clock.now(), next, stage.status, stage.progress, stage.detail);
    notifications.publish(
        &mut clock,
        NotificationKind::StageUpdate,
        "Order update",
        stage.detail,
    );
    info!(stage = next, detail = stage.detail, "order stage advanced");

    if next == STAGE_TABLE.len() - 1 {
        active.mark_complete(clock.now());
        let stopped = [
            lifecycle.timer.take(),
            reassignment.timer.take(),
            messenger.timer.take(),
        ];
        for timer in stopped.into_iter().flatten() {
            clock.cancel(timer);
        }
        completion.prompt_timer = Some(clock.schedule_once(
            lifecycle.completion_prompt_delay_ms,
            EventKind::CompletionPrompt,
            None,
        ));
        info!(completed_at = clock.now(), "order delivered");
    }
}
