mod support;

use delivery_sim::notifications::{NotificationKind, NotificationLog};
use delivery_sim::session::{SessionParams, TrackingSession};
use support::schedule::ScheduleRunner;
use support::world::TestWorldBuilder;

fn seeded(seed: u64) -> SessionParams {
    SessionParams::default().with_seed(seed)
}

#[test]
fn stage_notification_autodismisses_after_its_duration() {
    let mut session = TrackingSession::start(None, seeded(3));

    session.advance_until(5_000);
    assert!(session
        .notifications()
        .iter()
        .any(|n| n.message == "Processing your order"));

    session.advance_until(8_999);
    assert!(session
        .notifications()
        .iter()
        .any(|n| n.message == "Processing your order"));

    session.advance_by(1);
    assert!(session
        .notifications()
        .iter()
        .all(|n| n.message != "Processing your order"));

    let entry = session
        .notifications_since(None)
        .into_iter()
        .find(|e| e.message == "Processing your order")
        .expect("journal keeps expired entries");
    assert_eq!(entry.published_at, 5_000);
    assert_eq!(entry.resolved_at, Some(9_000));
}

#[test]
fn manual_dismissal_cancels_the_expiry_timer() {
    let mut session = TrackingSession::start(None, seeded(3));
    session.advance_until(5_000);

    let id = session
        .notifications()
        .iter()
        .find(|n| n.kind == NotificationKind::StageUpdate)
        .map(|n| n.id)
        .expect("stage notification on screen");
    let timers = session.live_timers();

    assert!(session.dismiss_notification(id));
    assert_eq!(session.live_timers(), timers - 1);

    // Dismissing the same id again reports nothing to do.
    assert!(!session.dismiss_notification(id));

    // The cancelled expiry never rewrites the resolution time.
    session.advance_until(12_000);
    let entry = session
        .notifications_since(None)
        .into_iter()
        .find(|e| e.id == id)
        .expect("journal entry");
    assert_eq!(entry.resolved_at, Some(5_000));
}

#[test]
fn dismiss_all_clears_the_tray() {
    let mut session = TrackingSession::start(None, seeded(3));
    session.advance_until(11_000);
    assert!(!session.notifications().is_empty());

    let dismissed: Vec<_> = session.notifications().iter().map(|n| n.id).collect();
    session.dismiss_all_notifications();
    assert!(session.notifications().is_empty());

    // Later publishes repopulate the tray, but nothing dismissed comes back.
    session.advance_until(15_000);
    assert!(session
        .notifications()
        .iter()
        .all(|n| !dismissed.contains(&n.id)));
    for entry in session.notifications_since(None) {
        if dismissed.contains(&entry.id) {
            assert_eq!(entry.resolved_at, Some(11_000));
        }
    }
}

#[test]
fn poll_cursor_returns_only_newer_entries() {
    let mut session = TrackingSession::start(None, seeded(3));
    session.advance_until(6_000);
    let cursor = session.latest_notification_id();
    assert!(cursor.is_some());
    let seen = session.notifications_since(None).len();

    session.advance_until(12_000);
    let fresh = session.notifications_since(cursor);
    assert!(fresh
        .iter()
        .any(|e| e.message == "Driver on the way to pickup"));
    assert!(fresh.iter().all(|e| Some(e.id) > cursor));
    assert_eq!(session.notifications_since(None).len(), seen + fresh.len());
}

#[test]
fn every_notification_kind_reaches_the_journal() {
    let mut world = TestWorldBuilder::new().with_seed(3).build();
    let mut runner = ScheduleRunner::new();
    runner.advance_until(&mut world, 25_000);

    let log = world.resource::<NotificationLog>();
    assert!(log.journal().any(|e| e.kind == NotificationKind::StageUpdate));
    assert!(log.journal().any(|e| e.kind == NotificationKind::DriverUpdate));
    assert!(log.journal().any(|e| e.kind == NotificationKind::DriverMessage));

    // The poll cursor is a filtered read of the same journal.
    assert_eq!(log.journal().count(), log.published_since(None).len());
}
