mod support;

use delivery_sim::notifications::NotificationKind;
use delivery_sim::order::CompletionStep;
use delivery_sim::session::{SessionParams, TrackingSession};

#[test]
fn overridden_cadences_fire_on_the_exact_beat() {
    // Degenerate min == max ranges pin every delay draw to the minimum, so
    // this timeline holds for any seed.
    let params = SessionParams::default()
        .with_seed(9)
        .with_reassign_interval_ms(7_000, 7_000)
        .with_chat_interval_ms(9_000, 9_000)
        .with_traffic(4_000, 4_000, 1.0);
    let mut session = TrackingSession::start(None, params);

    session.advance_until(25_000);
    assert!(session.is_delivered());

    let reassigned: Vec<u64> = session
        .telemetry()
        .reassignments()
        .iter()
        .map(|r| r.timestamp_ms)
        .collect();
    assert_eq!(reassigned, vec![7_000, 14_000, 21_000]);

    let chatter: Vec<u64> = session
        .notifications_since(None)
        .iter()
        .filter(|e| e.kind == NotificationKind::DriverMessage)
        .map(|e| e.published_at)
        .collect();
    assert_eq!(chatter, vec![9_000, 18_000]);

    // Probability 1.0 raises an incident on every shift.
    let incidents: Vec<u64> = session
        .notifications_since(None)
        .iter()
        .filter(|e| e.kind == NotificationKind::TrafficIncident)
        .map(|e| e.published_at)
        .collect();
    assert_eq!(incidents, vec![4_000, 8_000, 12_000, 16_000, 20_000, 24_000]);
}

#[test]
fn custom_completion_delays_shift_the_prompt_and_redirect() {
    let params = SessionParams::default()
        .with_seed(17)
        .with_completion_delays_ms(1_000, 2_000);
    let mut session = TrackingSession::start(None, params);

    session.advance_until(25_999);
    assert!(session.is_delivered());
    assert_eq!(session.completion_step(), CompletionStep::NotStarted);

    session.advance_by(1);
    assert_eq!(session.completion_step(), CompletionStep::ArrivalConfirmation);

    assert!(session.acknowledge(CompletionStep::ArrivalConfirmation));
    assert!(session.acknowledge(CompletionStep::ServiceInProgress));
    assert!(session.acknowledge(CompletionStep::PaymentConfirmation));
    assert!(session.acknowledge(CompletionStep::RatingCapture));
    assert_eq!(session.completion_step(), CompletionStep::RedirectPending);

    session.advance_until(27_999);
    assert!(!session.is_finished());

    session.advance_by(1);
    assert!(session.is_finished());
    assert!(session.notifications().is_empty());
    assert_eq!(session.live_timers(), 0);
}

#[test]
fn custom_notification_duration_sets_the_expiry() {
    let params = SessionParams::default()
        .with_seed(5)
        .with_notification_duration_ms(1_500);
    let mut session = TrackingSession::start(None, params);

    session.advance_until(6_499);
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
        .expect("stage entry in the journal");
    assert_eq!(entry.published_at, 5_000);
    assert_eq!(entry.resolved_at, Some(6_500));
}
