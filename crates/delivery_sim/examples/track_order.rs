//! Example: track one fuel delivery from checkout to the final redirect.
//!
//! Runs the whole session on the virtual clock (no wall-time waits), polling
//! the notification bus the way a tracking view would, and prints the
//! telemetry at the end.
//!
//! Pass a seed to make the run reproducible:
//!
//! ```text
//! cargo run --example track_order -- 42
//! ```

use delivery_sim::clock::ONE_SEC_MS;
use delivery_sim::order::CompletionStep;
use delivery_sim::session::{SessionParams, TrackingSession};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut params = SessionParams::default();
    params.seed = std::env::args().nth(1).and_then(|arg| arg.parse().ok());

    let mut session = TrackingSession::start(Some("ORD-1234"), params);
    println!("Tracking order {} ({})", session.order().id, session.order().status_detail);
    println!("Driver: {} · {}", session.order().driver.name, session.order().license_plate);
    println!("ETA: {}\n", session.order().estimated_window);

    // Peek at the route panel for the first few seconds.
    session.toggle_route_display(true);

    let mut cursor = None;
    let mut last_stage = session.stage_index();
    while !session.is_delivered() {
        session.advance_by(ONE_SEC_MS);

        for entry in session.notifications_since(cursor) {
            println!("[{:>6} ms] {} — {}", entry.published_at, entry.title, entry.message);
            cursor = Some(entry.id);
        }
        if session.stage_index() != last_stage {
            last_stage = session.stage_index();
            println!(
                "[{:>6} ms] progress {:>3}% · driver at ({:.4}, {:.4})",
                session.now(),
                session.order().progress,
                session.driver_position().lat,
                session.driver_position().lng,
            );
        }
    }
    session.toggle_route_display(false);

    // Wait for the arrival prompt, then walk the confirmation chain.
    while session.completion_step() == CompletionStep::NotStarted {
        session.advance_by(ONE_SEC_MS);
    }
    println!("\n=== Completion ===");
    for step in [
        CompletionStep::ArrivalConfirmation,
        CompletionStep::ServiceInProgress,
        CompletionStep::PaymentConfirmation,
        CompletionStep::RatingCapture,
    ] {
        if session.acknowledge(step) {
            println!("acknowledged {step:?}");
        }
    }
    while !session.is_finished() {
        session.advance_by(ONE_SEC_MS);
    }
    println!("redirected home at {} ms", session.now());

    let summary = session.telemetry().summary();
    println!("\n=== Session summary ===");
    println!("Stage transitions: {}", summary.stage_transitions);
    println!("Driver reassignments: {}", summary.reassignments);
    println!("Snapshots captured: {}", session.snapshots().len());
    println!("Live timers at exit: {}", session.live_timers());

    session.stop();
    Ok(())
}
