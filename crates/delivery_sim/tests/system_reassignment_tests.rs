mod support;

use delivery_sim::catalog::DELIVERY_WINDOWS;
use delivery_sim::clock::SimulationClock;
use delivery_sim::geo::DriverPosition;
use delivery_sim::order::ActiveOrder;
use delivery_sim::telemetry::SessionTelemetry;
use support::schedule::ScheduleRunner;
use support::world::TestWorldBuilder;

#[test]
fn reassignment_always_picks_a_different_driver() {
    for seed in [1, 2, 3, 17, 99] {
        let mut world = TestWorldBuilder::new().with_seed(seed).build();
        let mut runner = ScheduleRunner::new();
        let mut previous = world.resource::<ActiveOrder>().order.driver.name.clone();

        runner.advance_until(&mut world, 25_000);

        let telemetry = world.resource::<SessionTelemetry>();
        assert!(!telemetry.reassignments().is_empty(), "seed {seed}");
        for record in telemetry.reassignments() {
            assert_ne!(record.driver_name, previous, "seed {seed}");
            previous = record.driver_name.clone();
        }
    }
}

#[test]
fn reassignment_delays_stay_in_the_configured_range() {
    let mut world = TestWorldBuilder::new().with_seed(23).build();
    let mut runner = ScheduleRunner::new();

    runner.advance_until(&mut world, 25_000);

    let telemetry = world.resource::<SessionTelemetry>();
    let stamps: Vec<u64> = telemetry
        .reassignments()
        .iter()
        .map(|r| r.timestamp_ms)
        .collect();
    assert!(stamps.len() >= 2);
    assert!((5_000..10_000).contains(&stamps[0]), "first at {}", stamps[0]);
    for pair in stamps.windows(2) {
        let delta = pair[1] - pair[0];
        assert!((5_000..10_000).contains(&delta), "delta {delta}");
    }
}

#[test]
fn window_refresh_comes_from_the_catalog() {
    let mut world = TestWorldBuilder::new().with_seed(23).build();
    let mut runner = ScheduleRunner::new();

    runner.advance_until(&mut world, 25_000);

    let telemetry = world.resource::<SessionTelemetry>();
    for record in telemetry.reassignments() {
        assert!(
            DELIVERY_WINDOWS.contains(&record.estimated_window.as_str()),
            "unexpected window {:?}",
            record.estimated_window
        );
    }
    let last = telemetry.reassignments().last().unwrap().clone();
    let active = world.resource::<ActiveOrder>();
    assert_eq!(active.order.driver.name, last.driver_name);
    assert_eq!(active.order.estimated_window, last.estimated_window);
}

#[test]
fn driver_swap_keeps_the_marker_position() {
    let mut world = TestWorldBuilder::new().with_seed(37).build();
    let mut runner = ScheduleRunner::new();
    let mut previous_name = world.resource::<ActiveOrder>().order.driver.name.clone();
    let mut previous_position = world.resource::<DriverPosition>().0;

    for _ in 0..200 {
        if !runner.run_one(&mut world) {
            break;
        }
        if world.resource::<SimulationClock>().now() > 25_000 {
            break;
        }
        let position = world.resource::<DriverPosition>().0;
        let active = world.resource::<ActiveOrder>();
        // The canonical position and the order's marker never diverge.
        assert_eq!(active.order.driver.location, position);
        if active.order.driver.name != previous_name {
            // A swap hands over the marker where the previous driver left it.
            assert_eq!(position, previous_position);
            previous_name = active.order.driver.name.clone();
        }
        previous_position = position;
    }
}

#[test]
fn no_reassignment_after_delivery() {
    let mut world = TestWorldBuilder::new().with_seed(23).build();
    let mut runner = ScheduleRunner::new();

    runner.advance_until(&mut world, 60_000);
    let telemetry = world.resource::<SessionTelemetry>();
    assert!(telemetry
        .reassignments()
        .iter()
        .all(|r| r.timestamp_ms <= 25_000));
}
