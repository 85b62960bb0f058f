use bevy_ecs::prelude::ResMut;

use crate::clock::SimulationClock;
use crate::route::RouteProgress;

/// One animation frame for the route panel. At 100 the tick cancels itself;
/// a stray firing after toggle-off must not animate a hidden panel.
pub fn route_tick_system(mut clock: ResMut<SimulationClock>, mut route: ResMut<RouteProgress>) {
    if !route.enabled() {
        return;
    }
    if route.advance() {
        if let Some(timer) = route.timer.take() {
            clock.cancel(timer);
        }
    }
}
