//! Session tuning knobs.

use crate::clock::ONE_SEC_MS;
use crate::notifications::DEFAULT_NOTIFICATION_DURATION_MS;

/// Parameters for a tracking session. Defaults mirror the product cadence;
/// tests shrink the intervals to keep runs short.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionParams {
    /// Base RNG seed. `None` draws from entropy; setting it makes the whole
    /// session reproducible.
    pub seed: Option<u64>,
    /// Cadence of lifecycle stage advances.
    pub lifecycle_interval_ms: u64,
    /// Delay between delivery and the arrival confirmation prompt.
    pub completion_prompt_delay_ms: u64,
    /// Grace period between the rating acknowledgment and the auto-redirect.
    pub redirect_delay_ms: u64,
    pub reassign_min_interval_ms: u64,
    pub reassign_max_interval_ms: u64,
    pub geo_interval_ms: u64,
    /// Per-axis bound of one random-walk step, in coordinate degrees.
    pub geo_step_delta: f64,
    pub route_tick_ms: u64,
    /// Progress added per route animation tick.
    pub route_step: u8,
    pub traffic_min_interval_ms: u64,
    pub traffic_max_interval_ms: u64,
    pub incident_probability: f64,
    pub chat_min_interval_ms: u64,
    pub chat_max_interval_ms: u64,
    /// Auto-dismiss duration for published notifications.
    pub notification_duration_ms: u64,
    pub snapshot_interval_ms: u64,
    pub max_snapshots: usize,
    /// Whether the route panel starts open.
    pub route_display_on_start: bool,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            seed: None,
            lifecycle_interval_ms: 5 * ONE_SEC_MS,
            completion_prompt_delay_ms: 2 * ONE_SEC_MS,
            redirect_delay_ms: 5 * ONE_SEC_MS,
            reassign_min_interval_ms: 5 * ONE_SEC_MS,
            reassign_max_interval_ms: 10 * ONE_SEC_MS,
            geo_interval_ms: 3 * ONE_SEC_MS,
            geo_step_delta: 0.0005,
            route_tick_ms: 50,
            route_step: 2,
            traffic_min_interval_ms: 10 * ONE_SEC_MS,
            traffic_max_interval_ms: 15 * ONE_SEC_MS,
            incident_probability: 0.3,
            chat_min_interval_ms: 8 * ONE_SEC_MS,
            chat_max_interval_ms: 20 * ONE_SEC_MS,
            notification_duration_ms: DEFAULT_NOTIFICATION_DURATION_MS,
            snapshot_interval_ms: ONE_SEC_MS,
            max_snapshots: 10_000,
            route_display_on_start: false,
        }
    }
}

impl SessionParams {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_lifecycle_interval_ms(mut self, interval_ms: u64) -> Self {
        self.lifecycle_interval_ms = interval_ms;
        self
    }

    pub fn with_completion_delays_ms(mut self, prompt_ms: u64, redirect_ms: u64) -> Self {
        self.completion_prompt_delay_ms = prompt_ms;
        self.redirect_delay_ms = redirect_ms;
        self
    }

    pub fn with_reassign_interval_ms(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.reassign_min_interval_ms = min_ms;
        self.reassign_max_interval_ms = max_ms;
        self
    }

    pub fn with_geo_walk(mut self, interval_ms: u64, step_delta: f64) -> Self {
        self.geo_interval_ms = interval_ms;
        self.geo_step_delta = step_delta;
        self
    }

    pub fn with_route_animation(mut self, tick_ms: u64, step: u8) -> Self {
        self.route_tick_ms = tick_ms;
        self.route_step = step;
        self
    }

    pub fn with_traffic(mut self, min_ms: u64, max_ms: u64, incident_probability: f64) -> Self {
        self.traffic_min_interval_ms = min_ms;
        self.traffic_max_interval_ms = max_ms;
        self.incident_probability = incident_probability;
        self
    }

    pub fn with_chat_interval_ms(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.chat_min_interval_ms = min_ms;
        self.chat_max_interval_ms = max_ms;
        self
    }

    pub fn with_notification_duration_ms(mut self, duration_ms: u64) -> Self {
        self.notification_duration_ms = duration_ms;
        self
    }

    pub fn with_snapshots(mut self, interval_ms: u64, max_snapshots: usize) -> Self {
        self.snapshot_interval_ms = interval_ms;
        self.max_snapshots = max_snapshots;
        self
    }

    pub fn with_route_display_on_start(mut self, enabled: bool) -> Self {
        self.route_display_on_start = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_keep_randomized_ranges_ordered() {
        let params = SessionParams::default();
        assert!(params.reassign_min_interval_ms < params.reassign_max_interval_ms);
        assert!(params.traffic_min_interval_ms < params.traffic_max_interval_ms);
        assert!(params.chat_min_interval_ms < params.chat_max_interval_ms);
        assert!((0.0..=1.0).contains(&params.incident_probability));
    }

    #[test]
    fn builders_compose() {
        let params = SessionParams::default()
            .with_seed(7)
            .with_lifecycle_interval_ms(100)
            .with_route_animation(10, 5)
            .with_route_display_on_start(true);
        assert_eq!(params.seed, Some(7));
        assert_eq!(params.lifecycle_interval_ms, 100);
        assert_eq!(params.route_tick_ms, 10);
        assert_eq!(params.route_step, 5);
        assert!(params.route_display_on_start);
    }
}
