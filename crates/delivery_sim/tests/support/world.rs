#![allow(dead_code)]

use bevy_ecs::prelude::World;
use delivery_sim::session::{build_session, SessionParams};

/// Helper that builds a fully provisioned session world for tests that drive
/// the runner directly instead of going through the facade.
#[derive(Debug, Default)]
pub struct TestWorldBuilder {
    params: Option<SessionParams>,
    order_id: Option<String>,
}

impl TestWorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeded default parameters; every helper RNG becomes deterministic.
    pub fn with_seed(mut self, seed: u64) -> Self {
        let params = self.params.take().unwrap_or_default().with_seed(seed);
        self.params = Some(params);
        self
    }

    /// Replace the whole parameter set.
    pub fn with_params(mut self, params: SessionParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Track a specific order instead of the default.
    pub fn with_order_id(mut self, order_id: &str) -> Self {
        self.order_id = Some(order_id.to_string());
        self
    }

    pub fn build(self) -> World {
        let params = self.params.unwrap_or_else(|| SessionParams::default().with_seed(42));
        let mut world = World::new();
        build_session(&mut world, &params, self.order_id.as_deref());
        world
    }
}
