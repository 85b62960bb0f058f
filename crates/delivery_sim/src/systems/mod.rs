//! One system per timer event kind. The runner routes each popped firing
//! through the schedule; `run_if` gates make sure only the matching handler
//! does work.

pub mod completion;
pub mod driver_message;
pub mod geo_step;
pub mod notification_expiry;
pub mod reassignment;
pub mod route_tick;
pub mod snapshot;
pub mod stage_advance;
pub mod traffic_shift;
