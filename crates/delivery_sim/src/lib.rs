pub mod catalog;
pub mod clock;
pub mod drivers;
pub mod geo;
pub mod notifications;
pub mod order;
pub mod route;
pub mod runner;
pub mod session;
pub mod systems;
pub mod telemetry;
pub mod traffic;
