//! Order model: the shared state every simulation process reads and writes.
//!
//! The order lives in a single [`ActiveOrder`] resource. Writers (lifecycle
//! advance, driver reassignment, geo walk) mutate it through whole-group
//! updates — [`ActiveOrder::apply_stage`], [`ActiveOrder::assign_driver`] —
//! so no observer ever sees a torn state between two field writes.

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};

use crate::clock::TimerId;

/// Coarse order status shown to the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    InTransit,
    Delivered,
}

/// One row of the fixed lifecycle stage table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stage {
    pub status: OrderStatus,
    pub progress: u8,
    pub detail: &'static str,
}

/// The total-ordered stage table the lifecycle machine advances through.
/// Progress is monotone by construction; stages are never skipped.
pub const STAGE_TABLE: [Stage; 6] = [
    Stage {
        status: OrderStatus::Processing,
        progress: 0,
        detail: "Order received",
    },
    Stage {
        status: OrderStatus::Processing,
        progress: 20,
        detail: "Processing your order",
    },
    Stage {
        status: OrderStatus::InTransit,
        progress: 40,
        detail: "Driver on the way to pickup",
    },
    Stage {
        status: OrderStatus::InTransit,
        progress: 60,
        detail: "Fuel picked up, headed your way",
    },
    Stage {
        status: OrderStatus::InTransit,
        progress: 80,
        detail: "Almost at your location",
    },
    Stage {
        status: OrderStatus::Delivered,
        progress: 100,
        detail: "Delivery complete!",
    },
];

/// Geographic coordinate. Written only by the geo random walk; everything
/// else reads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Euclidean distance in coordinate space (the unit the per-tick step
    /// bound is expressed in, not meters).
    pub fn euclidean_distance(&self, other: &GeoPoint) -> f64 {
        let dlat = self.lat - other.lat;
        let dlng = self.lng - other.lng;
        (dlat * dlat + dlng * dlng).sqrt()
    }
}

/// Delivery driver as shown in the tracking view. Replaced wholesale on
/// reassignment, never mutated field-by-field (except the tracked location,
/// which the geo walk mirrors in).
#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub name: String,
    pub location: GeoPoint,
    pub rating: f64,
    pub phone: String,
    pub avatar_index: u8,
}

/// One line item of a fuel order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub name: String,
    pub quantity_label: String,
    pub price: f64,
}

/// The tracked order. One per session.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub progress: u8,
    pub status_detail: String,
    pub items: Vec<OrderItem>,
    pub total: f64,
    pub license_plate: String,
    pub estimated_window: String,
    pub driver: Driver,
}

/// The single authoritative order cell. All writers go through methods that
/// update every related field in one place.
#[derive(Debug, Resource)]
pub struct ActiveOrder {
    pub order: Order,
    stage_index: usize,
    completed_at: Option<u64>,
}

impl ActiveOrder {
    pub fn new(order: Order) -> Self {
        let mut active = Self {
            order,
            stage_index: 0,
            completed_at: None,
        };
        active.apply_stage(0);
        active
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn completed_at(&self) -> Option<u64> {
        self.completed_at
    }

    /// Move to `index` in the stage table, updating status, progress, and
    /// detail together. Out-of-table indices are ignored.
    pub fn apply_stage(&mut self, index: usize) {
        let Some(stage) = STAGE_TABLE.get(index) else {
            return;
        };
        self.stage_index = index;
        self.order.status = stage.status;
        self.order.progress = stage.progress;
        self.order.status_detail = stage.detail.to_string();
    }

    /// Mark the order complete at `now`. Idempotent: the first completion
    /// time wins.
    pub fn mark_complete(&mut self, now: u64) {
        if self.completed_at.is_none() {
            self.completed_at = Some(now);
        }
    }

    /// Swap the assigned driver, plate, and delivery window in one update.
    pub fn assign_driver(&mut self, driver: Driver, license_plate: String, window: String) {
        self.order.driver = driver;
        self.order.license_plate = license_plate;
        self.order.estimated_window = window;
    }
}

/// Lifecycle cadence and the handles of its timers.
#[derive(Debug, Resource)]
pub struct LifecycleProcess {
    pub advance_interval_ms: u64,
    pub completion_prompt_delay_ms: u64,
    pub redirect_delay_ms: u64,
    pub(crate) timer: Option<TimerId>,
}

impl LifecycleProcess {
    pub fn new(advance_interval_ms: u64, prompt_delay_ms: u64, redirect_delay_ms: u64) -> Self {
        Self {
            advance_interval_ms,
            completion_prompt_delay_ms: prompt_delay_ms,
            redirect_delay_ms,
            timer: None,
        }
    }
}

/// Steps of the post-delivery confirmation chain. Every step except the
/// final redirect waits for an explicit acknowledgment of the step before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompletionStep {
    NotStarted,
    ArrivalConfirmation,
    ServiceInProgress,
    PaymentConfirmation,
    RatingCapture,
    RedirectPending,
    Finished,
}

impl CompletionStep {
    /// The step that follows an acknowledgment of `self`, if any.
    pub fn next_on_acknowledge(self) -> Option<CompletionStep> {
        match self {
            CompletionStep::ArrivalConfirmation => Some(CompletionStep::ServiceInProgress),
            CompletionStep::ServiceInProgress => Some(CompletionStep::PaymentConfirmation),
            CompletionStep::PaymentConfirmation => Some(CompletionStep::RatingCapture),
            CompletionStep::RatingCapture => Some(CompletionStep::RedirectPending),
            CompletionStep::NotStarted
            | CompletionStep::RedirectPending
            | CompletionStep::Finished => None,
        }
    }
}

/// State of the completion sequence plus the handles of its two one-shots
/// (the delayed arrival prompt and the final auto-redirect).
#[derive(Debug, Resource)]
pub struct CompletionSequence {
    pub step: CompletionStep,
    pub(crate) prompt_timer: Option<TimerId>,
    pub(crate) redirect_timer: Option<TimerId>,
}

impl Default for CompletionSequence {
    fn default() -> Self {
        Self {
            step: CompletionStep::NotStarted,
            prompt_timer: None,
            redirect_timer: None,
        }
    }
}
