//! Session telemetry: an append-only log of stage transitions and driver
//! reassignments, plus a bounded ring of periodic state snapshots for
//! inspecting a run after the fact.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;

use crate::notifications::NotificationId;
use crate::order::{CompletionStep, GeoPoint, Order, OrderStatus};
use crate::traffic::TrafficIntensity;

#[derive(Debug, Clone, PartialEq)]
pub struct StageTransitionRecord {
    pub timestamp_ms: u64,
    pub stage_index: usize,
    pub status: OrderStatus,
    pub progress: u8,
    pub detail: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReassignmentRecord {
    pub timestamp_ms: u64,
    pub driver_name: String,
    pub estimated_window: String,
}

/// Counters the demo binary prints at the end of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetrySummary {
    pub stage_transitions: usize,
    pub reassignments: usize,
}

#[derive(Resource, Debug, Default)]
pub struct SessionTelemetry {
    transitions: Vec<StageTransitionRecord>,
    reassignments: Vec<ReassignmentRecord>,
}

impl SessionTelemetry {
    pub fn record_transition(
        &mut self,
        timestamp_ms: u64,
        stage_index: usize,
        status: OrderStatus,
        progress: u8,
        detail: &'static str,
    ) {
        self.transitions.push(StageTransitionRecord {
            timestamp_ms,
            stage_index,
            status,
            progress,
            detail,
        });
    }

    pub fn record_reassignment(
        &mut self,
        timestamp_ms: u64,
        driver_name: impl Into<String>,
        estimated_window: impl Into<String>,
    ) {
        self.reassignments.push(ReassignmentRecord {
            timestamp_ms,
            driver_name: driver_name.into(),
            estimated_window: estimated_window.into(),
        });
    }

    pub fn transitions(&self) -> &[StageTransitionRecord] {
        &self.transitions
    }

    pub fn reassignments(&self) -> &[ReassignmentRecord] {
        &self.reassignments
    }

    pub fn summary(&self) -> TelemetrySummary {
        TelemetrySummary {
            stage_transitions: self.transitions.len(),
            reassignments: self.reassignments.len(),
        }
    }
}

/// Full observable state at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub timestamp_ms: u64,
    pub order: Order,
    pub driver_position: GeoPoint,
    pub route_progress: u8,
    pub route_enabled: bool,
    pub traffic: TrafficIntensity,
    pub completion: CompletionStep,
    pub active_notifications: Vec<NotificationId>,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SnapshotConfig {
    pub interval_ms: u64,
    pub max_snapshots: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            interval_ms: 1000,
            max_snapshots: 10_000,
        }
    }
}

/// Ring buffer of periodic snapshots. Oldest entries are evicted once the
/// configured capacity is reached.
#[derive(Resource, Debug, Default)]
pub struct SessionSnapshots {
    snapshots: VecDeque<SessionSnapshot>,
    last_snapshot_at: Option<u64>,
}

impl SessionSnapshots {
    pub fn push(&mut self, snapshot: SessionSnapshot, max_snapshots: usize) {
        if max_snapshots == 0 {
            return;
        }
        if self.snapshots.len() == max_snapshots {
            self.snapshots.pop_front();
        }
        self.last_snapshot_at = Some(snapshot.timestamp_ms);
        self.snapshots.push_back(snapshot);
    }

    pub fn last_snapshot_at(&self) -> Option<u64> {
        self.last_snapshot_at
    }

    pub fn latest(&self) -> Option<&SessionSnapshot> {
        self.snapshots.back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SessionSnapshot> {
        self.snapshots.iter()
    }
}
