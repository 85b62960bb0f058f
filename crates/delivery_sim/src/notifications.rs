//! In-app notification bus. Publishing arms an expiry timer on the
//! simulation clock; dismissing — by hand or wholesale — always cancels that
//! timer, so a dismissed notification can never pop back up when its old
//! timer fires.

use std::collections::VecDeque;

use bevy_ecs::prelude::Resource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::{EventKind, EventSubject, SimulationClock, TimerId};

/// Monotonically increasing notification handle. Never reused within a
/// session, which makes it usable as a poll cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    StageUpdate,
    DriverUpdate,
    DriverMessage,
    TrafficIncident,
}

/// A notification currently on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub published_at: u64,
    /// `None` keeps the notification up until it is dismissed explicitly.
    pub duration_ms: Option<u64>,
    pub(crate) expiry_timer: Option<TimerId>,
}

/// Journal record kept after a notification leaves the screen.
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub published_at: u64,
    pub resolved_at: Option<u64>,
}

const JOURNAL_CAP: usize = 200;

pub const DEFAULT_NOTIFICATION_DURATION_MS: u64 = 4000;

/// Active notifications plus a bounded journal of everything published.
#[derive(Resource, Debug)]
pub struct NotificationLog {
    active: Vec<Notification>,
    journal: VecDeque<JournalEntry>,
    next_id: u64,
    default_duration_ms: u64,
}

impl Default for NotificationLog {
    fn default() -> Self {
        Self::new(DEFAULT_NOTIFICATION_DURATION_MS)
    }
}

impl NotificationLog {
    pub fn new(default_duration_ms: u64) -> Self {
        Self {
            active: Vec::new(),
            journal: VecDeque::new(),
            next_id: 1,
            default_duration_ms,
        }
    }

    /// Publish with the bus default auto-dismiss duration.
    pub fn publish(
        &mut self,
        clock: &mut SimulationClock,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> NotificationId {
        let duration = self.default_duration_ms;
        self.publish_with_duration(clock, kind, title, message, Some(duration))
    }

    /// Publish with an explicit duration; `None` means the notification stays
    /// until dismissed.
    pub fn publish_with_duration(
        &mut self,
        clock: &mut SimulationClock,
        kind: NotificationKind,
        title: impl Into<String>,
        message: impl Into<String>,
        duration_ms: Option<u64>,
    ) -> NotificationId {
        let id = NotificationId(self.next_id);
        self.next_id += 1;

        let title = title.into();
        let message = message.into();
        let published_at = clock.now();
        let expiry_timer = duration_ms.map(|delay| {
            clock.schedule_once(
                delay,
                EventKind::NotificationExpiry,
                Some(EventSubject::Notification(id)),
            )
        });

        debug!(id = id.0, ?kind, %title, "notification published");
        self.active.push(Notification {
            id,
            kind,
            title: title.clone(),
            message: message.clone(),
            published_at,
            duration_ms,
            expiry_timer,
        });
        if self.journal.len() == JOURNAL_CAP {
            self.journal.pop_front();
        }
        self.journal.push_back(JournalEntry {
            id,
            kind,
            title,
            message,
            published_at,
            resolved_at: None,
        });
        id
    }

    /// Remove a notification and cancel its pending expiry. Unknown ids are a
    /// no-op so double-dismissal (user taps, timer fires) stays harmless.
    pub fn dismiss(&mut self, clock: &mut SimulationClock, id: NotificationId) -> bool {
        let Some(index) = self.active.iter().position(|n| n.id == id) else {
            return false;
        };
        let notification = self.active.remove(index);
        if let Some(timer) = notification.expiry_timer {
            clock.cancel(timer);
        }
        self.resolve_journal(id, clock.now());
        true
    }

    /// Dismiss every active notification, cancelling all expiry timers.
    pub fn dismiss_all(&mut self, clock: &mut SimulationClock) {
        let now = clock.now();
        for notification in self.active.drain(..) {
            if let Some(timer) = notification.expiry_timer {
                clock.cancel(timer);
            }
            let id = notification.id;
            if let Some(entry) = self.journal.iter_mut().find(|e| e.id == id) {
                entry.resolved_at = Some(now);
            }
        }
    }

    /// Timer-driven removal. The expiry timer has already fired, so there is
    /// nothing to cancel; an id that was dismissed in the meantime is skipped.
    pub fn expire(&mut self, now: u64, id: NotificationId) {
        let Some(index) = self.active.iter().position(|n| n.id == id) else {
            debug!(id = id.0, "expiry fired for already-dismissed notification");
            return;
        };
        self.active.remove(index);
        self.resolve_journal(id, now);
    }

    fn resolve_journal(&mut self, id: NotificationId, now: u64) {
        if let Some(entry) = self.journal.iter_mut().find(|e| e.id == id) {
            entry.resolved_at = Some(now);
        }
    }

    /// Currently visible notifications in publish order.
    pub fn active(&self) -> &[Notification] {
        &self.active
    }

    pub fn journal(&self) -> impl Iterator<Item = &JournalEntry> {
        self.journal.iter()
    }

    /// Everything published after `cursor` (all of the journal when `None`),
    /// including notifications that have since expired. Poll with the last
    /// seen id to consume the bus without a callback.
    pub fn published_since(&self, cursor: Option<NotificationId>) -> Vec<JournalEntry> {
        self.journal
            .iter()
            .filter(|entry| cursor.map_or(true, |c| entry.id > c))
            .cloned()
            .collect()
    }

    pub fn latest_id(&self) -> Option<NotificationId> {
        self.journal.back().map(|entry| entry.id)
    }
}
