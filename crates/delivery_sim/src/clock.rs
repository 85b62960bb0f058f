//! Virtual clock / timer scheduler: the only component that owns time.
//!
//! All simulation processes run off timers armed here. Timers are kept in a
//! min-heap ordered by (due time, arm sequence), so same-millisecond firings
//! dispatch in the order they were armed. Cancellation is lazy: a cancelled
//! timer stays in the heap and is skipped when it surfaces, which keeps
//! `cancel` O(1) and makes cancelling an unknown or already-fired handle a
//! no-op rather than an error.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use bevy_ecs::prelude::Resource;

use crate::notifications::NotificationId;

pub const ONE_SEC_MS: u64 = 1000;

/// Kinds of timer firings routed to systems by the runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    StageAdvance,
    CompletionPrompt,
    CompletionRedirect,
    DriverReassign,
    GeoStep,
    RouteTick,
    TrafficShift,
    DriverMessage,
    NotificationExpiry,
}

/// Optional payload identifying what a firing is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventSubject {
    Notification(NotificationId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    pub timestamp: u64,
    pub kind: EventKind,
    pub subject: Option<EventSubject>,
}

/// The event currently being dispatched; inserted by the runner before each
/// schedule run so systems can gate on it.
#[derive(Debug, Clone, Copy, Resource)]
pub struct CurrentEvent(pub Event);

/// Opaque handle for a scheduled timer. Handles are never reused within a
/// session, and a periodic timer keeps its handle across re-arms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug, Clone, Copy)]
struct TimerEntry {
    kind: EventKind,
    subject: Option<EventSubject>,
    repeat: Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fire {
    due: u64,
    seq: u64,
    timer: TimerId,
}

impl Ord for Fire {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering to make BinaryHeap a min-heap; ties break FIFO by
        // arm sequence.
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Fire {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Simulation clock and timer table.
///
/// Time only moves when the runner pops a firing (or explicitly fast-forwards
/// with [`advance_to`](Self::advance_to)), so tests drive the clock exactly.
#[derive(Debug, Default, Resource)]
pub struct SimulationClock {
    now: u64,
    next_id: u64,
    next_seq: u64,
    fires: BinaryHeap<Fire>,
    timers: HashMap<TimerId, TimerEntry>,
}

impl SimulationClock {
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arm a one-shot timer `delay_ms` from now.
    pub fn schedule_once(
        &mut self,
        delay_ms: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> TimerId {
        self.arm(self.now.saturating_add(delay_ms), kind, subject, Repeat::Once)
    }

    /// Arm a repeating timer; first firing after one interval, then re-armed
    /// under the same handle until cancelled. A zero interval is clamped to
    /// 1 ms so a periodic timer can never pin the clock to one millisecond.
    pub fn schedule_every(
        &mut self,
        interval_ms: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
    ) -> TimerId {
        let interval = interval_ms.max(1);
        self.arm(
            self.now.saturating_add(interval),
            kind,
            subject,
            Repeat::Every(interval),
        )
    }

    fn arm(
        &mut self,
        due: u64,
        kind: EventKind,
        subject: Option<EventSubject>,
        repeat: Repeat,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            TimerEntry {
                kind,
                subject,
                repeat,
            },
        );
        self.push_fire(due, id);
        id
    }

    fn push_fire(&mut self, due: u64, timer: TimerId) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.fires.push(Fire { due, seq, timer });
    }

    /// Disarm a timer. Unknown and already-fired handles are a no-op.
    pub fn cancel(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    /// Whether the handle refers to a live (armed) timer.
    pub fn is_armed(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of live timers. Zero after a session released everything.
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Due time of the next live firing, skimming off cancelled entries.
    pub fn next_due(&mut self) -> Option<u64> {
        while let Some(top) = self.fires.peek() {
            if self.timers.contains_key(&top.timer) {
                return Some(top.due);
            }
            self.fires.pop();
        }
        None
    }

    /// Pop the next live firing, advancing `now` to its due time. Periodic
    /// timers are re-armed under the same handle.
    pub fn pop_next(&mut self) -> Option<Event> {
        loop {
            let fire = self.fires.pop()?;
            let Some(entry) = self.timers.get(&fire.timer).copied() else {
                // Cancelled while queued.
                continue;
            };
            debug_assert!(fire.due >= self.now, "timer due in the past");
            self.now = fire.due;
            match entry.repeat {
                Repeat::Once => {
                    self.timers.remove(&fire.timer);
                }
                Repeat::Every(interval) => {
                    self.push_fire(fire.due.saturating_add(interval), fire.timer);
                }
            }
            return Some(Event {
                timestamp: fire.due,
                kind: entry.kind,
                subject: entry.subject,
            });
        }
    }

    /// Fast-forward an idle clock (no due firings before `ms`) to `ms`.
    /// Moving backwards is a no-op.
    pub fn advance_to(&mut self, ms: u64) {
        debug_assert!(
            self.next_due().map_or(true, |due| due >= ms),
            "advance_to would skip a due timer"
        );
        if ms > self.now {
            self.now = ms;
        }
    }
}
