//! Timer system for Lume.
//!
//! Timers run against a virtual clock owned by the [`TimerManager`]. Nothing
//! fires on its own: the host advances the clock with
//! [`TimerManager::advance`], which runs every callback that came due, in
//! deadline order. This keeps auto-dismiss banners, ripple cleanup and
//! close animations deterministic under test.
//!
//! [`ScopedTimers`] groups the timers a single component started so they can
//! all be cancelled when it unmounts.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};
use crate::logging::{span_names, targets};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

type Callback = Box<dyn FnOnce() + Send>;

/// Queue length below which cancelled entries are left for `advance` to skip.
const COMPACT_MIN_QUEUE: usize = 32;

/// Internal timer data.
struct TimerData {
    /// Virtual time at which the timer fires.
    deadline: Duration,
    callback: Option<Callback>,
}

/// An entry in the timer queue (min-heap by deadline, FIFO among equals).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    deadline: Duration,
    seq: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.deadline == other.deadline && self.seq == other.seq
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .deadline
            .cmp(&self.deadline)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct TimerState {
    now: Duration,
    seq: u64,
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<TimerQueueEntry>,
}

/// Manages one-shot timers on a virtual clock.
pub struct TimerManager {
    state: Mutex<TimerState>,
}

impl TimerManager {
    /// Create a timer manager whose clock starts at zero.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(TimerState {
                now: Duration::ZERO,
                seq: 0,
                timers: SlotMap::with_key(),
                queue: BinaryHeap::new(),
            }),
        }
    }

    /// Current virtual time.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Start a one-shot timer that runs `callback` after `delay`.
    pub fn start_one_shot<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + Send + 'static,
    {
        let mut state = self.state.lock();
        let deadline = state.now.saturating_add(delay);
        let id = state.timers.insert(TimerData {
            deadline,
            callback: Some(Box::new(callback)),
        });
        state.seq += 1;
        let seq = state.seq;
        state.queue.push(TimerQueueEntry { id, deadline, seq });
        tracing::trace!(target: targets::TIMER, ?id, delay_ms = delay.as_millis() as u64, "timer started");
        id
    }

    /// Cancel a pending timer.
    ///
    /// Returns an error if the timer already fired or was cancelled.
    pub fn stop(&self, id: TimerId) -> Result<()> {
        let mut state = self.state.lock();
        if state.timers.remove(id).is_none() {
            return Err(TimerError::UnknownTimer.into());
        }
        tracing::trace!(target: targets::TIMER, ?id, "timer cancelled");
        Self::compact(&mut state);
        Ok(())
    }

    /// Check if a timer is still pending.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.state.lock().timers.contains_key(id)
    }

    /// Number of pending timers.
    pub fn active_count(&self) -> usize {
        self.state.lock().timers.len()
    }

    /// Time until the next pending timer fires, if any.
    pub fn time_until_next(&self) -> Option<Duration> {
        let state = self.state.lock();
        state
            .timers
            .values()
            .map(|timer| timer.deadline.saturating_sub(state.now))
            .min()
    }

    /// Advance the clock by `by`, firing every timer that comes due.
    ///
    /// Callbacks run without the manager locked, so they may start or cancel
    /// timers. A timer started by a callback fires in the same call if its
    /// deadline falls within the advanced window. Returns the number of
    /// callbacks run.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.state.lock().now.saturating_add(by);
        let _span = tracing::trace_span!(target: targets::TIMER, span_names::TIMER, by_ms = by.as_millis() as u64).entered();
        let mut fired = 0;

        loop {
            let due = {
                let mut state = self.state.lock();
                let Some(callback) = Self::pop_due(&mut state, target) else {
                    state.now = target;
                    break;
                };
                callback
            };
            due();
            fired += 1;
        }

        if fired > 0 {
            tracing::trace!(target: targets::TIMER, fired, "timers fired");
        }
        fired
    }

    fn pop_due(state: &mut TimerState, target: Duration) -> Option<Callback> {
        while let Some(entry) = state.queue.peek().copied() {
            if entry.deadline > target {
                return None;
            }
            state.queue.pop();

            // Cancelled timers leave stale queue entries behind.
            let Some(mut timer) = state.timers.remove(entry.id) else {
                continue;
            };
            state.now = state.now.max(timer.deadline);
            tracing::trace!(target: targets::TIMER, id = ?entry.id, "timer fired");
            if let Some(callback) = timer.callback.take() {
                return Some(callback);
            }
        }
        None
    }
}

impl TimerManager {
    /// Drop queue entries of cancelled timers once they outnumber live ones.
    fn compact(state: &mut TimerState) {
        let live = state.timers.len();
        if state.queue.len() <= COMPACT_MIN_QUEUE.max(live * 2) {
            return;
        }
        let TimerState { timers, queue, .. } = state;
        let before = queue.len();
        queue.retain(|entry| timers.contains_key(entry.id));
        tracing::trace!(target: targets::TIMER, dropped = before - queue.len(), "timer queue compacted");
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TimerManager")
            .field("now", &state.now)
            .field("active", &state.timers.len())
            .finish()
    }
}

/// The timers started on behalf of one component.
///
/// [`cancel_all`](Self::cancel_all) releases every timer still pending; ids of
/// timers that already fired are pruned lazily.
pub struct ScopedTimers {
    manager: Arc<TimerManager>,
    ids: Mutex<Vec<TimerId>>,
}

impl ScopedTimers {
    /// Create an empty scope over `manager`.
    pub fn new(manager: Arc<TimerManager>) -> Self {
        Self {
            manager,
            ids: Mutex::new(Vec::new()),
        }
    }

    /// Start a one-shot timer owned by this scope.
    pub fn start<F>(&self, delay: Duration, callback: F) -> TimerId
    where
        F: FnOnce() + Send + 'static,
    {
        let id = self.manager.start_one_shot(delay, callback);
        let mut ids = self.ids.lock();
        ids.retain(|id| self.manager.is_active(*id));
        ids.push(id);
        id
    }

    /// Cancel one timer of this scope. Already-fired timers are ignored.
    pub fn cancel(&self, id: TimerId) {
        self.ids.lock().retain(|existing| *existing != id);
        let _ = self.manager.stop(id);
    }

    /// Number of this scope's timers still pending.
    pub fn active_count(&self) -> usize {
        self.ids
            .lock()
            .iter()
            .filter(|id| self.manager.is_active(**id))
            .count()
    }

    /// Cancel every pending timer in this scope. Returns how many were cancelled.
    pub fn cancel_all(&self) -> usize {
        let ids = std::mem::take(&mut *self.ids.lock());
        ids.into_iter()
            .filter(|id| self.manager.stop(*id).is_ok())
            .count()
    }
}

impl fmt::Debug for ScopedTimers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedTimers")
            .field("active", &self.active_count())
            .finish()
    }
}
