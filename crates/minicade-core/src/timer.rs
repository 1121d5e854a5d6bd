use serde::{Deserialize, Serialize};

use crate::time::Millis;

/// Handle to a scheduled timer. Carries the generation it was created in so
/// a fire from before the last `cancel_all` can be recognised as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle {
    id: u64,
    generation: u64,
}

/// A timer whose deadline has passed, handed back to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiredTimer<K> {
    pub handle: TimerHandle,
    pub due: Millis,
    pub kind: K,
}

#[derive(Debug, Clone)]
struct PendingTimer<K> {
    handle: TimerHandle,
    due: Millis,
    kind: K,
}

/// Timer queue owned by a single state machine.
///
/// Nothing here runs on its own: the owner asks for due timers with the
/// current time from its event loop and applies each one in deadline order.
#[derive(Debug, Clone)]
pub struct Timers<K> {
    pending: Vec<PendingTimer<K>>,
    next_id: u64,
    generation: u64,
}

impl<K> Timers<K> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
            next_id: 0,
            generation: 0,
        }
    }

    /// Schedule `kind` to fire once the clock reaches `due`.
    pub fn schedule(&mut self, due: Millis, kind: K) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle {
            id: self.next_id,
            generation: self.generation,
        };
        self.pending.push(PendingTimer { handle, due, kind });
        handle
    }

    /// Cancel a single timer. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.handle != handle);
        self.pending.len() != before
    }

    /// Drop every pending timer and start a new generation.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.generation += 1;
    }

    /// Earliest pending deadline.
    pub fn next_deadline(&self) -> Option<Millis> {
        self.pending.iter().map(|t| t.due).min()
    }

    /// Remove and return the earliest timer due at or before `now`.
    /// Ties fire in scheduling order.
    pub fn pop_due(&mut self, now: Millis) -> Option<FiredTimer<K>> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due <= now && t.handle.generation == self.generation)
            .min_by_key(|(_, t)| (t.due, t.handle.id))
            .map(|(i, _)| i)?;
        let timer = self.pending.remove(index);
        Some(FiredTimer {
            handle: timer.handle,
            due: timer.due,
            kind: timer.kind,
        })
    }
}

impl<K> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}
