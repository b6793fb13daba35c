//! Sequence tagging for fetches that may complete out of order.
//!
//! Each fetch takes a [`Ticket`] before it starts. When it completes, the
//! result is offered to a [`Latest`] holder, which keeps it only if no newer
//! ticket has already been applied. Slow, superseded responses are dropped
//! instead of overwriting fresher state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

/// Monotonic ticket dispenser.
#[derive(Debug, Default)]
pub struct RequestSequence {
    next: AtomicU64,
}

impl RequestSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[derive(Debug)]
struct Slot<T> {
    applied: Option<Ticket>,
    value: Option<T>,
}

/// Holds the value produced by the newest ticket seen so far.
#[derive(Debug)]
pub struct Latest<T> {
    slot: RwLock<Slot<T>>,
}

impl<T> Default for Latest<T> {
    fn default() -> Self {
        Self {
            slot: RwLock::new(Slot {
                applied: None,
                value: None,
            }),
        }
    }
}

impl<T: Clone> Latest<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` unless a ticket newer than or equal to `ticket` was
    /// already applied. Returns whether the value was kept.
    pub fn accept(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.applied.is_some_and(|applied| applied >= ticket) {
            return false;
        }
        slot.applied = Some(ticket);
        slot.value = Some(value);
        true
    }

    /// Drops the current value and rejects anything issued before `ticket`.
    pub fn invalidate(&self, ticket: Ticket) {
        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if slot.applied.is_none_or(|applied| applied < ticket) {
            slot.applied = Some(ticket);
        }
        slot.value = None;
    }

    pub fn get(&self) -> Option<T> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .value
            .clone()
    }
}
