//! Service id generation.
//!
//! # Invariants
//! - Ids issued by one generator are strictly increasing.
//! - After `reserve_above(n)`, every issued id is greater than `n`.
//! - Once `ServiceId::MAX` has been issued or reserved, no further id is issued.

use crate::model::service::ServiceId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of fresh ids for newly added records.
pub trait IdGenerator {
    /// Returns `None` when the id space above the floor is exhausted.
    fn next_id(&mut self) -> Option<ServiceId>;
    /// Ensures later ids are greater than `id`.
    fn reserve_above(&mut self, id: ServiceId);
}

/// Millisecond-clock ids with a strictly increasing floor.
///
/// Rapid successive calls within one millisecond still get distinct ids.
#[derive(Debug, Clone)]
pub struct MonotonicIdGenerator {
    last: ServiceId,
    clock: fn() -> i64,
}

impl MonotonicIdGenerator {
    /// Uses wall-clock epoch milliseconds as the lower bound.
    pub fn new() -> Self {
        Self {
            last: 0,
            clock: epoch_millis,
        }
    }

    /// Issues `first`, `first + 1`, ... independent of the clock.
    pub fn starting_at(first: ServiceId) -> Self {
        Self {
            last: first.saturating_sub(1),
            clock: || 0,
        }
    }
}

impl Default for MonotonicIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for MonotonicIdGenerator {
    fn next_id(&mut self) -> Option<ServiceId> {
        let next = (self.clock)().max(self.last.checked_add(1)?);
        self.last = next;
        Some(next)
    }

    fn reserve_above(&mut self, id: ServiceId) {
        self.last = self.last.max(id);
    }
}

fn epoch_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{IdGenerator, MonotonicIdGenerator};

    #[test]
    fn clock_ids_are_strictly_increasing_under_rapid_calls() {
        let mut ids = MonotonicIdGenerator::new();
        let issued: Vec<_> = (0..1000).map(|_| ids.next_id().unwrap()).collect();
        assert!(issued.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(issued[0] > 0);
    }

    #[test]
    fn reserve_above_raises_floor() {
        let mut ids = MonotonicIdGenerator::starting_at(1);
        ids.reserve_above(41);
        assert_eq!(ids.next_id(), Some(42));
        ids.reserve_above(10);
        assert_eq!(ids.next_id(), Some(43));
    }

    #[test]
    fn exhausted_id_space_issues_nothing() {
        let mut ids = MonotonicIdGenerator::starting_at(i64::MAX);
        assert_eq!(ids.next_id(), Some(i64::MAX));
        assert_eq!(ids.next_id(), None);

        let mut clock_ids = MonotonicIdGenerator::new();
        clock_ids.reserve_above(i64::MAX);
        assert_eq!(clock_ids.next_id(), None);
    }
}
