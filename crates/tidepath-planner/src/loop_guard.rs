//! [`LoopGuard`] – visited-cell memory for stuck-loop detection.
//!
//! A navigation session records every cell the agent ends a planning call
//! on.  Moving onto a cell that is already recorded means the agent is
//! circling, and the session manager starts over with the opposite
//! handedness.
//!
//! # Capacity
//!
//! By default the guard remembers every cell until it is cleared.  A
//! capacity may be set, in which case the oldest cells are forgotten first
//! once the guard is full.
//!
//! # Example
//!
//! ```rust
//! use tidepath_planner::loop_guard::LoopGuard;
//! use tidepath_types::Position;
//!
//! let mut guard = LoopGuard::unbounded();
//!
//! assert!(guard.record(Position::new(0, 0)));
//! assert!(guard.record(Position::new(1, 0)));
//! assert!(!guard.record(Position::new(0, 0))); // already seen
//!
//! // Clearing forgets everything.
//! guard.clear();
//! assert!(!guard.contains(Position::new(0, 0)));
//! ```

use std::collections::{HashSet, VecDeque};

use tidepath_types::Position;

// ─────────────────────────────────────────────────────────────────────────────
// LoopGuard
// ─────────────────────────────────────────────────────────────────────────────

/// Set of cells visited during the current session.
#[derive(Debug, Clone, Default)]
pub struct LoopGuard {
    /// Maximum number of remembered cells, `None` for unbounded.
    capacity: Option<usize>,
    cells: HashSet<Position>,
    /// Insertion order; only maintained when a capacity is set.
    order: VecDeque<Position>,
}

impl LoopGuard {
    /// Create a guard.  A capacity of `Some(0)` is treated as `Some(1)` so the
    /// most recent cell is always remembered.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity: capacity.map(|c| c.max(1)),
            cells: HashSet::new(),
            order: VecDeque::new(),
        }
    }

    pub fn unbounded() -> Self {
        Self::new(None)
    }

    /// Remember `position`.
    ///
    /// Returns `true` if the cell was not already remembered.
    pub fn record(&mut self, position: Position) -> bool {
        if !self.cells.insert(position) {
            return false;
        }
        if let Some(capacity) = self.capacity {
            self.order.push_back(position);
            while self.order.len() > capacity {
                if let Some(oldest) = self.order.pop_front() {
                    self.cells.remove(&oldest);
                }
            }
        }
        true
    }

    pub fn contains(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Forget every remembered cell.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.order.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Position> {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn new_cells_are_reported_once() {
        let mut guard = LoopGuard::unbounded();
        assert!(guard.record(p(1, 1)));
        assert!(!guard.record(p(1, 1)));
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn unbounded_guard_keeps_everything() {
        let mut guard = LoopGuard::unbounded();
        for x in 0..500 {
            guard.record(p(x, 0));
        }
        assert_eq!(guard.len(), 500);
        assert!(guard.contains(p(0, 0)));
    }

    #[test]
    fn capacity_evicts_oldest_first() {
        let mut guard = LoopGuard::new(Some(3));
        guard.record(p(0, 0));
        guard.record(p(1, 0));
        guard.record(p(2, 0));
        guard.record(p(3, 0));
        assert_eq!(guard.len(), 3);
        assert!(!guard.contains(p(0, 0)));
        assert!(guard.contains(p(3, 0)));
    }

    #[test]
    fn repeat_does_not_refresh_age() {
        let mut guard = LoopGuard::new(Some(2));
        guard.record(p(0, 0));
        guard.record(p(1, 0));
        guard.record(p(0, 0)); // already known, order unchanged
        guard.record(p(2, 0));
        assert!(!guard.contains(p(0, 0)));
        assert!(guard.contains(p(1, 0)));
    }

    #[test]
    fn zero_capacity_still_remembers_latest() {
        let mut guard = LoopGuard::new(Some(0));
        guard.record(p(4, 4));
        assert!(guard.contains(p(4, 4)));
        guard.record(p(5, 4));
        assert!(!guard.contains(p(4, 4)));
        assert_eq!(guard.len(), 1);
    }

    #[test]
    fn clear_resets_guard() {
        let mut guard = LoopGuard::new(Some(4));
        guard.record(p(0, 0));
        guard.record(p(0, 1));
        guard.clear();
        assert!(guard.is_empty());
        assert!(guard.record(p(0, 0)));
    }
}
