//! [`LocalSensing`] – boolean predicates over a [`World`] used by the drivers.
//!
//! Every [`World`] gets these for free through a blanket implementation, so
//! drivers can write `world.can_step_into(dir)` without an adapter value.

use std::collections::HashSet;

use tidepath_types::{Direction, Position};

use crate::world::World;

/// Observational queries derived from a [`World`].  None of them move the
/// agent.
pub trait LocalSensing: World {
    /// The adjacent cell in `direction` can be entered this call.
    fn can_step_into(&self, direction: Direction) -> bool {
        self.movement_ready() && self.can_move(direction)
    }

    /// The adjacent cell in `direction` carries a current.
    fn has_hazard_field(&self, direction: Direction) -> bool {
        self.sense_current(self.position().add(direction)).is_some()
    }

    fn is_within_arrival(&self, target: Position, radius: i32) -> bool {
        self.position().is_within_distance_squared(target, radius)
    }

    /// Stepping in `direction` would land within `avoid_radius` of `target`.
    /// A radius of zero or less disables avoidance, so the target cell
    /// itself stays enterable.
    fn too_close(&self, target: Position, direction: Direction, avoid_radius: i32) -> bool {
        avoid_radius > 0
            && self
                .position()
                .add(direction)
                .is_within_distance_squared(target, avoid_radius)
    }

    /// Whether stepping into the cell in `direction` is acceptable given the
    /// current acting on it.
    ///
    /// Cells without a current are always safe and a current pointing straight
    /// back at us never is.  Otherwise the chain of currents is followed as far
    /// as we can sense (or until it cycles) and the step is safe when the
    /// chain ends strictly closer to `target` than we are now.
    fn is_current_safe(&self, direction: Direction, target: Position) -> bool {
        let entry = self.position().add(direction);
        let Some(current) = self.sense_current(entry) else {
            return true;
        };
        if current.opposite() == direction {
            return false;
        }

        let mut seen = HashSet::new();
        let mut next = entry;
        while !seen.contains(&next) && self.can_sense(next) {
            seen.insert(next);
            match self.sense_current(next) {
                Some(drift) => next = next.add(drift),
                None => break,
            }
        }
        next.distance_squared_to(target) < self.position().distance_squared_to(target)
    }
}

impl<W: World + ?Sized> LocalSensing for W {}
