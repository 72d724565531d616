//! The [`World`] trait – everything the planner may ask of the environment.
//!
//! Hosts (a game engine, a robot controller, the [`SimWorld`][crate::sim::SimWorld])
//! implement this trait once.  The planner only ever talks to the trait, so a
//! host can be swapped without touching navigation logic.

use tidepath_types::{Direction, NavError, Position};

/// The agent's view of the world for the current turn.
pub trait World {
    /// Cell the agent currently occupies.
    fn position(&self) -> Position;

    /// Stable per-agent identifier, used to seed handedness and random
    /// choices deterministically.
    fn agent_id(&self) -> u32;

    /// `true` while the agent still has movement budget this turn.
    fn movement_ready(&self) -> bool;

    /// `true` iff stepping one cell in `direction` is legal right now:
    /// in bounds, passable, unoccupied and within budget.
    fn can_move(&self, direction: Direction) -> bool;

    /// Step one cell in `direction`, consuming one unit of budget.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::MoveRejected`] when the move is not legal.
    fn move_in(&mut self, direction: Direction) -> Result<(), NavError>;

    /// Direction of the current acting on `position`, if any.
    fn sense_current(&self, position: Position) -> Option<Direction>;

    /// `true` iff `position` is inside the agent's sensor range.
    fn can_sense(&self, position: Position) -> bool;

    fn map_width(&self) -> i32;

    fn map_height(&self) -> i32;
}
