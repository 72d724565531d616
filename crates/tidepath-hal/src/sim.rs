//! In-process grid world for headless tests and scenario runs.
//!
//! [`SimWorld`] implements [`World`] over a rectangular grid with walls,
//! occupied cells (other agents) and currents.  It enforces a per-turn
//! movement budget and applies current displacement at the end of each turn,
//! so the full planner can run in CI without a game host.
//!
//! # Example
//!
//! ```rust
//! use tidepath_hal::sim::SimWorld;
//! use tidepath_hal::World;
//! use tidepath_types::{Direction, Position};
//!
//! let mut world = SimWorld::builder(8, 8)
//!     .at(Position::new(1, 1))
//!     .with_wall(Position::new(2, 1))
//!     .build();
//!
//! assert!(!world.can_move(Direction::East));
//! world.move_in(Direction::North).expect("open cell");
//! assert_eq!(world.position(), Position::new(1, 2));
//! ```

use std::collections::{HashMap, HashSet};

use tidepath_types::{Direction, NavError, Position};
use tracing::debug;

use crate::world::World;

/// Squared sensor radius used when none is configured.
pub const DEFAULT_SENSOR_RADIUS: i32 = 20;

// ────────────────────────────────────────────────────────────────────────────
// SimWorld
// ────────────────────────────────────────────────────────────────────────────

/// A simulated single-agent grid world.
#[derive(Debug, Clone)]
pub struct SimWorld {
    width: i32,
    height: i32,
    walls: HashSet<Position>,
    occupants: HashSet<Position>,
    currents: HashMap<Position, Direction>,
    position: Position,
    agent_id: u32,
    moves_per_turn: u32,
    moves_left: u32,
    sensor_radius: i32,
    history: Vec<Position>,
}

impl SimWorld {
    /// Start building a `width × height` world.
    pub fn builder(width: i32, height: i32) -> SimWorldBuilder {
        SimWorldBuilder::new(width, height)
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.y >= 0 && position.x < self.width && position.y < self.height
    }

    pub fn is_wall(&self, position: Position) -> bool {
        self.walls.contains(&position)
    }

    pub fn is_occupied(&self, position: Position) -> bool {
        self.occupants.contains(&position)
    }

    /// In bounds, not a wall and not occupied.
    pub fn is_open(&self, position: Position) -> bool {
        self.in_bounds(position) && !self.is_wall(position) && !self.is_occupied(position)
    }

    /// Remove another agent from `position`, e.g. after it moved away.
    pub fn clear_occupant(&mut self, position: Position) {
        self.occupants.remove(&position);
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Every cell the agent has occupied, in order, starting cell included.
    pub fn history(&self) -> &[Position] {
        &self.history
    }

    /// Close the current turn.
    ///
    /// An agent standing on a current is pushed one cell along it when the
    /// destination is open; the movement budget is then restored.
    pub fn end_turn(&mut self) {
        if let Some(drift) = self.currents.get(&self.position).copied() {
            let destination = self.position.add(drift);
            if self.is_open(destination) {
                debug!(from = %self.position, to = %destination, "agent displaced by current");
                self.position = destination;
                self.history.push(destination);
            }
        }
        self.moves_left = self.moves_per_turn;
    }

    fn rejection(&self, direction: Direction) -> Option<&'static str> {
        let destination = self.position.add(direction);
        if self.moves_left == 0 {
            Some("no movement budget left this turn")
        } else if !self.in_bounds(destination) {
            Some("destination is out of bounds")
        } else if self.is_wall(destination) {
            Some("destination is impassable")
        } else if self.is_occupied(destination) {
            Some("destination is occupied")
        } else {
            None
        }
    }
}

impl World for SimWorld {
    fn position(&self) -> Position {
        self.position
    }

    fn agent_id(&self) -> u32 {
        self.agent_id
    }

    fn movement_ready(&self) -> bool {
        self.moves_left > 0
    }

    fn can_move(&self, direction: Direction) -> bool {
        self.rejection(direction).is_none()
    }

    fn move_in(&mut self, direction: Direction) -> Result<(), NavError> {
        if let Some(reason) = self.rejection(direction) {
            return Err(NavError::MoveRejected {
                from: self.position,
                direction,
                reason: reason.to_string(),
            });
        }
        self.position = self.position.add(direction);
        self.moves_left -= 1;
        self.history.push(self.position);
        Ok(())
    }

    fn sense_current(&self, position: Position) -> Option<Direction> {
        self.currents.get(&position).copied()
    }

    fn can_sense(&self, position: Position) -> bool {
        self.in_bounds(position)
            && self
                .position
                .is_within_distance_squared(position, self.sensor_radius)
    }

    fn map_width(&self) -> i32 {
        self.width
    }

    fn map_height(&self) -> i32 {
        self.height
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Builder
// ────────────────────────────────────────────────────────────────────────────

/// Builder for [`SimWorld`].
///
/// Defaults: agent id `1`, start `(0, 0)`, one move per turn, squared sensor
/// radius [`DEFAULT_SENSOR_RADIUS`].
#[derive(Debug, Clone)]
pub struct SimWorldBuilder {
    width: i32,
    height: i32,
    walls: HashSet<Position>,
    occupants: HashSet<Position>,
    currents: HashMap<Position, Direction>,
    start: Position,
    agent_id: u32,
    moves_per_turn: u32,
    sensor_radius: i32,
}

impl SimWorldBuilder {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            walls: HashSet::new(),
            occupants: HashSet::new(),
            currents: HashMap::new(),
            start: Position::new(0, 0),
            agent_id: 1,
            moves_per_turn: 1,
            sensor_radius: DEFAULT_SENSOR_RADIUS,
        }
    }

    /// Place the agent at `start`.
    pub fn at(mut self, start: Position) -> Self {
        self.start = start;
        self
    }

    pub fn agent_id(mut self, agent_id: u32) -> Self {
        self.agent_id = agent_id;
        self
    }

    pub fn moves_per_turn(mut self, moves: u32) -> Self {
        self.moves_per_turn = moves;
        self
    }

    /// Squared sensor radius.
    pub fn sensor_radius(mut self, radius_squared: i32) -> Self {
        self.sensor_radius = radius_squared;
        self
    }

    pub fn with_wall(mut self, position: Position) -> Self {
        self.walls.insert(position);
        self
    }

    pub fn with_walls(mut self, positions: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(positions);
        self
    }

    /// Mark `position` as held by another agent.
    pub fn with_occupant(mut self, position: Position) -> Self {
        self.occupants.insert(position);
        self
    }

    pub fn with_current(mut self, position: Position, direction: Direction) -> Self {
        self.currents.insert(position, direction);
        self
    }

    pub fn build(self) -> SimWorld {
        SimWorld {
            width: self.width,
            height: self.height,
            walls: self.walls,
            occupants: self.occupants,
            currents: self.currents,
            position: self.start,
            agent_id: self.agent_id,
            moves_per_turn: self.moves_per_turn,
            moves_left: self.moves_per_turn,
            sensor_radius: self.sensor_radius,
            history: vec![self.start],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_consumes_budget_until_end_of_turn() {
        let mut world = SimWorld::builder(5, 5).moves_per_turn(2).build();
        world.move_in(Direction::North).unwrap();
        world.move_in(Direction::North).unwrap();
        assert!(!world.movement_ready());
        assert!(matches!(
            world.move_in(Direction::North),
            Err(NavError::MoveRejected { .. })
        ));

        world.end_turn();
        assert_eq!(world.moves_left(), 2);
        assert_eq!(world.position(), Position::new(0, 2));
    }

    #[test]
    fn walls_occupants_and_edges_block_moves() {
        let world = SimWorld::builder(3, 3)
            .at(Position::new(1, 1))
            .with_wall(Position::new(2, 1))
            .with_occupant(Position::new(1, 2))
            .build();
        assert!(!world.can_move(Direction::East));
        assert!(!world.can_move(Direction::North));
        assert!(world.can_move(Direction::South));

        let corner = SimWorld::builder(3, 3).build();
        assert!(!corner.can_move(Direction::West));
        assert!(!corner.can_move(Direction::South));
        assert!(corner.can_move(Direction::NorthEast));
    }

    #[test]
    fn rejected_move_reports_reason() {
        let mut world = SimWorld::builder(3, 3)
            .with_wall(Position::new(1, 0))
            .build();
        match world.move_in(Direction::East) {
            Err(NavError::MoveRejected { reason, from, .. }) => {
                assert_eq!(from, Position::new(0, 0));
                assert!(reason.contains("impassable"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(world.position(), Position::new(0, 0));
    }

    #[test]
    fn current_displaces_agent_at_end_of_turn() {
        let mut world = SimWorld::builder(5, 5)
            .at(Position::new(1, 1))
            .with_current(Position::new(2, 1), Direction::North)
            .build();
        world.move_in(Direction::East).unwrap();
        world.end_turn();
        assert_eq!(world.position(), Position::new(2, 2));
        assert_eq!(
            world.history(),
            &[Position::new(1, 1), Position::new(2, 1), Position::new(2, 2)]
        );
    }

    #[test]
    fn current_into_wall_does_not_displace() {
        let mut world = SimWorld::builder(5, 5)
            .at(Position::new(1, 1))
            .with_current(Position::new(1, 1), Direction::West)
            .with_wall(Position::new(0, 1))
            .build();
        world.end_turn();
        assert_eq!(world.position(), Position::new(1, 1));
    }

    #[test]
    fn sensing_is_limited_to_radius_and_bounds() {
        let world = SimWorld::builder(10, 10)
            .at(Position::new(5, 5))
            .sensor_radius(4)
            .build();
        assert!(world.can_sense(Position::new(5, 7)));
        assert!(!world.can_sense(Position::new(5, 8)));
        let edge = SimWorld::builder(10, 10).build();
        assert!(!edge.can_sense(Position::new(-1, 0)));
    }

    #[test]
    fn clearing_an_occupant_opens_the_cell() {
        let mut world = SimWorld::builder(3, 1)
            .with_occupant(Position::new(1, 0))
            .build();
        assert!(!world.can_move(Direction::East));
        world.clear_occupant(Position::new(1, 0));
        assert!(world.can_move(Direction::East));
    }
}
