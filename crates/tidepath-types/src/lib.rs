use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the eight compass directions, in clockwise order starting at North.
///
/// `y` grows toward [`Direction::North`].  "No direction" (a cell without a
/// current, or the direction from a cell to itself) is expressed as
/// `Option<Direction>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// All eight directions in clockwise order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Self {
        Self::ALL[index % 8]
    }

    /// Rotate 45° clockwise.
    pub fn rotate_right(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Rotate 45° counter-clockwise.
    pub fn rotate_left(self) -> Self {
        Self::from_index(self.index() + 7)
    }

    pub fn opposite(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// Horizontal component of a single step.
    pub fn dx(self) -> i32 {
        match self {
            Direction::NorthEast | Direction::East | Direction::SouthEast => 1,
            Direction::SouthWest | Direction::West | Direction::NorthWest => -1,
            Direction::North | Direction::South => 0,
        }
    }

    /// Vertical component of a single step.
    pub fn dy(self) -> i32 {
        match self {
            Direction::NorthWest | Direction::North | Direction::NorthEast => 1,
            Direction::SouthWest | Direction::South | Direction::SouthEast => -1,
            Direction::East | Direction::West => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Direction::North => "N",
            Direction::NorthEast => "NE",
            Direction::East => "E",
            Direction::SouthEast => "SE",
            Direction::South => "S",
            Direction::SouthWest => "SW",
            Direction::West => "W",
            Direction::NorthWest => "NW",
        };
        f.write_str(label)
    }
}

/// Integer grid coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The adjacent cell one step in `direction`.
    pub fn add(self, direction: Direction) -> Self {
        Self::new(self.x + direction.dx(), self.y + direction.dy())
    }

    /// Squared Euclidean distance, saturating at `i32::MAX` for cells too far
    /// apart to fit.
    pub fn distance_squared_to(self, other: Position) -> i32 {
        let dx = i128::from(other.x) - i128::from(self.x);
        let dy = i128::from(other.y) - i128::from(self.y);
        i32::try_from(dx * dx + dy * dy).unwrap_or(i32::MAX)
    }

    pub fn is_within_distance_squared(self, other: Position, radius_squared: i32) -> bool {
        self.distance_squared_to(other) <= radius_squared
    }

    /// Compass octant from `self` toward `other`, or `None` when they are the
    /// same cell.
    ///
    /// A pure cardinal is returned when one axis offset is at least
    /// tan(67.5°) ≈ 2.414 times the other; everything in between maps to the
    /// diagonal whose signs match the offset.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        let dx = i64::from(other.x) - i64::from(self.x);
        let dy = i64::from(other.y) - i64::from(self.y);
        if dx == 0 && dy == 0 {
            return None;
        }
        let (ax, ay) = (dx.abs() * 1000, dy.abs() * 1000);
        let dir = if ax >= dy.abs() * 2414 {
            if dx > 0 { Direction::East } else { Direction::West }
        } else if ay >= dx.abs() * 2414 {
            if dy > 0 { Direction::North } else { Direction::South }
        } else {
            match (dx > 0, dy > 0) {
                (true, true) => Direction::NorthEast,
                (false, true) => Direction::NorthWest,
                (true, false) => Direction::SouthEast,
                (false, false) => Direction::SouthWest,
            }
        };
        Some(dir)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Which way an agent turns while hugging an obstacle.
///
/// Fixed per agent so that neighbouring agents break ties differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Handedness {
    Clockwise,
    CounterClockwise,
}

impl Handedness {
    /// Odd ids turn clockwise, even ids counter-clockwise.
    pub fn from_agent_id(agent_id: u32) -> Self {
        if agent_id % 2 == 1 {
            Handedness::Clockwise
        } else {
            Handedness::CounterClockwise
        }
    }

    pub fn flip(self) -> Self {
        match self {
            Handedness::Clockwise => Handedness::CounterClockwise,
            Handedness::CounterClockwise => Handedness::Clockwise,
        }
    }

    /// Turn 45° in this handedness.
    pub fn rotate(self, direction: Direction) -> Direction {
        match self {
            Handedness::Clockwise => direction.rotate_right(),
            Handedness::CounterClockwise => direction.rotate_left(),
        }
    }

    /// Turn 45° against this handedness.
    pub fn rotate_back(self, direction: Direction) -> Direction {
        self.flip().rotate(direction)
    }
}

impl fmt::Display for Handedness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handedness::Clockwise => f.write_str("R"),
            Handedness::CounterClockwise => f.write_str("L"),
        }
    }
}

/// Error type shared by the world contract, the planner and the tooling.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavError {
    #[error("Move Rejected {direction} from {from}: {reason}")]
    MoveRejected {
        from: Position,
        direction: Direction,
        reason: String,
    },

    #[error("Invalid Map: {0}")]
    InvalidMap(String),

    #[error("Configuration Error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotations_are_inverse() {
        for dir in Direction::ALL {
            assert_eq!(dir.rotate_right().rotate_left(), dir);
            assert_eq!(dir.rotate_left().rotate_right(), dir);
        }
        assert_eq!(Direction::North.rotate_right(), Direction::NorthEast);
        assert_eq!(Direction::North.rotate_left(), Direction::NorthWest);
    }

    #[test]
    fn opposite_is_four_steps_away() {
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::NorthEast.opposite(), Direction::SouthWest);
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert_eq!(dir.dx(), -dir.opposite().dx());
            assert_eq!(dir.dy(), -dir.opposite().dy());
        }
    }

    #[test]
    fn direction_to_picks_cardinals_and_diagonals() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.direction_to(Position::new(5, 0)), Some(Direction::East));
        assert_eq!(origin.direction_to(Position::new(-3, 0)), Some(Direction::West));
        assert_eq!(origin.direction_to(Position::new(0, 4)), Some(Direction::North));
        assert_eq!(origin.direction_to(Position::new(5, 2)), Some(Direction::East));
        assert_eq!(origin.direction_to(Position::new(2, 1)), Some(Direction::NorthEast));
        assert_eq!(origin.direction_to(Position::new(-2, -2)), Some(Direction::SouthWest));
        assert_eq!(origin.direction_to(Position::new(1, -5)), Some(Direction::South));
        assert_eq!(origin.direction_to(origin), None);
    }

    #[test]
    fn direction_to_adjacent_cells_matches_step() {
        let origin = Position::new(7, -2);
        for dir in Direction::ALL {
            assert_eq!(origin.direction_to(origin.add(dir)), Some(dir));
        }
    }

    #[test]
    fn distances_are_squared() {
        let a = Position::new(1, 1);
        assert_eq!(a.distance_squared_to(Position::new(4, 5)), 25);
        assert!(a.is_within_distance_squared(Position::new(2, 2), 2));
        assert!(!a.is_within_distance_squared(Position::new(3, 2), 2));
    }

    #[test]
    fn handedness_follows_id_parity() {
        assert_eq!(Handedness::from_agent_id(7), Handedness::Clockwise);
        assert_eq!(Handedness::from_agent_id(10), Handedness::CounterClockwise);
        assert_eq!(Handedness::Clockwise.flip(), Handedness::CounterClockwise);
        assert_eq!(Handedness::Clockwise.rotate(Direction::East), Direction::SouthEast);
        assert_eq!(Handedness::Clockwise.rotate_back(Direction::East), Direction::NorthEast);
    }

    #[test]
    fn position_serialization_roundtrip() {
        let pos = Position::new(-4, 9);
        let json = serde_json::to_string(&pos).unwrap();
        let back: Position = serde_json::from_str(&json).unwrap();
        assert_eq!(pos, back);
    }

    #[test]
    fn nav_error_display() {
        let err = NavError::MoveRejected {
            from: Position::new(1, 2),
            direction: Direction::East,
            reason: "wall".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("Move Rejected"));
        assert!(text.contains("(1, 2)"));

        let err = NavError::InvalidMap("ragged row".to_string());
        assert!(err.to_string().contains("ragged row"));
    }

    #[test]
    fn distance_saturates_instead_of_overflowing() {
        let a = Position::new(-50_000, 0);
        let b = Position::new(50_000, 0);
        assert_eq!(a.distance_squared_to(b), i32::MAX);
        let corner = Position::new(i32::MIN, i32::MIN);
        assert_eq!(corner.distance_squared_to(Position::new(i32::MAX, i32::MAX)), i32::MAX);
        assert!(!a.is_within_distance_squared(b, i32::MAX - 1));
        assert_eq!(Position::new(1, 2).distance_squared_to(Position::new(4, 6)), 25);
    }
}
