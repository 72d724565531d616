//! Single-step evasion helpers: backing away from a point and shuffling
//! aside around a crowded target.

use tidepath_hal::{LocalSensing, World};
use tidepath_types::{Direction, NavError, Position};
use tracing::debug;

/// Step away from `away`.
///
/// Tries the direction directly opposite first, then the two 45° neighbours
/// of that direction, and, when `perpendicular_ok` is set, the two 90°
/// neighbours.  Returns the direction moved, or `None` if nothing was legal
/// or the agent is standing on `away`.
pub fn move_away<W: World + ?Sized>(
    world: &mut W,
    away: Position,
    perpendicular_ok: bool,
) -> Result<Option<Direction>, NavError> {
    let Some(toward) = world.position().direction_to(away) else {
        return Ok(None);
    };
    let flee = toward.opposite();

    let mut candidates = vec![flee, flee.rotate_left(), flee.rotate_right()];
    if perpendicular_ok {
        candidates.push(flee.rotate_left().rotate_left());
        candidates.push(flee.rotate_right().rotate_right());
    }

    for dir in candidates {
        if world.can_step_into(dir) {
            world.move_in(dir)?;
            debug!(%away, %dir, "moved away");
            return Ok(Some(dir));
        }
    }
    Ok(None)
}

/// Step onto another cell adjacent to `target`, freeing the current one.
///
/// Directions are scanned clockwise from north; the target cell itself is
/// never entered.
pub fn make_space<W: World + ?Sized>(
    world: &mut W,
    target: Position,
) -> Result<Option<Direction>, NavError> {
    let here = world.position();
    for dir in Direction::ALL {
        let cell = here.add(dir);
        if cell != target && cell.is_within_distance_squared(target, 2) && world.can_step_into(dir) {
            world.move_in(dir)?;
            debug!(%target, %dir, to = %cell, "made space");
            return Ok(Some(dir));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidepath_hal::SimWorld;

    #[test]
    fn backs_straight_away_when_free() {
        let mut world = SimWorld::builder(7, 7).at(Position::new(3, 3)).build();
        let dir = move_away(&mut world, Position::new(5, 3), false).unwrap();
        assert_eq!(dir, Some(Direction::West));
        assert_eq!(world.position(), Position::new(2, 3));
    }

    #[test]
    fn falls_back_to_diagonal_neighbours() {
        let mut world = SimWorld::builder(7, 7)
            .at(Position::new(3, 3))
            .with_walls([Position::new(2, 3), Position::new(2, 2)])
            .build();
        let dir = move_away(&mut world, Position::new(5, 3), false).unwrap();
        assert_eq!(dir, Some(Direction::NorthWest));
    }

    #[test]
    fn perpendicular_only_when_allowed() {
        let blocked = [Position::new(2, 3), Position::new(2, 2), Position::new(2, 4)];
        let mut world = SimWorld::builder(7, 7)
            .at(Position::new(3, 3))
            .with_walls(blocked)
            .build();
        assert_eq!(move_away(&mut world, Position::new(5, 3), false).unwrap(), None);
        assert_eq!(world.position(), Position::new(3, 3));

        let dir = move_away(&mut world, Position::new(5, 3), true).unwrap();
        assert!(matches!(dir, Some(Direction::North | Direction::South)));
    }

    #[test]
    fn nothing_to_flee_from_own_cell() {
        let mut world = SimWorld::builder(5, 5).at(Position::new(2, 2)).build();
        assert_eq!(move_away(&mut world, Position::new(2, 2), true).unwrap(), None);
        assert_eq!(world.history().len(), 1);
    }

    #[test]
    fn make_space_stays_adjacent_to_target() {
        let target = Position::new(3, 3);
        let mut world = SimWorld::builder(7, 7).at(Position::new(2, 3)).build();
        let dir = make_space(&mut world, target).unwrap().unwrap();
        let now = world.position();
        assert_eq!(dir, Direction::North);
        assert_ne!(now, target);
        assert!(now.is_within_distance_squared(target, 2));
    }

    #[test]
    fn make_space_never_enters_target() {
        let target = Position::new(3, 3);
        let mut world = SimWorld::builder(7, 7)
            .at(Position::new(2, 3))
            .with_walls([Position::new(2, 4), Position::new(2, 2)])
            .build();
        // Only (3, 4), (3, 2) and the target itself remain adjacent.
        let dir = make_space(&mut world, target).unwrap();
        assert_eq!(dir, Some(Direction::NorthEast));
        assert_eq!(world.position(), Position::new(3, 4));
    }

    #[test]
    fn make_space_gives_up_when_boxed_in() {
        let target = Position::new(1, 1);
        let mut world = SimWorld::builder(3, 3)
            .at(Position::new(0, 1))
            .with_walls([Position::new(0, 2), Position::new(0, 0), Position::new(1, 2), Position::new(1, 0)])
            .build();
        assert_eq!(make_space(&mut world, target).unwrap(), None);
        assert_eq!(world.position(), Position::new(0, 1));
    }
}
