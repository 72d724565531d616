//! Bug2: follow the start-target line ("m-line"), hug obstacles in the way,
//! and leave an obstacle only where the m-line is met again closer to the
//! target than at any earlier point.

use tidepath_hal::{LocalSensing, World};
use tidepath_types::{Direction, NavError, Position};
use tracing::debug;

use crate::geometry::is_on_line;
use crate::session::{Mode, MoveKind, NavigationSession, StepOutcome};
use crate::wall_follow::advance_along_wall;

/// One Bug2 step toward `target`.
///
/// `avoid_radius` keeps direct steps from landing within that squared
/// distance of the target, so an agent can stop short of a crowded cell.
pub fn step_bug2<W: World + ?Sized>(
    world: &mut W,
    target: Position,
    arrival_radius: i32,
    avoid_radius: i32,
    session: &mut NavigationSession,
) -> Result<StepOutcome, NavError> {
    if world.is_within_arrival(target, arrival_radius) {
        session.settle();
        debug!(algorithm = "bug2", %target, arrival_radius, "arrived");
        return Ok(StepOutcome::Arrived);
    }
    if !world.movement_ready() {
        debug!(algorithm = "bug2", %target, next = ?session.pending_direction(), "can't move");
        return Ok(StepOutcome::NoBudget);
    }

    let here = world.position();
    let Some(direct) = here.direction_to(target) else {
        session.settle();
        return Ok(StepOutcome::Arrived);
    };
    let current = here.distance_squared_to(target);
    let origin = session.origin.unwrap_or(here);
    let follow_safe_currents = session.config().follow_safe_currents;

    let clear_ahead = |world: &W| {
        world.can_step_into(direct)
            && !world.too_close(target, direct, avoid_radius)
            && hazard_safe(world, direct, target, follow_safe_currents)
    };

    match session.mode {
        Mode::WallFollowing { next } => {
            let on_line = is_on_line(here, origin, target, session.config().online_threshold);
            let closer = session.best_distance_seen.is_none_or(|best| current < best);

            if on_line && closer && clear_ahead(&*world) {
                world.move_in(direct)?;
                session.observe_distance(current);
                session.observe_distance(world.position().distance_squared_to(target));
                session.mode = Mode::Direct;
                debug!(algorithm = "bug2", %target, current, dir = %direct, "exit wall");
                return Ok(StepOutcome::Moved {
                    direction: direct,
                    kind: MoveKind::ExitWall,
                });
            }

            let outcome = advance_along_wall(world, next, MoveKind::WallFollow, session)?;
            debug!(
                algorithm = "bug2",
                %target,
                on_line,
                current,
                best = ?session.best_distance_seen,
                hand = %session.handedness,
                next = ?session.pending_direction(),
                "continue wall"
            );
            Ok(outcome)
        }
        Mode::Direct => {
            if clear_ahead(&*world) {
                world.move_in(direct)?;
                session.observe_distance(world.position().distance_squared_to(target));
                debug!(algorithm = "bug2", %target, dir = %direct, "direct");
                return Ok(StepOutcome::Moved {
                    direction: direct,
                    kind: MoveKind::Direct,
                });
            }

            session.observe_distance(current);
            let outcome = advance_along_wall(world, direct, MoveKind::EnterWall, session)?;
            debug!(
                algorithm = "bug2",
                %target,
                best = ?session.best_distance_seen,
                hand = %session.handedness,
                next = ?session.pending_direction(),
                ?outcome,
                "enter wall"
            );
            Ok(outcome)
        }
    }
}

fn hazard_safe<W: World + ?Sized>(
    world: &W,
    direction: Direction,
    target: Position,
    follow_safe_currents: bool,
) -> bool {
    if follow_safe_currents {
        world.is_current_safe(direction, target)
    } else {
        !world.has_hazard_field(direction)
    }
}
