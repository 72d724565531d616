//! Bug0: head straight for the target whenever possible, hug the obstacle
//! otherwise.  Keeps no memory of where the trip started.

use tidepath_hal::{LocalSensing, World};
use tidepath_types::{NavError, Position};
use tracing::debug;

use crate::session::{Mode, MoveKind, NavigationSession, StepOutcome};
use crate::wall_follow::advance_along_wall;

/// One Bug0 step toward `target`.
pub fn step_bug0<W: World + ?Sized>(
    world: &mut W,
    target: Position,
    arrival_radius: i32,
    session: &mut NavigationSession,
) -> Result<StepOutcome, NavError> {
    if world.is_within_arrival(target, arrival_radius) {
        session.settle();
        debug!(algorithm = "bug0", %target, arrival_radius, "arrived");
        return Ok(StepOutcome::Arrived);
    }
    if !world.movement_ready() {
        return Ok(StepOutcome::NoBudget);
    }
    let Some(direct) = world.position().direction_to(target) else {
        session.settle();
        return Ok(StepOutcome::Arrived);
    };

    if world.can_step_into(direct) {
        world.move_in(direct)?;
        session.mode = Mode::Direct;
        debug!(algorithm = "bug0", %target, dir = %direct, "direct");
        return Ok(StepOutcome::Moved {
            direction: direct,
            kind: MoveKind::Direct,
        });
    }

    let (seed, kind) = match session.mode {
        Mode::WallFollowing { next } => (next, MoveKind::WallFollow),
        Mode::Direct => (direct, MoveKind::EnterWall),
    };
    let outcome = advance_along_wall(world, seed, kind, session)?;
    debug!(
        algorithm = "bug0",
        %target,
        hand = %session.handedness,
        next = ?session.pending_direction(),
        ?outcome,
        "wall"
    );
    Ok(outcome)
}
