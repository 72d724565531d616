//! Obstacle hugging shared by both drivers.

use tidepath_hal::{LocalSensing, World};
use tidepath_types::{Direction, Handedness, NavError};
use tracing::trace;

use crate::session::{Mode, MoveKind, NavigationSession, StepOutcome};

/// A successful wall-following step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallStep {
    /// Direction actually moved.
    pub moved: Direction,
    /// Direction to try first on the next call.
    pub next: Direction,
}

/// Try up to eight directions, starting at `preferred` and turning 45° in
/// `handedness` after each refusal, and take the first one that can be
/// entered and carries no current.
///
/// After moving, the next direction to try is the moved direction turned 90°
/// against `handedness`, so the agent swings back toward the obstacle it is
/// following.  Returns `Ok(None)` without moving when all eight are refused.
pub fn follow_wall<W: World + ?Sized>(
    world: &mut W,
    preferred: Direction,
    handedness: Handedness,
) -> Result<Option<WallStep>, NavError> {
    let mut candidate = preferred;
    for _ in 0..Direction::ALL.len() {
        if world.can_step_into(candidate) && !world.has_hazard_field(candidate) {
            world.move_in(candidate)?;
            let next = handedness.rotate_back(handedness.rotate_back(candidate));
            trace!(moved = %candidate, next = %next, hand = %handedness, "wall step");
            return Ok(Some(WallStep {
                moved: candidate,
                next,
            }));
        }
        candidate = handedness.rotate(candidate);
    }
    Ok(None)
}

/// Take one wall-following step from `seed` and store the resulting pending
/// direction.  A trapped agent keeps its current mode.
pub(crate) fn advance_along_wall<W: World + ?Sized>(
    world: &mut W,
    seed: Direction,
    kind: MoveKind,
    session: &mut NavigationSession,
) -> Result<StepOutcome, NavError> {
    match follow_wall(world, seed, session.handedness)? {
        Some(step) => {
            session.mode = Mode::WallFollowing { next: step.next };
            Ok(StepOutcome::Moved {
                direction: step.moved,
                kind,
            })
        }
        None => Ok(StepOutcome::Trapped),
    }
}
