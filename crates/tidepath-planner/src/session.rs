//! [`NavigationSession`] – per-agent navigation state and the
//! `move_toward` entry points.
//!
//! One session belongs to one agent for the agent's whole lifetime.  It is
//! reset in place whenever the requested target changes, so every new target
//! starts the search from scratch.
//!
//! # Call sequence
//!
//! Each `move_toward*` call:
//!
//! 1. resets the session if the target differs from the current one
//!    (origin := current position, visited cells and best distance cleared,
//!    driver chosen);
//! 2. runs one Bug0 or Bug2 step;
//! 3. flags arrival if the agent ended within the arrival radius;
//! 4. checks for a loop: moving onto an already-visited cell clears the
//!    target (forcing a reset next call) and flips the handedness;
//! 5. records the final position as visited.
//!
//! # Example
//!
//! ```rust
//! use tidepath_hal::SimWorld;
//! use tidepath_planner::{NavigationSession, PlannerConfig, StepOutcome};
//! use tidepath_types::Position;
//!
//! let mut world = SimWorld::builder(10, 10).build();
//! let mut session = NavigationSession::new(1, PlannerConfig::default());
//! let target = Position::new(3, 0);
//!
//! while !session.arrived() {
//!     session.move_toward(&mut world, target, 0, 0).expect("sim world");
//!     world.end_turn();
//! }
//! assert_eq!(
//!     session.move_toward(&mut world, target, 0, 0).unwrap(),
//!     StepOutcome::Arrived
//! );
//! ```

use tidepath_hal::World;
use tidepath_types::{Direction, Handedness, NavError, Position};
use tracing::{debug, warn};

use crate::bug0::step_bug0;
use crate::bug2::step_bug2;
use crate::config::{Algorithm, PlannerConfig};
use crate::loop_guard::LoopGuard;

// ─────────────────────────────────────────────────────────────────────────────
// Step reporting
// ─────────────────────────────────────────────────────────────────────────────

/// Traversal mode.  The pending wall-following direction only exists while
/// wall following.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Direct,
    WallFollowing { next: Direction },
}

/// Why a step was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// Straight toward the target.
    Direct,
    /// First step around an obstacle.
    EnterWall,
    /// Further step around an obstacle.
    WallFollow,
    /// Bug2 left the obstacle back onto the start-target line.
    ExitWall,
}

/// What a single planning call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Already within the arrival radius; nothing moved.
    Arrived,
    /// No movement budget left this turn; nothing changed.
    NoBudget,
    /// Exactly one step was taken.
    Moved { direction: Direction, kind: MoveKind },
    /// Every direction was refused this call; nothing moved.
    Trapped,
}

impl StepOutcome {
    pub fn moved(&self) -> bool {
        matches!(self, StepOutcome::Moved { .. })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// NavigationSession
// ─────────────────────────────────────────────────────────────────────────────

/// Mutable navigation state for one agent.
#[derive(Debug, Clone)]
pub struct NavigationSession {
    config: PlannerConfig,
    pub(crate) target: Option<Position>,
    pub(crate) origin: Option<Position>,
    pub(crate) algorithm: Algorithm,
    pub(crate) mode: Mode,
    /// Smallest squared distance to the target observed; `None` is infinity.
    pub(crate) best_distance_seen: Option<i32>,
    pub(crate) handedness: Handedness,
    visited: LoopGuard,
    arrived: bool,
    last_outcome: Option<StepOutcome>,
    loop_resets: u32,
}

impl NavigationSession {
    /// Create an idle session for `agent_id`.  The handedness is derived from
    /// the id's parity.
    pub fn new(agent_id: u32, config: PlannerConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            visited: LoopGuard::new(config.visited_capacity),
            config,
            target: None,
            origin: None,
            mode: Mode::Direct,
            best_distance_seen: None,
            handedness: Handedness::from_agent_id(agent_id),
            arrived: false,
            last_outcome: None,
            loop_resets: 0,
        }
    }

    /// Create an idle session for the agent `world` reports.
    pub fn for_world<W: World + ?Sized>(world: &W, config: PlannerConfig) -> Self {
        Self::new(world.agent_id(), config)
    }

    /// Step toward `target` with the configured default arrival and avoid
    /// radii.
    pub fn move_toward_default<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        target: Position,
    ) -> Result<StepOutcome, NavError> {
        let (arrival, avoid) = (self.config.default_arrival_radius, self.config.default_avoid_radius);
        self.move_toward(world, target, arrival, avoid)
    }

    /// Step toward `target` with the configured default avoid radius.
    pub fn move_toward_within<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        target: Position,
        arrival_radius: i32,
    ) -> Result<StepOutcome, NavError> {
        let avoid = self.config.default_avoid_radius;
        self.move_toward(world, target, arrival_radius, avoid)
    }

    /// Step toward `target` using the configured algorithm.
    pub fn move_toward<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        target: Position,
        arrival_radius: i32,
        avoid_radius: i32,
    ) -> Result<StepOutcome, NavError> {
        let algorithm = self.config.algorithm;
        self.move_toward_with(world, algorithm, target, arrival_radius, avoid_radius)
    }

    /// Step toward `target`.
    ///
    /// `algorithm` only takes effect when this call starts a new session;
    /// a session keeps the driver it was created with until its target
    /// changes.
    ///
    /// # Errors
    ///
    /// Only propagates [`NavError::MoveRejected`] from a world that refused a
    /// move it had reported as legal.  Blocked, trapped and out-of-budget
    /// calls are reported through [`StepOutcome`].
    pub fn move_toward_with<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        algorithm: Algorithm,
        target: Position,
        arrival_radius: i32,
        avoid_radius: i32,
    ) -> Result<StepOutcome, NavError> {
        self.arrived = false;
        if self.target != Some(target) {
            self.reset(world.position(), target, algorithm);
        }

        let before = world.position();
        let result = match self.algorithm {
            Algorithm::Bug0 => step_bug0(world, target, arrival_radius, self),
            Algorithm::Bug2 => step_bug2(world, target, arrival_radius, avoid_radius, self),
        };
        let after = world.position();

        if after.is_within_distance_squared(target, arrival_radius) {
            self.arrived = true;
        }
        if before != after && self.visited.contains(after) {
            warn!(
                %target,
                at = %after,
                hand = %self.handedness,
                "stuck in a loop; resetting session and flipping handedness"
            );
            self.target = None;
            self.handedness = self.handedness.flip();
            self.loop_resets += 1;
        }
        self.visited.record(after);

        let outcome = result?;
        self.last_outcome = Some(outcome);
        Ok(outcome)
    }

    fn reset(&mut self, position: Position, target: Position, algorithm: Algorithm) {
        debug!(%target, origin = %position, %algorithm, "new navigation target");
        self.target = Some(target);
        self.origin = Some(position);
        self.algorithm = algorithm;
        self.mode = Mode::Direct;
        self.best_distance_seen = None;
        self.visited.clear();
        self.last_outcome = None;
    }

    /// Arrival bookkeeping shared by the drivers.
    pub(crate) fn settle(&mut self) {
        self.mode = Mode::Direct;
        self.best_distance_seen = None;
        self.arrived = true;
    }

    /// Fold an observed squared distance into the best one.
    pub(crate) fn observe_distance(&mut self, distance: i32) {
        self.best_distance_seen = Some(match self.best_distance_seen {
            Some(best) => best.min(distance),
            None => distance,
        });
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn target(&self) -> Option<Position> {
        self.target
    }

    /// Agent position when the current target was set.
    pub fn origin(&self) -> Option<Position> {
        self.origin
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_wall_following(&self) -> bool {
        matches!(self.mode, Mode::WallFollowing { .. })
    }

    /// Next direction to try while wall following.
    pub fn pending_direction(&self) -> Option<Direction> {
        match self.mode {
            Mode::WallFollowing { next } => Some(next),
            Mode::Direct => None,
        }
    }

    pub fn best_distance_seen(&self) -> Option<i32> {
        self.best_distance_seen
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    pub fn visited(&self) -> &LoopGuard {
        &self.visited
    }

    /// `true` if the most recent call found the agent within its arrival
    /// radius, before or after stepping.
    pub fn arrived(&self) -> bool {
        self.arrived
    }

    pub fn last_outcome(&self) -> Option<StepOutcome> {
        self.last_outcome
    }

    /// Number of times loop recovery has fired over the session's lifetime.
    pub fn loop_resets(&self) -> u32 {
        self.loop_resets
    }
}
