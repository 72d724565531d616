//! `tidepath-planner` – incremental bug-style navigation
//!
//! Moves one agent at most one cell per call toward a target over an unknown
//! grid, using only what the agent can sense locally.  Nothing is planned
//! ahead: each call looks at the neighbourhood, takes a step, and remembers
//! just enough to keep going around obstacles next time.
//!
//! # Modules
//!
//! - [`session`] – [`NavigationSession`][session::NavigationSession]:
//!   per-agent state and the `move_toward*` entry points.  Resets on a new
//!   target, detects loops through the visited set and recovers by flipping
//!   the wall-following handedness.
//! - [`bug0`] – the memoryless driver: go straight whenever possible, hug
//!   the obstacle otherwise.
//! - [`bug2`] – the line-following driver: leave an obstacle only on the
//!   start-target line and strictly closer than before.
//! - [`wall_follow`] – [`follow_wall`][wall_follow::follow_wall]: the
//!   rotate-until-free step shared by both drivers.
//! - [`geometry`] – perpendicular distance to the start-target line.
//! - [`loop_guard`] – [`LoopGuard`][loop_guard::LoopGuard]: the visited set,
//!   optionally bounded.
//! - [`wander`] – [`Wanderer`][wander::Wanderer]: exploration through
//!   seeded random waypoints.
//! - [`evasion`] – [`move_away`][evasion::move_away] and
//!   [`make_space`][evasion::make_space]: one-step sidesteps.
//! - [`config`] – [`PlannerConfig`][config::PlannerConfig], loadable from
//!   TOML.
//!
//! # Budget
//!
//! Every operation that can move checks the world's movement budget first
//! and never moves more than once per call, so an agent with a double step
//! may simply call twice in one turn.

pub mod bug0;
pub mod bug2;
pub mod config;
pub mod evasion;
pub mod geometry;
pub mod loop_guard;
pub mod session;
pub mod wall_follow;
pub mod wander;

pub use config::{Algorithm, PlannerConfig};
pub use evasion::{make_space, move_away};
pub use geometry::{is_on_line, perpendicular_distance};
pub use loop_guard::LoopGuard;
pub use session::{Mode, MoveKind, NavigationSession, StepOutcome};
pub use wall_follow::{WallStep, follow_wall};
pub use wander::{Wanderer, random_location_within};
