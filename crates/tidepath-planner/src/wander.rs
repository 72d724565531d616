//! [`Wanderer`] – purposeful exploration when no concrete target is known.
//!
//! The wanderer keeps a single waypoint and steers toward it with the normal
//! navigation session.  Once the agent gets close enough, a fresh waypoint is
//! drawn from a per-agent seeded random source, so replays with the same
//! agent id pick the same waypoints.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tidepath_hal::World;
use tidepath_types::{NavError, Position};
use tracing::debug;

use crate::session::{NavigationSession, StepOutcome};

/// Waypoint state for one agent.
#[derive(Debug, Clone)]
pub struct Wanderer<R = StdRng> {
    waypoint: Option<Position>,
    rng: R,
}

impl Wanderer<StdRng> {
    /// Wanderer whose random source is seeded from `agent_id`.
    pub fn new(agent_id: u32) -> Self {
        Self::with_rng(StdRng::seed_from_u64(u64::from(agent_id)))
    }

    /// Wanderer seeded from the id `world` reports for its agent.
    pub fn for_world<W: World + ?Sized>(world: &W) -> Self {
        Self::new(world.agent_id())
    }
}

impl<R: Rng> Wanderer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self {
            waypoint: None,
            rng,
        }
    }

    pub fn waypoint(&self) -> Option<Position> {
        self.waypoint
    }

    /// Take one step toward the current waypoint, drawing a new one first
    /// if there is none or the agent has reached it.
    pub fn explore<W: World + ?Sized>(
        &mut self,
        world: &mut W,
        session: &mut NavigationSession,
    ) -> Result<StepOutcome, NavError> {
        let cfg = session.config();
        let reach = cfg.wander_reach_radius;
        let (min, max, attempts) = (
            cfg.wander_min_distance,
            cfg.wander_max_distance,
            cfg.wander_attempts,
        );

        let here = world.position();
        let waypoint = match self.waypoint {
            Some(waypoint) if !here.is_within_distance_squared(waypoint, reach) => waypoint,
            _ => {
                let waypoint = random_location_within(&*world, &mut self.rng, min, max, attempts);
                debug!(%waypoint, from = %here, "new wander waypoint");
                self.waypoint = Some(waypoint);
                waypoint
            }
        };
        session.move_toward_default(world, waypoint)
    }
}

/// Pick a cell inside the map whose Euclidean distance from the agent lies
/// within `[min_distance, max_distance]`.
///
/// Up to `attempts` uniform samples are tried; if none fits, one
/// unconstrained uniform sample is returned instead.  A map without cells
/// yields the agent's own position.
pub fn random_location_within<W: World + ?Sized, R: Rng>(
    world: &W,
    rng: &mut R,
    min_distance: i32,
    max_distance: i32,
    attempts: u32,
) -> Position {
    let (width, height) = (world.map_width(), world.map_height());
    let here = world.position();
    if width <= 0 || height <= 0 {
        return here;
    }

    let min_sq = i64::from(min_distance) * i64::from(min_distance);
    let max_sq = i64::from(max_distance) * i64::from(max_distance);
    for _ in 0..attempts {
        let candidate = Position::new(rng.random_range(0..width), rng.random_range(0..height));
        let d = i64::from(candidate.x - here.x).pow(2) + i64::from(candidate.y - here.y).pow(2);
        if (min_sq..=max_sq).contains(&d) {
            return candidate;
        }
    }
    Position::new(rng.random_range(0..width), rng.random_range(0..height))
}
