//! Planner tuning knobs.
//!
//! [`PlannerConfig`] is plain serde data so hosts can embed it in their own
//! configuration files.  Every field has a default, so a partial TOML table
//! (or none at all) is valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tidepath_types::NavError;

/// Which driver a session uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Retry the direct heading every call; wall-follow only while blocked.
    Bug0,
    /// Track the start-target line and leave the wall only when back on it
    /// and closer than ever before.
    #[default]
    Bug2,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Bug0 => write!(f, "bug0"),
            Algorithm::Bug2 => write!(f, "bug2"),
        }
    }
}

impl FromStr for Algorithm {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bug0" => Ok(Algorithm::Bug0),
            "bug2" => Ok(Algorithm::Bug2),
            other => Err(NavError::Config(format!("unknown algorithm '{other}'"))),
        }
    }
}

/// Tunable planner parameters.  Distances and radii are squared unless the
/// field says otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Driver used for new sessions.
    #[serde(default)]
    pub algorithm: Algorithm,

    /// Squared distance from the start-target line under which Bug2
    /// considers the agent "on the line".
    #[serde(default = "default_online_threshold")]
    pub online_threshold: f64,

    /// Arrival radius used by the default entry points and the wanderer.
    #[serde(default = "default_arrival_radius")]
    pub default_arrival_radius: i32,

    /// Avoid radius used by the default entry points.
    #[serde(default)]
    pub default_avoid_radius: i32,

    /// The wanderer keeps its waypoint until the agent is this close to it.
    #[serde(default = "default_wander_reach_radius")]
    pub wander_reach_radius: i32,

    /// Minimum (Euclidean, not squared) distance of a new wander waypoint.
    #[serde(default = "default_wander_min_distance")]
    pub wander_min_distance: i32,

    /// Maximum (Euclidean, not squared) distance of a new wander waypoint.
    #[serde(default = "default_wander_max_distance")]
    pub wander_max_distance: i32,

    /// Samples drawn looking for a waypoint inside the annulus before
    /// falling back to an unconstrained one.
    #[serde(default = "default_wander_attempts")]
    pub wander_attempts: u32,

    /// When set, Bug2 accepts stepping onto a current whose chain ends closer
    /// to the target instead of refusing every current.
    #[serde(default)]
    pub follow_safe_currents: bool,

    /// Cap on remembered cells per session; oldest are forgotten first.
    /// `None` keeps every cell until the session resets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_capacity: Option<usize>,
}

fn default_online_threshold() -> f64 {
    1.5
}
fn default_arrival_radius() -> i32 {
    2
}
fn default_wander_reach_radius() -> i32 {
    3
}
fn default_wander_min_distance() -> i32 {
    10
}
fn default_wander_max_distance() -> i32 {
    30
}
fn default_wander_attempts() -> u32 {
    16
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            online_threshold: default_online_threshold(),
            default_arrival_radius: default_arrival_radius(),
            default_avoid_radius: 0,
            wander_reach_radius: default_wander_reach_radius(),
            wander_min_distance: default_wander_min_distance(),
            wander_max_distance: default_wander_max_distance(),
            wander_attempts: default_wander_attempts(),
            follow_safe_currents: false,
            visited_capacity: None,
        }
    }
}

impl PlannerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self, NavError> {
        let cfg: PlannerConfig = toml::from_str(raw)
            .map_err(|e| NavError::Config(format!("Failed to parse planner config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the planner cannot work with.
    pub fn validate(&self) -> Result<(), NavError> {
        if !self.online_threshold.is_finite() || self.online_threshold <= 0.0 {
            return Err(NavError::Config(format!(
                "online_threshold must be a positive number, got {}",
                self.online_threshold
            )));
        }
        if self.wander_min_distance < 0 || self.wander_min_distance > self.wander_max_distance {
            return Err(NavError::Config(format!(
                "wander distances must satisfy 0 <= min <= max, got {}..{}",
                self.wander_min_distance, self.wander_max_distance
            )));
        }
        if self.wander_attempts == 0 {
            return Err(NavError::Config("wander_attempts must be at least 1".to_string()));
        }
        if self.visited_capacity == Some(0) {
            return Err(NavError::Config("visited_capacity must be at least 1".to_string()));
        }
        Ok(())
    }
}
