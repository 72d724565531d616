//! Scenario files – reads/writes the TOML files `tidepath run` executes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

use tidepath_planner::{Algorithm, PlannerConfig};

/// One scenario: an ASCII map plus how to drive the agent across it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Free-form label printed in the run header.
    #[serde(default = "default_name")]
    pub name: String,

    /// Maximum number of turns before the run is abandoned.
    #[serde(default = "default_turns")]
    pub turns: u32,

    /// Agent id; seeds the wall-following handedness and the wander RNG.
    #[serde(default = "default_agent_id")]
    pub agent_id: u32,

    #[serde(default = "default_moves_per_turn")]
    pub moves_per_turn: u32,

    /// Squared arrival radius around the goal.
    #[serde(default)]
    pub arrival_radius: i32,

    /// Squared radius around the goal that direct steps may not enter.
    #[serde(default)]
    pub avoid_radius: i32,

    /// Wander instead of heading for the goal.  Implied when the map has no
    /// `G` marker.
    #[serde(default)]
    pub explore: bool,

    /// ASCII map, north row first.
    pub map: String,

    #[serde(default)]
    pub planner: PlannerConfig,
}

fn default_name() -> String {
    "unnamed".to_string()
}
fn default_turns() -> u32 {
    200
}
fn default_agent_id() -> u32 {
    1
}
fn default_moves_per_turn() -> u32 {
    1
}

const SAMPLE_MAP: &str = "\
............
.....#......
.....#......
.S...#....G.
.....#......
.....#......
............
";

impl Default for Scenario {
    fn default() -> Self {
        Self {
            name: "wall-detour".to_string(),
            turns: default_turns(),
            agent_id: default_agent_id(),
            moves_per_turn: default_moves_per_turn(),
            arrival_radius: 0,
            avoid_radius: 0,
            explore: false,
            map: SAMPLE_MAP.to_string(),
            planner: PlannerConfig::default(),
        }
    }
}

/// Load a scenario from `path` and apply `TIDEPATH_*` overrides.
pub fn load_from(path: &Path) -> Result<Scenario, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read scenario at {}: {}", path.display(), e))?;
    let mut scenario: Scenario =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse scenario: {}", e))?;
    apply_env_overrides(&mut scenario);
    scenario
        .planner
        .validate()
        .map_err(|e| format!("Invalid planner settings: {}", e))?;
    Ok(scenario)
}

/// Apply `TIDEPATH_*` environment variable overrides to `scenario`.
///
/// | Variable | Scenario field |
/// |---|---|
/// | `TIDEPATH_ALGORITHM` | `planner.algorithm` |
/// | `TIDEPATH_TURNS` | `turns` |
pub fn apply_env_overrides(scenario: &mut Scenario) {
    if let Ok(v) = std::env::var("TIDEPATH_ALGORITHM") {
        match v.parse::<Algorithm>() {
            Ok(algorithm) => scenario.planner.algorithm = algorithm,
            Err(e) => warn!(error = %e, "ignoring TIDEPATH_ALGORITHM"),
        }
    }
    if let Ok(v) = std::env::var("TIDEPATH_TURNS")
        && let Ok(turns) = v.parse::<u32>() {
            scenario.turns = turns;
        }
}

/// Write `scenario` to `path`, creating parent directories as needed.
pub fn save_to(scenario: &Scenario, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create scenario directory: {}", e))?;
        }
    let raw = toml::to_string_pretty(scenario)
        .map_err(|e| format!("Failed to serialize scenario: {}", e))?;
    fs::write(path, raw)
        .map_err(|e| format!("Failed to write scenario at {}: {}", path.display(), e))?;
    Ok(())
}
