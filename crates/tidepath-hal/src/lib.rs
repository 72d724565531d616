//! `tidepath-hal` – the world boundary.
//!
//! # Modules
//!
//! - [`world`] – [`World`]: the contract a host environment implements so
//!   the planner can read the agent's position, budget, passability and
//!   currents, and step the agent.
//! - [`sensing`] – [`LocalSensing`]: boolean predicates derived from any
//!   [`World`] (`can_step_into`, `has_hazard_field`, `is_within_arrival`,
//!   `too_close`, `is_current_safe`).
//! - [`sim`] – [`SimWorld`]: an in-process grid world with walls, occupants,
//!   currents and a per-turn movement budget, for tests and scenario runs.
//! - [`map`] – [`parse_map`]: builds a [`SimWorld`] from an ASCII map.

pub mod map;
pub mod sensing;
pub mod sim;
pub mod world;

pub use map::{ParsedMap, parse_map};
pub use sensing::LocalSensing;
pub use sim::{SimWorld, SimWorldBuilder};
pub use world::World;
