//! Turn loop that drives one agent across a scenario map.

use tidepath_hal::{SimWorld, World, parse_map};
use tidepath_planner::{NavigationSession, StepOutcome, Wanderer};
use tidepath_types::{NavError, Position};
use tracing::{debug, info};

use crate::scenario::Scenario;

/// What happened during one turn.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub turn: u32,
    /// Position after the turn ended (currents included).
    pub position: Position,
    pub outcomes: Vec<StepOutcome>,
}

/// Final state of a run.
#[derive(Debug)]
pub struct RunReport {
    pub world: SimWorld,
    pub goal: Option<Position>,
    pub reached: bool,
    pub turns_taken: u32,
    pub loop_resets: u32,
}

/// Run `scenario` until the goal is reached or the turn limit expires.
///
/// Within a turn the planner is called again for as long as the previous
/// call moved and budget remains, so agents with several moves per turn use
/// all of them.  `on_turn` sees every completed turn.
pub fn run(
    scenario: &Scenario,
    mut on_turn: impl FnMut(&TurnReport),
) -> Result<RunReport, NavError> {
    scenario.planner.validate()?;
    let parsed = parse_map(&scenario.map)?;
    let goal = parsed.goal;
    let mut world = parsed
        .builder
        .agent_id(scenario.agent_id)
        .moves_per_turn(scenario.moves_per_turn)
        .build();
    let mut session = NavigationSession::for_world(&world, scenario.planner.clone());
    let mut wanderer = Wanderer::for_world(&world);

    let wandering = scenario.explore || goal.is_none();
    let arrival = scenario.arrival_radius;
    let at_goal =
        |world: &SimWorld| goal.is_some_and(|g| world.position().is_within_distance_squared(g, arrival));

    info!(
        scenario = %scenario.name,
        agent = world.agent_id(),
        hand = %session.handedness(),
        start = %parsed.start,
        goal = ?goal,
        algorithm = %scenario.planner.algorithm,
        wandering,
        "run started"
    );

    let mut reached = at_goal(&world);
    let mut turns_taken = 0;
    for turn in 1..=scenario.turns {
        if reached {
            break;
        }
        let mut outcomes = Vec::new();
        loop {
            let outcome = match goal {
                Some(target) if !wandering => session.move_toward(
                    &mut world,
                    target,
                    arrival,
                    scenario.avoid_radius,
                )?,
                _ => wanderer.explore(&mut world, &mut session)?,
            };
            outcomes.push(outcome);
            reached = at_goal(&world);
            if reached || !outcome.moved() || !world.movement_ready() {
                break;
            }
        }
        if !reached {
            world.end_turn();
            reached = at_goal(&world);
        }
        turns_taken = turn;

        let report = TurnReport {
            turn,
            position: world.position(),
            outcomes,
        };
        debug!(turn, position = %report.position, calls = report.outcomes.len(), "turn complete");
        on_turn(&report);
    }

    info!(reached, turns = turns_taken, loop_resets = session.loop_resets(), "run finished");
    Ok(RunReport {
        world,
        goal,
        reached,
        turns_taken,
        loop_resets: session.loop_resets(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tidepath_planner::{Algorithm, PlannerConfig};

    fn scenario(map: &str) -> Scenario {
        Scenario {
            map: map.to_string(),
            ..Scenario::default()
        }
    }

    #[test]
    fn sample_scenario_reaches_goal() {
        let report = run(&Scenario::default(), |_| {}).unwrap();
        assert!(report.reached);
        assert_eq!(Some(report.world.position()), report.goal);
        assert_eq!(report.loop_resets, 0);
    }

    #[test]
    fn sample_scenario_reaches_goal_with_bug0() {
        let mut sc = Scenario::default();
        sc.planner = PlannerConfig {
            algorithm: Algorithm::Bug0,
            ..PlannerConfig::default()
        };
        let report = run(&sc, |_| {}).unwrap();
        assert!(report.reached);
    }

    #[test]
    fn open_corridor_takes_one_turn_per_cell() {
        let mut turns = Vec::new();
        let report = run(&scenario("S...G"), |t| turns.push(t.turn)).unwrap();
        assert!(report.reached);
        assert_eq!(report.turns_taken, 4);
        assert_eq!(turns, vec![1, 2, 3, 4]);
    }

    #[test]
    fn double_step_halves_turns() {
        let mut sc = scenario("S...G");
        sc.moves_per_turn = 2;
        let mut calls = Vec::new();
        let report = run(&sc, |t| calls.push(t.outcomes.len())).unwrap();
        assert!(report.reached);
        assert_eq!(report.turns_taken, 2);
        assert_eq!(calls, vec![2, 2]);
    }

    #[test]
    fn unreachable_goal_exhausts_turns() {
        let mut sc = scenario("S.#G");
        sc.turns = 15;
        let report = run(&sc, |_| {}).unwrap();
        assert!(!report.reached);
        assert_eq!(report.turns_taken, 15);
    }

    #[test]
    fn map_without_goal_wanders() {
        let mut sc = scenario(
            "....................\n\
             ....................\n\
             .........S..........\n\
             ....................\n\
             ....................",
        );
        sc.turns = 10;
        let report = run(&sc, |_| {}).unwrap();
        assert!(!report.reached);
        assert!(report.goal.is_none());
        assert!(report.world.history().len() > 1);
    }

    #[test]
    fn current_carries_agent_at_end_of_turn() {
        let mut sc = scenario("S>..G");
        sc.planner.follow_safe_currents = true;
        let report = run(&sc, |_| {}).unwrap();
        assert!(report.reached);
        assert_eq!(report.turns_taken, 3);
        // Stepping onto the current at (1, 0) gets a free push to (2, 0).
        assert_eq!(
            &report.world.history()[..3],
            &[Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
    }

    #[test]
    fn current_blocks_agent_unless_safe_currents_followed() {
        let mut sc = scenario("S>..G");
        sc.turns = 5;
        let report = run(&sc, |_| {}).unwrap();
        assert!(!report.reached);
        assert_eq!(report.world.position(), Position::new(0, 0));
    }

    #[test]
    fn invalid_map_is_reported() {
        let err = run(&scenario("S.\n..."), |_| {}).unwrap_err();
        assert!(matches!(err, NavError::InvalidMap(_)));
    }

    #[test]
    fn agent_id_decides_detour_side() {
        // Odd ids turn clockwise around the wall, even ids counter-clockwise.
        let map = "......\n..#...\nS.#..G\n..#...\n......";
        let mut south = scenario(map);
        south.agent_id = 1;
        let mut north = scenario(map);
        north.agent_id = 2;

        let first_off_row = |report: &RunReport| {
            report
                .world
                .history()
                .iter()
                .find(|p| p.y != 2)
                .copied()
        };
        let cw = run(&south, |_| {}).unwrap();
        let ccw = run(&north, |_| {}).unwrap();
        assert!(first_off_row(&cw).is_some_and(|p| p.y < 2));
        assert!(first_off_row(&ccw).is_some_and(|p| p.y > 2));
    }
}
