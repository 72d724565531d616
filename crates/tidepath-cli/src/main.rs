//! `tidepath` – scenario runner for the bug-style grid planner
//!
//! Loads a TOML scenario (an ASCII map plus agent and planner settings),
//! drives a single simulated agent across it turn by turn, and prints the
//! route taken.
//!
//! ```text
//! tidepath run  <scenario.toml>   run a scenario
//! tidepath init <scenario.toml>   write a sample scenario
//! tidepath help                   show usage
//! ```
//!
//! `run` exits non-zero when the scenario cannot be loaded or the goal was
//! not reached within the turn limit.

mod render;
mod runner;
mod scenario;

use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use tidepath_planner::StepOutcome;

use crate::runner::TurnReport;

fn main() -> ExitCode {
    // ── Structured logging ────────────────────────────────────────────────
    // RUST_LOG selects the filter (default "info").  TIDEPATH_LOG_FORMAT=json
    // switches to newline-delimited JSON; run output itself uses println!.
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    if std::env::var("TIDEPATH_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(true)
            .compact()
            .init();
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    match (args.first().map(String::as_str), args.get(1)) {
        (Some("run"), Some(path)) => cmd_run(Path::new(path)),
        (Some("init"), Some(path)) => cmd_init(Path::new(path)),
        (Some("help" | "--help" | "-h"), _) | (None, _) => {
            print_usage();
            ExitCode::SUCCESS
        }
        (Some(cmd @ ("run" | "init")), None) => {
            println!("{}: `{}` needs a scenario path", "Usage error".red(), cmd);
            print_usage();
            ExitCode::from(2)
        }
        (Some(other), _) => {
            println!("{}: unknown command `{}`", "Usage error".red(), other);
            print_usage();
            ExitCode::from(2)
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Commands
// ─────────────────────────────────────────────────────────────────────────────

fn cmd_run(path: &Path) -> ExitCode {
    let scenario = match scenario::load_from(path) {
        Ok(s) => s,
        Err(e) => {
            println!("{}: {}", "Scenario error".red(), e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    println!(
        "  {} {}  ({}, agent {}, {} turn(s) max)",
        "Scenario".bold(),
        scenario.name.bold().cyan(),
        scenario.planner.algorithm,
        scenario.agent_id,
        scenario.turns
    );
    println!();

    let report = match runner::run(&scenario, print_turn) {
        Ok(r) => r,
        Err(e) => {
            println!("{}: {}", "Run error".red(), e);
            return ExitCode::FAILURE;
        }
    };

    println!();
    print!("{}", render::paint(&render::render(&report.world, report.goal)));
    println!();

    if report.goal.is_none() {
        println!(
            "  {} explored for {} turn(s)",
            "✓".green().bold(),
            report.turns_taken
        );
        ExitCode::SUCCESS
    } else if report.reached {
        println!(
            "  {} goal reached in {} turn(s), {} loop reset(s)",
            "✓".green().bold(),
            report.turns_taken,
            report.loop_resets
        );
        ExitCode::SUCCESS
    } else {
        println!(
            "  {} goal not reached after {} turn(s), {} loop reset(s)",
            "✗".red().bold(),
            report.turns_taken,
            report.loop_resets
        );
        ExitCode::FAILURE
    }
}

fn cmd_init(path: &Path) -> ExitCode {
    if path.exists() {
        println!(
            "{}: {} already exists",
            "Refusing to overwrite".red(),
            path.display()
        );
        return ExitCode::FAILURE;
    }
    match scenario::save_to(&scenario::Scenario::default(), path) {
        Ok(()) => {
            println!(
                "  {} Sample scenario written to {}",
                "✓".green().bold(),
                path.display().to_string().bold()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}: {}", "Error writing scenario".red(), e);
            ExitCode::FAILURE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output
// ─────────────────────────────────────────────────────────────────────────────

fn print_turn(report: &TurnReport) {
    let steps: Vec<String> = report.outcomes.iter().map(describe).collect();
    println!(
        "  {:>4}  {:<10} {}",
        format!("#{}", report.turn).dimmed(),
        report.position.to_string(),
        steps.join(", ")
    );
}

fn describe(outcome: &StepOutcome) -> String {
    match outcome {
        StepOutcome::Arrived => "arrived".green().to_string(),
        StepOutcome::NoBudget => "no budget".dimmed().to_string(),
        StepOutcome::Trapped => "trapped".red().to_string(),
        StepOutcome::Moved { direction, kind } => format!("{direction} ({kind:?})"),
    }
}

fn print_usage() {
    println!();
    println!("  {} {}", "tidepath".bold(), format!("v{}", env!("CARGO_PKG_VERSION")).dimmed());
    println!("  Bug-style grid navigation scenario runner");
    println!();
    println!("  {}", "Commands".bold());
    println!("    run  <scenario.toml>   run a scenario and print the route");
    println!("    init <scenario.toml>   write a sample scenario");
    println!("    help                   show this message");
    println!();
    println!("  {}", "Environment".bold());
    println!("    TIDEPATH_ALGORITHM     override planner.algorithm (bug0 | bug2)");
    println!("    TIDEPATH_TURNS         override the turn limit");
    println!("    TIDEPATH_LOG_FORMAT    `json` for newline-delimited JSON logs");
    println!("    RUST_LOG               log filter (default: info)");
    println!();
}
