//! ASCII rendering of a finished run.

use std::collections::HashSet;

use colored::{ColoredString, Colorize};
use tidepath_hal::{SimWorld, World};
use tidepath_types::{Direction, Position};

/// Render the map north row first, using the map glyphs plus `@` for the
/// agent and `*` for every other cell it visited.
pub fn render(world: &SimWorld, goal: Option<Position>) -> String {
    let trail: HashSet<Position> = world.history().iter().copied().collect();
    let mut out = String::new();
    for y in (0..world.map_height()).rev() {
        for x in 0..world.map_width() {
            out.push(glyph(world, goal, &trail, Position::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn glyph(world: &SimWorld, goal: Option<Position>, trail: &HashSet<Position>, cell: Position) -> char {
    if cell == world.position() {
        '@'
    } else if Some(cell) == goal {
        'G'
    } else if world.is_wall(cell) {
        '#'
    } else if world.is_occupied(cell) {
        'o'
    } else if trail.contains(&cell) {
        '*'
    } else {
        match world.sense_current(cell) {
            Some(Direction::North) => '^',
            Some(Direction::East) => '>',
            Some(Direction::South) => 'v',
            Some(Direction::West) => '<',
            Some(_) => '~',
            None => '.',
        }
    }
}

/// Colour a rendered map for the terminal.
pub fn paint(map: &str) -> String {
    map.chars()
        .map(|c| paint_glyph(c).to_string())
        .collect()
}

fn paint_glyph(c: char) -> ColoredString {
    let s = c.to_string();
    match c {
        '@' => s.green().bold(),
        'G' => s.yellow().bold(),
        '*' => s.cyan(),
        '#' => s.bold(),
        '^' | '>' | 'v' | '<' | '~' => s.blue(),
        '.' => s.dimmed(),
        _ => s.normal(),
    }
}
