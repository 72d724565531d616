//! ASCII map parsing for [`SimWorld`].
//!
//! Rows are listed north to south, so the first line of the text is the row
//! with the largest `y`.
//!
//! | Glyph | Meaning |
//! |---|---|
//! | `.` | open cell |
//! | `#` | wall |
//! | `o` | cell held by another agent |
//! | `S` | agent start (exactly one) |
//! | `G` | goal (at most one) |
//! | `^` `>` `v` `<` | current flowing north / east / south / west |
//!
//! Blank lines and surrounding whitespace are ignored.

use tidepath_types::{Direction, NavError, Position};

use crate::sim::SimWorldBuilder;

/// Result of [`parse_map`]: a builder with terrain and start applied, plus the
/// goal marker if the map has one.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    pub builder: SimWorldBuilder,
    pub start: Position,
    pub goal: Option<Position>,
}

/// Parse an ASCII map.
///
/// # Errors
///
/// Returns [`NavError::InvalidMap`] for an empty map, ragged rows, unknown
/// glyphs, a missing start or duplicate `S`/`G` markers.
pub fn parse_map(text: &str) -> Result<ParsedMap, NavError> {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if rows.is_empty() {
        return Err(NavError::InvalidMap("map has no rows".to_string()));
    }

    let width = rows[0].chars().count();
    let height = rows.len();
    let mut builder = SimWorldBuilder::new(width as i32, height as i32);
    let mut start = None;
    let mut goal = None;

    for (row, line) in rows.iter().enumerate() {
        if line.chars().count() != width {
            return Err(NavError::InvalidMap(format!(
                "row {row} has {} cells, expected {width}",
                line.chars().count()
            )));
        }
        let y = (height - 1 - row) as i32;
        for (x, glyph) in line.chars().enumerate() {
            let pos = Position::new(x as i32, y);
            builder = match glyph {
                '.' => builder,
                '#' => builder.with_wall(pos),
                'o' => builder.with_occupant(pos),
                '^' => builder.with_current(pos, Direction::North),
                '>' => builder.with_current(pos, Direction::East),
                'v' => builder.with_current(pos, Direction::South),
                '<' => builder.with_current(pos, Direction::West),
                'S' => {
                    if start.replace(pos).is_some() {
                        return Err(NavError::InvalidMap("more than one start 'S'".to_string()));
                    }
                    builder
                }
                'G' => {
                    if goal.replace(pos).is_some() {
                        return Err(NavError::InvalidMap("more than one goal 'G'".to_string()));
                    }
                    builder
                }
                other => {
                    return Err(NavError::InvalidMap(format!(
                        "unknown glyph '{other}' at {pos}"
                    )));
                }
            };
        }
    }

    let start = start.ok_or_else(|| NavError::InvalidMap("map has no start 'S'".to_string()))?;
    Ok(ParsedMap {
        builder: builder.at(start),
        start,
        goal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;

    #[test]
    fn parses_terrain_with_north_up() {
        let parsed = parse_map(
            "
            ...G
            .#>.
            S...
            ",
        )
        .unwrap();
        assert_eq!(parsed.start, Position::new(0, 0));
        assert_eq!(parsed.goal, Some(Position::new(3, 2)));

        let world = parsed.builder.build();
        assert_eq!(world.map_width(), 4);
        assert_eq!(world.map_height(), 3);
        assert!(world.is_wall(Position::new(1, 1)));
        assert_eq!(world.sense_current(Position::new(2, 1)), Some(Direction::East));
        assert_eq!(world.position(), Position::new(0, 0));
    }

    #[test]
    fn goal_is_optional() {
        let parsed = parse_map("S.o").unwrap();
        assert!(parsed.goal.is_none());
        assert!(parsed.builder.build().is_occupied(Position::new(2, 0)));
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = parse_map("S..\n..").unwrap_err();
        assert!(matches!(err, NavError::InvalidMap(msg) if msg.contains("row 1")));
    }

    #[test]
    fn rejects_unknown_glyphs_and_missing_start() {
        assert!(matches!(parse_map("S.x"), Err(NavError::InvalidMap(_))));
        assert!(matches!(parse_map("..G"), Err(NavError::InvalidMap(_))));
        assert!(matches!(parse_map(""), Err(NavError::InvalidMap(_))));
        assert!(matches!(parse_map("SS."), Err(NavError::InvalidMap(_))));
    }
}
