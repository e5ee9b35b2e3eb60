use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DirectionFromStrErr;

/// A direction to shift the tiles in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Direction {
    type Err = DirectionFromStrErr;

    /// Accepts full names, their first letter and arrows, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" | "↑" => Ok(Direction::Up),
            "down" | "d" | "↓" => Ok(Direction::Down),
            "left" | "l" | "←" => Ok(Direction::Left),
            "right" | "r" | "→" => Ok(Direction::Right),
            _ => Err(DirectionFromStrErr {
                input: String::from(s),
            }),
        }
    }
}

/// Parses a compact script such as `"uurdl"` or `"up, left"` into directions.
///
/// Commas and whitespace separate words; a run of letters that is not a
/// direction name is read one letter at a time.
pub fn parse_script(script: &str) -> Result<Vec<Direction>, DirectionFromStrErr> {
    let mut directions = Vec::new();
    for word in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|w| !w.is_empty())
    {
        if let Ok(direction) = word.parse() {
            directions.push(direction);
            continue;
        }
        for c in word.chars() {
            directions.push(c.to_string().parse()?);
        }
    }
    Ok(directions)
}
