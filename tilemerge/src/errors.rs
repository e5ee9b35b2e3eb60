use crate::Tile;

/// The error type for [`GameConfig::validate()`](crate::GameConfig::validate).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvalidConfiguration {
    SizeTooSmall { size: usize },
    SizeTooLarge { size: usize },
    FourSpawnProbabilityOutOfRange { probability: f64 },
}

impl std::error::Error for InvalidConfiguration {}

impl std::fmt::Display for InvalidConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfiguration::SizeTooSmall { size } => write!(
                f,
                "Grid size must be at least 2, but {} was configured",
                size
            ),
            InvalidConfiguration::SizeTooLarge { size } => write!(
                f,
                "Grid size must be at most {}, but {} was configured",
                crate::MAX_SIZE,
                size
            ),
            InvalidConfiguration::FourSpawnProbabilityOutOfRange { probability } => write!(
                f,
                "The probability of spawning a 4 must be between 0 and 1, but {} was configured",
                probability
            ),
        }
    }
}

/// The error type for building a [`Grid`](crate::Grid) from explicit rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvalidGrid {
    TooSmall { size: usize },
    NotSquare { row: usize, len: usize },
    NotPowerOfTwo { i: usize, j: usize, value: Tile },
}

impl std::error::Error for InvalidGrid {}

impl std::fmt::Display for InvalidGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidGrid::TooSmall { size } => {
                write!(f, "A grid needs at least 2 rows, but {} were given", size)
            }
            InvalidGrid::NotSquare { row, len } => write!(
                f,
                "The grid is not square: row {} has {} cells",
                row, len
            ),
            InvalidGrid::NotPowerOfTwo { i, j, value } => write!(
                f,
                "The cell ({}, {}) holds {}, which is neither empty nor a power of two",
                i, j, value
            ),
        }
    }
}

/// The error type for the [`FromStr`](std::str::FromStr) instance of [`Direction`](crate::Direction).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DirectionFromStrErr {
    pub input: String,
}

impl std::error::Error for DirectionFromStrErr {}

impl std::fmt::Display for DirectionFromStrErr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "'{}' is not a direction, expected one of up, down, left, right",
            self.input
        )
    }
}
