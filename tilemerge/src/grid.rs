mod line;

use line::{compact_and_merge, merged_value};

use serde::{Deserialize, Serialize};

use crate::{Direction, InvalidGrid};

/// The value of a single cell. `0` is an empty cell, anything else is a power of two.
pub type Tile = u32;

/// A square grid of tiles.
///
/// Cells are addressed as `(i, j)`, with `i` the row (top to bottom) and
/// `j` the column (left to right).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<Tile>>", into = "Vec<Vec<Tile>>")]
pub struct Grid {
    size: usize,
    /// Row-major, always `size * size` long.
    cells: Vec<Tile>,
}

impl Grid {
    /// Creates an empty grid.
    ///
    /// Panics if `size < 2`. Use [`GameConfig::validate()`](crate::GameConfig::validate)
    /// to check a size first.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "grid size must be at least 2");
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Creates a grid from a list of rows, checking that the grid is square,
    /// at least 2x2, and contains only powers of two (or zeros).
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, InvalidGrid> {
        let size = rows.len();
        if size < 2 {
            return Err(InvalidGrid::TooSmall { size });
        }
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != size {
                return Err(InvalidGrid::NotSquare {
                    row: i,
                    len: row.len(),
                });
            }
            for (j, &value) in row.iter().enumerate() {
                if value == 1 || (value != 0 && !value.is_power_of_two()) {
                    return Err(InvalidGrid::NotPowerOfTwo { i, j, value });
                }
                cells.push(value);
            }
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Panics if the coordinates are out of bounds.
    pub fn get(&self, i: usize, j: usize) -> Tile {
        assert!(i < self.size && j < self.size);
        self.cells[i * self.size + j]
    }

    pub(crate) fn set(&mut self, i: usize, j: usize, value: Tile) {
        assert!(i < self.size && j < self.size);
        self.cells[i * self.size + j] = value;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.cells.chunks(self.size)
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// The coordinates of all empty cells, in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &value)| value == 0)
            .map(|(idx, _)| (idx / self.size, idx % self.size))
            .collect()
    }

    /// The number of non-empty cells.
    pub fn num_tiles(&self) -> usize {
        self.cells.iter().filter(|&&value| value != 0).count()
    }

    pub fn sum(&self) -> u64 {
        self.cells.iter().map(|&value| u64::from(value)).sum()
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&value| value != 0)
    }

    /// Is there any pair of horizontally or vertically adjacent cells
    /// holding the same non-zero value that a shift could merge?
    ///
    /// Two tiles of the largest representable value never merge, so they
    /// don't count.
    pub fn has_adjacent_equal(&self) -> bool {
        // Looking right and down from every cell covers every pair once.
        for i in 0..self.size {
            for j in 0..self.size {
                let value = self.get(i, j);
                if j + 1 < self.size && merged_value(value, self.get(i, j + 1)).is_some() {
                    return true;
                }
                if i + 1 < self.size && merged_value(value, self.get(i + 1, j)).is_some() {
                    return true;
                }
            }
        }
        false
    }

    /// Shifts and merges all tiles towards `direction`.
    ///
    /// Every row (for left/right) or column (for up/down) is read starting
    /// from the edge the tiles move towards, compacted and merged, and
    /// written back in the same order.
    ///
    /// Returns whether any cell changed.
    pub fn shift(&mut self, direction: Direction) -> bool {
        let mut changed = false;
        let mut line = Vec::with_capacity(self.size);
        for line_idx in 0..self.size {
            line.clear();
            line.extend(
                (0..self.size).map(|pos| self.cells[self.cell_index(direction, line_idx, pos)]),
            );
            for (pos, value) in compact_and_merge(&line).into_iter().enumerate() {
                let idx = self.cell_index(direction, line_idx, pos);
                if self.cells[idx] != value {
                    self.cells[idx] = value;
                    changed = true;
                }
            }
        }
        changed
    }

    // Maps the `pos`-th cell of line `line_idx`, counted from the edge that
    // tiles move towards, to its row-major index.
    fn cell_index(&self, direction: Direction, line_idx: usize, pos: usize) -> usize {
        let last = self.size - 1;
        let (i, j) = match direction {
            Direction::Left => (line_idx, pos),
            Direction::Right => (line_idx, last - pos),
            Direction::Up => (pos, line_idx),
            Direction::Down => (last - pos, line_idx),
        };
        i * self.size + j
    }
}

impl TryFrom<Vec<Vec<Tile>>> for Grid {
    type Error = InvalidGrid;

    fn try_from(rows: Vec<Vec<Tile>>) -> Result<Self, Self::Error> {
        Grid::from_rows(&rows)
    }
}

impl From<Grid> for Vec<Vec<Tile>> {
    fn from(grid: Grid) -> Self {
        grid.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::ArbitraryGrid;

    fn grid(rows: &[&[Tile]]) -> Grid {
        Grid::from_rows(rows).unwrap()
    }

    quickcheck! {
        fn shift_without_merges_is_final(input: ArbitraryGrid) -> bool {
            let ArbitraryGrid { mut grid, direction } = input;
            let tiles_before = grid.num_tiles();
            grid.shift(direction);
            if grid.num_tiles() != tiles_before {
                // Merged tiles may line up for another merge on the next shift
                return true;
            }
            let after_first = grid.clone();
            !grid.shift(direction) && grid == after_first
        }

        fn shift_never_adds_tiles(input: ArbitraryGrid) -> bool {
            let ArbitraryGrid { mut grid, direction } = input;
            let before = grid.num_tiles();
            grid.shift(direction);
            grid.num_tiles() <= before
        }

        fn shift_preserves_sum(input: ArbitraryGrid) -> bool {
            let ArbitraryGrid { mut grid, direction } = input;
            let before = grid.sum();
            grid.shift(direction);
            grid.sum() == before
        }

        fn shift_reports_changes(input: ArbitraryGrid) -> bool {
            let ArbitraryGrid { mut grid, direction } = input;
            let before = grid.clone();
            let changed = grid.shift(direction);
            changed == (grid != before)
        }
    }

    #[test]
    fn shift_left_merges_pairs_without_rescanning() {
        let mut g = grid(&[&[2, 2, 2, 2], &[0, 2, 0, 2], &[4, 4, 8, 0], &[2, 4, 8, 16]]);
        assert!(g.shift(Direction::Left));
        assert_eq!(
            g,
            grid(&[&[4, 4, 0, 0], &[4, 0, 0, 0], &[8, 8, 0, 0], &[2, 4, 8, 16]])
        );
    }

    #[test]
    fn merged_tiles_can_merge_on_the_next_shift() {
        let mut g = grid(&[&[2, 2, 2, 2], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]]);
        assert!(g.shift(Direction::Left));
        assert_eq!(g.get(0, 0), 4);
        assert_eq!(g.get(0, 1), 4);
        assert!(g.shift(Direction::Left));
        assert_eq!(g.to_rows()[0], vec![8, 0, 0, 0]);
        assert!(!g.shift(Direction::Left));
    }

    #[test]
    fn shift_right_mirrors_left() {
        let mut g = grid(&[&[2, 0, 2, 0], &[2, 2, 2, 0], &[0, 0, 0, 0], &[8, 4, 4, 4]]);
        assert!(g.shift(Direction::Right));
        assert_eq!(
            g,
            grid(&[&[0, 0, 0, 4], &[0, 0, 2, 4], &[0, 0, 0, 0], &[0, 8, 4, 8]])
        );
    }

    #[test]
    fn shift_up_and_down_work_on_columns() {
        let start = grid(&[&[2, 0, 4], &[2, 4, 4], &[0, 4, 4]]);

        let mut up = start.clone();
        assert!(up.shift(Direction::Up));
        assert_eq!(up, grid(&[&[4, 8, 8], &[0, 0, 4], &[0, 0, 0]]));

        let mut down = start;
        assert!(down.shift(Direction::Down));
        assert_eq!(down, grid(&[&[0, 0, 0], &[0, 0, 4], &[4, 8, 8]]));
    }

    #[test]
    fn blocked_shift_reports_no_change() {
        let mut g = grid(&[&[2, 4], &[0, 0]]);
        assert!(!g.shift(Direction::Left));
        assert!(!g.shift(Direction::Up));
        assert!(g.shift(Direction::Down));
    }

    #[test]
    fn largest_tiles_stay_apart() {
        let mut g = grid(&[&[1 << 31, 1 << 31], &[0, 0]]);
        let sum = g.sum();
        assert!(!g.shift(Direction::Left));
        assert!(!g.shift(Direction::Right));
        assert_eq!(g.sum(), sum);
        assert!(g.shift(Direction::Down));
        assert_eq!(g, grid(&[&[0, 0], &[1 << 31, 1 << 31]]));
        assert_eq!(g.sum(), sum);

        // Full and only the unmergeable pair is adjacent
        assert!(!grid(&[&[1 << 31, 1 << 31], &[2, 4]]).has_adjacent_equal());
    }

    #[test]
    fn adjacency() {
        assert!(!grid(&[&[2, 4], &[4, 2]]).has_adjacent_equal());
        assert!(grid(&[&[2, 2], &[4, 8]]).has_adjacent_equal());
        assert!(grid(&[&[2, 4], &[2, 8]]).has_adjacent_equal());
        // Diagonals don't count
        assert!(!grid(&[&[2, 4], &[8, 2]]).has_adjacent_equal());
        // Neither do empty cells
        assert!(!grid(&[&[0, 0], &[0, 2]]).has_adjacent_equal());
    }

    #[test]
    fn from_rows_checks_invariants() {
        assert_eq!(
            Grid::from_rows(&[[2]]),
            Err(InvalidGrid::TooSmall { size: 1 })
        );
        assert_eq!(
            Grid::from_rows(&[vec![2, 4], vec![2]]),
            Err(InvalidGrid::NotSquare { row: 1, len: 1 })
        );
        assert_eq!(
            Grid::from_rows(&[[2, 3], [0, 0]]),
            Err(InvalidGrid::NotPowerOfTwo { i: 0, j: 1, value: 3 })
        );
        assert_eq!(
            Grid::from_rows(&[[0, 0], [1, 0]]),
            Err(InvalidGrid::NotPowerOfTwo { i: 1, j: 0, value: 1 })
        );
    }

    #[test]
    fn derived_values() {
        let g = grid(&[&[2, 0, 4], &[0, 0, 0], &[8, 2, 0]]);
        assert_eq!(g.sum(), 16);
        assert_eq!(g.num_tiles(), 4);
        assert_eq!(g.max_tile(), 8);
        assert!(!g.is_full());
        assert_eq!(g.empty_cells(), vec![(0, 1), (1, 0), (1, 1), (1, 2), (2, 2)]);
    }

    #[test]
    fn serializes_as_rows() {
        let g = grid(&[&[2, 0], &[0, 4]]);
        let json = serde_json::to_string(&g).unwrap();
        assert_eq!(json, "[[2,0],[0,4]]");
        assert_eq!(serde_json::from_str::<Grid>(&json).unwrap(), g);
        assert!(serde_json::from_str::<Grid>("[[2,0],[0,5]]").is_err());
    }
}
