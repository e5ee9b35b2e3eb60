use crate::{Direction, Grid, Tile};

/// A small grid with random tiles, plus a direction to shift it in.
#[derive(Clone, Debug)]
pub struct ArbitraryGrid {
    pub grid: Grid,
    pub direction: Direction,
}

impl quickcheck::Arbitrary for ArbitraryGrid {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        let size = 2 + usize::arbitrary(g) % 5;
        // Favour empty cells and small tiles, so that merges are common
        let rows: Vec<Vec<Tile>> = (0..size)
            .map(|_| {
                (0..size)
                    .map(|_| match u8::arbitrary(g) % 8 {
                        0..=2 => 0,
                        exp => 1 << (exp - 2),
                    })
                    .collect()
            })
            .collect();
        ArbitraryGrid {
            grid: Grid::from_rows(&rows).unwrap(),
            direction: Direction::arbitrary(g),
        }
    }

    fn shrink(&self) -> Box<dyn Iterator<Item = Self>> {
        // Shrink by emptying cells one at a time
        let direction = self.direction;
        let grid = self.grid.clone();
        let occupied: Vec<(usize, usize)> = (0..grid.size())
            .flat_map(|i| (0..grid.size()).map(move |j| (i, j)))
            .filter(|&(i, j)| grid.get(i, j) != 0)
            .collect();
        Box::new(occupied.into_iter().map(move |(i, j)| {
            let mut grid = grid.clone();
            grid.set(i, j, 0);
            ArbitraryGrid { grid, direction }
        }))
    }
}

impl quickcheck::Arbitrary for Direction {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        *g.choose(&Direction::ALL).unwrap()
    }
}
