use crate::Tile;

/// Slides the tiles of one line towards its start and merges equal neighbours.
///
/// The line is compacted first (zeros removed, order kept). Then a single
/// sweep from the start merges each pair of equal adjacent tiles into the
/// first of them. A merged tile is never merged again in the same sweep, so
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]` and not `[8, 0, 0, 0]`. The result
/// is compacted again and padded with zeros to the original length.
///
/// Two tiles whose sum does not fit in a [`Tile`] stay apart.
pub(crate) fn compact_and_merge(line: &[Tile]) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = line.iter().copied().filter(|&value| value != 0).collect();

    for idx in 1..tiles.len() {
        // If tiles[idx - 1] was just merged away it is zero and can't match
        if let Some(merged) = merged_value(tiles[idx - 1], tiles[idx]) {
            tiles[idx - 1] = merged;
            tiles[idx] = 0;
        }
    }

    tiles.retain(|&value| value != 0);
    tiles.resize(line.len(), 0);
    tiles
}

/// The tile that two neighbouring cells merge into, if they can merge at all.
pub(crate) fn merged_value(first: Tile, second: Tile) -> Option<Tile> {
    if first == 0 || first != second {
        return None;
    }
    first.checked_mul(2)
}
