use crate::Grid;

/// Draws the grid as a box with row and column labels.
///
/// Empty cells are shown as `·`. All columns share the width of the widest tile.
pub fn render_grid(grid: &Grid) -> String {
    let width = grid.max_tile().to_string().len().max(1);
    let size = grid.size();

    // Column labels and the top of the box
    let mut result = String::from("    ");
    for j in 0..size {
        result += &format!(" {:>width$}", j, width = width);
    }
    result += "\n   ╭";
    for _ in 0..size {
        result += &"─".repeat(width + 1);
    }
    result += "─╮\n";

    for (i, row) in grid.rows().enumerate() {
        result += &format!("{:>2} │", i);
        for &value in row {
            if value == 0 {
                result += &format!(" {:>width$}", "·", width = width);
            } else {
                result += &format!(" {:>width$}", value, width = width);
            }
        }
        result += " │\n";
    }

    // Draw the bottom of the box
    result += "   ╰";
    for _ in 0..size {
        result += &"─".repeat(width + 1);
    }
    result += "─╯";
    result
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", render_grid(self))
    }
}
