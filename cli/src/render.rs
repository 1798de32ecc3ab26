use std::fmt;

use cubesweeper_core::{CellState, GridEngine};

/// Glyph for a single block. Counts above nine continue as `a` (10) to `q` (26).
pub fn glyph(state: CellState, is_mine: bool, show_mines: bool) -> char {
    match state {
        CellState::Hidden if show_mines && is_mine => 'X',
        CellState::Hidden => '#',
        CellState::Flagged => 'F',
        CellState::Detonated => '*',
        CellState::Revealed(0) => '.',
        CellState::Revealed(count) => char::from_digit(count.into(), 36).unwrap_or('?'),
    }
}

/// One character grid per z layer, rows running along x.
pub struct Layers<'a>(pub &'a GridEngine);

impl fmt::Display for Layers<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let engine = self.0;
        let (x_end, y_end, z_end) = engine.size();
        let show_mines = engine.is_lost();

        writeln!(
            f,
            "{:?} | {}x{}x{} | mines left: {}",
            engine.state(),
            x_end,
            y_end,
            z_end,
            engine.mines_left()
        )?;

        for z in 0..z_end {
            writeln!(f, "z={z}")?;
            for y in 0..y_end {
                let row: String = (0..x_end)
                    .filter_map(|x| engine.cell((x, y, z)))
                    .map(|cell| glyph(cell.state(), cell.is_mine(), show_mines))
                    .collect();
                writeln!(f, "  {row}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cubesweeper_core::MineLayout;

    #[test]
    fn glyphs_cover_every_count() {
        assert_eq!(glyph(CellState::Revealed(0), false, false), '.');
        assert_eq!(glyph(CellState::Revealed(9), false, false), '9');
        assert_eq!(glyph(CellState::Revealed(10), false, false), 'a');
        assert_eq!(glyph(CellState::Revealed(26), false, false), 'q');
        assert_eq!(glyph(CellState::Hidden, true, false), '#');
        assert_eq!(glyph(CellState::Hidden, true, true), 'X');
    }

    #[test]
    fn renders_one_block_per_layer() {
        let layout = MineLayout::from_mine_coords((3, 1, 2), &[(2, 0, 1)]).unwrap();
        let mut engine = GridEngine::with_layout(layout, 0).unwrap();
        engine.reveal((0, 0, 0), true);
        engine.toggle_flag((2, 0, 1));

        let text = Layers(&engine).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Active | 3x1x2 | mines left: 0");
        assert_eq!(lines[1..], ["z=0", "  .##", "z=1", "  ##F"]);
    }

    #[test]
    fn loss_exposes_remaining_mines() {
        let layout = MineLayout::from_mine_coords((4, 1, 1), &[(0, 0, 0), (3, 0, 0)]).unwrap();
        let mut engine = GridEngine::with_layout(layout, 0).unwrap();
        engine.primary_click((0, 0, 0));

        let text = Layers(&engine).to_string();
        assert!(text.ends_with("  *##X\n"));
    }
}
