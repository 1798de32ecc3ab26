use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a block.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine the player clicked on.
    Detonated,
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    position: Coord3,
    base_color: Rgb,
    pub(crate) mine: bool,
    pub(crate) state: CellState,
    pub(crate) neighbor_mines: Option<u8>,
    pub(crate) animation: ScaleAnimation,
}

impl Cell {
    pub(crate) fn new(position: Coord3) -> Self {
        Self {
            position,
            base_color: base_color(position),
            mine: false,
            state: CellState::Hidden,
            neighbor_mines: None,
            animation: ScaleAnimation::default(),
        }
    }

    pub fn position(&self) -> Coord3 {
        self.position
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_mine(&self) -> bool {
        self.mine
    }

    pub fn is_flagged(&self) -> bool {
        matches!(self.state, CellState::Flagged)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed(_))
    }

    pub fn is_detonated(&self) -> bool {
        matches!(self.state, CellState::Detonated)
    }

    /// Mines in the surrounding cube, known once a reveal has been attempted.
    pub fn neighbor_mine_count(&self) -> Option<u8> {
        self.neighbor_mines
    }

    pub fn animation(&self) -> &ScaleAnimation {
        &self.animation
    }

    pub fn base_color(&self) -> Rgb {
        self.base_color
    }

    /// Colour ignoring hover highlighting.
    pub fn color(&self) -> Rgb {
        match self.state {
            CellState::Hidden => self.base_color,
            CellState::Flagged => FLAG,
            CellState::Detonated => DETONATED,
            CellState::Revealed(count) => number_color(count).unwrap_or(self.base_color),
        }
    }

    pub(crate) fn toggle_flag(&mut self) -> MarkOutcome {
        match self.state {
            CellState::Hidden => {
                self.state = CellState::Flagged;
                MarkOutcome::Changed
            }
            CellState::Flagged => {
                self.state = CellState::Hidden;
                MarkOutcome::Changed
            }
            CellState::Revealed(_) | CellState::Detonated => MarkOutcome::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_toggles_only_unrevealed_cells() {
        let mut cell = Cell::new((0, 1, 0));
        assert_eq!(cell.toggle_flag(), MarkOutcome::Changed);
        assert!(cell.is_flagged());
        assert_eq!(cell.color(), FLAG);

        assert_eq!(cell.toggle_flag(), MarkOutcome::Changed);
        assert_eq!(cell.color(), LIGHT_BLOCK);

        cell.state = CellState::Revealed(2);
        assert_eq!(cell.toggle_flag(), MarkOutcome::NoChange);
        assert!(cell.is_revealed());
        assert!(!cell.is_flagged());
    }

    #[test]
    fn empty_reveal_keeps_base_color() {
        let mut cell = Cell::new((0, 0, 0));
        cell.state = CellState::Revealed(0);
        assert_eq!(cell.color(), DARK_BLOCK);
    }
}
