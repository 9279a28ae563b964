use serde::{Deserialize, Serialize};

/// Player-visible state of a cell, the only part of a [`Cell`] that changes during play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

/// What a renderer should draw for a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Flagged,
    /// Revealed mine, only shown after the game was lost on it.
    Mine,
    /// Revealed safe cell with its adjacent mine count.
    Count(u8),
}

/// One grid position.
///
/// `is_mine` and `adjacent_mines` are fixed when the board is built; only the
/// state moves between hidden, revealed and flagged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    adjacent_mines: u8,
    state: CellState,
}

impl Cell {
    pub(crate) const fn new(is_mine: bool, adjacent_mines: u8) -> Self {
        Self {
            is_mine,
            adjacent_mines: if is_mine { 0 } else { adjacent_mines },
            state: CellState::Hidden,
        }
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    /// Mines among the Moore neighbors, always 0 for a mine cell.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn state(&self) -> CellState {
        self.state
    }

    pub const fn is_revealed(&self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn view(&self) -> CellView {
        match self.state {
            CellState::Hidden => CellView::Hidden,
            CellState::Flagged => CellView::Flagged,
            CellState::Revealed if self.is_mine => CellView::Mine,
            CellState::Revealed => CellView::Count(self.adjacent_mines),
        }
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_hidden() {
        let cell = Cell::new(false, 3);
        assert_eq!(cell.state(), CellState::Hidden);
        assert_eq!(cell.view(), CellView::Hidden);
        assert_eq!(cell.adjacent_mines(), 3);
    }

    #[test]
    fn mine_count_is_ignored_for_mines() {
        assert_eq!(Cell::new(true, 5).adjacent_mines(), 0);
    }

    #[test]
    fn view_follows_state() {
        let mut safe = Cell::new(false, 2);
        safe.set_state(CellState::Flagged);
        assert_eq!(safe.view(), CellView::Flagged);
        safe.set_state(CellState::Revealed);
        assert_eq!(safe.view(), CellView::Count(2));

        let mut mine = Cell::new(true, 0);
        mine.set_state(CellState::Revealed);
        assert_eq!(mine.view(), CellView::Mine);
    }
}
