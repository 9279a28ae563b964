use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The cell was already open, nothing changed.
    AlreadyRevealed,
    /// The cell holds a mine. Its state is left untouched for the caller to decide on.
    HitMine,
    /// The cell, and possibly a cascade around it, was opened.
    Revealed,
}

impl Board {
    /// Opens a cell, flood-filling through zero-count regions.
    ///
    /// The cascade only ever opens hidden safe cells: mines, flags and already open cells stop
    /// it. Each cell is flipped to revealed before it is pushed to the worklist, so no cell is
    /// visited twice and the worklist never exceeds the board size.
    ///
    /// Coordinates off the board change nothing and are reported as
    /// [`RevealOutcome::AlreadyRevealed`], use [`Board::validate_coords`] first to tell them apart.
    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        let Some(&cell) = self.cell(coords) else {
            return RevealOutcome::AlreadyRevealed;
        };

        if cell.is_revealed() {
            return RevealOutcome::AlreadyRevealed;
        }

        if cell.is_mine() {
            return RevealOutcome::HitMine;
        }

        self.set_state(coords, CellState::Revealed);
        log::trace!(
            "Revealed cell at {:?}, adjacent mines: {}",
            coords,
            cell.adjacent_mines()
        );

        if cell.adjacent_mines() == 0 {
            let opened = self.flood_from(coords);
            log::trace!("Flood-fill from {:?} opened {} more cells", coords, opened);
        }

        RevealOutcome::Revealed
    }

    /// Opens everything reachable from an already revealed zero-count cell, returns how many
    /// cells it opened.
    fn flood_from(&mut self, start: Coord2) -> usize {
        let mut opened = 0;
        let mut to_visit = Vec::from([start]);

        while let Some(visit_coords) = to_visit.pop() {
            for pos in self.iter_neighbors(visit_coords) {
                let neighbor = self[pos];
                if neighbor.is_mine() || neighbor.state() != CellState::Hidden {
                    continue;
                }

                self.set_state(pos, CellState::Revealed);
                opened += 1;

                // only zero cells keep spreading
                if neighbor.adjacent_mines() == 0 {
                    to_visit.push(pos);
                }
            }
        }

        opened
    }

    /// Sets or clears a flag on an unrevealed cell.
    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) -> Result<MarkOutcome> {
        use CellState::*;
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;

        Ok(match (self[coords].state(), flagged) {
            (Revealed, _) => return Err(GameError::CellRevealed),
            (Hidden, true) => {
                self.set_state(coords, Flagged);
                Changed
            }
            (Flagged, false) => {
                self.set_state(coords, Hidden);
                Changed
            }
            (Hidden, false) | (Flagged, true) => NoChange,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let flagged = self[coords].state() == CellState::Flagged;
        self.set_flag(coords, !flagged)
    }
}
