use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square grid of cells with a fixed set of mines.
///
/// Keeps running counts of revealed and flagged cells so the win condition can be checked after every
/// move without scanning the grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardSnapshot")]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    /// Builds a board from a fixed mine layout, duplicates in `mine_coords` collapse.
    pub fn from_mine_coords(size: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        if size == 0 {
            return Err(GameError::ZeroSize);
        }

        let mut mine_mask: Array2<bool> = Array2::default((size, size).to_nd_index());
        for &coords in mine_coords {
            if coords.0 >= size || coords.1 >= size {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        let mines = count_mines(&mine_mask);
        GameConfig::new(size, mines)?;
        Ok(Self::from_mine_mask(&mine_mask))
    }

    /// Computes every adjacency count from `mine_mask`, which must be square.
    pub(crate) fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let cells = Array2::from_shape_fn(mine_mask.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            let is_mine = mine_mask[coords.to_nd_index()];
            let adjacent_mines = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count() as u8;
            Cell::new(is_mine, adjacent_mines)
        });

        Self {
            cells,
            mine_count: count_mines(mine_mask),
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> Coord {
        Coord::try_from(self.cells.nrows()).unwrap_or(Coord::MAX)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        square(self.size())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Cells that are hidden or flagged.
    pub fn unrevealed_count(&self) -> CellCount {
        self.total_cells() - self.revealed_count
    }

    /// True once the number of unrevealed cells equals the number of mines.
    ///
    /// Flags are not checked for correctness, a flagged cell simply counts as unrevealed.
    pub fn is_won(&self) -> bool {
        self.unrevealed_count() == self.mine_count
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let size = self.size();
        coords.0 < size && coords.1 < size
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    /// All cells in row-major order together with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Cell)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ((row as Coord, col as Coord), cell))
    }

    /// Cells of a single row from left to right, empty when `row` is off the board.
    pub fn row(&self, row: Coord) -> impl Iterator<Item = &Cell> {
        let size = self.size();
        (0..size).filter_map(move |col| self.cell((row, col)))
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Moves a cell to `state`, keeping the revealed and flagged counters in sync.
    pub(crate) fn set_state(&mut self, coords: Coord2, state: CellState) {
        use CellState::*;

        let Some(cell) = self.cells.get_mut(coords.to_nd_index()) else {
            return;
        };

        let previous = cell.state();
        if previous == state {
            return;
        }

        match previous {
            Revealed => self.revealed_count -= 1,
            Flagged => self.flagged_count -= 1,
            Hidden => {}
        }
        match state {
            Revealed => self.revealed_count += 1,
            Flagged => self.flagged_count += 1,
            Hidden => {}
        }
        cell.set_state(state);
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Serialized form of a [`Board`], trusted only once `TryFrom` has rebuilt it.
#[derive(Deserialize)]
struct BoardSnapshot {
    cells: Array2<Cell>,
    mine_count: CellCount,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl TryFrom<BoardSnapshot> for Board {
    type Error = GameError;

    /// Recomputes adjacency and both counters from the saved mines and cell states, and rejects
    /// the snapshot unless they match what it claims.
    fn try_from(snapshot: BoardSnapshot) -> Result<Self> {
        let (rows, cols) = snapshot.cells.dim();
        let size = Coord::try_from(rows).map_err(|_| GameError::InvalidSnapshot)?;
        if rows != cols {
            return Err(GameError::InvalidSnapshot);
        }

        let mine_mask = snapshot.cells.map(Cell::is_mine);
        GameConfig::new(size, count_mines(&mine_mask))?;

        let mut board = Self::from_mine_mask(&mine_mask);
        for ((row, col), cell) in snapshot.cells.indexed_iter() {
            board.set_state((row as Coord, col as Coord), cell.state());
        }

        let claimed = Self {
            cells: snapshot.cells,
            mine_count: snapshot.mine_count,
            revealed_count: snapshot.revealed_count,
            flagged_count: snapshot.flagged_count,
        };
        if board != claimed {
            return Err(GameError::InvalidSnapshot);
        }

        Ok(board)
    }
}

fn count_mines(mine_mask: &Array2<bool>) -> CellCount {
    mine_mask.iter().filter(|&&is_mine| is_mine).count() as CellCount
}
