use alloc::vec::Vec;
use ndarray::Array2;
use rand::{Rng, SeedableRng, rngs::SmallRng, seq::SliceRandom};

use super::*;

/// Samples allowed per requested mine before rejection sampling falls back to a shuffle.
pub const REJECTION_BUDGET_FACTOR: usize = 8;

/// Purely random generation strategy driven by an injected random source.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator<R> {
    rng: R,
    placement: Placement,
}

impl<R: Rng> RandomBoardGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            placement: Placement::default(),
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }
}

impl RandomBoardGenerator<SmallRng> {
    /// Same seed and config always produce the same board.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> BoardGenerator for RandomBoardGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<Board> {
        let config = config.validate()?;
        let size = usize::from(config.size);
        let mines = usize::from(config.mines);

        let mut cells = alloc::vec![false; size * size];
        match self.placement {
            Placement::Shuffle => place_by_shuffle(&mut self.rng, &mut cells, mines),
            Placement::Rejection => {
                let placed = place_by_rejection(&mut self.rng, &mut cells, size, mines);
                if placed < mines {
                    log::warn!(
                        "Rejection sampling ran out of attempts with {} of {} mines placed, shuffling the rest",
                        placed,
                        mines
                    );
                    place_by_shuffle(&mut self.rng, &mut cells, mines - placed);
                }
            }
        }

        let mine_mask = Array2::from_shape_fn((size, size), |(row, col)| cells[row * size + col]);
        let board = Board::from_mine_mask(&mine_mask);
        log::debug!(
            "Generated {}x{} board with {} mines using {:?} placement",
            size,
            size,
            board.mine_count(),
            self.placement
        );
        Ok(board)
    }
}

/// Marks `mines` of the currently free cells, chosen uniformly.
fn place_by_shuffle<R: Rng>(rng: &mut R, cells: &mut [bool], mines: usize) {
    let mut free: Vec<usize> = cells
        .iter()
        .enumerate()
        .filter(|&(_, &is_mine)| !is_mine)
        .map(|(index, _)| index)
        .collect();

    let (chosen, _) = free.partial_shuffle(rng, mines);
    for &index in chosen.iter() {
        cells[index] = true;
    }
}

/// Returns how many mines were placed before the sample budget ran out.
fn place_by_rejection<R: Rng>(rng: &mut R, cells: &mut [bool], size: usize, mines: usize) -> usize {
    let mut placed = 0;
    let mut attempts = mines.saturating_mul(REJECTION_BUDGET_FACTOR);

    while placed < mines && attempts > 0 {
        attempts -= 1;
        let row = rng.random_range(0..size);
        let col = rng.random_range(0..size);
        let cell = &mut cells[row * size + col];
        if !*cell {
            *cell = true;
            placed += 1;
        }
    }

    placed
}
