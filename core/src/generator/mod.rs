use crate::*;
pub use random::*;

mod random;

pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board>;
}

/// How mines are distributed over the board.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Placement {
    /// Partial Fisher-Yates over the flattened cell indices, always `O(cells)`.
    #[default]
    Shuffle,
    /// Sample random coordinates and retry on duplicates.
    ///
    /// Slows down as the board fills up, so the number of samples is capped and any mines left
    /// over when the cap is hit are placed by [`Placement::Shuffle`].
    Rejection,
}
