use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    #[default]
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    pub const fn outcome(self) -> Option<Outcome> {
        match self {
            Self::InProgress => None,
            Self::Won => Some(Outcome::Won),
            Self::Lost => Some(Outcome::Lost),
        }
    }
}

/// Final result of a finished game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Reveal,
    ToggleFlag,
}

/// A single player move with zero-based `(row, col)` target.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub target: Coord2,
    pub kind: ActionKind,
}

impl Action {
    pub const fn reveal(target: Coord2) -> Self {
        Self {
            target,
            kind: ActionKind::Reveal,
        }
    }

    pub const fn toggle_flag(target: Coord2) -> Self {
        Self {
            target,
            kind: ActionKind::ToggleFlag,
        }
    }
}

/// Represents a game from start to finish
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameSnapshot")]
pub struct Game {
    board: Board,
    status: GameStatus,
    struck_mine: Option<Coord2>,
}

impl Game {
    pub fn new(board: Board) -> Self {
        let status = if board.is_won() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        };

        Self {
            board,
            status,
            struck_mine: None,
        }
    }

    pub fn generate(config: GameConfig, generator: impl BoardGenerator) -> Result<Self> {
        Ok(Self::new(generator.generate(config)?))
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.status.outcome()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Option<&Cell> {
        self.board.cell(coords)
    }

    pub fn size(&self) -> Coord {
        self.board.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.board.mine_count()
    }

    /// How many mines have not been flagged yet, negative when there are more flags than mines
    pub fn mines_left(&self) -> isize {
        (self.board.mine_count() as isize) - (self.board.flagged_count() as isize)
    }

    /// The mine that ended a lost game.
    pub fn struck_mine(&self) -> Option<Coord2> {
        self.struck_mine
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<GameStatus> {
        self.apply(Action::reveal(coords))
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<GameStatus> {
        self.apply(Action::toggle_flag(coords))
    }

    /// Plays one move and returns the resulting status.
    ///
    /// Errors leave the game untouched.
    pub fn apply(&mut self, action: Action) -> Result<GameStatus> {
        let coords = self.board.validate_coords(action.target)?;
        self.check_in_progress()?;

        match action.kind {
            ActionKind::Reveal => match self.board.reveal(coords) {
                RevealOutcome::HitMine => {
                    self.lose_on(coords);
                    return Ok(self.status);
                }
                RevealOutcome::Revealed | RevealOutcome::AlreadyRevealed => {}
            },
            ActionKind::ToggleFlag => {
                self.board.toggle_flag(coords)?;
            }
        }

        if self.board.is_won() {
            self.status = GameStatus::Won;
            log::debug!(
                "Game won with {} cells revealed",
                self.board.revealed_count()
            );
        }

        Ok(self.status)
    }

    fn lose_on(&mut self, coords: Coord2) {
        self.board.set_state(coords, CellState::Revealed);
        self.struck_mine = Some(coords);
        self.status = GameStatus::Lost;
        log::debug!("Game lost on mine at {:?}", coords);
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.status.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[derive(Deserialize)]
struct GameSnapshot {
    board: Board,
    status: GameStatus,
    struck_mine: Option<Coord2>,
}

impl TryFrom<GameSnapshot> for Game {
    type Error = GameError;

    /// A revealed mine only exists in a lost game, where it is the struck one; otherwise the
    /// status has to agree with the board's win check.
    fn try_from(snapshot: GameSnapshot) -> Result<Self> {
        let GameSnapshot {
            board,
            status,
            struck_mine,
        } = snapshot;

        let consistent = {
            let mut revealed_mines = board
                .iter()
                .filter(|(_, cell)| cell.is_mine() && cell.is_revealed())
                .map(|(coords, _)| coords);
            let struck = revealed_mines.next();

            revealed_mines.next().is_none()
                && struck == struck_mine
                && match status {
                    GameStatus::Lost => struck.is_some(),
                    GameStatus::Won => struck.is_none() && board.is_won(),
                    GameStatus::InProgress => struck.is_none() && !board.is_won(),
                }
        };
        if !consistent {
            return Err(GameError::InvalidSnapshot);
        }

        Ok(Self {
            board,
            status,
            struck_mine,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord, mines: &[Coord2]) -> Game {
        Game::new(Board::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reveal_hits_mine_and_sets_struck_cell() {
        let mut game = game(2, &[(0, 0)]);

        assert_eq!(game.reveal((0, 0)), Ok(GameStatus::Lost));
        assert_eq!(game.outcome(), Some(Outcome::Lost));
        assert_eq!(game.struck_mine(), Some((0, 0)));
        assert_eq!(game.board()[(0, 0)].view(), CellView::Mine);
        assert_eq!(game.board().revealed_count(), 1);
    }

    #[test]
    fn revealing_a_flagged_mine_loses() {
        let mut game = game(3, &[(0, 0), (2, 2)]);
        game.toggle_flag((0, 0)).unwrap();
        assert_eq!(game.mines_left(), 1);

        assert_eq!(game.reveal((0, 0)), Ok(GameStatus::Lost));
        assert_eq!(game.struck_mine(), Some((0, 0)));
        assert_eq!(game.board()[(0, 0)].view(), CellView::Mine);
        assert_eq!(game.board().flagged_count(), 0);
        assert_eq!(game.mines_left(), 2);
        assert_eq!(game.board()[(2, 2)].state(), CellState::Hidden);
    }

    #[test]
    fn loss_is_terminal() {
        let mut game = game(3, &[(0, 0)]);
        game.reveal((0, 0)).unwrap();
        let before = game.clone();

        assert_eq!(game.reveal((2, 2)), Err(GameError::AlreadyEnded));
        assert_eq!(game.toggle_flag((1, 1)), Err(GameError::AlreadyEnded));
        assert_eq!(game, before);
    }

    #[test]
    fn cascade_wins_in_one_move() {
        let mut game = game(3, &[(2, 2)]);

        assert_eq!(game.reveal((0, 0)), Ok(GameStatus::Won));
        assert!(game.is_finished());
        assert_eq!(game.struck_mine(), None);
        assert_eq!(game.reveal((1, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn out_of_bounds_leaves_game_untouched() {
        let mut game = game(3, &[(2, 2)]);
        let before = game.clone();

        assert_eq!(game.reveal((3, 0)), Err(GameError::OutOfBounds));
        assert_eq!(game.toggle_flag((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(game, before);
    }

    #[test]
    fn flags_track_mines_left() {
        let mut game = game(3, &[(0, 0), (2, 2)]);

        assert_eq!(game.toggle_flag((0, 0)), Ok(GameStatus::InProgress));
        assert_eq!(game.mines_left(), 1);
        game.toggle_flag((1, 2)).unwrap();
        game.toggle_flag((0, 2)).unwrap();
        assert_eq!(game.mines_left(), -1);
        game.toggle_flag((0, 2)).unwrap();
        assert_eq!(game.mines_left(), 0);

        // revealing a flagged safe cell removes its flag
        game.reveal((1, 2)).unwrap();
        assert_eq!(game.mines_left(), 1);
    }

    #[test]
    fn flagging_revealed_cell_is_rejected() {
        let mut game = game(3, &[(0, 0)]);
        game.reveal((1, 1)).unwrap();

        assert_eq!(game.toggle_flag((1, 1)), Err(GameError::CellRevealed));
        assert_eq!(game.status(), GameStatus::InProgress);
    }

    #[test]
    fn flags_do_not_block_the_win() {
        let mut game = game(2, &[(0, 0)]);
        game.toggle_flag((0, 0)).unwrap();

        game.reveal((0, 1)).unwrap();
        game.reveal((1, 0)).unwrap();
        assert_eq!(game.reveal((1, 1)), Ok(GameStatus::Won));
        assert_eq!(game.board()[(0, 0)].state(), CellState::Flagged);
    }

    #[test]
    fn apply_dispatches_actions() {
        let mut game = game(3, &[(0, 0)]);

        game.apply(Action::toggle_flag((2, 0))).unwrap();
        assert_eq!(game.cell_at((2, 0)).map(Cell::state), Some(CellState::Flagged));

        game.apply(Action::reveal((2, 2))).unwrap();
        assert!(game.board()[(1, 1)].is_revealed());
        assert_eq!(game.board()[(2, 0)].state(), CellState::Flagged);
    }

    #[test]
    fn generated_game_starts_in_progress() {
        let config = GameConfig::default();
        let game = Game::generate(config, RandomBoardGenerator::from_seed(5)).unwrap();

        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.size(), 9);
        assert_eq!(game.total_mines(), 9);
        assert_eq!(game.mines_left(), 9);
    }
}
