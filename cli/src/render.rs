use std::fmt::{self, Write};

use sweeper_core::{Board, CellView};

const HIDDEN: char = '#';
const FLAG: char = 'X';
const MINE: char = '*';

fn glyph(view: CellView) -> char {
    match view {
        CellView::Hidden => HIDDEN,
        CellView::Flagged => FLAG,
        CellView::Mine => MINE,
        CellView::Count(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
    }
}

/// Draws the board with 1-based row and column headers.
pub(crate) struct BoardView<'a>(pub &'a Board);

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        let size = board.size();
        let width = size.to_string().len();

        for i in 0..=size {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{i:>width$}")?;
        }
        writeln!(f)?;

        for row in 0..size {
            write!(f, "{:>width$}", row + 1)?;
            for cell in board.row(row) {
                write!(f, " {:>width$}", glyph(cell.view()))?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
