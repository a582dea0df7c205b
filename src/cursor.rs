use crate::position::Position;

/// A lightweight cursor used to address a [`Position`] without exposing its packing
///
/// A cursor always names a column. It either pins a row, addressing one cell,
/// or follows the fill line of whatever position it is read against, in which
/// case [`Cursor::row`] is the next open slot of that column and moves as the
/// position is mutated.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Cursor {
    column: usize,
    width: usize,
    row: Option<usize>,
}

impl Cursor {
    /// Creates a column cursor on the first column of a board `width` columns wide
    pub fn new(width: usize) -> Self {
        Self::at_column(width, 0)
    }

    pub fn at_column(width: usize, column: usize) -> Self {
        Self {
            column,
            width,
            row: None,
        }
    }

    /// Creates a cursor pinned to a single cell, `row` counted from the bottom
    pub fn at_cell(width: usize, column: usize, row: usize) -> Self {
        Self {
            column,
            width,
            row: Some(row),
        }
    }

    pub fn column(&self) -> usize {
        self.column
    }

    /// The addressed row, read from `position` when the cursor follows the fill line
    pub fn row(&self, position: &Position) -> usize {
        match self.row {
            Some(row) => row,
            None => position.column_chip_count(self.column),
        }
    }

    pub fn advance(&mut self) {
        self.column += 1;
    }

    pub fn reset(&mut self) {
        self.column = 0;
    }

    pub fn in_bounds(&self) -> bool {
        self.column < self.width
    }
}
