//! Packed board state for Connect 4 on boards up to 7x6
//!
//! The whole position lives in a single `u64`:
//!
//! ```text
//!  63     62 ..................... 21    20 ............... 0
//! [stm][ colour, MAX_HEIGHT per column ][ 3-bit column heights ]
//! ```
//!
//! * bits `3c..3c+3` hold the number of chips in column `c`
//! * bit `21 + c * MAX_HEIGHT + r` holds the colour of cell `(c, r)`, row 0 at
//!   the bottom, 0 for player one and 1 for player two. It is only meaningful
//!   while `r` is below the column height.
//! * bit 63 is the side to move, 0 for player one and 1 for player two
//!
//! None of these offsets leak out of this module.

use anyhow::{anyhow, Result};
use static_assertions::const_assert;
use tracing::warn;

use std::fmt;

use crate::{cursor::Cursor, error::ContractError};

/// The widest board the packed layout can hold
pub const MAX_WIDTH: usize = 7;
/// The tallest board the packed layout can hold
pub const MAX_HEIGHT: usize = 6;

/// The reference board width
pub const DEFAULT_WIDTH: usize = 4;
/// The reference board height
pub const DEFAULT_HEIGHT: usize = 4;

/// Number of aligned chips needed to win
pub const WIN_LENGTH: usize = 4;

const HEIGHT_BITS: usize = 3;
const HEIGHT_FIELD_MASK: u64 = (1 << HEIGHT_BITS) - 1;
const COLOR_OFFSET: usize = HEIGHT_BITS * MAX_WIDTH;
const SIDE_TO_MOVE_BIT: usize = 63;

// a full column must be countable in its height field
const_assert!(MAX_HEIGHT < 1 << HEIGHT_BITS);
// colour bits must stay clear of the side to move bit
const_assert!(COLOR_OFFSET + MAX_WIDTH * MAX_HEIGHT <= SIDE_TO_MOVE_BIT);

// (column step, row step) for horizontal, vertical and both diagonals
const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (1, 1), (1, -1)];

#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The conventional player number, 1 or 2
    pub fn id(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    fn bit(self) -> u64 {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    fn from_bit(bit: u64) -> Self {
        if bit & 1 == 0 {
            Player::One
        } else {
            Player::Two
        }
    }
}

impl TryFrom<u8> for Player {
    type Error = ContractError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            _ => Err(ContractError::InvalidPlayer(id)),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn player(self) -> Option<Player> {
        match self {
            Cell::Empty => None,
            Cell::PlayerOne => Some(Player::One),
            Cell::PlayerTwo => Some(Player::Two),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerOneWin,
    PlayerTwoWin,
    Draw,
}

impl GameState {
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::One => GameState::PlayerOneWin,
            Player::Two => GameState::PlayerTwoWin,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameState::PlayerOneWin => Some(Player::One),
            GameState::PlayerTwoWin => Some(Player::Two),
            _ => None,
        }
    }

    pub fn is_over(self) -> bool {
        self != GameState::Playing
    }
}

/// A Connect 4 position packed into a single word
///
/// Positions are plain values: copying one is the only way the search
/// branches, so nothing is ever undone.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Position {
    packed: u64,
    width: usize,
    height: usize,
}

impl Position {
    /// Creates an empty position, player one to move
    pub fn new(width: usize, height: usize) -> Result<Self, ContractError> {
        if !(1..=MAX_WIDTH).contains(&width) || !(1..=MAX_HEIGHT).contains(&height) {
            return Err(ContractError::InvalidDimensions { width, height });
        }
        Ok(Self {
            packed: 0,
            width,
            height,
        })
    }

    /// Builds a position from a string of 1-indexed column digits
    ///
    /// Players alternate starting with player one, and the side to move is
    /// left with whoever plays next.
    pub fn from_moves<S: AsRef<str>>(width: usize, height: usize, moves: S) -> Result<Self> {
        let mut position = Self::new(width, height)?;
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column) if (1..=width).contains(&column) => {
                    // abort if the position is won at any point
                    if position.evaluate_outcome().is_over() {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    if position.column_chip_count(column - 1) == height {
                        return Err(anyhow!("Invalid move, column {} full", column));
                    }
                    position.drop_in_column(column - 1, player)?;
                    player = player.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        position.set_side_to_move(player);
        Ok(position)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The packed word, for diagnostics only
    pub fn raw(&self) -> u64 {
        self.packed
    }

    /// A column cursor on the first column of this board
    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.width)
    }

    /// Number of chips in `column`, 0 for columns off the board
    pub fn column_chip_count(&self, column: usize) -> usize {
        if column >= self.width {
            return 0;
        }
        ((self.packed >> (HEIGHT_BITS * column)) & HEIGHT_FIELD_MASK) as usize
    }

    fn color_bit_index(column: usize, row: usize) -> usize {
        COLOR_OFFSET + column * MAX_HEIGHT + row
    }

    fn cell(&self, column: usize, row: usize) -> Cell {
        if row >= self.column_chip_count(column) {
            return Cell::Empty;
        }
        Player::from_bit(self.packed >> Self::color_bit_index(column, row)).into()
    }

    /// The colour of the addressed cell, `Empty` at or above the fill line
    pub fn color_at(&self, cursor: &Cursor) -> Cell {
        if cursor.column() >= self.width {
            return Cell::Empty;
        }
        self.cell(cursor.column(), cursor.row(self))
    }

    /// Whether the addressed slot is exactly the next one to fill in its column
    pub fn is_drop_ready(&self, cursor: &Cursor) -> bool {
        let column = cursor.column();
        if column >= self.width {
            return false;
        }
        let chip_count = self.column_chip_count(column);
        chip_count < self.height && cursor.row(self) == chip_count
    }

    /// Drops a chip of `player` into the addressed slot
    ///
    /// The slot must be drop ready; otherwise the position is left untouched
    /// and the violation is reported.
    pub fn drop_chip(&mut self, cursor: &Cursor, player: Player) -> Result<(), ContractError> {
        let column = cursor.column();
        if column >= self.width {
            let err = ContractError::ColumnOutOfRange {
                column,
                width: self.width,
            };
            warn!(%err, packed = self.packed, "rejected drop");
            return Err(err);
        }
        if !self.is_drop_ready(cursor) {
            let err = ContractError::SlotNotReady {
                column,
                row: cursor.row(self),
                height: self.column_chip_count(column),
            };
            warn!(%err, packed = self.packed, "rejected drop");
            return Err(err);
        }

        let row = self.column_chip_count(column);
        // cannot carry into the next field, the column is below MAX_HEIGHT
        self.packed += 1 << (HEIGHT_BITS * column);

        let color_bit = Self::color_bit_index(column, row);
        self.packed = (self.packed & !(1 << color_bit)) | (player.bit() << color_bit);
        Ok(())
    }

    /// Drops a chip of `player` onto the fill line of `column`
    pub fn drop_in_column(&mut self, column: usize, player: Player) -> Result<(), ContractError> {
        self.drop_chip(&Cursor::at_column(self.width, column), player)
    }

    pub fn set_side_to_move(&mut self, player: Player) {
        if self.side_to_move() != player {
            self.packed ^= 1 << SIDE_TO_MOVE_BIT;
        }
    }

    pub fn side_to_move(&self) -> Player {
        Player::from_bit(self.packed >> SIDE_TO_MOVE_BIT)
    }

    pub fn total_chip_count(&self) -> usize {
        (0..self.width).map(|column| self.column_chip_count(column)).sum()
    }

    pub fn is_full(&self) -> bool {
        self.total_chip_count() == self.width * self.height
    }

    /// Clears the board and hands the move back to player one
    pub fn reset(&mut self) {
        self.packed = 0;
    }

    /// A copy with every chip relabelled to the other player
    ///
    /// Column heights and the side to move are kept.
    pub fn with_colors_swapped(&self) -> Self {
        let mut occupied = 0u64;
        for column in 0..self.width {
            let chip_count = self.column_chip_count(column);
            occupied |= ((1 << chip_count) - 1) << Self::color_bit_index(column, 0);
        }
        Self {
            packed: self.packed ^ occupied,
            ..*self
        }
    }

    /// Scans every window of four in all four directions for a winner
    ///
    /// A reachable position has at most one winner, so the first run found is
    /// reported. Without a winner the game is drawn once the board is full.
    pub fn evaluate_outcome(&self) -> GameState {
        // decode once, windows overlap heavily
        let mut cells = [[Cell::Empty; MAX_HEIGHT]; MAX_WIDTH];
        for (column, column_cells) in cells.iter_mut().enumerate().take(self.width) {
            for (row, cell) in column_cells.iter_mut().enumerate().take(self.height) {
                *cell = self.cell(column, row);
            }
        }

        let span = WIN_LENGTH as isize - 1;
        for &(column_step, row_step) in DIRECTIONS.iter() {
            for column in 0..self.width as isize {
                for row in 0..self.height as isize {
                    let (end_column, end_row) = (column + column_step * span, row + row_step * span);
                    if end_column < 0
                        || end_column >= self.width as isize
                        || end_row < 0
                        || end_row >= self.height as isize
                    {
                        continue;
                    }

                    let first = cells[column as usize][row as usize];
                    let player = match first.player() {
                        Some(player) => player,
                        None => continue,
                    };
                    let aligned = (1..WIN_LENGTH as isize).all(|step| {
                        cells[(column + column_step * step) as usize]
                            [(row + row_step * step) as usize]
                            == first
                    });
                    if aligned {
                        return GameState::win_for(player);
                    }
                }
            }
        }

        if self.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self {
            packed: 0,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.height).rev() {
            for column in 0..self.width {
                let symbol = match self.cell(column, row) {
                    Cell::Empty => '.',
                    Cell::PlayerOne => 'X',
                    Cell::PlayerTwo => 'O',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
