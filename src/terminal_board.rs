use anyhow::{anyhow, Result};
use crossterm::{
    cursor::MoveTo,
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};
use tracing::info;

use std::io::{stdout, Write};

use connect4_minimax::{Cell, Cursor, GameState, Position};

/// Controller-side wrapper around a `Position`
///
/// Validates moves coming from the terminal before they reach the core, and
/// draws the board.
pub struct TerminalBoard {
    position: Position,
    pub game: String,
    pub state: GameState,
}

impl TerminalBoard {
    pub fn new(position: Position, game: String) -> Self {
        let state = position.evaluate_outcome();
        Self {
            position,
            game,
            state,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    /// Starts a new game on an empty board of the same size
    pub fn reset(&mut self) {
        self.position.reset();
        self.game.clear();
        self.state = self.position.evaluate_outcome();
        info!("new game");
    }

    pub fn play_checked(&mut self, column_one_indexed: usize) -> Result<GameState> {
        let width = self.position.width();
        if column_one_indexed < 1 || column_one_indexed > width {
            return Err(anyhow!(
                "Invalid move, column {} out of range. Columns must be between 1 and {}",
                column_one_indexed,
                width
            ));
        }
        let column = column_one_indexed - 1;
        if self.position.column_chip_count(column) == self.position.height() {
            return Err(anyhow!("Invalid move, column {} full", column_one_indexed));
        }

        let player = self.position.side_to_move();
        self.position.drop_in_column(column, player)?;
        self.position.set_side_to_move(player.other());
        self.game.push_str(&column_one_indexed.to_string());
        self.state = self.position.evaluate_outcome();
        info!(game = %self.game, packed = self.position.raw(), state = ?self.state, "move played");

        Ok(self.state)
    }

    pub fn display(&self) -> Result<()> {
        let mut stdout = stdout();
        let (width, height) = (self.position.width(), self.position.height());

        let cols: String = (1..=width).map(|x| x.to_string()).collect();
        stdout.queue(PrintStyledContent(style(cols + "\n")))?;
        for _ in 0..height {
            stdout.queue(PrintStyledContent(style("\n")))?;
        }
        stdout.flush()?;

        let (origin_x, origin_y) = crossterm::cursor::position()?;

        for row in 0..height {
            for column in 0..width {
                let cell = self
                    .position
                    .color_at(&Cursor::at_cell(width, column, row));
                let (pos_x, pos_y) = (origin_x + column as u16, origin_y - row as u16);

                stdout
                    .queue(MoveTo(pos_x, pos_y))?
                    .queue(PrintStyledContent(
                        style("O")
                            .attribute(Attribute::Bold)
                            .on(Color::DarkBlue)
                            .with(match cell {
                                Cell::PlayerOne => Color::Red,
                                Cell::PlayerTwo => Color::Yellow,
                                Cell::Empty => Color::DarkBlue,
                            }),
                    ))?;
            }
        }
        stdout
            .queue(MoveTo(origin_x + width as u16, origin_y))?
            .queue(PrintStyledContent(style("\n")))?;
        stdout.flush()?;
        Ok(())
    }
}
