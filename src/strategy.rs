//! An exhaustive negamax agent for small Connect 4 boards

use rayon::prelude::*;
use tracing::{debug, trace};

use std::time::Instant;

use crate::{
    cursor::Cursor,
    error::ContractError,
    position::{GameState, Position},
};

/// Score of a move that forces a win for the mover
pub const WIN_SCORE: i32 = 1;
/// Score of a move that leads to a draw with best play
pub const DRAW_SCORE: i32 = 0;
/// Score of a move that loses against best play
pub const LOSS_SCORE: i32 = -1;

// best move/score pair of a single invocation, never reused across calls
struct SearchInfo {
    best: Option<(usize, i32)>,
}

impl SearchInfo {
    fn new() -> Self {
        Self { best: None }
    }

    // strict improvement, so ties keep the lowest column
    fn offer(&mut self, column: usize, score: i32) {
        match self.best {
            Some((_, best_score)) if score <= best_score => {}
            _ => self.best = Some((column, score)),
        }
    }
}

/// An agent that searches every line of play to the end of the game
///
/// # Notes
/// There is no pruning, depth limit or transposition table: each call is a
/// pure function of the position, which keeps the column choice
/// deterministic. Columns are tried left to right, the first strictly better
/// score wins ties, and a proven win stops the scan.
///
/// # Position Scoring
/// Scores are from the point of view of the side to move: `1` for a forced
/// win, `0` for a draw with best play and `-1` for a forced loss.
#[derive(Clone)]
pub struct Solver {
    position: Position,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` for a position
    pub fn new(position: Position) -> Self {
        Self {
            position,
            node_count: 0,
        }
    }

    /// Finds the best column for the side to move and its score
    ///
    /// The position must not be terminal.
    pub fn best_move(&mut self) -> Result<(usize, i32), ContractError> {
        self.check_searchable()?;

        let start = Instant::now();
        let position = self.position;
        let (column, score) = self.negamax(&position)?;
        debug!(
            column,
            score,
            nodes = self.node_count,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "search finished"
        );
        Ok((column, score))
    }

    /// Scores every column of the position, `None` for full columns
    ///
    /// The root children are searched in parallel; each one runs the same
    /// exhaustive search as [`Solver::best_move`], so the scores agree with it.
    pub fn analyse(&self) -> Result<Vec<Option<i32>>, ContractError> {
        self.check_searchable()?;

        let position = self.position;
        (0..position.width())
            .into_par_iter()
            .map(|column| -> Result<Option<i32>, ContractError> {
                let cursor = Cursor::at_column(position.width(), column);
                if !position.is_drop_ready(&cursor) {
                    return Ok(None);
                }
                let mut solver = Solver::new(position);
                let score = solver.score_drop(&position, &cursor)?;
                trace!(column, score, nodes = solver.node_count, "column analysed");
                Ok(Some(score))
            })
            .collect()
    }

    fn check_searchable(&self) -> Result<(), ContractError> {
        let state = self.position.evaluate_outcome();
        if state.is_over() {
            return Err(ContractError::TerminalPosition(state));
        }
        Ok(())
    }

    /// Performs game tree search
    ///
    /// Returns the best column and its score for the side to move
    fn negamax(&mut self, position: &Position) -> Result<(usize, i32), ContractError> {
        self.node_count += 1;

        let mut info = SearchInfo::new();
        let mut cursor = position.cursor();
        while cursor.in_bounds() {
            if position.is_drop_ready(&cursor) {
                let score = self.score_drop(position, &cursor)?;
                // nothing beats a proven win
                if score == WIN_SCORE {
                    return Ok((cursor.column(), score));
                }
                info.offer(cursor.column(), score);
            }
            cursor.advance();
        }

        info.best.ok_or(ContractError::NoLegalMove)
    }

    /// Plays the side to move into the addressed column and scores the result
    fn score_drop(&mut self, position: &Position, cursor: &Cursor) -> Result<i32, ContractError> {
        let player = position.side_to_move();

        let mut next = *position;
        next.drop_chip(cursor, player)?;

        let score = match next.evaluate_outcome() {
            GameState::Playing => {
                next.set_side_to_move(player.other());
                // the child's score is from the opponent's point of view
                let (_, child_score) = self.negamax(&next)?;
                -child_score
            }
            GameState::Draw => DRAW_SCORE,
            state if state.winner() == Some(player) => WIN_SCORE,
            // a single drop cannot complete an opponent line
            _ => LOSS_SCORE,
        };
        Ok(score)
    }
}

impl std::ops::Deref for Solver {
    type Target = Position;

    fn deref(&self) -> &Self::Target {
        &self.position
    }
}

/// Finds the best column and its score for the side to move in `position`
pub fn best_move(position: &Position) -> Result<(usize, i32), ContractError> {
    Solver::new(*position).best_move()
}
