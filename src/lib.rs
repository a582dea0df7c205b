//! A minimax agent for playing Connect 4 on small boards
//!
//! Positions are packed into a single word and searched exhaustively, every
//! line of play followed to the end of the game without pruning.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{position::Position, strategy::Solver};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! // three in a row along the bottom for player one, who is to move
//! let position = Position::from_moves(4, 4, "112233")?;
//! let mut solver = Solver::new(position);
//! let (_column, score) = solver.best_move()?;
//!
//! assert_eq!(score, 1);
//!# Ok(())
//!# }
//! ```

pub use anyhow;

pub mod error;

pub mod cursor;

pub mod position;

pub mod strategy;


pub use cursor::Cursor;
pub use error::ContractError;
pub use position::{Cell, GameState, Player, Position};
pub use strategy::Solver;
