use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use std::cmp::Ordering;
use std::io::{stdin, stdout, Stdin, Write};

use connect4_minimax::{GameState, Player, Position, Solver};

mod config;
use config::Config;

mod terminal_board;
use terminal_board::TerminalBoard;

fn main() -> Result<()> {
    let config = Config::parse();

    // logs go to stderr so they stay out of the drawn board
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .init();

    let position = Position::from_moves(config.width, config.height, &config.moves)?;
    let mut board = TerminalBoard::new(position, config.moves.clone());
    let ai_players = (config.ai_one, config.ai_two);

    let stdin = stdin();

    println!(
        "Welcome to Connect 4 ({}x{})\n",
        position.width(),
        position.height()
    );

    // game loop
    loop {
        board.display()?;

        match board.state {
            GameState::Playing => {
                let player = board.position().side_to_move();
                let next_move =
                    // AI player
                    if (player == Player::One && ai_players.0) || (player == Player::Two && ai_players.1) {
                        // slow down play if both players are AI
                        if ai_players == (true, true) {
                            std::thread::sleep(std::time::Duration::new(1, 0));
                        }

                        let spinner = ProgressBar::new_spinner();
                        spinner.set_style(ProgressStyle::default_spinner().template("{spinner} {msg}"));
                        spinner.set_message("AI is thinking...");
                        spinner.enable_steady_tick(100);

                        let mut solver = Solver::new(*board.position());
                        let analysis = if config.analyse {
                            Some(solver.analyse()?)
                        } else {
                            None
                        };
                        let (best_move, score) = solver.best_move()?;
                        spinner.finish_and_clear();

                        if let Some(analysis) = analysis {
                            let scores: Vec<String> = analysis
                                .iter()
                                .enumerate()
                                .map(|(column, score)| match score {
                                    Some(score) => format!("{}: {:+}", column + 1, score),
                                    None => format!("{}: full", column + 1),
                                })
                                .collect();
                            println!("Column scores: {}", scores.join(", "));
                        }

                        let mover = solver.side_to_move();
                        match score.cmp(&0) {
                            Ordering::Greater => {
                                println!("Player {} can force a win.", mover.id());
                            }
                            Ordering::Less => {
                                println!("Player {} can force a win.", mover.other().id());
                            }
                            Ordering::Equal => {
                                println!("Player {} can at best force a draw.", mover.id());
                            }
                        }

                        println!("Best move: {} ({} positions searched)", best_move + 1, solver.node_count);
                        best_move + 1

                    // human player
                    } else {
                        print!("Player {} move input > ", player.id());
                        stdout().flush()?;
                        let mut input_str = String::new();
                        // end of input
                        if stdin.read_line(&mut input_str)? == 0 {
                            break;
                        }

                        match input_str.trim().parse::<usize>() {
                            Err(_) => {
                                println!("Invalid number: {}", input_str.trim());
                                continue;
                            }
                            Ok(column) => column,
                        }
                    };

                if let Err(err) = board.play_checked(next_move) {
                    println!("{}", err);
                    // try the move again
                    continue;
                }
            }

            // end states
            state => {
                match state.winner() {
                    Some(winner) => println!("Player {} wins!", winner.id()),
                    None => println!("Draw!"),
                }
                if !play_again(&stdin)? {
                    break;
                }
                board.reset();
            }
        }
    }
    Ok(())
}

// end of input counts as a no
fn play_again(stdin: &Stdin) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("Play again? y/n: ");
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}
