//! Main CLI interface to the Arbiter engine.
//!
//! A small line-oriented shell: moves are entered in coordinate form
//! like "e2e4", with an optional trailing promotion letter like "e7e8q".
//! The shell looks the submission up among the legal moves of the
//! current position, so special-move flags are always the engine's own.

use std::io::{self, Write};

use arbiter_engine::coretypes::{Coordinate, Move, PieceKind};
use arbiter_engine::Game;

fn main() -> io::Result<()> {
    println!("Arbiter 0.1.0");
    println!("enter moves like e2e4 or e7e8q, or: moves, history, board, new, quit");

    let mut game = Game::new();
    println!("{}", game.board());

    loop {
        print!("{:?} to move> ", game.current_color());
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            break;
        }
        let input = input.trim();

        match input {
            "" => continue,
            "quit" | "exit" => break,
            "board" => println!("{}", game.board()),
            "new" => {
                game.start_game();
                println!("{}", game.board());
            }
            "moves" => {
                let color = game.current_color();
                let moves = game.legal_moves(color);
                let rendered: Vec<String> = moves.iter().map(Move::to_string).collect();
                println!("{} legal moves: {}", moves.len(), rendered.join(" "));
            }
            "history" => {
                let rendered: Vec<String> = game.history().iter().map(Move::to_string).collect();
                println!("{}", rendered.join(" "));
            }
            _ => match parse_submission(input) {
                Some((from, to, promotion)) => {
                    let color = game.current_color();
                    let found = game
                        .legal_moves(color)
                        .into_iter()
                        .find(|mv| mv.from() == from && mv.to() == to && mv.promotion() == promotion);
                    match found {
                        Some(mv) if game.make_move(mv) => {
                            println!("{}", game.board());
                            println!("{}", game.state());
                            if game.state().is_terminal() {
                                break;
                            }
                        }
                        _ => println!("illegal move: {input}"),
                    }
                }
                None => println!("{input} could not be parsed"),
            },
        }
    }

    Ok(())
}

/// Parse "e2e4" or "e7e8q" into source, destination and promotion kind.
fn parse_submission(input: &str) -> Option<(Coordinate, Coordinate, Option<PieceKind>)> {
    if input.len() != 4 && input.len() != 5 {
        return None;
    }
    let from: Coordinate = input.get(0..2)?.parse().ok()?;
    let to: Coordinate = input.get(2..4)?.parse().ok()?;
    let promotion = match input.get(4..5) {
        None | Some("") => None,
        Some("q") => Some(PieceKind::Queen),
        Some("r") => Some(PieceKind::Rook),
        Some("b") => Some(PieceKind::Bishop),
        Some("n") => Some(PieceKind::Knight),
        Some(_) => return None,
    };
    Some((from, to, promotion))
}
