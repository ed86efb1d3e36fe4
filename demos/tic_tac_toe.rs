//! Tic-tac-toe driven by the search engine.
//!
//! By default the engine plays both sides to the inevitable draw, printing
//! each position. Pass `--interactive` to take the X side yourself, entering
//! moves as `row col` (1-based).
//!
//! Run with `RUST_LOG=debug` to watch the search think.

use std::io;

use gamesearch::prelude::*;
use thiserror::Error;

const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    X,
    O,
}

impl Mark {
    fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    fn glyph(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

#[derive(Clone, Debug)]
struct Board {
    cells: [Option<Mark>; 9],
    to_move: Mark,
}

impl Board {
    fn empty() -> Self {
        Self {
            cells: [None; 9],
            to_move: Mark::X,
        }
    }

    fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            if line.iter().all(|&cell| self.cells[cell] == Some(first)) {
                Some(first)
            } else {
                None
            }
        })
    }

    fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    fn to_ascii(&self) -> String {
        let mut out = String::new();
        for row in 0..3 {
            for col in 0..3 {
                out.push(match self.cells[row * 3 + col] {
                    Some(mark) => mark.glyph(),
                    None => '.',
                });
                if col < 2 {
                    out.push(' ');
                }
            }
            out.push('\n');
        }
        out
    }
}

impl GameState for Board {
    type Action = usize;
    type Eval = i32;

    fn has_moves(&self) -> bool {
        self.winner().is_none() && !self.is_full()
    }

    fn score(&self) -> Score<i32> {
        match self.winner() {
            // A completed line always belongs to the previous mover, so it
            // reads as a loss for the player to move.
            Some(_) => Score::Regular(-1),
            None => Score::Regular(0),
        }
    }

    fn sorted_actions(&self) -> Vec<usize> {
        (0..9).filter(|&cell| self.cells[cell].is_none()).collect()
    }

    fn create_child(&self, action: &usize) -> Self {
        let mut child = self.clone();
        child.cells[*action] = Some(self.to_move);
        child.to_move = self.to_move.other();
        child
    }
}

#[derive(Error, Debug)]
enum ParseMoveError {
    #[error("expected `row col`, both 1-3")]
    Malformed,
    #[error("row and column must be between 1 and 3")]
    OutOfRange,
    #[error("that square is already occupied")]
    Occupied,
}

fn parse_move(input: &str, board: &Board) -> Result<usize, ParseMoveError> {
    let mut parts = input.split_whitespace();
    let row: usize = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or(ParseMoveError::Malformed)?;
    let col: usize = parts
        .next()
        .and_then(|part| part.parse().ok())
        .ok_or(ParseMoveError::Malformed)?;
    if parts.next().is_some() {
        return Err(ParseMoveError::Malformed);
    }

    if !(1..=3).contains(&row) || !(1..=3).contains(&col) {
        return Err(ParseMoveError::OutOfRange);
    }

    let cell = (row - 1) * 3 + (col - 1);
    if board.cells[cell].is_some() {
        return Err(ParseMoveError::Occupied);
    }
    Ok(cell)
}

fn announce(board: &Board) {
    match board.winner() {
        Some(mark) => println!("{} wins", mark.glyph()),
        None => println!("draw"),
    }
}

fn self_play() {
    let mut board = Board::empty();
    let mut context = SearchContext::unbounded();

    println!("{}", board.to_ascii());
    while board.has_moves() {
        let result = best_action(&mut context, &board);
        let action = result.action.expect("non-terminal position has a move");
        println!(
            "{} plays {} {} ({} positions searched)",
            board.to_move.glyph(),
            action / 3 + 1,
            action % 3 + 1,
            context.searched_position_count()
        );
        context.reset_stats();
        board = board.create_child(&action);
        println!("{}", board.to_ascii());
    }
    announce(&board);
}

fn play_human() {
    let mut board = Board::empty();
    let mut context = SearchContext::unbounded();

    println!("you are X; enter moves as `row col`");
    println!("{}", board.to_ascii());

    while board.has_moves() {
        let action = if board.to_move == Mark::X {
            let mut input = String::new();
            match io::stdin().read_line(&mut input) {
                Ok(0) => return,
                Ok(_) => (),
                Err(error) => {
                    println!("error: {}", error);
                    continue;
                }
            }
            match parse_move(input.trim(), &board) {
                Ok(cell) => cell,
                Err(error) => {
                    println!("bad move: {}", error);
                    continue;
                }
            }
        } else {
            let result = best_action(&mut context, &board);
            context.reset_stats();
            result.action.expect("non-terminal position has a move")
        };

        board = board.create_child(&action);
        println!("{}", board.to_ascii());
    }
    announce(&board);
}

fn main() {
    env_logger::init();

    if std::env::args().any(|arg| arg == "--interactive") {
        play_human();
    } else {
        self_play();
    }
}
