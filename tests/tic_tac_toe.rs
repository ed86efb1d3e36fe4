//! End-to-end tests on a real (if small) game: tic-tac-toe.
//!
//! The whole game tree is searchable, so the engine plays perfectly here:
//! it must find immediate wins, block immediate threats, and self-play to
//! a draw from the opening position.

use std::time::Duration;

use gamesearch::prelude::*;

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

    /// A position from marks already placed; `to_move` derived from parity.
    fn with_marks(xs: &[usize], os: &[usize]) -> Self {
        let mut board = Board::empty();
        for &cell in xs {
            board.cells[cell] = Some(Mark::X);
        }
        for &cell in os {
            board.cells[cell] = Some(Mark::O);
        }
        board.to_move = if xs.len() > os.len() { Mark::O } else { Mark::X };
        board
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
}

impl GameState for Board {
    type Action = usize;
    type Eval = i32;

    fn has_moves(&self) -> bool {
        self.winner().is_none() && !self.is_full()
    }

    fn score(&self) -> Score<i32> {
        match self.winner() {
            // Only the previous mover can have completed a line, so a win on
            // the board is always a loss for the player to move.
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

#[test]
fn finds_immediate_win() {
    // X on 0 and 1, the win on 2 is open.
    let board = Board::with_marks(&[0, 1], &[3, 4]);
    assert_eq!(board.to_move, Mark::X);

    let mut context = SearchContext::unbounded();
    let result = best_action(&mut context, &board);

    assert_eq!(result.action, Some(2));
    assert_eq!(result.score, Score::Regular(1));
}

#[test]
fn blocks_immediate_threat() {
    // X threatens 0-1-2; O holds only the center and must block on 2.
    let board = Board::with_marks(&[0, 1], &[4]);
    assert_eq!(board.to_move, Mark::O);

    let mut context = SearchContext::unbounded();
    let result = best_action(&mut context, &board);

    assert_eq!(result.action, Some(2));
    // With the center already held, blocking salvages the draw.
    assert_eq!(result.score, Score::Regular(0));
}

#[test]
fn opening_position_is_a_draw() {
    let mut context = SearchContext::unbounded();
    let result = best_action(&mut context, &Board::empty());
    assert_eq!(result.score, Score::Regular(0));
    assert!(result.action.is_some());
}

#[test]
fn self_play_ends_in_draw() {
    let mut board = Board::empty();
    let mut context = SearchContext::unbounded();

    while board.has_moves() {
        let result = best_action(&mut context, &board);
        let action = result.action.expect("non-terminal position has a move");
        board = board.create_child(&action);
    }

    assert_eq!(board.winner(), None, "perfect self-play may not produce a winner");
    assert!(board.is_full());
}

#[test]
fn resumable_agrees_with_synchronous() {
    // Five empties: small enough to pause at every leaf and still finish
    // quickly.
    let board = Board::with_marks(&[0, 4], &[8, 2]);

    let mut context = SearchContext::unbounded();
    let sync = best_action(&mut context, &board);

    let mut response = begin(Request::unbounded(board).with_budget(Duration::from_secs(0)));
    let resolved = loop {
        match response {
            Response::Resolved(result) => break result,
            Response::Paused(paused) => {
                assert!(paused.fraction_completed() < 1.0);
                response = resume(paused);
            }
        }
    };

    assert_eq!(resolved.action, sync.action);
    assert_eq!(resolved.score, sync.score);
}
