//! Othello-Rust: an Othello engine with a random-sampling computer opponent.
//!
//! The computer picks its moves by sampling random legal moves, scoring each
//! by the stone differential right after it is played, and keeping the best
//! accumulated score. It is deliberately shallow: one ply, no tree search.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and selector parameters
//! - [`board`] - Board state, legality, flipping and counting
//! - [`selector`] - Random one-ply move selection
//! - [`game`] - Turn order, passes and game end
//! - [`console`] - Text rendering and move input for terminal play
//!
//! ## Example
//!
//! ```
//! use othello_rust::board::{Board, Move, Side};
//! use othello_rust::selector::Selector;
//!
//! let mut board = Board::new();
//!
//! // Black opens on row 3, column 4 (1-based)
//! let legal = board.legal_move(Move::new(2, 3).unwrap(), Side::Black).unwrap();
//! board.apply_move(legal);
//! assert_eq!(board.count_stones(), (4, 1));
//!
//! // Let the computer answer for White
//! let mut selector = Selector::with_seed(100, 7);
//! let reply = selector.choose(&board, Side::White).unwrap();
//! board.apply_move(reply);
//! println!("{board}");
//! ```

pub mod board;
pub mod console;
pub mod constants;
pub mod game;
pub mod selector;
