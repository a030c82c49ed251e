//! A single game session: the authoritative board plus whose turn it is.
//!
//! The session owns exactly one [`Board`]. The only way to change it is
//! [`Game::play`] with a [`LegalMove`] token, or [`Game::pass`] when the side
//! to move is blocked.
//!
//! Pass semantics follow standard Othello: a side with no legal move passes
//! and the opponent moves again. The game is over only when neither side can
//! move.

use derive_more::{Display, Error};
use tracing::info;

use crate::board::{Board, LegalMove, Outcome, Side};

/// What the side to move must do next.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// `side` has at least one legal move.
    ToMove(Side),
    /// `side` has no legal move but its opponent does.
    MustPass(Side),
    /// Neither side can move.
    Over(Outcome),
}

/// Rejected session actions.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum GameError {
    #[display("it is not {side}'s turn")]
    NotYourTurn { side: Side },
    #[display("move {} is not legal in the current position", mv.mv())]
    StaleMove { mv: LegalMove },
    #[display("{side} has a legal move and cannot pass")]
    NoPassAvailable { side: Side },
    #[display("game is already over")]
    GameOver,
}

/// A game in progress.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    to_move: Side,
    moves_played: usize,
    passes: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Start from the standard position with Black to move.
    pub fn new() -> Self {
        Self::from_position(Board::new(), Side::Black)
    }

    /// Resume from an arbitrary position.
    pub fn from_position(board: Board, to_move: Side) -> Self {
        Self {
            board,
            to_move,
            moves_played: 0,
            passes: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn moves_played(&self) -> usize {
        self.moves_played
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn status(&self) -> Status {
        let side = self.to_move;
        if self.board.has_any_legal_move(side) {
            Status::ToMove(side)
        } else if self.board.has_any_legal_move(side.opponent()) {
            Status::MustPass(side)
        } else {
            Status::Over(self.board.outcome())
        }
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status(), Status::Over(_))
    }

    /// Apply `legal` and hand the turn to the opponent.
    ///
    /// The token must be for the side to move and still legal on this board;
    /// tokens validated on another position are rejected.
    /// Returns the number of stones flipped.
    pub fn play(&mut self, legal: LegalMove) -> Result<usize, GameError> {
        if legal.side() != self.to_move {
            return Err(GameError::NotYourTurn { side: legal.side() });
        }
        if !self.board.is_legal_move(legal.mv(), legal.side()) {
            return Err(GameError::StaleMove { mv: legal });
        }

        let flipped = self.board.apply_move(legal);
        self.moves_played += 1;
        self.to_move = self.to_move.opponent();
        Ok(flipped)
    }

    /// Skip the turn of a blocked side.
    pub fn pass(&mut self) -> Result<(), GameError> {
        match self.status() {
            Status::MustPass(side) => {
                info!(%side, "pass");
                self.passes += 1;
                self.to_move = side.opponent();
                Ok(())
            }
            Status::ToMove(side) => Err(GameError::NoPassAvailable { side }),
            Status::Over(_) => Err(GameError::GameOver),
        }
    }
}
