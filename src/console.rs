//! Text console for playing a game in a terminal.
//!
//! The console reads moves as two 1-based numbers, `row col`, one move per
//! line. Bad input is reported and the player is asked again; the game state
//! is never touched until a move has been validated.
//!
//! ## Example session
//!
//! ```text
//!   1 2 3 4 5 6 7 8
//! 1 - - - - - - - -
//! ...
//! Your move (row col): 3 4
//! ```
//!
//! `Console` is generic over its input and output so tests can drive it with
//! in-memory buffers.

use std::io::{self, BufRead, Write};

use derive_more::{Display, Error, From};
use tracing::info;

use crate::board::{Board, LegalMove, Move, Outcome, Side};
use crate::constants::N;
use crate::game::{Game, GameError, Status};
use crate::selector::Selector;

/// Why a line of player input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum InputError {
    #[display("Invalid input. Please enter row and column numbers.")]
    Malformed,
    #[display("Invalid move. Please enter row and column numbers within the board range.")]
    OutOfRange,
    #[display("Invalid move. Please enter a valid move.")]
    Illegal,
}

/// Failure while running a console game.
#[derive(Debug, Display, Error, From)]
pub enum ConsoleError {
    #[display("console I/O failed: {_0}")]
    Io(io::Error),
    #[display("input closed before the game finished")]
    #[from(ignore)]
    InputClosed,
    #[display("{_0}")]
    Game(GameError),
}

/// Parse `row col` (1-based) into a board coordinate.
///
/// Reads two integers the way `scanf("%d%d")` does: leading whitespace is
/// skipped, each number is an optional sign followed by digits, and anything
/// after the second number is ignored. Numbers too large to represent are
/// reported as out of range.
pub fn parse_move(line: &str) -> Result<Move, InputError> {
    let (row, rest) = scan_int(line).ok_or(InputError::Malformed)?;
    let (col, _) = scan_int(rest).ok_or(InputError::Malformed)?;

    let range = 1..=N as i64;
    if !range.contains(&row) || !range.contains(&col) {
        return Err(InputError::OutOfRange);
    }
    Move::new((row - 1) as usize, (col - 1) as usize).ok_or(InputError::OutOfRange)
}

/// Scan one signed decimal integer off the front of `s`.
///
/// Returns the value (saturated to the `i64` range) and the unread rest.
fn scan_int(s: &str) -> Option<(i64, &str)> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let len = digits.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }

    let magnitude = digits[..len].bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    Some((value, &digits[len..]))
}

/// Parse a line and check it is a legal move for `side` on `board`.
pub fn read_move(board: &Board, side: Side, line: &str) -> Result<LegalMove, InputError> {
    let mv = parse_move(line)?;
    board.legal_move(mv, side).ok_or(InputError::Illegal)
}

/// Write the final score and winner.
pub fn write_result(out: &mut impl Write, outcome: Outcome) -> io::Result<()> {
    writeln!(out, "Game over!")?;
    writeln!(out, "Black: {}, White: {}", outcome.black, outcome.white)?;
    match outcome.winner() {
        Some(side) => writeln!(out, "{side} wins!"),
        None => writeln!(out, "It's a tie!"),
    }
}

/// Human-versus-computer game over a line-based text stream.
pub struct Console<R, W> {
    input: R,
    output: W,
    /// Side typed in by the player; `None` lets the computer play both.
    human: Option<Side>,
    selector: Selector,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// A console where the player takes Black.
    pub fn new(input: R, output: W, selector: Selector) -> Self {
        Self {
            input,
            output,
            human: Some(Side::Black),
            selector,
        }
    }

    /// Choose which side the player takes, or `None` for computer-only play.
    pub fn with_human(mut self, human: Option<Side>) -> Self {
        self.human = human;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Play a full game from the standard opening.
    pub fn run(&mut self) -> Result<Outcome, ConsoleError> {
        self.run_from(Game::new())
    }

    /// Play `game` to the end and return the final counts.
    pub fn run_from(&mut self, mut game: Game) -> Result<Outcome, ConsoleError> {
        info!(
            human = ?self.human,
            samples = self.selector.sample_count(),
            "game start"
        );
        write!(self.output, "{}", game.board())?;

        loop {
            match game.status() {
                Status::ToMove(side) if Some(side) == self.human => {
                    let legal = self.prompt_move(game.board(), side)?;
                    game.play(legal)?;
                }
                Status::MustPass(side) if Some(side) == self.human => {
                    writeln!(self.output, "{side} has no valid moves.")?;
                    game.pass()?;
                    continue;
                }
                Status::ToMove(side) | Status::MustPass(side) => {
                    match self.selector.choose(game.board(), side) {
                        Some(legal) => {
                            game.play(legal)?;
                            writeln!(self.output, "{side}'s move (row col): {}", legal.mv())?;
                        }
                        None => {
                            writeln!(self.output, "{side} has no valid moves.")?;
                            game.pass()?;
                            continue;
                        }
                    }
                }
                Status::Over(outcome) => {
                    info!(
                        black = outcome.black,
                        white = outcome.white,
                        moves = game.moves_played(),
                        passes = game.passes(),
                        "game over"
                    );
                    write_result(&mut self.output, outcome)?;
                    self.output.flush()?;
                    return Ok(outcome);
                }
            }

            let (black, white) = game.board().count_stones();
            write!(self.output, "{}", game.board())?;
            writeln!(self.output, "Black: {black}, White: {white}")?;
        }
    }

    /// Prompt until the player enters a legal move.
    fn prompt_move(&mut self, board: &Board, side: Side) -> Result<LegalMove, ConsoleError> {
        loop {
            write!(self.output, "Your move (row col): ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ConsoleError::InputClosed);
            }

            match read_move(board, side, &line) {
                Ok(legal) => return Ok(legal),
                Err(e) => writeln!(self.output, "{e}")?,
            }
        }
    }
}
