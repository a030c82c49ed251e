//! Move selection for the computer side.
//!
//! Each trial draws a random cell until it hits a legal move, plays it on a
//! copy of the board and records the resulting stone differential for that
//! cell. The move with the highest accumulated score wins. This is a
//! one-ply evaluation, not a search: nothing beyond the immediate position
//! after the move is considered.
//!
//! Random draws are capped at [`MAX_DRAW_ATTEMPTS`] per trial. Past the cap
//! the trial picks uniformly from the full legal-move list instead, so a
//! board with very few legal moves cannot stall the loop.

use tracing::{debug, trace};

use crate::board::{Board, LegalMove, Move, Side};
use crate::constants::{CELLS, MAX_DRAW_ATTEMPTS, N, N_SIMS};

/// Per-cell accumulated sample scores for one selection.
#[derive(Clone, Debug, PartialEq, Eq)]
struct ScoreGrid {
    scores: [[i64; N]; N],
}

impl ScoreGrid {
    fn new() -> Self {
        Self {
            scores: [[0; N]; N],
        }
    }

    #[inline]
    fn get(&self, mv: Move) -> i64 {
        self.scores[mv.row()][mv.col()]
    }

    #[inline]
    fn add(&mut self, mv: Move, score: i64) {
        let cell = &mut self.scores[mv.row()][mv.col()];
        *cell = cell.saturating_add(score);
    }
}

/// Choose a move for `side` by random one-ply sampling.
///
/// Returns `None` when `side` has no legal move; the caller should pass.
/// `board` is never modified.
pub fn select_move(
    board: &Board,
    side: Side,
    sample_count: usize,
    rng: &mut fastrand::Rng,
) -> Option<LegalMove> {
    if !board.has_any_legal_move(side) {
        debug!(%side, "no legal move to select");
        return None;
    }

    let scores = sample_scores(board, side, sample_count, rng);
    let best = best_move(board, side, &scores);
    if let Some(legal) = best {
        debug!(
            %side,
            samples = sample_count,
            mv = %legal.mv(),
            score = scores.get(legal.mv()),
            "selected move"
        );
    }
    best
}

/// Run `sample_count` trials and accumulate their scores.
fn sample_scores(board: &Board, side: Side, sample_count: usize, rng: &mut fastrand::Rng) -> ScoreGrid {
    let mut scores = ScoreGrid::new();
    for trial in 0..sample_count {
        let Some(legal) = draw_legal_move(board, side, rng) else {
            break;
        };

        let mut scratch = *board;
        scratch.apply_move(legal);
        let score = i64::from(scratch.differential(side));

        trace!(trial, mv = %legal.mv(), score, "sample");
        scores.add(legal.mv(), score);
    }
    scores
}

/// Draw uniformly random cells until one is legal for `side`.
fn draw_legal_move(board: &Board, side: Side, rng: &mut fastrand::Rng) -> Option<LegalMove> {
    draw_legal_move_capped(board, side, rng, MAX_DRAW_ATTEMPTS)
}

/// Like [`draw_legal_move`] with an explicit cap on random draws.
///
/// Falls back to a uniform pick over all legal moves once `cap` draws have
/// missed. Returns `None` only if `side` has no legal move at all.
fn draw_legal_move_capped(
    board: &Board,
    side: Side,
    rng: &mut fastrand::Rng,
    cap: usize,
) -> Option<LegalMove> {
    for _ in 0..cap {
        let drawn = Move::from_index(rng.usize(..CELLS)).and_then(|mv| board.legal_move(mv, side));
        if drawn.is_some() {
            return drawn;
        }
    }

    let moves = board.legal_moves(side);
    debug!(%side, candidates = moves.len(), "draw cap reached, picking from legal moves");
    if moves.is_empty() {
        return None;
    }
    Some(moves[rng.usize(..moves.len())])
}

/// The legal move with the strictly greatest score, first in row-major order
/// on ties. Legal cells that were never sampled compete with a score of 0.
fn best_move(board: &Board, side: Side, scores: &ScoreGrid) -> Option<LegalMove> {
    let mut best: Option<(LegalMove, i64)> = None;
    for legal in board.legal_moves(side) {
        let score = scores.get(legal.mv());
        if best.is_none_or(|(_, top)| score > top) {
            best = Some((legal, score));
        }
    }
    best.map(|(legal, _)| legal)
}

/// Computer player: a sample count plus its own random source.
pub struct Selector {
    rng: fastrand::Rng,
    sample_count: usize,
}

impl Default for Selector {
    fn default() -> Self {
        Self::new(N_SIMS)
    }
}

impl Selector {
    /// Create a selector seeded from the system.
    pub fn new(sample_count: usize) -> Self {
        Self {
            rng: fastrand::Rng::new(),
            sample_count,
        }
    }

    /// Create a selector with a fixed seed, for reproducible games.
    pub fn with_seed(sample_count: usize, seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
            sample_count,
        }
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// Pick a move for `side` on `board`, or `None` to pass.
    pub fn choose(&mut self, board: &Board, side: Side) -> Option<LegalMove> {
        select_move(board, side, self.sample_count, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn mv(row: usize, col: usize) -> Move {
        Move::new(row, col).unwrap()
    }

    /// Black has exactly two moves: (0,7) flips six, (7,2) flips one and
    /// leaves Black behind.
    fn lopsided_board() -> Board {
        Board::from_rows(&[
            "XOOOOOO.", "........", "........", "........", "........", "........",
            "........", "XO......",
        ])
        .unwrap()
    }

    #[test]
    fn test_lopsided_board_has_two_moves() {
        let moves: Vec<Move> = lopsided_board()
            .legal_moves(Side::Black)
            .into_iter()
            .map(LegalMove::mv)
            .collect();
        assert_eq!(moves, vec![mv(0, 7), mv(7, 2)]);
    }

    #[test]
    fn test_no_move_returns_none() {
        let board = Board::from_rows(&[
            "XXXX....", "........", "........", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();
        let mut rng = fastrand::Rng::with_seed(7);
        assert_eq!(select_move(&board, Side::Black, 10, &mut rng), None);
        assert_eq!(select_move(&board, Side::White, 10, &mut rng), None);
    }

    #[test]
    fn test_selection_is_always_legal() {
        let mut board = Board::new();
        let mut side = Side::Black;
        let mut rng = fastrand::Rng::with_seed(42);
        while !board.is_terminal() {
            for samples in [0, 1, 5] {
                if let Some(legal) = select_move(&board, side, samples, &mut rng) {
                    assert!(board.is_legal_move(legal.mv(), side));
                    assert_eq!(legal.side(), side);
                }
            }
            if let Some(legal) = select_move(&board, side, 3, &mut rng) {
                board.apply_move(legal);
            }
            side = side.opponent();
        }
    }

    #[test]
    fn test_selection_does_not_touch_board() {
        let board = lopsided_board();
        let before = board;
        let mut rng = fastrand::Rng::with_seed(1);
        select_move(&board, Side::Black, 50, &mut rng);
        assert_eq!(board, before);
    }

    #[test]
    fn test_prefers_higher_differential() {
        let board = lopsided_board();
        for seed in 0..50 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let legal = select_move(&board, Side::Black, 4, &mut rng).unwrap();
            assert_eq!(legal.mv(), mv(0, 7), "seed {seed}");
        }
    }

    #[test]
    fn test_zero_samples_picks_first_legal() {
        let mut rng = fastrand::Rng::with_seed(3);
        let legal = select_move(&Board::new(), Side::Black, 0, &mut rng).unwrap();
        assert_eq!(legal.mv(), mv(2, 3));
    }

    #[test]
    fn test_single_move_accumulates() {
        // Only (0,2) is legal for Black: one flip, leaving Black 3 White 0.
        let board = Board::from_rows(&[
            "XO......", "........", "........", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();
        let mut rng = fastrand::Rng::with_seed(11);
        let scores = sample_scores(&board, Side::Black, 5, &mut rng);
        assert_eq!(scores.get(mv(0, 2)), 5 * 3);
        let total: i64 = Move::all().map(|m| scores.get(m)).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn test_best_move_ignores_illegal_cells() {
        let board = Board::new();
        let mut scores = ScoreGrid::new();
        scores.add(mv(0, 0), 100);
        scores.add(mv(4, 5), 2);
        let best = best_move(&board, Side::Black, &scores).unwrap();
        assert_eq!(best.mv(), mv(4, 5));
    }

    #[test]
    fn test_best_move_unsampled_beats_negative() {
        let board = Board::new();
        let mut scores = ScoreGrid::new();
        scores.add(mv(2, 3), -4);
        let best = best_move(&board, Side::Black, &scores).unwrap();
        assert_eq!(best.mv(), mv(3, 2));
    }

    #[test]
    fn test_best_move_ties_go_row_major() {
        let board = Board::new();
        let mut scores = ScoreGrid::new();
        scores.add(mv(3, 2), 6);
        scores.add(mv(5, 4), 6);
        let best = best_move(&board, Side::Black, &scores).unwrap();
        assert_eq!(best.mv(), mv(3, 2));
    }

    #[test]
    fn test_draw_on_sparse_board_terminates() {
        // One legal cell out of 64.
        let board = Board::from_rows(&[
            "XO......", "........", "........", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();
        for seed in 0..20 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let legal = draw_legal_move(&board, Side::Black, &mut rng).unwrap();
            assert_eq!(legal.mv(), mv(0, 2));
        }
    }

    #[test]
    fn test_fallback_with_no_draws_is_legal() {
        let board = Board::from_rows(&[
            "XO......", "........", "........", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();
        for seed in 0..10 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let legal = draw_legal_move_capped(&board, Side::Black, &mut rng, 0).unwrap();
            assert_eq!(legal.mv(), mv(0, 2));
        }
    }

    #[test]
    fn test_fallback_picks_across_legal_moves() {
        let board = Board::new();
        let mut picked = HashSet::new();
        for seed in 0..64 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let legal = draw_legal_move_capped(&board, Side::Black, &mut rng, 0).unwrap();
            assert!(board.is_legal_move(legal.mv(), Side::Black));
            picked.insert(legal.mv());
        }
        // Not stuck on the first move in row order.
        assert!(picked.len() > 1, "fallback always picked {picked:?}");
    }

    #[test]
    fn test_fallback_with_no_legal_move() {
        let board = Board::from_rows(&[
            "XXXX....", "........", "........", "........", "........", "........",
            "........", "........",
        ])
        .unwrap();
        let mut rng = fastrand::Rng::with_seed(2);
        assert_eq!(draw_legal_move_capped(&board, Side::Black, &mut rng, 0), None);
    }

    #[test]
    fn test_score_grid_saturates() {
        let mut scores = ScoreGrid::new();
        scores.add(mv(0, 0), i64::MAX - 1);
        scores.add(mv(0, 0), 64);
        assert_eq!(scores.get(mv(0, 0)), i64::MAX);
    }

    #[test]
    fn test_seeded_selector_is_reproducible() {
        let board = Board::new();
        let mut a = Selector::with_seed(8, 99);
        let mut b = Selector::with_seed(8, 99);
        for _ in 0..10 {
            assert_eq!(a.choose(&board, Side::White), b.choose(&board, Side::White));
        }
        assert_eq!(a.sample_count(), 8);
    }
}
