//! Constants for board geometry, move selection and rendering.
//!
//! The board is always 8x8. Cells are addressed by zero-based `(row, col)`;
//! the console converts to and from the 1-based numbers a player types.

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). Othello is played on 8x8 only.
pub const N: usize = 8;

/// Total number of cells.
pub const CELLS: usize = N * N;

/// The eight unit directions as `(delta_row, delta_col)`.
/// Order: North, NE, East, SE, South, SW, West, NW
pub const DIRECTIONS: [(isize, isize); 8] = [
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
];

// =============================================================================
// Move Selection Parameters
// =============================================================================

/// Default number of sampling trials per computer move.
pub const N_SIMS: usize = 1;

/// Random draws allowed per trial before falling back to a legal-move scan.
pub const MAX_DRAW_ATTEMPTS: usize = 4 * CELLS;

// =============================================================================
// Rendering
// =============================================================================

/// Glyph for a black stone.
pub const GLYPH_BLACK: char = '●';

/// Glyph for a white stone.
pub const GLYPH_WHITE: char = '○';

/// Glyph for an empty cell.
pub const GLYPH_EMPTY: char = '-';
