//! Constants for board geometry, state planes, and session defaults.
//!
//! The board size is chosen per session at runtime, so nothing here depends
//! on a particular N. The plane indices describe the layout produced by
//! [`BoardState::planes`](crate::board::BoardState::planes).

// =============================================================================
// Board Geometry
// =============================================================================

/// Smallest accepted board size.
pub const MIN_BOARD_SIZE: usize = 1;

/// Largest accepted board size. GTP vertex letters run out past 25 columns.
pub const MAX_BOARD_SIZE: usize = 25;

/// Column letters used for GTP-style vertices ('I' is skipped).
pub const COLUMN_LETTERS: &[u8; MAX_BOARD_SIZE] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

// =============================================================================
// State Planes
// =============================================================================

/// Black stones.
pub const BLACK_PLANE: usize = 0;

/// White stones.
pub const WHITE_PLANE: usize = 1;

/// Side to move, broadcast over the grid (0 = black, 1 = white).
pub const TURN_PLANE: usize = 2;

/// Cells where the side to move may not play.
pub const INVALID_PLANE: usize = 3;

/// Broadcast flag set when the previous move was a pass.
pub const PASS_PLANE: usize = 4;

/// Number of planes in the external representation.
pub const NUM_PLANES: usize = 5;

// =============================================================================
// Session Defaults
// =============================================================================

/// Default board size (the size the training setups use).
pub const DEFAULT_BOARD_SIZE: usize = 7;

/// Default komi. Zero keeps empty-board games an exact tie.
pub const DEFAULT_KOMI: f32 = 0.0;

/// Consecutive passes that end the game.
pub const PASSES_TO_END: u32 = 2;
