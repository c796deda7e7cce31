//! gogame: a Go rules engine for learning environments.
//!
//! This crate keeps the state of a Go game, enforces legality (occupancy,
//! suicide, ko), resolves captures, and scores finished games with area
//! scoring. It is meant to sit underneath an environment adapter that
//! drives it one action at a time.
//!
//! ## Modules
//!
//! - [`constants`] - Plane layout, board limits and defaults
//! - [`board`] - Board snapshot, masks and the plane representation
//! - [`group`] - Connected groups and liberties (single and batched)
//! - [`legality`] - Invalid-move mask for the side to move
//! - [`capture`] - Stone placement and capture resolution
//! - [`scoring`] - Area scoring and reward policies
//! - [`game`] - Sessions: the move/pass/termination state machine
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```
//! use gogame::game::{new_session, Action};
//! use gogame::scoring::RewardPolicy;
//!
//! let mut session = new_session(7, 0.0, RewardPolicy::Real).unwrap();
//! let step = session.play((0, 0)).unwrap();
//! assert_eq!(step.info.turn.tag(), "w");
//!
//! session.play(Action::Pass).unwrap();
//! let step = session.play(Action::Pass).unwrap();
//! assert!(step.done);
//! assert_eq!(step.reward, 1.0);
//! ```

pub mod board;
pub mod capture;
pub mod constants;
pub mod error;
pub mod game;
pub mod group;
pub mod legality;
pub mod scoring;

pub use board::{BoardState, Color, Mask, Planes, Point};
pub use error::{GoError, IllegalReason};
pub use game::{
    Action, GameConfig, Session, Step, StepInfo, new_session, random_legal_move_with,
    uniform_random_legal_move,
};
pub use group::{analyze, analyze_batch, liberty_counts};
pub use scoring::RewardPolicy;

/// Total liberty points per color, as `(black, white)`.
///
/// Alias of [`group::liberty_counts`] under the name adapters expect.
pub fn group_liberty_counts(state: &BoardState) -> (usize, usize) {
    liberty_counts(state)
}
