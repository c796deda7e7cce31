//! Invalid-move mask for the side to move.
//!
//! A point is invalid if it is occupied, or if it is fully enclosed and a
//! stone there would neither capture an enemy group nor join an own group
//! that keeps another liberty. Ko is not handled here; the game controller
//! adds the ko point on top of this mask.

use crate::board::{BoardState, Color, Mask, Point, neighbors};
use crate::group::GroupMap;

/// Whether every on-board neighbor of `pt` holds a stone.
///
/// Off-board neighbors count as enclosed, so a lone point on a 1x1 board
/// is enclosed too.
pub fn is_enclosed(state: &BoardState, pt: Point) -> bool {
    neighbors(state.size(), pt).all(|n| state.stone_at(n).is_some())
}

/// Whether an empty, enclosed point would be suicide for `mover`.
///
/// The move survives if it captures (an adjacent enemy group is in atari
/// on this point) or connects to an own group with a liberty elsewhere.
fn is_suicide(groups: &GroupMap, pt: Point, mover: Color) -> bool {
    let captures = groups
        .adjacent_groups(pt, mover.opponent())
        .iter()
        .any(|g| g.has_sole_liberty(pt));
    let connects = groups
        .adjacent_groups(pt, mover)
        .iter()
        .any(|g| g.num_liberties() > 1);
    !captures && !connects
}

/// Points where `mover` may not place a stone, ignoring ko.
pub fn invalid_moves(state: &BoardState, groups: &GroupMap, mover: Color) -> Mask {
    let mut invalid = state.occupied();
    for row in 0..state.size() {
        for col in 0..state.size() {
            let pt = (row, col);
            if invalid.contains(pt) {
                continue;
            }
            if is_enclosed(state, pt) && is_suicide(groups, pt, mover) {
                invalid.insert(pt);
            }
        }
    }
    invalid
}

/// Whether `mover` may play at `pt`, ignoring ko.
pub fn is_legal(state: &BoardState, groups: &GroupMap, pt: Point, mover: Color) -> bool {
    state.in_bounds(pt)
        && state.stone_at(pt).is_none()
        && !(is_enclosed(state, pt) && is_suicide(groups, pt, mover))
}
