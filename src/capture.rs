//! Stone placement and capture resolution.

use crate::board::{BoardState, Color, Mask, Point, neighbors};
use crate::error::{GoError, IllegalReason, Result};
use crate::group::GroupMap;

/// Stones after a placement, plus what the move removed.
#[derive(Clone, Debug)]
pub struct CaptureOutcome {
    pub black: Mask,
    pub white: Mask,
    /// Points emptied by the move.
    pub captured: Mask,
    /// Size of the placed stone's group after captures.
    pub group_size: usize,
    /// Liberties of the placed stone's group after captures.
    pub group_liberties: usize,
}

impl CaptureOutcome {
    /// The emptied point when the move took exactly one stone.
    pub fn single_capture(&self) -> Option<Point> {
        if self.captured.count() == 1 {
            self.captured.points().next()
        } else {
            None
        }
    }
}

/// Place a stone of `mover` at `pt` and remove every enemy group left
/// without liberties.
///
/// `groups` must be the analysis of `state`. Ko is not checked here.
///
/// # Errors
/// - `OutOfBounds` if `pt` is off the board
/// - `Occupied` if `pt` holds a stone
/// - `Suicide` if the placed group has no liberty after captures
pub fn place_stone(
    state: &BoardState,
    groups: &GroupMap,
    pt: Point,
    mover: Color,
) -> Result<CaptureOutcome> {
    if !state.in_bounds(pt) {
        return Err(GoError::illegal(pt, IllegalReason::OutOfBounds));
    }
    if state.stone_at(pt).is_some() {
        return Err(GoError::illegal(pt, IllegalReason::Occupied));
    }

    let size = state.size();
    let mut own = state.stones(mover).clone();
    let mut enemy = state.stones(mover.opponent()).clone();
    own.insert(pt);

    let mut captured = Mask::new(size);
    for g in groups.adjacent_groups(pt, mover.opponent()) {
        if g.has_sole_liberty(pt) {
            captured.union_with(&g.stones);
        }
    }
    enemy.subtract(&captured);

    let (group_size, group_liberties) = group_at(&own, &enemy, pt);
    if group_liberties == 0 {
        return Err(GoError::illegal(pt, IllegalReason::Suicide));
    }

    if !captured.is_empty() {
        tracing::trace!(
            row = pt.0,
            col = pt.1,
            stones = captured.count(),
            "{mover} captures"
        );
    }

    let (black, white) = match mover {
        Color::Black => (own, enemy),
        Color::White => (enemy, own),
    };
    Ok(CaptureOutcome {
        black,
        white,
        captured,
        group_size,
        group_liberties,
    })
}

/// Flood-fill the group of `own` stones through `start`; returns
/// `(stones, liberties)`.
fn group_at(own: &Mask, enemy: &Mask, start: Point) -> (usize, usize) {
    let size = own.size();
    let mut stones = Mask::new(size);
    let mut liberties = Mask::new(size);
    let mut stack = vec![start];
    stones.insert(start);

    while let Some(pt) = stack.pop() {
        for n in neighbors(size, pt) {
            if own.contains(n) {
                if !stones.contains(n) {
                    stones.insert(n);
                    stack.push(n);
                }
            } else if !enemy.contains(n) {
                liberties.insert(n);
            }
        }
    }
    (stones.count(), liberties.count())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::analyze;

    fn play(
        size: usize,
        black: &[Point],
        white: &[Point],
        pt: Point,
        mover: Color,
    ) -> Result<CaptureOutcome> {
        let state = BoardState::from_stones(size, black, white, mover).unwrap();
        let groups = analyze(&state);
        place_stone(&state, &groups, pt, mover)
    }

    #[test]
    fn test_plain_placement() {
        let out = play(7, &[], &[], (3, 3), Color::Black).unwrap();
        assert!(out.black.contains((3, 3)));
        assert!(out.white.is_empty());
        assert!(out.captured.is_empty());
        assert_eq!(out.group_size, 1);
        assert_eq!(out.group_liberties, 4);
        assert_eq!(out.single_capture(), None);
    }

    #[test]
    fn test_capture_empties_exactly_the_group() {
        // White chain (0,0)-(0,1) in atari at (0,2).
        let out = play(
            5,
            &[(1, 0), (1, 1), (2, 2)],
            &[(0, 0), (0, 1), (4, 4)],
            (0, 2),
            Color::Black,
        )
        .unwrap();
        assert_eq!(out.captured.points().collect::<Vec<_>>(), vec![(0, 0), (0, 1)]);
        assert_eq!(out.white.points().collect::<Vec<_>>(), vec![(4, 4)]);
        assert_eq!(out.black.count(), 4);
        assert!(!out.black.intersects(&out.white));
    }

    #[test]
    fn test_capture_only_groups_in_atari() {
        // (0,0) is in atari at (0,1); the (0,2)-(0,3) chain still breathes.
        let out = play(
            5,
            &[(1, 0), (1, 1), (1, 2)],
            &[(0, 0), (0, 2), (0, 3)],
            (0, 1),
            Color::Black,
        )
        .unwrap();
        assert_eq!(out.captured.points().collect::<Vec<_>>(), vec![(0, 0)]);
        assert_eq!(out.single_capture(), Some((0, 0)));
        assert_eq!(out.white.count(), 2);
    }

    #[test]
    fn test_capture_two_groups_at_once() {
        let out = play(
            3,
            &[(1, 0), (1, 1), (1, 2)],
            &[(0, 0), (0, 2)],
            (0, 1),
            Color::Black,
        )
        .unwrap();
        assert_eq!(out.captured.count(), 2);
        assert_eq!(out.single_capture(), None);
        assert_eq!(out.group_size, 4);
        assert_eq!(out.group_liberties, 5);
    }

    #[test]
    fn test_rejects_occupied_and_off_board() {
        let err = play(5, &[(2, 2)], &[], (2, 2), Color::White).unwrap_err();
        assert_eq!(err.illegal_reason(), Some(IllegalReason::Occupied));
        let err = play(5, &[], &[], (5, 0), Color::White).unwrap_err();
        assert_eq!(err.illegal_reason(), Some(IllegalReason::OutOfBounds));
    }

    #[test]
    fn test_rejects_suicide() {
        let err = play(5, &[(0, 1), (1, 0)], &[], (0, 0), Color::White).unwrap_err();
        assert_eq!(err.illegal_reason(), Some(IllegalReason::Suicide));
    }

    #[test]
    fn test_ko_shape_reports_single_stone_single_liberty() {
        // White takes the black stone at (1,2) from (1,1).
        let out = play(
            7,
            &[(0, 1), (1, 0), (2, 1), (1, 2)],
            &[(0, 2), (2, 2), (1, 3)],
            (1, 1),
            Color::White,
        )
        .unwrap();
        assert_eq!(out.single_capture(), Some((1, 2)));
        assert_eq!(out.group_size, 1);
        assert_eq!(out.group_liberties, 1);
    }
}
